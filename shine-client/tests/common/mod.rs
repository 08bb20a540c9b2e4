// shine-client/tests/common/mod.rs
// In-memory backend for store tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use shine_client::http::{HttpClient, Query};
use shine_client::{ClientError, ClientResult};

/// List envelope the fake answers with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvelopeStyle {
    #[default]
    Results,
    DataMeta,
    Bare,
}

/// A recorded request
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct State {
    collections: HashMap<String, Vec<Value>>,
    calls: Vec<Call>,
    failing: Vec<String>,
    empty: Vec<String>,
    next_id: u64,
    envelope: EnvelopeStyle,
    delay: Option<Duration>,
}

/// Fake REST backend keeping JSON collections in memory
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn seed(&self, collection: &str, items: Vec<Value>) {
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .extend(items);
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Every request whose path starts with `prefix` fails from now on
    pub fn fail_path(&self, prefix: &str) {
        self.lock().failing.push(prefix.to_string());
    }

    /// Requests whose path ends with `suffix` still apply but answer `null`
    pub fn answer_empty(&self, suffix: &str) {
        self.lock().empty.push(suffix.to_string());
    }

    pub fn heal(&self) {
        self.lock().failing.clear();
    }

    pub fn set_envelope(&self, style: EnvelopeStyle) {
        self.lock().envelope = style;
    }

    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.lock().calls.last().cloned()
    }

    async fn dispatch(
        &self,
        method: &'static str,
        path: &str,
        query: &Query,
        body: Option<Value>,
    ) -> ClientResult<Value> {
        let delay = self.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let query = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let value = self.handle(method, path, query, body)?;
        if self.lock().empty.iter().any(|s| path.ends_with(s.as_str())) {
            return Ok(Value::Null);
        }
        Ok(value)
    }

    fn handle(
        &self,
        method: &'static str,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> ClientResult<Value> {
        let mut state = self.lock();
        state.calls.push(Call {
            method,
            path: path.to_string(),
            query: query.clone(),
            body: body.clone(),
        });
        if state.failing.iter().any(|p| path.starts_with(p.as_str())) {
            return Err(ClientError::Internal("connection refused".into()));
        }

        let body = body.unwrap_or(Value::Null);
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match (method, segments.as_slice()) {
            ("GET", [coll]) => Ok(state.list(coll, &query)),
            ("GET", [coll, id]) => state
                .find(coll, id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(path.to_string())),
            ("POST", [coll, "check-in"]) => {
                let existing = state.collections.get(*coll).and_then(|items| {
                    items
                        .iter()
                        .find(|i| {
                            i["appointmentId"] == body["appointmentId"]
                                && i["professionalId"] == body["professionalId"]
                        })
                        .map(|i| i["id"].as_str().unwrap_or_default().to_string())
                });
                let patch = json!({
                    "appointmentId": body["appointmentId"],
                    "professionalId": body["professionalId"],
                    "customerId": body["customerId"],
                    "status": "checked_in",
                    "checkInTime": body["checkInTime"],
                    "notes": body.get("notes").cloned().unwrap_or(Value::Null),
                });
                match existing {
                    Some(id) => state.patch(coll, &id, patch, path),
                    None => Ok(state.insert(coll, patch)),
                }
            }
            ("POST", [coll]) => {
                let mut item = body;
                if *coll == "reschedule-requests" && item.get("status").is_none() {
                    item["status"] = json!("pending");
                }
                Ok(state.insert(coll, item))
            }
            ("POST", [coll, id, "notify"]) => {
                state.patch(coll, id, json!({ "notifiedAt": "2024-01-11T08:00:00Z" }), path)
            }
            ("PUT", [coll, id]) => state.patch(coll, id, body, path),
            ("PUT", [coll, id, "respond"]) => {
                let mut patch = Map::new();
                patch.insert("status".into(), body["status"].clone());
                for key in ["actualStart", "actualEnd"] {
                    if let Some(v) = body.get(key) {
                        patch.insert(key.into(), v.clone());
                    }
                }
                if let Some(note) = body.get("note") {
                    patch.insert("responseNote".into(), note.clone());
                }
                state.patch(coll, id, Value::Object(patch), path)
            }
            ("PUT", [coll, id, "cancel"]) => {
                let mut patch = json!({ "status": "cancelled" });
                if let Some(note) = body.get("note") {
                    patch["responseNote"] = note.clone();
                }
                state.patch(coll, id, patch, path)
            }
            ("PUT", [coll, id, "refund"]) => {
                let mut patch = body;
                patch["refundProcessedAt"] = json!("2024-02-02T10:00:00Z");
                state.patch(coll, id, patch, path)
            }
            ("PUT", [coll, id, "check-out"]) => {
                let mut patch = json!({
                    "status": "checked_out",
                    "checkOutTime": body["checkOutTime"],
                });
                if let Some(notes) = body.get("notes") {
                    patch["notes"] = notes.clone();
                }
                state.patch(coll, id, patch, path)
            }
            ("DELETE", [coll, id]) => {
                if let Some(items) = state.collections.get_mut(*coll) {
                    items.retain(|i| i["id"] != *id);
                }
                Ok(Value::Null)
            }
            _ => Err(ClientError::NotFound(path.to_string())),
        }
    }
}

impl State {
    fn find(&self, coll: &str, id: &str) -> Option<&Value> {
        self.collections
            .get(coll)
            .and_then(|items| items.iter().find(|i| i["id"] == id))
    }

    fn insert(&mut self, coll: &str, mut item: Value) -> Value {
        self.next_id += 1;
        item["id"] = json!(format!("{coll}-{}", self.next_id));
        self.collections
            .entry(coll.to_string())
            .or_default()
            .push(item.clone());
        item
    }

    fn patch(&mut self, coll: &str, id: &str, patch: Value, path: &str) -> ClientResult<Value> {
        let item = self
            .collections
            .get_mut(coll)
            .and_then(|items| items.iter_mut().find(|i| i["id"] == id))
            .ok_or_else(|| ClientError::NotFound(path.to_string()))?;
        if let (Value::Object(target), Value::Object(fields)) = (item, patch) {
            for (key, value) in fields {
                target.insert(key, value);
            }
            return Ok(Value::Object(target.clone()));
        }
        Err(ClientError::Validation("expected JSON objects".into()))
    }

    fn list(&self, coll: &str, query: &[(String, String)]) -> Value {
        let mut matched = self.collections.get(coll).cloned().unwrap_or_default();
        let mut page = 1usize;
        let mut page_size = None;
        let mut from: Option<DateTime<Utc>> = None;
        let mut to: Option<DateTime<Utc>> = None;

        for (key, value) in query {
            match key.as_str() {
                "page" => page = value.parse().unwrap_or(1),
                "pageSize" => page_size = value.parse::<usize>().ok(),
                "sort" => {}
                "search" => {
                    let needle = value.to_lowercase();
                    matched.retain(|i| {
                        i["name"]
                            .as_str()
                            .is_some_and(|n| n.to_lowercase().contains(&needle))
                    });
                }
                "startDate" => from = value.parse().ok(),
                "endDate" => to = value.parse().ok(),
                field => matched.retain(|i| field_matches(&i[field], value)),
            }
        }
        matched.retain(|i| {
            let Some(start) = i["proposedStart"]
                .as_str()
                .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            else {
                return true;
            };
            from.is_none_or(|f| start >= f) && to.is_none_or(|t| start <= t)
        });

        let total = matched.len();
        let size = page_size.unwrap_or(total).max(1);
        let start = (page.max(1) - 1) * size;
        let slice: Vec<Value> = matched.into_iter().skip(start).take(size).collect();
        let page_count = total.div_ceil(size).max(1);

        match self.envelope {
            EnvelopeStyle::Bare => Value::Array(slice),
            EnvelopeStyle::Results => json!({
                "results": slice,
                "currentPage": page,
                "pageCount": page_count,
                "pageSize": size,
                "totalItems": total,
                "firstRowOnPage": start + 1,
                "lastRowOnPage": start + slice.len(),
            }),
            EnvelopeStyle::DataMeta => json!({
                "data": slice,
                "meta": { "page": page, "pageSize": size, "total": total, "totalPages": page_count },
            }),
        }
    }
}

fn field_matches(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::Bool(b) => b.to_string() == expected,
        _ => false,
    }
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str, query: &Query) -> ClientResult<T> {
        let value = self.dispatch("GET", path, query, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        let value = self.dispatch("POST", path, &[], Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let value = self.dispatch("POST", path, &[], None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn put<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        let value = self.dispatch("PUT", path, &[], Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let value = self.dispatch("DELETE", path, &[], None).await?;
        Ok(serde_json::from_value(value)?)
    }
}

// ========== Fixtures ==========

pub fn reschedule_json(id: &str, status: &str, company_id: &str) -> Value {
    json!({
        "id": id,
        "appointmentId": format!("apt-{id}"),
        "companyId": company_id,
        "customerId": "cus-1",
        "originalStart": "2024-01-10T09:00:00Z",
        "originalEnd": "2024-01-10T11:00:00Z",
        "proposedStart": "2024-01-12T09:00:00Z",
        "proposedEnd": "2024-01-12T11:00:00Z",
        "status": status,
        "requestedBy": "customer",
        "reason": "Customer travelling"
    })
}

pub fn cancellation_json(id: &str, refund_status: &str) -> Value {
    json!({
        "id": id,
        "appointmentId": format!("apt-{id}"),
        "customerId": "cus-1",
        "cancelledBy": "Customer",
        "reason": "Sick",
        "cancelledAt": "2024-02-01T08:00:00Z",
        "refundStatus": refund_status,
        "refundAmount": 80.0
    })
}

pub fn check_record_json(id: &str, status: &str) -> Value {
    let check_in_time = match status {
        "pending" => Value::Null,
        _ => json!("2024-03-01T08:00:00Z"),
    };
    json!({
        "id": id,
        "appointmentId": format!("apt-{id}"),
        "professionalId": "pro-1",
        "customerId": "cus-1",
        "status": status,
        "checkInTime": check_in_time
    })
}

pub fn company_json(id: &str, name: &str, status: &str) -> Value {
    json!({ "id": id, "name": name, "email": format!("{id}@example.com"), "status": status, "type": "residential" })
}

pub fn named_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "status": "active" })
}
