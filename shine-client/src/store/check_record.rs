//! Check-in / check-out store

use shared::filter::{needing_check_in, needing_check_out};
use shared::models::{CheckInPayload, CheckOutPayload, CheckRecord, CheckRecordFilter};
use tokio_util::sync::CancellationToken;

use super::{RequestStatus, find_by_id, remove_by_id, replace_by_id, upsert};
use crate::api::check_record as api;
use crate::http::HttpClient;
use crate::notify::{Notifier, Toast, TracingNotifier};

/// Session cache of check records
pub struct CheckRecordStore<C, N = TracingNotifier> {
    client: C,
    notifier: N,
    scope: CancellationToken,
    status: RequestStatus,
    records: Vec<CheckRecord>,
    filter: CheckRecordFilter,
}

impl<C: HttpClient, N: Notifier> CheckRecordStore<C, N> {
    pub fn new(client: C, notifier: N) -> Self {
        Self {
            client,
            notifier,
            scope: CancellationToken::new(),
            status: RequestStatus::default(),
            records: Vec::new(),
            filter: CheckRecordFilter::default(),
        }
    }

    pub fn with_scope(mut self, scope: CancellationToken) -> Self {
        self.scope = scope;
        self
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error.as_deref()
    }

    pub fn needing_check_in(&self) -> Vec<CheckRecord> {
        needing_check_in(&self.records)
    }

    pub fn needing_check_out(&self) -> Vec<CheckRecord> {
        needing_check_out(&self.records)
    }

    pub async fn fetch_records(&mut self, filter: CheckRecordFilter) -> bool {
        let fetched = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to load check records",
                api::list(&self.client, &filter),
            )
            .await;
        match fetched {
            Some(records) => {
                self.records = records;
                self.filter = filter;
                true
            }
            None => false,
        }
    }

    pub async fn refresh(&mut self) -> bool {
        let filter = self.filter.clone();
        self.fetch_records(filter).await
    }

    /// Open a record. The backend may return an existing pending record for
    /// the appointment, which then gets replaced in place.
    pub async fn check_in(&mut self, payload: CheckInPayload) -> Option<CheckRecord> {
        const TITLE: &str = "Failed to check in";
        let existing = self
            .records
            .iter()
            .find(|r| {
                r.appointment_id == payload.appointment_id
                    && r.professional_id == payload.professional_id
            });
        if let Some(record) = existing
            && let Err(err) = record.status.check_in()
        {
            self.status.fail(&self.notifier, TITLE, err.into());
            return None;
        }

        let record = self
            .status
            .settle(&self.notifier, &self.scope, TITLE, api::check_in(&self.client, &payload))
            .await?;
        tracing::info!(id = %record.id, appointment_id = %record.appointment_id, "checked in");
        upsert(&mut self.records, record.clone());
        self.notifier.notify(Toast::success("Checked in"));
        Some(record)
    }

    pub async fn check_out(&mut self, id: &str, payload: CheckOutPayload) -> Option<CheckRecord> {
        const TITLE: &str = "Failed to check out";
        if let Some(record) = find_by_id(&self.records, id) {
            if let Err(err) = record.status.check_out() {
                self.status.fail(&self.notifier, TITLE, err.into());
                return None;
            }
            if let Some(check_in_time) = record.check_in_time
                && payload.check_out_time < check_in_time
            {
                self.status.fail(
                    &self.notifier,
                    TITLE,
                    shared::ValidationError::new("checkOutTime", "must not precede check-in")
                        .into(),
                );
                return None;
            }
        }

        let record = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                TITLE,
                api::check_out(&self.client, id, &payload),
            )
            .await?;
        tracing::info!(id, duration = %record.duration_label(), "checked out");
        replace_by_id(&mut self.records, record.clone());
        self.notifier.notify(Toast::success("Checked out"));
        Some(record)
    }

    pub async fn delete_record(&mut self, id: &str) -> bool {
        let deleted = self
            .status
            .settle(
                &self.notifier,
                &self.scope,
                "Failed to delete check record",
                api::delete(&self.client, id),
            )
            .await;
        if deleted.is_none() {
            return false;
        }
        remove_by_id(&mut self.records, id);
        true
    }
}
