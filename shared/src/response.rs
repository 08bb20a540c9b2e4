//! API response envelopes
//!
//! The backend is not consistent about how it wraps lists. Three shapes
//! are seen in the wild:
//!
//! ```json
//! { "results": [...], "currentPage": 1, "pageCount": 3, "pageSize": 20, "totalItems": 47 }
//! { "data": [...], "meta": { "page": 1, "pageSize": 20, "total": 47, "totalPages": 3 } }
//! [ ... ]
//! ```
//!
//! [`ListEnvelope`] accepts all of them and [`Page`] is the one shape the
//! rest of the client works with.

use serde::{Deserialize, Serialize};

/// `{ results, currentPage, ... }` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsEnvelope<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub first_row_on_page: Option<u64>,
    #[serde(default)]
    pub last_row_on_page: Option<u64>,
}

/// `meta` block of the `{ data, meta }` envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, alias = "currentPage")]
    pub page: Option<u32>,
    #[serde(default, alias = "perPage", alias = "limit")]
    pub page_size: Option<u32>,
    #[serde(default, alias = "totalItems")]
    pub total: Option<u64>,
    #[serde(default, alias = "pageCount")]
    pub total_pages: Option<u32>,
}

/// `{ data, meta }` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// Any list response the backend may return
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Results(ResultsEnvelope<T>),
    Data(DataEnvelope<T>),
    Bare(Vec<T>),
}

/// Normalized page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page number (1-based)
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub page_count: u32,
}

impl<T> Page<T> {
    /// Build a page, filling whatever the backend left out
    pub fn new(
        items: Vec<T>,
        page: Option<u32>,
        page_size: Option<u32>,
        total_items: Option<u64>,
        page_count: Option<u32>,
    ) -> Self {
        let total_items = total_items.unwrap_or(items.len() as u64);
        let page_size = page_size.unwrap_or(items.len() as u32);
        let page_count = page_count.unwrap_or_else(|| {
            if page_size == 0 {
                1
            } else {
                total_items.div_ceil(page_size as u64).max(1) as u32
            }
        });
        Self {
            items,
            page: page.unwrap_or(1),
            page_size,
            total_items,
            page_count,
        }
    }

    /// Single page holding everything (bare array responses)
    pub fn single(items: Vec<T>) -> Self {
        Self::new(items, None, None, None, None)
    }

    pub fn has_more(&self) -> bool {
        self.page < self.page_count
    }
}

impl<T> From<ListEnvelope<T>> for Page<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        match envelope {
            ListEnvelope::Results(r) => Page::new(
                r.results,
                r.current_page,
                r.page_size,
                r.total_items,
                r.page_count,
            ),
            ListEnvelope::Data(d) => {
                let meta = d.meta.unwrap_or_default();
                Page::new(d.data, meta.page, meta.page_size, meta.total, meta.total_pages)
            }
            ListEnvelope::Bare(items) => Page::single(items),
        }
    }
}

/// Single entity, bare or wrapped in `{ data }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(alias = "error", alias = "title")]
    pub message: String,
}

impl ApiErrorBody {
    /// Error code as text, whether the backend sent a number or a string
    pub fn code_text(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_results_envelope_normalizes() {
        let raw = json!({
            "results": [1, 2, 3],
            "currentPage": 2,
            "pageCount": 4,
            "pageSize": 3,
            "totalItems": 11,
            "firstRowOnPage": 4,
            "lastRowOnPage": 6
        });
        let page: Page<u32> = serde_json::from_value::<ListEnvelope<u32>>(raw).unwrap().into();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_count, 4);
        assert_eq!(page.total_items, 11);
        assert!(page.has_more());
    }

    #[test]
    fn test_data_meta_envelope_normalizes() {
        let raw = json!({
            "data": ["a", "b"],
            "meta": { "page": 1, "pageSize": 2, "total": 5 }
        });
        let page: Page<String> = serde_json::from_value::<ListEnvelope<String>>(raw)
            .unwrap()
            .into();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn test_bare_array_is_single_page() {
        let page: Page<u8> = serde_json::from_value::<ListEnvelope<u8>>(json!([7, 8]))
            .unwrap()
            .into();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total_items, 2);
        assert!(!page.has_more());
    }

    #[test]
    fn test_empty_bare_array() {
        let page: Page<u8> = Page::single(vec![]);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn test_entity_envelope() {
        let wrapped: Envelope<u8> = serde_json::from_value(json!({ "data": 4 })).unwrap();
        assert_eq!(wrapped.into_inner(), 4);
        let bare: Envelope<u8> = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(bare.into_inner(), 4);
    }

    #[test]
    fn test_error_body_code_text() {
        let body: ApiErrorBody =
            serde_json::from_value(json!({ "code": 4001, "message": "nope" })).unwrap();
        assert_eq!(body.code_text().as_deref(), Some("4001"));
        let body: ApiErrorBody = serde_json::from_value(json!({ "error": "bad" })).unwrap();
        assert_eq!(body.message, "bad");
        assert!(body.code_text().is_none());
    }
}
