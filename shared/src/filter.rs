//! Client-side filtering
//!
//! Every filter here only ever drops entries, so results are subsets of
//! the input and re-applying the same filter is a no-op.

use chrono::{DateTime, Utc};

use crate::models::{
    ActiveStatus, CheckRecord, CheckStatus, DirectoryEntry, RescheduleRequest, RescheduleStatus,
};

/// Keep the entries matching `predicate`, in their original order
pub fn filter_items<T: Clone>(items: &[T], predicate: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| predicate(item)).cloned().collect()
}

/// Tabs of the reschedule requests page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RescheduleTab {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl RescheduleTab {
    pub fn matches(&self, request: &RescheduleRequest) -> bool {
        match self {
            Self::All => true,
            Self::Pending => request.status == RescheduleStatus::Pending,
            Self::Approved => request.status == RescheduleStatus::Approved,
            Self::Rejected => request.status == RescheduleStatus::Rejected,
            Self::Cancelled => request.status == RescheduleStatus::Cancelled,
        }
    }
}

/// Inclusive date range; either bound may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, value: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| value >= from) && self.to.is_none_or(|to| value <= to)
    }

    /// Matches on the proposed start of a request
    pub fn matches_request(&self, request: &RescheduleRequest) -> bool {
        self.contains(request.proposed_start)
    }
}

/// Check records still waiting for a check-in
pub fn needing_check_in(records: &[CheckRecord]) -> Vec<CheckRecord> {
    filter_items(records, |r| r.status == CheckStatus::Pending)
}

/// Check records checked in but not yet out
pub fn needing_check_out(records: &[CheckRecord]) -> Vec<CheckRecord> {
    filter_items(records, |r| r.status == CheckStatus::CheckedIn)
}

/// Sort order of directory list pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
}

/// Search/filter state of a directory list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<ActiveStatus>,
    /// Company type / user role
    pub kind: Option<String>,
    pub team_id: Option<String>,
    pub company_id: Option<String>,
    pub sort: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            kind: None,
            team_id: None,
            company_id: None,
            sort: SortOrder::NameAsc,
            page: 1,
            page_size: 20,
        }
    }
}

impl ListQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: ActiveStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Case-insensitive search over name and email plus exact-match filters
    pub fn matches<T: DirectoryEntry>(&self, item: &T) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let in_name = item.name().to_lowercase().contains(&needle);
            let in_email = item
                .email()
                .is_some_and(|email| email.to_lowercase().contains(&needle));
            if !in_name && !in_email {
                return false;
            }
        }
        if self.status.is_some_and(|status| item.status() != status) {
            return false;
        }
        if let Some(kind) = &self.kind
            && item.kind_label() != Some(kind.as_str())
        {
            return false;
        }
        if let Some(team_id) = &self.team_id
            && item.team_id() != Some(team_id.as_str())
        {
            return false;
        }
        if let Some(company_id) = &self.company_id
            && item.company_id() != Some(company_id.as_str())
        {
            return false;
        }
        true
    }

    /// Filter and sort, without paging
    pub fn apply<T: DirectoryEntry + Clone>(&self, items: &[T]) -> Vec<T> {
        let mut matched = filter_items(items, |item| self.matches(item));
        matched.sort_by(|a, b| {
            let ord = a.name().to_lowercase().cmp(&b.name().to_lowercase());
            match self.sort {
                SortOrder::NameAsc => ord,
                SortOrder::NameDesc => ord.reverse(),
            }
        });
        matched
    }

    /// Filter criteria as query-string pairs (paging included)
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        if let Some(status) = self.status {
            let status = match status {
                ActiveStatus::Active => "active",
                ActiveStatus::Inactive => "inactive",
            };
            query.push(("status", status.to_string()));
        }
        if let Some(kind) = &self.kind {
            query.push(("type", kind.clone()));
        }
        if let Some(team_id) = &self.team_id {
            query.push(("teamId", team_id.clone()));
        }
        if let Some(company_id) = &self.company_id {
            query.push(("companyId", company_id.clone()));
        }
        if self.sort == SortOrder::NameDesc {
            query.push(("sort", "name_desc".to_string()));
        }
        query
    }

    /// Stable key identifying this query's result set
    pub fn cache_key(&self) -> String {
        self.to_query()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}
