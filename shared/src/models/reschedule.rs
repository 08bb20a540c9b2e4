//! Reschedule Request Model (改期申请)
//!
//! A proposal to move an existing appointment to a new time window.
//!
//! ```text
//! pending --approve--> approved   (terminal)
//! pending --reject-->  rejected   (terminal)
//! pending --cancel-->  cancelled  (terminal)
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identified, TimeWindow};
use crate::error::{TransitionError, ValidationError};

const ENTITY: &str = "reschedule request";

/// Reschedule request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RescheduleStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// Action applied to a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescheduleAction {
    Approve,
    Reject,
    Cancel,
}

impl RescheduleAction {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
        }
    }
}

impl RescheduleStatus {
    pub const ALL: [RescheduleStatus; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Next status after `action`, or an error when the request is already settled
    pub fn apply(self, action: RescheduleAction) -> Result<Self, TransitionError> {
        match (self, action) {
            (Self::Pending, RescheduleAction::Approve) => Ok(Self::Approved),
            (Self::Pending, RescheduleAction::Reject) => Ok(Self::Rejected),
            (Self::Pending, RescheduleAction::Cancel) => Ok(Self::Cancelled),
            (from, action) => Err(TransitionError::new(ENTITY, from.as_str(), action.verb())),
        }
    }
}

impl fmt::Display for RescheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who asked for the reschedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequesterRole {
    Admin,
    Company,
    Professional,
    Customer,
}

impl RequesterRole {
    pub const ALL: [RequesterRole; 4] = [
        Self::Admin,
        Self::Company,
        Self::Professional,
        Self::Customer,
    ];
}

/// Reschedule request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub id: String,
    pub appointment_id: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub professional_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
    pub proposed_start: DateTime<Utc>,
    pub proposed_end: DateTime<Utc>,
    /// Set by the responder on approval
    #[serde(default)]
    pub actual_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: RescheduleStatus,
    pub requested_by: RequesterRole,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub response_note: Option<String>,
    /// Stamped by the backend when a notification went out
    #[serde(default)]
    pub notified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RescheduleRequest {
    pub fn original_window(&self) -> TimeWindow {
        TimeWindow::new(self.original_start, self.original_end)
    }

    pub fn proposed_window(&self) -> TimeWindow {
        TimeWindow::new(self.proposed_start, self.proposed_end)
    }

    /// The window the appointment ends up in once approved
    pub fn effective_window(&self) -> Option<TimeWindow> {
        match self.status {
            RescheduleStatus::Approved => Some(TimeWindow::new(
                self.actual_start.unwrap_or(self.proposed_start),
                self.actual_end.unwrap_or(self.proposed_end),
            )),
            RescheduleStatus::Pending => Some(self.proposed_window()),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RescheduleStatus::Pending
    }
}

impl Identified for RescheduleRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create reschedule request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequestCreate {
    pub appointment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
    pub proposed_start: DateTime<Utc>,
    pub proposed_end: DateTime<Utc>,
    pub requested_by: RequesterRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RescheduleRequestCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.appointment_id.trim().is_empty() {
            return Err(ValidationError::new("appointmentId", "is required"));
        }
        let original = TimeWindow::new(self.original_start, self.original_end);
        let proposed = TimeWindow::new(self.proposed_start, self.proposed_end);
        original.validate("original")?;
        proposed.validate("proposed")?;
        if original == proposed {
            return Err(ValidationError::new(
                "proposed",
                "must differ from the original window",
            ));
        }
        Ok(())
    }
}

/// Update reschedule request payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RescheduleRequestUpdate {
    /// Check the windows this patch would leave on `current`. Without a
    /// cached entry only fully given windows can be checked.
    pub fn validate(&self, current: Option<&RescheduleRequest>) -> Result<(), ValidationError> {
        let window = |start: Option<DateTime<Utc>>,
                      end: Option<DateTime<Utc>>,
                      cached: Option<(DateTime<Utc>, DateTime<Utc>)>| {
            match (start, end, cached) {
                (None, None, _) => None,
                (Some(s), Some(e), _) => Some(TimeWindow::new(s, e)),
                (s, e, Some((cs, ce))) => Some(TimeWindow::new(s.unwrap_or(cs), e.unwrap_or(ce))),
                _ => None,
            }
        };
        let original = window(
            self.original_start,
            self.original_end,
            current.map(|r| (r.original_start, r.original_end)),
        );
        let proposed = window(
            self.proposed_start,
            self.proposed_end,
            current.map(|r| (r.proposed_start, r.proposed_end)),
        );
        if let Some(original) = original {
            original.validate("original")?;
        }
        if let Some(proposed) = proposed {
            proposed.validate("proposed")?;
        }
        Ok(())
    }
}

/// Responder's decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RescheduleDecision {
    Approved,
    Rejected,
}

impl From<RescheduleDecision> for RescheduleAction {
    fn from(decision: RescheduleDecision) -> Self {
        match decision {
            RescheduleDecision::Approved => RescheduleAction::Approve,
            RescheduleDecision::Rejected => RescheduleAction::Reject,
        }
    }
}

/// Respond payload (approve / reject)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleResponse {
    pub status: RescheduleDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RescheduleResponse {
    pub fn approve() -> Self {
        Self {
            status: RescheduleDecision::Approved,
            actual_start: None,
            actual_end: None,
            note: None,
        }
    }

    pub fn reject(note: impl Into<String>) -> Self {
        Self {
            status: RescheduleDecision::Rejected,
            actual_start: None,
            actual_end: None,
            note: Some(note.into()),
        }
    }

    pub fn with_actual(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.actual_start = Some(start);
        self.actual_end = Some(end);
        self
    }

    /// The actual window is optional but must be given whole
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.actual_start, self.actual_end) {
            (Some(start), Some(end)) => TimeWindow::new(start, end).validate("actual"),
            (None, None) => Ok(()),
            _ => Err(ValidationError::new(
                "actual",
                "start and end must be given together",
            )),
        }
    }
}

/// Cancel payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RescheduleCancel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// List filter. Every field narrows the server-side result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RescheduleFilter {
    pub company_id: Option<String>,
    pub customer_id: Option<String>,
    pub professional_id: Option<String>,
    pub team_id: Option<String>,
    pub status: Option<RescheduleStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl RescheduleFilter {
    pub fn by_company(id: impl Into<String>) -> Self {
        Self {
            company_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_customer(id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_professional(id: impl Into<String>) -> Self {
        Self {
            professional_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_team(id: impl Into<String>) -> Self {
        Self {
            team_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_status(status: RescheduleStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn by_date_range(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    /// Query-string pairs, dates as ISO-8601
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.company_id {
            query.push(("companyId", id.clone()));
        }
        if let Some(id) = &self.customer_id {
            query.push(("customerId", id.clone()));
        }
        if let Some(id) = &self.professional_id {
            query.push(("professionalId", id.clone()));
        }
        if let Some(id) = &self.team_id {
            query.push(("teamId", id.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(from) = self.from {
            query.push(("startDate", from.to_rfc3339()));
        }
        if let Some(to) = self.to {
            query.push(("endDate", to.to_rfc3339()));
        }
        query
    }
}
