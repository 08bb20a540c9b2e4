//! Cancellation Model (取消与退款)
//!
//! A cancellation is never undone. Its refund carries an independent
//! lifecycle: `Pending` until processed or rejected, or `NotApplicable`
//! from the start.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::error::{TransitionError, ValidationError};

/// Refund status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefundStatus {
    Pending,
    Processed,
    Rejected,
    NotApplicable,
}

impl RefundStatus {
    pub const ALL: [RefundStatus; 4] = [
        Self::Pending,
        Self::Processed,
        Self::Rejected,
        Self::NotApplicable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processed => "Processed",
            Self::Rejected => "Rejected",
            Self::NotApplicable => "NotApplicable",
        }
    }
}

impl fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the refund controls should be offered at all
pub fn can_process_refund(status: RefundStatus) -> bool {
    status == RefundStatus::Pending
}

/// Who cancelled the appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancelledByRole {
    Customer,
    Professional,
    Company,
    Admin,
}

impl CancelledByRole {
    pub const ALL: [CancelledByRole; 4] = [
        Self::Customer,
        Self::Professional,
        Self::Company,
        Self::Admin,
    ];
}

/// Cancellation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    pub id: String,
    pub appointment_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub professional_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    pub cancelled_by: CancelledByRole,
    #[serde(default)]
    pub reason: Option<String>,
    pub cancelled_at: DateTime<Utc>,
    pub refund_status: RefundStatus,
    #[serde(default)]
    pub refund_amount: Option<f64>,
    #[serde(default)]
    pub refund_note: Option<String>,
    #[serde(default)]
    pub refund_processed_at: Option<DateTime<Utc>>,
}

impl Cancellation {
    pub fn can_process_refund(&self) -> bool {
        can_process_refund(self.refund_status)
    }

    /// Local guard mirroring the backend rule
    pub fn check_refundable(&self) -> Result<(), TransitionError> {
        if self.can_process_refund() {
            Ok(())
        } else {
            Err(TransitionError::new(
                "refund",
                self.refund_status.as_str(),
                "process",
            ))
        }
    }
}

impl Identified for Cancellation {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create cancellation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationCreate {
    pub appointment_id: String,
    pub cancelled_by: CancelledByRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub cancelled_at: DateTime<Utc>,
    /// Defaults to `Pending` when a refund is owed
    pub refund_status: RefundStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
}

impl CancellationCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.appointment_id.trim().is_empty() {
            return Err(ValidationError::new("appointmentId", "is required"));
        }
        if let Some(amount) = self.refund_amount
            && amount < 0.0
        {
            return Err(ValidationError::new("refundAmount", "must not be negative"));
        }
        Ok(())
    }
}

/// Update cancellation payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_note: Option<String>,
}

/// Outcome of refund processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundDecision {
    Processed,
    Rejected,
}

impl From<RefundDecision> for RefundStatus {
    fn from(decision: RefundDecision) -> Self {
        match decision {
            RefundDecision::Processed => RefundStatus::Processed,
            RefundDecision::Rejected => RefundStatus::Rejected,
        }
    }
}

/// Process refund payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRefund {
    pub refund_status: RefundDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_note: Option<String>,
}

/// List filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancellationFilter {
    pub company_id: Option<String>,
    pub customer_id: Option<String>,
    pub refund_status: Option<RefundStatus>,
}

impl CancellationFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.company_id {
            query.push(("companyId", id.clone()));
        }
        if let Some(id) = &self.customer_id {
            query.push(("customerId", id.clone()));
        }
        if let Some(status) = self.refund_status {
            query.push(("refundStatus", status.as_str().to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_can_process_refund_only_when_pending() {
        assert!(can_process_refund(RefundStatus::Pending));
        assert!(!can_process_refund(RefundStatus::Processed));
        assert!(!can_process_refund(RefundStatus::Rejected));
        assert!(!can_process_refund(RefundStatus::NotApplicable));
    }

    #[test]
    fn test_cancellation_wire_format() {
        let raw = json!({
            "id": "c1",
            "appointmentId": "apt-9",
            "cancelledBy": "Customer",
            "cancelledAt": "2024-02-01T08:30:00Z",
            "refundStatus": "NotApplicable"
        });
        let cancellation: Cancellation = serde_json::from_value(raw).unwrap();
        assert_eq!(cancellation.refund_status, RefundStatus::NotApplicable);
        assert_eq!(cancellation.cancelled_by, CancelledByRole::Customer);
        let err = cancellation.check_refundable().unwrap_err();
        assert_eq!(err.to_string(), "cannot process a refund that is NotApplicable");
    }

    #[test]
    fn test_process_refund_payload() {
        let payload = ProcessRefund {
            refund_status: RefundDecision::Processed,
            refund_amount: Some(45.5),
            refund_note: None,
        };
        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value, json!({ "refundStatus": "Processed", "refundAmount": 45.5 }));
    }

    #[test]
    fn test_negative_refund_rejected() {
        let form = CancellationCreate {
            appointment_id: "apt-1".to_string(),
            cancelled_by: CancelledByRole::Admin,
            reason: None,
            cancelled_at: Utc::now(),
            refund_status: RefundStatus::Pending,
            refund_amount: Some(-1.0),
        };
        assert_eq!(form.validate().unwrap_err().field, "refundAmount");
    }
}
