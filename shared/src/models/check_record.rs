//! Check Record Model (签到/签退)
//!
//! `pending -> checked_in -> checked_out`

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::error::TransitionError;

const ENTITY: &str = "check record";

/// Check record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pending,
    CheckedIn,
    CheckedOut,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 3] = [Self::Pending, Self::CheckedIn, Self::CheckedOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
        }
    }

    pub fn check_in(self) -> Result<Self, TransitionError> {
        match self {
            Self::Pending => Ok(Self::CheckedIn),
            other => Err(TransitionError::new(ENTITY, other.as_str(), "check in")),
        }
    }

    pub fn check_out(self) -> Result<Self, TransitionError> {
        match self {
            Self::CheckedIn => Ok(Self::CheckedOut),
            other => Err(TransitionError::new(ENTITY, other.as_str(), "check out")),
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GPS fix taken at check-in/out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Check record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecord {
    pub id: String,
    pub appointment_id: String,
    pub professional_id: String,
    pub customer_id: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_in_location: Option<GeoPoint>,
    #[serde(default)]
    pub check_out_location: Option<GeoPoint>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckRecord {
    pub fn duration_label(&self) -> String {
        crate::format::calculate_duration(self.check_in_time, self.check_out_time)
    }
}

impl Identified for CheckRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Check-in payload. Check-out time is unknown at this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPayload {
    pub appointment_id: String,
    pub professional_id: String,
    pub customer_id: String,
    pub check_in_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Check-out payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutPayload {
    pub check_out_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// List filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckRecordFilter {
    pub professional_id: Option<String>,
    pub customer_id: Option<String>,
    pub appointment_id: Option<String>,
    pub status: Option<CheckStatus>,
}

impl CheckRecordFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.professional_id {
            query.push(("professionalId", id.clone()));
        }
        if let Some(id) = &self.customer_id {
            query.push(("customerId", id.clone()));
        }
        if let Some(id) = &self.appointment_id {
            query.push(("appointmentId", id.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_check_lifecycle() {
        let status = CheckStatus::Pending.check_in().unwrap();
        assert_eq!(status, CheckStatus::CheckedIn);
        assert_eq!(status.check_out().unwrap(), CheckStatus::CheckedOut);
        assert!(CheckStatus::Pending.check_out().is_err());
        assert!(CheckStatus::CheckedOut.check_in().is_err());
        assert!(CheckStatus::CheckedOut.check_out().is_err());
    }

    #[test]
    fn test_check_in_payload_omits_check_out() {
        let payload = CheckInPayload {
            appointment_id: "apt-1".to_string(),
            professional_id: "pro-1".to_string(),
            customer_id: "cus-1".to_string(),
            check_in_time: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            location: None,
            notes: None,
        };
        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value["checkInTime"], json!("2024-03-01T08:00:00Z"));
        assert!(value.get("checkOutTime").is_none());
    }

    #[test]
    fn test_record_status_wire_format() {
        let raw = json!({
            "id": "k1",
            "appointmentId": "apt-1",
            "professionalId": "pro-1",
            "customerId": "cus-1",
            "status": "checked_in",
            "checkInTime": "2024-03-01T08:00:00Z"
        });
        let record: CheckRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.status, CheckStatus::CheckedIn);
        assert_eq!(record.duration_label(), "-");
    }
}
