//! Data models
//!
//! Mirrors the backend JSON (camelCase keys). Every timestamp is a
//! `DateTime<Utc>` in memory and an ISO-8601 string on the wire.

pub mod cancellation;
pub mod check_record;
pub mod directory;
pub mod reschedule;

// Re-exports
pub use cancellation::*;
pub use check_record::*;
pub use directory::*;
pub use reschedule::*;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Reject empty or inverted windows
    pub fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        if self.end <= self.start {
            return Err(ValidationError::new(field, "end must be after start"));
        }
        Ok(())
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Trait for entities addressable by a backend id
pub trait Identified {
    fn id(&self) -> &str;
}
