//! Display helpers
//!
//! Pure lookups and formatters for dates, statuses and roles. Colors are
//! utility-class strings consumed as-is by the UI layer.

use chrono::{DateTime, Utc};

use crate::models::{CancelledByRole, CheckStatus, RefundStatus, RequesterRole, RescheduleStatus};

/// `dd/MM/yyyy`
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// `dd/MM/yyyy HH:mm`
pub fn format_date_time(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

/// `HH:mm`
pub fn format_time(value: DateTime<Utc>) -> String {
    value.format("%H:%M").to_string()
}

/// Formats an optional timestamp, `"-"` when absent
pub fn format_optional(value: Option<DateTime<Utc>>, format: fn(DateTime<Utc>) -> String) -> String {
    value.map(format).unwrap_or_else(|| "-".to_string())
}

/// Humanized distance between `target` and `now`: "in 3 days", "about 2 hours ago"
pub fn relative_time(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (target - now).num_seconds();
    let abs = seconds.unsigned_abs();

    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let rounded = |unit: u64| (abs + unit / 2) / unit;

    if abs < 45 {
        return "just now".to_string();
    }

    let distance = if abs < 90 {
        "1 minute".to_string()
    } else if abs < 45 * MINUTE {
        format!("{} minutes", rounded(MINUTE))
    } else if abs < 90 * MINUTE {
        "about 1 hour".to_string()
    } else if abs < DAY {
        format!("about {} hours", rounded(HOUR))
    } else if abs < 42 * HOUR {
        "1 day".to_string()
    } else if abs < 30 * DAY {
        format!("{} days", rounded(DAY))
    } else if abs < 45 * DAY {
        "about 1 month".to_string()
    } else if abs < YEAR {
        format!("{} months", rounded(MONTH))
    } else if abs < 2 * YEAR {
        "about 1 year".to_string()
    } else {
        format!("about {} years", abs / YEAR)
    };

    if seconds > 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

/// Check-in to check-out as `"{H}h {M}m"`, floored; `"-"` when either end is missing
pub fn calculate_duration(
    check_in: Option<DateTime<Utc>>,
    check_out: Option<DateTime<Utc>>,
) -> String {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return "-".to_string();
    };
    let millis = (check_out - check_in).num_milliseconds();
    if millis < 0 {
        return "-".to_string();
    }
    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    format!("{hours}h {minutes}m")
}

/// Label and badge color of a status value
pub trait StatusDisplay {
    fn label(&self) -> &'static str;
    fn color(&self) -> &'static str;
}

const YELLOW: &str = "bg-yellow-100 text-yellow-800";
const GREEN: &str = "bg-green-100 text-green-800";
const RED: &str = "bg-red-100 text-red-800";
const GRAY: &str = "bg-gray-100 text-gray-800";
const BLUE: &str = "bg-blue-100 text-blue-800";

impl StatusDisplay for RescheduleStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Pending => YELLOW,
            Self::Approved => GREEN,
            Self::Rejected => RED,
            Self::Cancelled => GRAY,
        }
    }
}

impl StatusDisplay for RefundStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processed => "Processed",
            Self::Rejected => "Rejected",
            Self::NotApplicable => "Not applicable",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Pending => YELLOW,
            Self::Processed => GREEN,
            Self::Rejected => RED,
            Self::NotApplicable => GRAY,
        }
    }
}

impl StatusDisplay for CheckStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::CheckedIn => "Checked in",
            Self::CheckedOut => "Checked out",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Pending => YELLOW,
            Self::CheckedIn => BLUE,
            Self::CheckedOut => GREEN,
        }
    }
}

pub fn status_label<S: StatusDisplay>(status: S) -> &'static str {
    status.label()
}

pub fn status_color<S: StatusDisplay>(status: S) -> &'static str {
    status.color()
}

/// Human label of an actor role
pub trait RoleLabel {
    fn role_label(&self) -> &'static str;
}

impl RoleLabel for RequesterRole {
    fn role_label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Company => "Company",
            Self::Professional => "Professional",
            Self::Customer => "Customer",
        }
    }
}

impl RoleLabel for CancelledByRole {
    fn role_label(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Professional => "Professional",
            Self::Company => "Company",
            Self::Admin => "Administrator",
        }
    }
}

pub fn role_label<R: RoleLabel>(role: R) -> &'static str {
    role.role_label()
}
