//! Overtime log DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Overtime log lifecycle. The backend spells this family with the
/// double-L variant, unlike leave requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OvertimeStatus {
    Pending,
    Ongoing,
    Approved,
    Rejected,
    Cancelled,
}

impl std::fmt::Display for OvertimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OvertimeStatus::Pending => write!(f, "Pending"),
            OvertimeStatus::Ongoing => write!(f, "Ongoing"),
            OvertimeStatus::Approved => write!(f, "Approved"),
            OvertimeStatus::Rejected => write!(f, "Rejected"),
            OvertimeStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// An overtime log as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeLog {
    pub id: i64,
    pub barista_id: Option<i64>,
    pub user_id: String,
    pub outlet_id: Option<i64>,
    pub date_overtime: NaiveDate,
    /// Hour of day the overtime starts, 0-23.
    pub start_hour: u32,
    /// Duration in whole hours.
    pub duration: u32,
    pub reason: String,
    pub verifier: Option<String>,
    pub status: OvertimeStatus,
}

/// DTO for submitting an overtime log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOvertimeLog {
    pub date_overtime: NaiveDate,
    pub start_hour: u32,
    pub duration: u32,
    pub reason: String,
}
