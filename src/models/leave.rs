//! Leave request DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Leave types offered by the create form.
pub const LEAVE_TYPES: &[&str] = &["ANNUAL", "SICK", "PERMISSION", "UNPAID"];

/// Leave request lifecycle. PENDING is the only state with actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Canceled,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "Pending"),
            LeaveStatus::Approved => write!(f, "Approved"),
            LeaveStatus::Rejected => write!(f, "Rejected"),
            LeaveStatus::Canceled => write!(f, "Canceled"),
        }
    }
}

/// A leave request as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    pub user_name: String,
    pub request_date: NaiveDate,
    pub leave_type: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub id_outlet: Option<i64>,
}

/// DTO for submitting a leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    pub leave_type: String,
    pub request_date: NaiveDate,
    pub reason: String,
}
