//! Notification DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification row. Delivered by polling, never pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    pub action_url: Option<String>,
}
