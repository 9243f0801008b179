//! Notification endpoints. Polled, never pushed.

use super::ApiClient;
use crate::error::Result;
use crate::models::notification::Notification;

/// Fetch the caller's notification list.
pub async fn list(client: &ApiClient) -> Result<Vec<Notification>> {
    client.get("/api/notifications").await
}

/// Mark one notification read.
pub async fn mark_read(client: &ApiClient, id: i64) -> Result<()> {
    client.post_empty(&format!("/api/notifications/{id}/read")).await
}

/// Mark every notification read.
pub async fn mark_all_read(client: &ApiClient) -> Result<()> {
    client.post_empty("/api/notifications/read-all").await
}
