//! Overtime log endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::overtime::{CreateOvertimeLog, OvertimeLog};

const BASE: &str = "/api/overtime-logs";

/// List every overtime log (verifier view).
pub async fn list_all(client: &ApiClient) -> Result<Vec<OvertimeLog>> {
    client.get(BASE).await
}

/// List overtime logs submitted by one user.
pub async fn list_for_user(client: &ApiClient, username: &str) -> Result<Vec<OvertimeLog>> {
    client.get(&format!("{BASE}/user/{username}")).await
}

/// Submit a new overtime log.
pub async fn create(client: &ApiClient, data: &CreateOvertimeLog) -> Result<()> {
    client.post_unit(BASE, data).await
}

/// Approve a pending log.
pub async fn approve(client: &ApiClient, id: i64) -> Result<()> {
    client.post_empty(&format!("{BASE}/{id}/approve")).await
}

/// Reject a pending log.
pub async fn reject(client: &ApiClient, id: i64) -> Result<()> {
    client.post_empty(&format!("{BASE}/{id}/reject")).await
}

/// Cancel one's own pending log.
pub async fn cancel(client: &ApiClient, id: i64) -> Result<()> {
    client.post_empty(&format!("{BASE}/{id}/cancel")).await
}
