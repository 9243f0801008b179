//! Leave request endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::leave::{CreateLeaveRequest, LeaveRequest};

const BASE: &str = "/api/shift-management/leave-request";

/// List every leave request (approver view).
pub async fn list_all(client: &ApiClient) -> Result<Vec<LeaveRequest>> {
    client.get(&format!("{BASE}/all")).await
}

/// List leave requests submitted by one user.
pub async fn list_for_user(client: &ApiClient, username: &str) -> Result<Vec<LeaveRequest>> {
    client.get(&format!("{BASE}/by-user/{username}")).await
}

/// Submit a new leave request.
pub async fn create(client: &ApiClient, data: &CreateLeaveRequest) -> Result<()> {
    client.post_unit(&format!("{BASE}/create"), data).await
}

/// Approve a pending request.
pub async fn approve(client: &ApiClient, id: i64) -> Result<()> {
    client.post_empty(&format!("{BASE}/{id}/approve")).await
}

/// Reject a pending request.
pub async fn reject(client: &ApiClient, id: i64) -> Result<()> {
    client.post_empty(&format!("{BASE}/{id}/reject")).await
}

/// Cancel one's own pending request.
pub async fn cancel(client: &ApiClient, id: i64) -> Result<()> {
    client.post_empty(&format!("{BASE}/{id}/cancel")).await
}
