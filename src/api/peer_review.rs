//! Peer review assignment endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::peer_review::{AssignPeerReview, PeerReviewAssignment};

/// List every peer review assignment.
pub async fn list_all(client: &ApiClient) -> Result<Vec<PeerReviewAssignment>> {
    client.get("/api/peer-reviews").await
}

/// Assign a reviewer to a reviewee with a deadline.
pub async fn assign(client: &ApiClient, data: &AssignPeerReview) -> Result<()> {
    client.post_unit("/api/peer-reviews/assign", data).await
}
