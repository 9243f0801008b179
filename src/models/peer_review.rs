//! Peer review assignment DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A reviewer-to-reviewee assignment with a deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerReviewAssignment {
    pub id: i64,
    pub reviewer: String,
    pub reviewee: String,
    pub deadline: NaiveDate,
    pub status: Option<String>,
}

/// DTO for assigning a peer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPeerReview {
    pub reviewer: String,
    pub reviewee: String,
    pub deadline: NaiveDate,
}
