//! DTOs exchanged with the backend API.
//!
//! These shapes are mirrored into view state as-is. Identifiers, score
//! computation, and status transitions are authoritative only on the
//! server; the client formats them for display and nothing more.

pub mod account;
pub mod assessment;
pub mod leave;
pub mod notification;
pub mod overtime;
pub mod peer_review;
pub mod training;
