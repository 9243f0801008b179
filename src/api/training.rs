//! Training material endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::training::TrainingMaterial;

/// List training materials. The server scopes the list to the caller's
/// role; the UI filters again for display only.
pub async fn list(client: &ApiClient) -> Result<Vec<TrainingMaterial>> {
    client.get("/api/training-materials").await
}
