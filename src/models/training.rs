//! Training material DTOs.

use serde::{Deserialize, Serialize};

/// Kind of training material, used to pick a list icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKind {
    Video,
    Document,
    Link,
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Video => write!(f, "Video"),
            MaterialKind::Document => write!(f, "Document"),
            MaterialKind::Link => write!(f, "Link"),
        }
    }
}

/// A training material record. Static content; the client only lists
/// it and opens the link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingMaterial {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub link: String,
    pub description: Option<String>,
    #[serde(default)]
    pub assigned_roles: Vec<String>,
}
