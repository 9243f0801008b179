//! Staff account DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A staff account as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    pub full_name: String,
    pub gender: Option<String>,
    pub role: String,
    pub phone_number: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub status: Option<String>,
    pub outlet: Option<String>,
}

/// DTO for registering an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccount {
    pub username: String,
    pub full_name: String,
    pub gender: Option<String>,
    pub role: String,
    pub phone_number: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Omitted for roles that are not tied to an outlet (e.g. Admin).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlet: Option<String>,
}

/// DTO for updating an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlet: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_omits_outlet_when_absent() {
        let data = RegisterAccount {
            username: "rina".to_string(),
            full_name: "Rina Wijaya".to_string(),
            gender: None,
            role: "Admin".to_string(),
            phone_number: "+62812345678".to_string(),
            address: "Jl. Kenanga 2".to_string(),
            date_of_birth: None,
            outlet: None,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("outlet").is_none());
    }

    #[test]
    fn test_register_includes_outlet_when_present() {
        let data = RegisterAccount {
            username: "agus".to_string(),
            full_name: "Agus Pratama".to_string(),
            gender: None,
            role: "Barista".to_string(),
            phone_number: "+62812345678".to_string(),
            address: "Jl. Melati 4".to_string(),
            date_of_birth: None,
            outlet: Some("Senopati".to_string()),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["outlet"], "Senopati");
    }
}
