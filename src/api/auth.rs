//! Authentication endpoint.

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::Result;

#[derive(Serialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Log in and return the bearer token. The caller decodes the session
/// claims from it.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<String> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = client.post("/api/auth/login", &request).await?;
    Ok(response.token)
}
