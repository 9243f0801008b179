//! Account administration endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::account::{Account, RegisterAccount, UpdateAccount};

/// List every account.
pub async fn list_all(client: &ApiClient) -> Result<Vec<Account>> {
    client.get("/api/account/all").await
}

/// Fetch one account by username.
pub async fn detail(client: &ApiClient, username: &str) -> Result<Account> {
    client.get(&format!("/api/account/detail/{username}")).await
}

/// Register a new account.
pub async fn register(client: &ApiClient, data: &RegisterAccount) -> Result<()> {
    client.post_unit("/api/account/register", data).await
}

/// Update an existing account.
pub async fn update(client: &ApiClient, username: &str, data: &UpdateAccount) -> Result<()> {
    client.put_unit(&format!("/api/account/update/{username}"), data).await
}

/// Delete an account.
pub async fn remove(client: &ApiClient, username: &str) -> Result<()> {
    client.delete(&format!("/api/account/delete/{username}")).await
}
