//! Typed HTTP client for the staff management backend.
//!
//! One client replaces the old per-page fetch duplication: bearer auth,
//! envelope decoding, and the retry policy all live here. Endpoint
//! functions are grouped per entity in the submodules.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};

pub mod account;
pub mod assessment;
pub mod auth;
pub mod leave;
pub mod notification;
pub mod overtime;
pub mod peer_review;
pub mod training;

/// Delay before the first GET retry; doubles per attempt.
const RETRY_BASE_BACKOFF: Duration = Duration::from_millis(200);

/// Response envelope most endpoints wrap their payload in. The `data`
/// payload must be present and non-null; that is what tells an envelope
/// apart from a bare object payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Shape of a non-2xx body, envelope or not.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Some endpoints honor the envelope, others return the payload bare.
/// `Wrapped` must come first: an envelope object never parses as the
/// payload lists we request, but the reverse could.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaybeWrapped<T> {
    Wrapped(Envelope<T>),
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    fn into_data(self) -> T {
        match self {
            MaybeWrapped::Bare(data) => data,
            MaybeWrapped::Wrapped(envelope) => envelope.data,
        }
    }
}

/// HTTP client for the staff management API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    retry_attempts: u32,
}

impl ApiClient {
    /// Create a client from configuration. Unauthenticated until
    /// `set_token`.
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            retry_attempts: config.retry_attempts.max(1),
        }
    }

    /// Attach the session bearer token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the session token (logout).
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// GET with decoding. Idempotent, so transport failures and 5xx
    /// responses are retried with exponential backoff.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);

        for attempt in 1..=self.retry_attempts {
            let mut request = self.client.get(&url);
            if let Some(auth) = self.auth_header() {
                request = request.header(reqwest::header::AUTHORIZATION, auth);
            }

            debug!(attempt, %url, "GET");

            match request.send().await {
                Ok(response) => {
                    if response.status().is_server_error() && attempt < self.retry_attempts {
                        self.backoff_sleep(attempt).await;
                        continue;
                    }
                    return Self::decode(response).await;
                }
                Err(e) => {
                    if attempt < self.retry_attempts && should_retry_error(&e) {
                        self.backoff_sleep(attempt).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(AppError::parse("Request retries exhausted without a response"))
    }

    /// POST with a JSON body, decoding the response payload. Mutations
    /// are never retried: the API has no idempotency keys.
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::decode(request.send().await?).await
    }

    /// POST with a JSON body, ignoring the response payload.
    pub async fn post_unit<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::check(request.send().await?).await
    }

    /// POST without a body, ignoring the response payload.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let mut request = self.client.post(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::check(request.send().await?).await
    }

    /// PUT with a JSON body, ignoring the response payload.
    pub async fn put_unit<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::check(request.send().await?).await
    }

    /// DELETE, ignoring the response payload.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let mut request = self.client.delete(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        Self::check(request.send().await?).await
    }

    async fn backoff_sleep(&self, attempt: u32) {
        let shift = attempt.saturating_sub(1).min(8);
        let delay = RETRY_BASE_BACKOFF.saturating_mul(1 << shift);
        tokio::time::sleep(delay).await;
    }

    /// Decode a successful response body; map failures to AppError.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from(status, response.text().await.unwrap_or_default()));
        }

        let body = response.text().await?;
        let wrapped: MaybeWrapped<T> =
            serde_json::from_str(&body).map_err(|e| AppError::parse(format!("Unexpected response shape: {e}")))?;
        Ok(wrapped.into_data())
    }

    /// Check a response for success, discarding the body.
    async fn check(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(status, response.text().await.unwrap_or_default()))
    }

    /// Build the error for a non-2xx response, preferring the envelope
    /// message over the raw body.
    fn error_from(status: StatusCode, body: String) -> AppError {
        if status == StatusCode::UNAUTHORIZED {
            return AppError::Unauthorized;
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body
                }
            });

        AppError::api(status.as_u16(), message)
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::models::notification::Notification;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            retry_attempts: 3,
        })
    }

    fn sample_rows() -> serde_json::Value {
        json!([{
            "id": 1,
            "title": "Shift approved",
            "message": "Your leave request was approved",
            "type": "LEAVE",
            "createdAt": "2026-01-10T08:30:00Z",
            "read": false,
            "actionUrl": null
        }])
    }

    #[tokio::test]
    async fn test_get_decodes_enveloped_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "message": "ok",
                "data": sample_rows()
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let rows: Vec<Notification> = client.get("/api/notifications").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Shift approved");
    }

    #[tokio::test]
    async fn test_get_decodes_bare_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_rows()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let rows: Vec<Notification> = client.get("/api/notifications").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_get_decodes_bare_object() {
        use crate::models::account::Account;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/account/detail/agus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "agus",
                "fullName": "Agus Pratama",
                "gender": "male",
                "role": "Barista",
                "phoneNumber": "+62812345678",
                "address": "Jl. Melati 4",
                "dateOfBirth": "1999-03-12",
                "status": "ACTIVE",
                "outlet": "Senopati"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let account: Account = client.get("/api/account/detail/agus").await.unwrap();
        assert_eq!(account.username, "agus");
        assert_eq!(account.outlet.as_deref(), Some("Senopati"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_dedicated_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<Vec<Notification>> = client.get("/api/notifications").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_error_message_extracted_from_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": 400,
                "message": "Invalid outlet",
                "data": null
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<Vec<Notification>> = client.get("/api/notifications").await;
        match result {
            Err(AppError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid outlet");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_retries_server_errors_until_success() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        let rows = sample_rows();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) < 2 {
                    ResponseTemplate::new(500)
                } else {
                    ResponseTemplate::new(200).set_body_json(rows.clone())
                }
            })
            .expect(3)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Vec<Notification> = client.get("/api/notifications").await.unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_post_is_never_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.post_unit("/api/notifications/1/read", &json!({})).await;
        assert!(result.is_err());
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_rows()))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        client.set_token("tok-123");
        let rows: Vec<Notification> = client.get("/api/notifications").await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
