//! Shared HTTP client for the hotel REST backend

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::error::{HttpClientError, Result};

/// Error body returned by the backend (`{"success":false,"message":...}`)
#[derive(Debug, serde::Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Outcome of a write request where 409 is an expected answer
#[derive(Debug)]
pub enum WriteResponse<T> {
    Accepted(T),
    Conflict(String),
}

/// Thin wrapper over `reqwest::Client` that knows the base URL and bearer token
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client for `base_url` (e.g. `http://localhost:8080/api/v1`)
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| HttpClientError::Configuration(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(HttpClientError::Configuration(
                "backend base URL is empty".to_string(),
            ));
        }

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a JSON resource
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_optional_json(path)
            .await?
            .ok_or_else(|| HttpClientError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: format!("{} not found", path),
            })
    }

    /// GET a JSON resource, mapping 404 to `None`
    pub async fn get_optional_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|e| HttpClientError::Connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("GET {} failed: {} - {}", path, status, body);
            return Err(HttpClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| HttpClientError::Decode(e.to_string()))
    }

    /// Send a JSON body where the backend may answer 409 Conflict
    pub async fn write_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<WriteResponse<T>> {
        let response = self
            .request(method.clone(), path)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpClientError::Connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let text = response.text().await.unwrap_or_default();
            return Ok(WriteResponse::Conflict(conflict_message(&text)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} {} failed: {} - {}", method, path, status, body);
            return Err(HttpClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map(WriteResponse::Accepted)
            .map_err(|e| HttpClientError::Decode(e.to_string()))
    }
}

/// Extract a human readable message from a 409 body
fn conflict_message(body: &str) -> String {
    serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Conflict".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/v1/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn test_new_rejects_empty_url() {
        assert!(matches!(
            ApiClient::new("", None),
            Err(HttpClientError::Configuration(_))
        ));
    }

    #[test]
    fn test_conflict_message_prefers_backend_message() {
        let body = r#"{"success":false,"message":"Room already booked","timestamp":"2025-01-01T00:00:00"}"#;
        assert_eq!(conflict_message(body), "Room already booked");
        assert_eq!(conflict_message(r#"{"error":"Overlap"}"#), "Overlap");
        assert_eq!(conflict_message("plain text"), "plain text");
        assert_eq!(conflict_message(""), "Conflict");
    }
}
