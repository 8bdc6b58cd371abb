//! HTTP utilities for Linode REST API calls

use crate::error::{Error, TransportError};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Pull `errors[].reason` out of an API error body
fn error_reasons(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };

    value
        .get("errors")
        .and_then(|v| v.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| {
                    let reason = e.get("reason").and_then(|r| r.as_str())?;
                    Some(match e.get("field").and_then(|f| f.as_str()) {
                        Some(field) => format!("{}: {}", field, reason),
                        None => reason.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// HTTP client wrapper for Linode API calls
#[derive(Clone)]
pub struct LinodeHttpClient {
    client: Client,
}

impl LinodeHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("linode-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Request)?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(
        &self,
        url: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        tracing::debug!("GET {}", url);
        let request = self.client.get(url).query(query);
        self.execute(request, token).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(
        &self,
        url: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Result<Value, TransportError> {
        tracing::debug!("POST {}", url);
        self.execute(self.client.post(url).json(body), token).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(
        &self,
        url: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Result<Value, TransportError> {
        tracing::debug!("PUT {}", url);
        self.execute(self.client.put(url).json(body), token).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: Option<&str>) -> Result<Value, TransportError> {
        tracing::debug!("DELETE {}", url);
        self.execute(self.client.delete(url), token).await
    }

    async fn execute(
        &self,
        mut request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<Value, TransportError> {
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(TransportError::Request)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(TransportError::Status {
                status,
                reasons: error_reasons(&body),
            });
        }

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| TransportError::Body(format!("Failed to parse response JSON: {}", e)))
    }
}

/// Format an API error for display
/// Sanitizes error messages to avoid leaking API details
pub fn format_api_error(error: &Error) -> String {
    if let Some(status) = error.as_transport().and_then(|e| e.status()) {
        let message = match status.as_u16() {
            403 => "Permission denied. Check your token's scopes.",
            401 => "Authentication failed. Set LINODE_TOKEN or pass --token.",
            404 => "Resource not found.",
            429 => "Rate limit exceeded. Please try again later.",
            400 => "Invalid request. Check your parameters.",
            409 => "Resource conflict. The resource may already exist or be in use.",
            500..=599 => "Linode API temporarily unavailable. Please try again.",
            _ => "Request failed. Check your network connection and try again.",
        };
        return message.to_string();
    }

    let error_str = error.to_string();

    // Truncate long error messages and remove potential sensitive data
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
