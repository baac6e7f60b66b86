//! Authenticated request gateway for the Deno Deploy REST API.
//!
//! Builds one request from a method, path, optional body and query, sends it
//! through the [`HttpTransport`] port and turns the response into JSON or a
//! [`DenoDeployError::Api`]. The gateway never retries; see
//! [`RetryPolicy`](super::retry::RetryPolicy) for that.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::credentials::Credential;
use crate::domain::models::operation::{HttpMethod, Query};
use crate::domain::ports::transport::{HttpTransport, TransportRequest, TransportResponse};

/// Message used when an error body says nothing useful.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Issues single authenticated API requests.
#[derive(Clone)]
pub struct ApiGateway {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiGateway {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return its JSON body.
    ///
    /// `path` must start with `/`. The body is attached only when it is a
    /// non-empty object. An empty response body yields `Value::Null`.
    pub async fn request(
        &self,
        credential: &Credential,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        query: &Query,
    ) -> DomainResult<Value> {
        let request = self.build_request(credential, method, path, body, query)?;
        debug!(
            method = %method,
            path,
            query_params = request.query.len(),
            has_body = request.body.is_some(),
            "sending Deno Deploy API request"
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = api_error(&response);
            debug!(status = response.status, path, error = %err, "Deno Deploy API returned an error");
            return Err(err);
        }
        Ok(parse_body(&response.body))
    }

    fn build_request(
        &self,
        credential: &Credential,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        query: &Query,
    ) -> DomainResult<TransportRequest> {
        if !path.starts_with('/') {
            return Err(DenoDeployError::validation(format!(
                "request path must start with '/', got '{path}'"
            )));
        }

        let body = body
            .filter(|b| b.as_object().is_some_and(|obj| !obj.is_empty()))
            .cloned();

        Ok(TransportRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![
                ("Authorization".to_string(), credential.bearer()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            query: query.clone(),
            body,
        })
    }
}

/// JSON of a successful response; non-JSON text is kept as a string.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Map a non-2xx response to an API error.
pub fn api_error(response: &TransportResponse) -> DenoDeployError {
    let parsed: Option<Value> = serde_json::from_str(&response.body).ok();
    let code = parsed.as_ref().and_then(error_code);
    let message = parsed
        .as_ref()
        .and_then(extract_message)
        .or_else(|| code.as_ref().map(|c| format!("API Error: {c}")))
        .or_else(|| {
            let raw = response.body.trim();
            (!raw.is_empty()).then(|| raw.to_string())
        })
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

    let retry_after = response
        .header("retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok());

    DenoDeployError::Api {
        status: response.status,
        message,
        code,
        retry_after,
    }
}

fn extract_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error")?.get("message")?.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn error_code(body: &Value) -> Option<String> {
    body.get("code")
        .and_then(Value::as_str)
        .or_else(|| body.get("error")?.get("code")?.as_str())
        .map(str::to_string)
}
