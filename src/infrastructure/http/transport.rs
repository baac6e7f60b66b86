//! `reqwest`-backed implementation of the [`HttpTransport`] port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::operation::HttpMethod;
use crate::domain::ports::transport::{HttpTransport, TransportRequest, TransportResponse};

const USER_AGENT: &str = concat!("deno-deploy-adapter/", env!("CARGO_PKG_VERSION"));

/// HTTP transport over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DenoDeployError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Wrap an existing client.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> DomainResult<TransportResponse> {
        let mut builder = self.http.request(to_reqwest(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| {
            DenoDeployError::Transport(format!("{} {} failed: {e}", request.method, request.url))
        })?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = resp
            .text()
            .await
            .map_err(|e| DenoDeployError::Transport(format!("failed to read response body: {e}")))?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::operation::Query;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest(HttpMethod::Get), Method::GET);
        assert_eq!(to_reqwest(HttpMethod::Patch), Method::PATCH);
        assert_eq!(to_reqwest(HttpMethod::Delete), Method::DELETE);
    }

    #[tokio::test]
    async fn test_send_returns_non_success_responses() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/things")
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "5".into()))
            .with_status(404)
            .with_header("Retry-After", "3")
            .with_body(r#"{"message":"missing"}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let mut query = Query::new();
        query.insert("limit".to_string(), "5".to_string());
        let resp = transport
            .send(TransportRequest {
                method: HttpMethod::Get,
                url: format!("{}/things", server.url()),
                headers: Vec::new(),
                query,
                body: None,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.status, 404);
        assert_eq!(resp.header("retry-after"), Some("3"));
        assert!(resp.body.contains("missing"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(1)).unwrap();
        let result = transport
            .send(TransportRequest {
                method: HttpMethod::Get,
                url: "http://127.0.0.1:1/unreachable".to_string(),
                headers: Vec::new(),
                query: Query::new(),
                body: None,
            })
            .await;
        assert!(matches!(result, Err(DenoDeployError::Transport(_))));
    }
}
