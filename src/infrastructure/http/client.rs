//! Deno Deploy API client.
//!
//! Composes the [`ApiGateway`] with the 429 [`RetryPolicy`] and the
//! pagination settings. Every request issued through the client, including
//! each page of a paginated fetch, is retried independently.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::gateway::ApiGateway;
use super::pagination;
use super::retry::RetryPolicy;
use super::transport::ReqwestTransport;
use crate::domain::errors::DomainResult;
use crate::domain::models::config::{Config, PaginationConfig};
use crate::domain::models::credentials::Credential;
use crate::domain::models::operation::{FetchMode, HttpMethod, Query, RequestPlan};
use crate::domain::ports::transport::HttpTransport;

/// Retrying, paginating client for the Deno Deploy REST API.
#[derive(Debug, Clone)]
pub struct DenoDeployClient {
    gateway: ApiGateway,
    retry: RetryPolicy,
    pagination: PaginationConfig,
}

impl DenoDeployClient {
    pub fn new(gateway: ApiGateway, retry: RetryPolicy, pagination: PaginationConfig) -> Self {
        Self {
            gateway,
            retry,
            pagination,
        }
    }

    /// Client over a `reqwest` transport configured from `config`.
    pub fn from_config(config: &Config) -> DomainResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.api.timeout_secs))?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Client over any transport, configured from `config`.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: &Config) -> Self {
        Self::new(
            ApiGateway::new(transport, config.api.base_url.clone()),
            RetryPolicy::from_config(&config.retry),
            config.pagination.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }

    /// One request, retried while rate limited.
    pub async fn request(
        &self,
        credential: &Credential,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        query: &Query,
    ) -> DomainResult<Value> {
        self.retry
            .execute(|| self.gateway.request(credential, method, path, body, query))
            .await
    }

    /// Every item of a page-numbered collection.
    pub async fn fetch_all_pages(
        &self,
        credential: &Credential,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        query: &Query,
    ) -> DomainResult<Vec<Value>> {
        pagination::fetch_all_pages(query, self.pagination.page_size, move |q| async move {
            self.request(credential, method, path, body, &q).await
        })
        .await
    }

    /// Every item of a cursor-paginated collection.
    pub async fn fetch_all_cursor(
        &self,
        credential: &Credential,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        query: &Query,
    ) -> DomainResult<Vec<Value>> {
        pagination::fetch_all_cursor(
            query,
            self.pagination.cursor_page_size,
            self.pagination.max_cursor_pages,
            move |q| async move { self.request(credential, method, path, body, &q).await },
        )
        .await
    }

    /// Run a request plan and apply its post-processing.
    ///
    /// An exhaustive fetch yields a JSON array of all collected items.
    pub async fn execute_plan(
        &self,
        credential: &Credential,
        plan: &RequestPlan,
    ) -> DomainResult<Value> {
        let body = plan.body.as_ref();
        let response = match plan.fetch {
            FetchMode::Single => {
                self.request(credential, plan.method, &plan.path, body, &plan.query)
                    .await?
            }
            FetchMode::AllPages => Value::Array(
                self.fetch_all_pages(credential, plan.method, &plan.path, body, &plan.query)
                    .await?,
            ),
        };
        Ok(plan.post.apply(response))
    }

    /// Check a credential with `GET /organizations/{id}`.
    pub async fn verify_credentials(&self, credential: &Credential) -> DomainResult<Value> {
        credential.validate()?;
        let path = format!("/organizations/{}", credential.organization_id);
        self.request(credential, HttpMethod::Get, &path, None, &Query::new())
            .await
    }
}
