//! HTTP request plans produced by typed operations.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::params::{format_date_time, validate_date_time};

/// Query parameters, serialized in key order.
pub type Query = BTreeMap<String, String>;

/// Default `limit` when a list operation does not return everything.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// HTTP verbs used by the Deno Deploy API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the executor issues a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// One request, one response.
    #[default]
    Single,
    /// Page-based exhaustive fetch.
    AllPages,
}

/// Adjustment applied to the response before it becomes output items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostProcess {
    #[default]
    None,
    /// Add `projectId` to an object response.
    AttachProjectId(String),
}

impl PostProcess {
    /// Apply this adjustment to a raw response.
    pub fn apply(&self, mut response: Value) -> Value {
        match self {
            Self::None => response,
            Self::AttachProjectId(project_id) => {
                if let Value::Object(obj) = &mut response {
                    obj.insert("projectId".to_string(), Value::String(project_id.clone()));
                }
                response
            }
        }
    }
}

/// A fully resolved request, ready for the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub query: Query,
    pub fetch: FetchMode,
    pub post: PostProcess,
}

impl RequestPlan {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Query::new(),
            fetch: FetchMode::Single,
            post: PostProcess::None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a query parameter; `None` and empty strings are skipped.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value.map(|v| v.to_string()).filter(|v| !v.is_empty()) {
            self.query.insert(key.to_string(), value);
        }
        self
    }

    #[must_use]
    pub fn with_post(mut self, post: PostProcess) -> Self {
        self.post = post;
        self
    }

    #[must_use]
    pub fn all_pages(mut self) -> Self {
        self.fetch = FetchMode::AllPages;
        self
    }
}

/// Fail with a validation error when an identifier is blank.
pub fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DenoDeployError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Check an optional ISO 8601 parameter.
pub fn check_date(field: &str, value: Option<&str>) -> DomainResult<()> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) if !validate_date_time(v) => Err(DenoDeployError::validation(format!(
            "{field} must be an ISO 8601 date or datetime, got '{v}'"
        ))),
        _ => Ok(()),
    }
}

/// Normalized form of an optional date parameter.
pub fn normalize_date(value: Option<&str>) -> DomainResult<Option<String>> {
    value
        .filter(|v| !v.is_empty())
        .map(format_date_time)
        .transpose()
}

/// `since`/`until` query for analytics-style endpoints.
pub fn with_time_range(
    plan: RequestPlan,
    since: Option<&str>,
    until: Option<&str>,
) -> DomainResult<RequestPlan> {
    Ok(plan
        .with_query("since", normalize_date(since)?)
        .with_query("until", normalize_date(until)?))
}

/// Paging choice shared by every list operation.
pub fn check_limit(return_all: bool, limit: Option<u32>) -> DomainResult<()> {
    if !return_all && limit == Some(0) {
        return Err(DenoDeployError::validation("limit must be at least 1"));
    }
    Ok(())
}

/// Either an exhaustive page-based fetch or a single request with `limit`.
pub fn list_plan(path: impl Into<String>, return_all: bool, limit: Option<u32>) -> RequestPlan {
    let plan = RequestPlan::get(path);
    if return_all {
        plan.all_pages()
    } else {
        plan.with_query("limit", Some(limit.unwrap_or(DEFAULT_LIST_LIMIT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_query_skips_empty_values() {
        let plan = RequestPlan::get("/x")
            .with_query("level", Some("error"))
            .with_query("cursor", None::<String>)
            .with_query("region", Some(""));
        assert_eq!(plan.query.len(), 1);
        assert_eq!(plan.query["level"], "error");
    }

    #[test]
    fn test_list_plan_modes() {
        let all = list_plan("/projects/p/domains", true, Some(5));
        assert_eq!(all.fetch, FetchMode::AllPages);
        assert!(all.query.is_empty());

        let limited = list_plan("/projects/p/domains", false, None);
        assert_eq!(limited.fetch, FetchMode::Single);
        assert_eq!(limited.query["limit"], "50");
    }

    #[test]
    fn test_check_limit() {
        assert!(check_limit(false, Some(1)).is_ok());
        assert!(check_limit(false, None).is_ok());
        assert!(check_limit(true, Some(0)).is_ok());
        assert!(check_limit(false, Some(0)).is_err());
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("projectId", "proj").is_ok());
        let err = require("projectId", "  ").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: projectId is required");
    }

    #[test]
    fn test_time_range_is_normalized() {
        let plan =
            with_time_range(RequestPlan::get("/a"), Some("2024-01-01"), None).unwrap();
        assert_eq!(plan.query["since"], "2024-01-01T00:00:00.000Z");
        assert!(!plan.query.contains_key("until"));
        assert!(check_date("until", Some("soon")).is_err());
    }

    #[test]
    fn test_attach_project_id_only_touches_objects() {
        let post = PostProcess::AttachProjectId("proj".to_string());
        assert_eq!(post.apply(json!({"logs": []}))["projectId"], "proj");
        assert_eq!(post.apply(json!([1, 2])), json!([1, 2]));
        assert_eq!(PostProcess::None.apply(json!({"a": 1})), json!({"a": 1}));
    }
}
