//! Parameter helpers that turn user-facing collections into API payloads.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::{DenoDeployError, DomainResult};

/// Default encoding for deployment assets.
pub const DEFAULT_ASSET_ENCODING: &str = "utf-8";

/// One environment variable row as entered by a user.
///
/// Both sides are optional so incomplete rows can be carried to
/// [`parse_env_vars`], which decides what to drop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvVarEntry {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl EnvVarEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(Value::String(value.into())),
        }
    }
}

/// A file to upload with a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInput {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Asset entry in the deployment creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub kind: String,
    pub content: String,
    pub encoding: String,
}

impl Asset {
    /// A plain file asset.
    pub fn file(content: impl Into<String>, encoding: impl Into<String>) -> Self {
        Self {
            kind: "file".to_string(),
            content: content.into(),
            encoding: encoding.into(),
        }
    }
}

/// Binds a KV database to a name inside a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseBinding {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub database_id: String,
}

/// Convert environment variable rows into the `{KEY: value}` map the API
/// expects.
///
/// Rows without a non-empty key are dropped. A missing, `null`, `false` or
/// zero value becomes the empty string; other non-string values are
/// stringified.
pub fn parse_env_vars(entries: &[EnvVarEntry]) -> BTreeMap<String, String> {
    entries
        .iter()
        .filter_map(|entry| {
            let key = entry.key.as_deref().filter(|k| !k.is_empty())?;
            let value = match &entry.value {
                None | Some(Value::Null | Value::Bool(false)) => String::new(),
                Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            Some((key.to_string(), value))
        })
        .collect()
}

/// Convert asset rows into the `{path: asset}` map of a deployment body.
///
/// Later rows win when two rows share a path.
pub fn parse_assets(assets: &[AssetInput]) -> BTreeMap<String, Asset> {
    assets
        .iter()
        .map(|a| {
            let encoding = a
                .encoding
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or(DEFAULT_ASSET_ENCODING);
            (a.path.clone(), Asset::file(a.content.clone(), encoding))
        })
        .collect()
}

/// Convert binding rows into `{name: databaseId}`, dropping incomplete rows.
pub fn parse_database_bindings(bindings: &[DatabaseBinding]) -> BTreeMap<String, String> {
    bindings
        .iter()
        .filter(|b| !b.name.is_empty() && !b.database_id.is_empty())
        .map(|b| (b.name.clone(), b.database_id.clone()))
        .collect()
}

fn parse_date_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whether `value` is a usable ISO 8601 date or datetime.
pub fn validate_date_time(value: &str) -> bool {
    parse_date_time(value).is_some()
}

/// Normalize an ISO 8601 value to `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_date_time(value: &str) -> DomainResult<String> {
    parse_date_time(value)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| DenoDeployError::validation(format!("invalid date/time: '{value}'")))
}
