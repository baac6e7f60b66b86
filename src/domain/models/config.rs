use serde::{Deserialize, Serialize};

/// Main configuration structure for the Deno Deploy adapter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// API endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Rate-limit retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Pagination configuration
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Polling trigger configuration
    #[serde(default)]
    pub trigger: TriggerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Public Deno Deploy API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.deno.com/v1";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Total attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff delay before the second attempt, in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Ceiling for computed backoff delays, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_base_delay_ms() -> u64 {
    1000
}

const fn default_max_delay_ms() -> u64 {
    60_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginationConfig {
    /// `limit` sent with page-based requests
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// `limit` sent with cursor-based requests
    #[serde(default = "default_page_size")]
    pub cursor_page_size: u32,

    /// Upper bound on cursor pages fetched in one call
    #[serde(default = "default_max_cursor_pages")]
    pub max_cursor_pages: u32,
}

const fn default_page_size() -> u32 {
    100
}

const fn default_max_cursor_pages() -> u32 {
    1000
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            cursor_page_size: default_page_size(),
            max_cursor_pages: default_max_cursor_pages(),
        }
    }
}

/// Polling trigger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TriggerConfig {
    /// Number of most recent deployments inspected per cycle
    #[serde(default = "default_window_size")]
    pub window_size: u32,

    /// Seconds between cycles in watch mode
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// JSON file holding the state of every trigger key
    #[serde(default = "default_state_path")]
    pub state_path: String,

    /// Event filter used when none is given on the command line
    #[serde(default = "default_event")]
    pub default_event: String,
}

const fn default_window_size() -> u32 {
    10
}

const fn default_interval_secs() -> u64 {
    60
}

fn default_state_path() -> String {
    ".deno-deploy/trigger-state.json".to_string()
}

fn default_event() -> String {
    "deployment.created".to_string()
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            interval_secs: default_interval_secs(),
            state_path: default_state_path(),
            default_event: default_event(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
