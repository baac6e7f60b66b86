pub mod config;
pub mod credentials;
pub mod deployment;
pub mod envelope;
pub mod event;
pub mod operation;
pub mod params;
pub mod poll_state;

pub use config::{
    ApiConfig, Config, LoggingConfig, PaginationConfig, RetryConfig, TriggerConfig,
    DEFAULT_BASE_URL,
};
pub use credentials::{Credential, DEFAULT_CREDENTIAL_NAME};
pub use deployment::{Deployment, DeploymentStatus};
pub use envelope::{collect_items, Envelope, COLLECTION_KEYS};
pub use event::{DeploymentEvent, EventFilter};
pub use operation::{FetchMode, HttpMethod, Operation, PostProcess, Query, RequestPlan};
pub use params::{
    format_date_time, parse_assets, parse_database_bindings, parse_env_vars, validate_date_time,
    Asset, AssetInput, DatabaseBinding, EnvVarEntry,
};
pub use poll_state::PollState;
