//! Command-line host for the adapter.
//!
//! The `deno-deploy` binary plays the role of a workflow host: it loads
//! configuration, resolves credentials from a credentials file and persists
//! trigger state on disk.

pub mod commands;
pub mod display;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::domain::models::config::Config;
use crate::domain::models::credentials::DEFAULT_CREDENTIAL_NAME;
use crate::domain::models::event::EventFilter;
use crate::domain::ports::credentials::CredentialProvider;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::credentials::{FileCredentialProvider, DEFAULT_CREDENTIALS_PATH};
use crate::infrastructure::http::DenoDeployClient;

use commands::exec::ExecArgs;
use commands::poll::PollArgs;
use commands::watch::WatchArgs;

#[derive(Parser, Debug)]
#[command(name = "deno-deploy")]
#[command(about = "Deno Deploy REST API adapter", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .deno-deploy/config.yaml and local.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Credentials file
    #[arg(long, global = true, default_value = DEFAULT_CREDENTIALS_PATH)]
    pub credentials: PathBuf,

    /// Name of the credential to use
    #[arg(long, global = true, default_value = DEFAULT_CREDENTIAL_NAME)]
    pub credential_name: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one operation, or an array of operations, from JSON
    Exec(ExecArgs),
    /// Run one trigger cycle with persisted state
    Poll(PollArgs),
    /// Run trigger cycles on an interval until Ctrl-C
    Watch(WatchArgs),
    /// Check the credential against the API
    Verify,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(),
        }
    }
}

/// Everything a command needs, built once from the global flags.
pub struct CliContext {
    pub config: Config,
    pub client: DenoDeployClient,
    pub credentials: Arc<dyn CredentialProvider>,
    pub credential_name: String,
    pub json: bool,
}

impl CliContext {
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        let client = DenoDeployClient::from_config(&config)?;
        Ok(Self {
            config,
            client,
            credentials: Arc::new(FileCredentialProvider::new(&cli.credentials)),
            credential_name: cli.credential_name.clone(),
            json: cli.json,
        })
    }

    /// Event filter from a flag, or the configured default.
    pub fn event_filter(&self, flag: Option<&str>) -> Result<EventFilter> {
        let raw = flag.unwrap_or(&self.config.trigger.default_event);
        EventFilter::from_str(raw).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown event '{raw}'. Expected one of: deployment.created, deployment.success, deployment.failed, deployment.any"
            )
        })
    }
}

/// Print an error and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }
    }
    std::process::exit(1);
}
