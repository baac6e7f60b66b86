//! Implementation of the `deno-deploy poll` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::cli::display::{events_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;
use crate::domain::models::event::DeploymentEvent;
use crate::infrastructure::state::JsonFilePollStateStore;
use crate::services::trigger::DeploymentTrigger;
use crate::services::trigger_runner::TriggerRunner;

#[derive(Args, Debug)]
pub struct PollArgs {
    /// Project whose deployments are watched
    #[arg(long)]
    pub project_id: String,

    /// deployment.created, deployment.success, deployment.failed or deployment.any
    #[arg(long)]
    pub event: Option<String>,

    /// State file (defaults to trigger.state_path)
    #[arg(long)]
    pub state: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
pub struct PollOutput {
    pub key: String,
    pub events: Vec<DeploymentEvent>,
}

impl CommandOutput for PollOutput {
    fn to_human(&self) -> String {
        render_list("event", &events_table(&self.events), self.events.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.events).unwrap_or_default()
    }
}

/// Build a runner for one project and filter, persisting to a JSON file.
pub fn build_runner(
    ctx: &CliContext,
    project_id: &str,
    event: Option<&str>,
    state: Option<PathBuf>,
) -> Result<TriggerRunner> {
    let filter = ctx.event_filter(event)?;
    let trigger = DeploymentTrigger::new(
        ctx.client.clone(),
        ctx.credentials.clone(),
        project_id,
        filter,
    )
    .with_credential_name(&ctx.credential_name)
    .with_window_size(ctx.config.trigger.window_size);

    let state_path = state.unwrap_or_else(|| PathBuf::from(&ctx.config.trigger.state_path));
    let store = Arc::new(JsonFilePollStateStore::new(state_path));
    Ok(TriggerRunner::new(trigger, store))
}

pub async fn execute(args: PollArgs, ctx: &CliContext) -> Result<()> {
    let runner = build_runner(ctx, &args.project_id, args.event.as_deref(), args.state)?;
    let events = runner.run_once().await.unwrap_or_default();

    let out = PollOutput {
        key: runner.key().to_string(),
        events,
    };
    output(&out, ctx.json);
    Ok(())
}
