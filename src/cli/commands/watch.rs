//! Implementation of the `deno-deploy watch` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use super::poll::{build_runner, PollOutput};
use crate::cli::output::output;
use crate::cli::CliContext;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Project whose deployments are watched
    #[arg(long)]
    pub project_id: String,

    /// deployment.created, deployment.success, deployment.failed or deployment.any
    #[arg(long)]
    pub event: Option<String>,

    /// Seconds between cycles (defaults to trigger.interval_secs)
    #[arg(long)]
    pub interval: Option<u64>,

    /// State file (defaults to trigger.state_path)
    #[arg(long)]
    pub state: Option<PathBuf>,
}

pub async fn execute(args: WatchArgs, ctx: &CliContext) -> Result<()> {
    let interval_secs = args
        .interval
        .unwrap_or(ctx.config.trigger.interval_secs)
        .max(1);
    let runner = build_runner(ctx, &args.project_id, args.event.as_deref(), args.state)?;
    let key = runner.key().to_string();

    runner
        .watch(Duration::from_secs(interval_secs), |events| {
            let out = PollOutput {
                key: key.clone(),
                events: events.to_vec(),
            };
            output(&out, ctx.json);
        })
        .await
}
