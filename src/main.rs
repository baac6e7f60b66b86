//! Deno Deploy adapter CLI entry point.

use clap::Parser;

use deno_deploy::cli::{commands, handle_error, Cli, CliContext, Commands};
use deno_deploy::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => handle_error(err, json_mode),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, json_mode),
    };

    let ctx = match CliContext::new(&cli, config) {
        Ok(ctx) => ctx,
        Err(err) => handle_error(err, json_mode),
    };

    let result = match cli.command {
        Commands::Exec(args) => commands::exec::execute(args, &ctx).await,
        Commands::Poll(args) => commands::poll::execute(args, &ctx).await,
        Commands::Watch(args) => commands::watch::execute(args, &ctx).await,
        Commands::Verify => commands::verify::execute(&ctx).await,
    };

    if let Err(err) = result {
        handle_error(err, json_mode);
    }
}
