//! Implementation of the `deno-deploy exec` command.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;
use crate::services::executor::{ExecutionItem, OperationExecutor};

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// JSON file holding an operation or an array of operations; `-` reads stdin
    #[arg(long, short)]
    pub input: String,

    /// Record failing items as `{"error": ...}` and keep going
    #[arg(long)]
    pub continue_on_fail: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ExecOutput {
    pub items: Vec<ExecutionItem>,
    pub failed: usize,
}

impl CommandOutput for ExecOutput {
    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return "No output items.".to_string();
        }

        let mut lines = vec![format!(
            "{} item(s), {} failed:",
            self.items.len(),
            self.failed
        )];
        for item in &self.items {
            let json = serde_json::to_string_pretty(&item.json).unwrap_or_default();
            lines.push(format!("\n[{}] {}", item.item_index, json));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> Value {
        Value::Array(
            self.items
                .iter()
                .map(|item| serde_json::to_value(item).unwrap_or_default())
                .collect(),
        )
    }
}

/// Split the input document into items: an array is one item per element.
pub fn input_items(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        single => vec![single],
    }
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read operations from stdin")?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read operations from {input}"))
    }
}

pub async fn execute(args: ExecArgs, ctx: &CliContext) -> Result<()> {
    let raw = read_input(&args.input).await?;
    let document: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let items = input_items(document);

    let executor = OperationExecutor::new(ctx.client.clone(), ctx.credentials.clone())
        .with_credential_name(&ctx.credential_name);
    let items = executor.execute_json(&items, args.continue_on_fail).await?;

    let out = ExecOutput {
        failed: items.iter().filter(|i| i.is_error()).count(),
        items,
    };
    output(&out, ctx.json);
    Ok(())
}
