//! Implementation of the `deno-deploy verify` command.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cli::output::{output, CommandOutput};
use crate::cli::CliContext;

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOutput {
    pub success: bool,
    pub organization_id: String,
    pub organization: Value,
}

impl CommandOutput for VerifyOutput {
    fn to_human(&self) -> String {
        let name = self
            .organization
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("(unnamed)");
        format!(
            "Credential OK: organization {} ({name})",
            self.organization_id
        )
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let credential = ctx
        .credentials
        .credential(&ctx.credential_name)
        .await
        .context("Failed to resolve credential")?;
    let organization = ctx
        .client
        .verify_credentials(&credential)
        .await
        .context("Credential test failed")?;

    let out = VerifyOutput {
        success: true,
        organization_id: credential.organization_id,
        organization,
    };
    output(&out, ctx.json);
    Ok(())
}
