//! Operation executor.
//!
//! Runs one [`Operation`] per input item through the Deno Deploy client and
//! turns each response into output items tagged with the index of the input
//! that produced them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::errors::{DenoDeployError, DomainResult, ExecutionError};
use crate::domain::models::credentials::DEFAULT_CREDENTIAL_NAME;
use crate::domain::models::operation::Operation;
use crate::domain::ports::credentials::CredentialProvider;
use crate::infrastructure::http::DenoDeployClient;
use crate::infrastructure::logging::notice::log_startup_notice;

/// One output item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionItem {
    pub json: Value,
    /// Zero-based index of the input item this output came from.
    pub item_index: usize,
}

impl ExecutionItem {
    pub fn new(json: Value, item_index: usize) -> Self {
        Self { json, item_index }
    }

    /// Whether this item records a captured failure.
    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .is_some_and(|obj| obj.len() == 1 && obj.contains_key("error"))
    }
}

/// Executes typed operations with a named credential.
pub struct OperationExecutor {
    client: DenoDeployClient,
    credentials: Arc<dyn CredentialProvider>,
    credential_name: String,
}

impl OperationExecutor {
    pub fn new(client: DenoDeployClient, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
            credential_name: DEFAULT_CREDENTIAL_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_credential_name(mut self, name: impl Into<String>) -> Self {
        self.credential_name = name.into();
        self
    }

    /// Run every operation in order.
    ///
    /// With `continue_on_fail`, a failing item yields `{"error": message}`
    /// and the run goes on; otherwise the first failure aborts the run.
    pub async fn execute(
        &self,
        items: &[Operation],
        continue_on_fail: bool,
    ) -> Result<Vec<ExecutionItem>, ExecutionError> {
        self.run(items.iter().cloned().map(Ok), continue_on_fail)
            .await
    }

    /// Like [`execute`](Self::execute), for raw JSON items.
    ///
    /// An item that does not describe a known operation fails as a
    /// validation error at its own index.
    pub async fn execute_json(
        &self,
        items: &[Value],
        continue_on_fail: bool,
    ) -> Result<Vec<ExecutionItem>, ExecutionError> {
        let operations = items.iter().map(|item| {
            serde_json::from_value::<Operation>(item.clone())
                .map_err(|e| DenoDeployError::validation(format!("invalid operation: {e}")))
        });
        self.run(operations, continue_on_fail).await
    }

    async fn run(
        &self,
        operations: impl Iterator<Item = DomainResult<Operation>>,
        continue_on_fail: bool,
    ) -> Result<Vec<ExecutionItem>, ExecutionError> {
        log_startup_notice(self.client.base_url());

        let mut output = Vec::new();
        for (item_index, operation) in operations.enumerate() {
            let result = match operation {
                Ok(op) => self.execute_one(&op).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(response) => output.extend(
                    normalize_response(response)
                        .into_iter()
                        .map(|json| ExecutionItem::new(json, item_index)),
                ),
                Err(e) if continue_on_fail => {
                    warn!(item_index, error = %e, "Operation failed, continuing");
                    output.push(ExecutionItem::new(json!({ "error": e.to_string() }), item_index));
                }
                Err(source) => return Err(ExecutionError { item_index, source }),
            }
        }
        Ok(output)
    }

    /// Resolve the credential, plan and issue a single operation.
    pub async fn execute_one(&self, operation: &Operation) -> DomainResult<Value> {
        let credential = self.credentials.credential(&self.credential_name).await?;
        let plan = operation.plan(&credential.organization_id)?;

        debug!(
            resource = operation.resource(),
            method = %plan.method,
            path = %plan.path,
            "Executing operation"
        );

        self.client.execute_plan(&credential, &plan).await
    }
}

/// Fan a response out into output item payloads.
///
/// Arrays yield one item per element, objects yield themselves, `null`
/// yields `{"success": true}` and scalars are wrapped as `{"value": ..}`.
pub fn normalize_response(response: Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        Value::Object(_) => vec![response],
        Value::Null => vec![json!({ "success": true })],
        scalar => vec![json!({ "value": scalar })],
    }
}
