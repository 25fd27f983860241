//! Table deployment operations (Imperative Shell).

use std::time::Duration;

use paylookup::storage::DynamoDbStore;
use paylookup_core::storage::{PaymentStore, SchemaOutcome};

use super::client;
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, TableStatus};

/// Execute a deploy plan.
///
/// Returns the schema outcome when a table creation was attempted. A table
/// created by someone else between planning and applying comes back as
/// [`SchemaOutcome::AlreadyExists`] rather than an error.
pub async fn execute_deploy_plan(
    store: &DynamoDbStore,
    plan: &DeployPlan,
) -> Result<Option<SchemaOutcome>> {
    match plan {
        DeployPlan::CreateTable { schema } => {
            let outcome = store.create_schema(schema).await?;
            wait_for_table_active(store, &schema.table_name).await?;
            Ok(Some(outcome))
        }
        DeployPlan::NoChanges { .. } => Ok(None),
        DeployPlan::KeyMismatch {
            table_name,
            details,
        } => Err(DynamodbError::SchemaMismatch {
            table_name: table_name.clone(),
            details: details.join("; "),
        }),
    }
}

async fn wait_for_table_active(store: &DynamoDbStore, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(store.client(), table_name).await? {
            if state.status == TableStatus::Active {
                return Ok(());
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(DynamodbError::TableActivationTimeout)
}
