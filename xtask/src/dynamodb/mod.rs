//! DynamoDB infrastructure management commands.

mod client;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use std::sync::Arc;

use chrono::Utc;
use dialoguer::Confirm;
use paylookup::repository::PaymentRepository;
use paylookup::storage::{DynamoDbStore, StoreConfig};
use paylookup_core::payment::{sample_payments, LookupPolicy};
use paylookup_core::storage::{payments_table_schema, Capacity, SchemaOutcome, PAYMENTS_TABLE_NAME};

use crate::prelude::*;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Create the payments table if it does not exist.
    Deploy(DeployCommand),

    /// Insert the sample payment records.
    Seed(SeedCommand),
}

/// Create the payments table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create the payments table if it does not exist.

The table is keyed by paymentId (number, partition key) and status
(string, sort key). Running the command against an existing table with
the same keys changes nothing. A table with different keys is reported
as an error; key schemas cannot be changed in place.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL       - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION             - AWS region (defaults to eu-west-2)
  AWS_ACCESS_KEY_ID      - Static credentials (optional)
  AWS_SECRET_ACCESS_KEY  - Static credentials (optional)")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Table name to use.
    #[arg(long, default_value = PAYMENTS_TABLE_NAME, env = "DYNAMODB_TABLE_NAME")]
    pub table_name: String,

    /// Provisioned read capacity units.
    #[arg(long, default_value = "1", conflicts_with = "on_demand")]
    pub read_capacity: i64,

    /// Provisioned write capacity units.
    #[arg(long, default_value = "1", conflicts_with = "on_demand")]
    pub write_capacity: i64,

    /// Use on-demand billing instead of provisioned throughput.
    #[arg(long)]
    pub on_demand: bool,
}

impl DeployCommand {
    fn capacity(&self) -> Capacity {
        if self.on_demand {
            Capacity::OnDemand
        } else {
            Capacity::Provisioned {
                read: self.read_capacity,
                write: self.write_capacity,
            }
        }
    }
}

/// Insert the sample payment records.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Insert the sample payment records into DynamoDB.

Payment 1 gets a pending and a succeeded record, payment 2 a single
succeeded record. Records whose key is already stored are skipped, so
the command can be re-run safely. Records the store fails to write are
listed and the command exits with an error.")]
pub struct SeedCommand {
    /// Table name to use.
    #[arg(long, default_value = PAYMENTS_TABLE_NAME, env = "DYNAMODB_TABLE_NAME")]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

fn confirm(prompt: &str) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| DynamodbError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let store_config = StoreConfig::default().with_table_name(&cmd.table_name);

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), store_config.target_display());
        aprintln!();
    }

    let store = DynamoDbStore::connect(&store_config).await;
    let current_state = client::get_table_state(store.client(), store.table_name()).await?;

    let schema = payments_table_schema()
        .with_table_name(&cmd.table_name)
        .with_capacity(cmd.capacity());
    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &schema);

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('-') {
                aprintln!("  {}", p_r(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    if matches!(plan, planning::DeployPlan::NoChanges { .. }) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if matches!(plan, planning::DeployPlan::CreateTable { .. }) && !cmd.force {
        confirm("Apply these changes?")?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Applying changes..."));
    }

    match deploy::execute_deploy_plan(&store, &plan).await? {
        Some(SchemaOutcome::AlreadyExists) => {
            if !global.is_silent() {
                aprintln!(
                    "{} table '{}' already exists, leaving it as is.",
                    p_y("Note:"),
                    cmd.table_name
                );
            }
        }
        Some(SchemaOutcome::Created) | None => {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure deployed successfully."));
            }
        }
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let store_config = StoreConfig::default().with_table_name(&cmd.table_name);

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), store_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!();
    }

    let store = DynamoDbStore::connect(&store_config).await;

    let table_state = client::get_table_state(store.client(), store.table_name()).await?;
    planning::require_active(table_state.as_ref(), store.table_name())?;

    let payments = sample_payments(Utc::now());

    if !global.is_silent() {
        aprintln!("{}", p_c("Payments to insert:"));
        for payment in &payments {
            aprintln!("  {}", seed::format_payment(payment));
        }
        aprintln!();
    }

    if !cmd.force {
        confirm(&format!("Insert {} payments?", payments.len()))?;
    }

    let repository = PaymentRepository::new(Arc::new(store), LookupPolicy::default());
    let report = seed::seed_payments(&repository, payments).await?;

    if !global.is_silent() {
        aprintln!("{} {} payments inserted.", p_g("Success:"), report.inserted);
        if !report.skipped.is_empty() {
            aprintln!("{} {} already present.", p_y("Skipped:"), report.skipped.len());
            if global.is_verbose() {
                for key in &report.skipped {
                    aprintln!("  {}", key);
                }
            }
        }
    }

    if !report.unprocessed.is_empty() && !global.is_silent() {
        aprintln!("{}", p_r("Unwritten payments:"));
        for key in &report.unprocessed {
            aprintln!("  {}", p_r(&key.to_string()));
        }
    }

    seed::ensure_complete(&report)
}
