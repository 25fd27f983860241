//! Pure functions for calculating deployment plans (Functional Core).

use paylookup_core::storage::{KeyAttribute, TableSchema};

use super::error::{DynamodbError, Result};

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    /// `None` when the key is missing or uses a type the schema cannot express.
    pub partition_key: Option<KeyAttribute>,
    pub sort_key: Option<KeyAttribute>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
    /// Missing from the description or a status this tool does not track.
    Unknown,
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TableStatus::Active => "ACTIVE",
            TableStatus::Creating => "CREATING",
            TableStatus::Updating => "UPDATING",
            TableStatus::Deleting => "DELETING",
            TableStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { schema: TableSchema },
    /// Table exists with the expected keys.
    NoChanges { table_name: String },
    /// Table exists but its keys differ. Key schemas cannot be altered in place.
    KeyMismatch {
        table_name: String,
        details: Vec<String>,
    },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableSchema) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            schema: desired.clone(),
        };
    };

    let details: Vec<String> = [
        compare_key("partition", &desired.partition_key, state.partition_key.as_ref()),
        compare_key("sort", &desired.sort_key, state.sort_key.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if details.is_empty() {
        DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    } else {
        DeployPlan::KeyMismatch {
            table_name: desired.table_name.clone(),
            details,
        }
    }
}

fn compare_key(
    role: &str,
    expected: &KeyAttribute,
    found: Option<&KeyAttribute>,
) -> Option<String> {
    match found {
        Some(found) if found == expected => None,
        Some(found) => Some(format!(
            "{role} key: expected {}, found {}",
            describe_key(expected),
            describe_key(found)
        )),
        None => Some(format!(
            "{role} key: expected {}, found none",
            describe_key(expected)
        )),
    }
}

fn describe_key(key: &KeyAttribute) -> String {
    format!("{} ({})", key.name, key.attribute_type.code())
}

/// Pure function: Check that a table can take writes.
pub fn require_active(current: Option<&TableState>, table_name: &str) -> Result<()> {
    match current {
        None => Err(DynamodbError::TableNotFound {
            table_name: table_name.to_string(),
        }),
        Some(state) if state.status == TableStatus::Active => Ok(()),
        Some(state) => Err(DynamodbError::TableNotActive {
            table_name: table_name.to_string(),
            status: state.status.to_string(),
        }),
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { schema } => vec![
            format!("+ Create table: {}", schema.table_name),
            format!("  Partition key: {}", describe_key(&schema.partition_key)),
            format!("  Sort key: {}", describe_key(&schema.sort_key)),
            format!("  Billing: {}", schema.capacity),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
        DeployPlan::KeyMismatch {
            table_name,
            details,
        } => {
            let mut lines = vec![format!("- Table '{}' has a different key schema", table_name)];
            lines.extend(details.iter().map(|d| format!("  {d}")));
            lines
        }
    }
}
