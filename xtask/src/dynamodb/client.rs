//! Table inspection through the AWS SDK (Imperative Shell).

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{KeyType, ScalarAttributeType, TableDescription};
use aws_sdk_dynamodb::Client;
use paylookup_core::storage::{AttributeType, KeyAttribute};

use super::error::{DynamodbError, Result};
use super::planning::{TableState, TableStatus};

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(response.table().map(table_state)),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            Ok(None)
        }
        Err(err) => Err(DynamodbError::AwsSdk(
            DisplayErrorContext(&err).to_string(),
        )),
    }
}

/// Reads status and key attributes out of a table description.
pub fn table_state(table: &TableDescription) -> TableState {
    let status = match table.table_status() {
        Some(aws_sdk_dynamodb::types::TableStatus::Active) => TableStatus::Active,
        Some(aws_sdk_dynamodb::types::TableStatus::Creating) => TableStatus::Creating,
        Some(aws_sdk_dynamodb::types::TableStatus::Updating) => TableStatus::Updating,
        Some(aws_sdk_dynamodb::types::TableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Unknown,
    };

    TableState {
        status,
        partition_key: key_attribute(table, KeyType::Hash),
        sort_key: key_attribute(table, KeyType::Range),
    }
}

fn key_attribute(table: &TableDescription, key_type: KeyType) -> Option<KeyAttribute> {
    let name = table
        .key_schema()
        .iter()
        .find(|k| k.key_type() == &key_type)?
        .attribute_name();

    let attribute_type = match table
        .attribute_definitions()
        .iter()
        .find(|a| a.attribute_name() == name)?
        .attribute_type()
    {
        ScalarAttributeType::N => AttributeType::Number,
        ScalarAttributeType::S => AttributeType::String,
        _ => return None,
    };

    Some(KeyAttribute {
        name: name.to_string(),
        attribute_type,
    })
}
