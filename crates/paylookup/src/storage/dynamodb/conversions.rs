//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and payments.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use paylookup_core::payment::{Payment, PaymentKey};
use paylookup_core::storage::{RepositoryError, PARTITION_KEY_NAME, SORT_KEY_NAME};

use super::keys;

/// Convert a Payment to DynamoDB item.
pub fn payment_to_item(payment: &Payment) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        PARTITION_KEY_NAME.to_string(),
        keys::partition_key(payment.payment_id),
    );
    item.insert(SORT_KEY_NAME.to_string(), keys::sort_key(&payment.status));

    // Data
    if let Some(amount) = payment.amount {
        item.insert("amount".to_string(), AttributeValue::N(amount.to_string()));
    }
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(payment.created_at.to_rfc3339()),
    );
    item.insert(
        "modifiedAt".to_string(),
        AttributeValue::S(payment.modified_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to Payment.
pub fn item_to_payment(item: &HashMap<String, AttributeValue>) -> Result<Payment, RepositoryError> {
    Ok(Payment {
        payment_id: get_number(item, PARTITION_KEY_NAME)?,
        status: get_string(item, SORT_KEY_NAME)?,
        amount: get_optional_number(item, "amount")?,
        created_at: get_datetime(item, "createdAt")?,
        modified_at: get_datetime(item, "modifiedAt")?,
    })
}

/// Extract the composite key from an item (or key map).
pub fn item_to_key(item: &HashMap<String, AttributeValue>) -> Result<PaymentKey, RepositoryError> {
    Ok(PaymentKey::new(
        get_number(item, PARTITION_KEY_NAME)?,
        get_string(item, SORT_KEY_NAME)?,
    ))
}

// ============================================================================
// Helpers
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required numeric attribute.
fn get_number<T: std::str::FromStr>(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<T, RepositoryError> {
    get_optional_number(item, key)?
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional numeric attribute. A present but unparseable value is an error.
fn get_optional_number<T: std::str::FromStr>(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<T>, RepositoryError> {
    match item.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_n()
            .ok()
            .and_then(|n| n.parse().ok())
            .map(Some)
            .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid number {}", key))),
    }
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
