//! DynamoDB key generation functions.
//!
//! The table uses the domain fields directly as keys: `paymentId` (N) is the
//! partition key and `status` (S) is the sort key.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use paylookup_core::payment::PaymentKey;
use paylookup_core::storage::{PARTITION_KEY_NAME, SORT_KEY_NAME};

/// Partition key value for a payment id.
pub fn partition_key(payment_id: i64) -> AttributeValue {
    AttributeValue::N(payment_id.to_string())
}

/// Sort key value for a status.
pub fn sort_key(status: &str) -> AttributeValue {
    AttributeValue::S(status.to_string())
}

/// Full key map for GetItem and similar calls.
pub fn item_key(key: &PaymentKey) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (PARTITION_KEY_NAME.to_string(), partition_key(key.payment_id)),
        (SORT_KEY_NAME.to_string(), sort_key(&key.status)),
    ])
}

/// Key condition selecting one whole partition.
///
/// Pattern: `paymentId = :pk`
pub fn partition_condition() -> String {
    format!("{PARTITION_KEY_NAME} = :pk")
}
