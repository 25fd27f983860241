//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of
//! [`paylookup_core::storage::PaymentStore`] using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod keys;
mod store;

pub use client::{create_client, StoreConfig};
pub use store::DynamoDbStore;
