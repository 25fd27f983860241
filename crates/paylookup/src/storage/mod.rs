//! Record store backends.
//!
//! - `inmemory`: always compiled, used for demos and tests.
//! - `dynamodb` (feature `dynamodb`, on by default): AWS DynamoDB via `aws-sdk-dynamodb`.
//!
//! Both implement [`paylookup_core::storage::PaymentStore`]. The backend is
//! picked at startup from [`crate::config::StoreBackend`].

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoDbStore, StoreConfig};
