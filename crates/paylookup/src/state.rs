//! Application state.
//!
//! Built once at startup from [`Config`] and cloned into every handler. The
//! only shared piece is the repository, which is read-only for served traffic.

use std::sync::Arc;

use chrono::Utc;
use paylookup_core::payment::sample_payments;
use paylookup_core::storage::PaymentStore;

use crate::config::{Config, NotFoundStatus, StoreBackend};
use crate::repository::PaymentRepository;
use crate::storage::InMemoryStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repository: PaymentRepository,
    pub not_found_status: NotFoundStatus,
}

impl AppState {
    /// Creates state around an already constructed store.
    pub fn with_store(store: Arc<dyn PaymentStore>, config: &Config) -> Self {
        Self {
            repository: PaymentRepository::new(store, config.lookup_policy),
            not_found_status: config.not_found_status,
        }
    }

    /// Creates state backed by an in-memory store holding the sample records.
    pub fn with_demo_data(config: &Config) -> Self {
        let store = InMemoryStore::with_payments(sample_payments(Utc::now()));
        Self::with_store(Arc::new(store), config)
    }

    /// Creates state for the backend selected in `config`.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.store_backend {
            StoreBackend::Memory if config.seed_demo_data => Ok(Self::with_demo_data(config)),
            StoreBackend::Memory => Ok(Self::with_store(Arc::new(InMemoryStore::new()), config)),
            #[cfg(feature = "dynamodb")]
            StoreBackend::DynamoDb => {
                tracing::info!(
                    target_env = %config.store.target_display(),
                    table = %config.store.table_name,
                    "Connecting to DynamoDB"
                );
                let store = crate::storage::DynamoDbStore::connect(&config.store).await;
                Ok(Self::with_store(Arc::new(store), config))
            }
            #[cfg(not(feature = "dynamodb"))]
            StoreBackend::DynamoDb => {
                anyhow::bail!("STORE_BACKEND=dynamodb needs the 'dynamodb' feature")
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), &Config::default())
    }
}
