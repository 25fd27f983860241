use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use paylookup_core::payment::{Payment, PaymentKey};
use paylookup_core::storage::{
    BatchWriteReport, PaymentStore, Result, SchemaOutcome, TableSchema,
};

type Key = (i64, String);

/// In-memory storage backend.
///
/// Iteration order of the map (payment id, then status) is the store order
/// returned by `query` and `scan`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<BTreeMap<Key, Payment>>>,
    provisioned: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates an empty store. The schema counts as not yet provisioned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `payments`.
    pub fn with_payments(payments: Vec<Payment>) -> Self {
        let records = payments
            .into_iter()
            .map(|p| ((p.payment_id, p.status.clone()), p))
            .collect();

        Self {
            records: Arc::new(RwLock::new(records)),
            provisioned: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn get(&self, key: &PaymentKey) -> Result<Option<Payment>> {
        let records = self.records.read().await;
        Ok(records.get(&(key.payment_id, key.status.clone())).cloned())
    }

    async fn query(&self, payment_id: i64) -> Result<Vec<Payment>> {
        let records = self.records.read().await;
        Ok(records
            .range((payment_id, String::new())..)
            .take_while(|((id, _), _)| *id == payment_id)
            .map(|(_, payment)| payment.clone())
            .collect())
    }

    async fn scan(&self) -> Result<Vec<Payment>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn put_batch(&self, payments: &[Payment]) -> Result<BatchWriteReport> {
        let mut records = self.records.write().await;

        for payment in payments {
            records.insert((payment.payment_id, payment.status.clone()), payment.clone());
        }

        Ok(BatchWriteReport {
            written: payments.len(),
            unprocessed: Vec::new(),
        })
    }

    async fn create_schema(&self, schema: &TableSchema) -> Result<SchemaOutcome> {
        if self.provisioned.swap(true, Ordering::SeqCst) {
            tracing::info!(table = %schema.table_name, "Table already exists");
            Ok(SchemaOutcome::AlreadyExists)
        } else {
            tracing::info!(table = %schema.table_name, "Created table");
            Ok(SchemaOutcome::Created)
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use paylookup_core::storage::payments_table_schema;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn payment(id: i64, status: &str) -> Payment {
        Payment::new(id, status).with_timestamps(at(10))
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = InMemoryStore::new();
        let result = store.get(&PaymentKey::new(1, "pending")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_same_id_different_status_are_distinct() {
        let store = InMemoryStore::new();
        store
            .put_batch(&[payment(1, "pending"), payment(1, "succeeded")])
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store
            .get(&PaymentKey::new(1, "pending"))
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get(&PaymentKey::new(1, "succeeded"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_query_returns_only_partition_in_sort_order() {
        let store = InMemoryStore::with_payments(vec![
            payment(2, "succeeded"),
            payment(1, "succeeded"),
            payment(1, "pending"),
            payment(3, "pending"),
        ]);

        let partition = store.query(1).await.unwrap();
        let statuses: Vec<&str> = partition.iter().map(|p| p.status.as_str()).collect();

        assert_eq!(statuses, vec!["pending", "succeeded"]);
        assert!(store.query(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_negative_partition() {
        let store = InMemoryStore::with_payments(vec![payment(-1, "pending"), payment(0, "x")]);
        let partition = store.query(-1).await.unwrap();
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[0].payment_id, -1);
    }

    #[tokio::test]
    async fn test_scan_is_stable() {
        let store = InMemoryStore::with_payments(vec![payment(2, "a"), payment(1, "b")]);

        let first = store.scan().await.unwrap();
        let second = store.scan().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].payment_id, 1);
    }

    #[tokio::test]
    async fn test_put_batch_overwrite_replaces_record() {
        let store = InMemoryStore::with_payments(vec![payment(1, "pending")]);

        let mut update = Payment::new(1, "pending").with_amount(50).with_timestamps(at(99));
        update.touch(at(100));
        store.put_batch(&[update]).await.unwrap();

        let stored = store
            .get(&PaymentKey::new(1, "pending"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.created_at, at(99));
        assert_eq!(stored.modified_at, at(100));
        assert_eq!(stored.amount, Some(50));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let store = InMemoryStore::new();
        let schema = payments_table_schema();

        assert_eq!(
            store.create_schema(&schema).await.unwrap(),
            SchemaOutcome::Created
        );
        assert_eq!(
            store.create_schema(&schema).await.unwrap(),
            SchemaOutcome::AlreadyExists
        );
    }
}
