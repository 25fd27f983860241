use async_trait::async_trait;

use crate::payment::{Payment, PaymentKey};

use super::{Result, TableSchema};

/// Outcome of a batch write.
///
/// Batches are not atomic. Items the backend did not accept are listed in
/// `unprocessed`; the store never retries them on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchWriteReport {
    pub written: usize,
    pub unprocessed: Vec<PaymentKey>,
}

impl BatchWriteReport {
    pub fn is_complete(&self) -> bool {
        self.unprocessed.is_empty()
    }

    /// Folds another chunk's report into this one.
    pub fn merge(&mut self, other: BatchWriteReport) {
        self.written += other.written;
        self.unprocessed.extend(other.unprocessed);
    }
}

/// Outcome of provisioning the table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    Created,
    AlreadyExists,
}

/// Composite-key record store holding payment records.
///
/// Partition key is `payment_id`, sort key is `status`. Reads that match
/// nothing return `Ok(None)` or an empty vector.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Gets one record by its full key.
    async fn get(&self, key: &PaymentKey) -> Result<Option<Payment>>;

    /// Gets every record of one partition, in sort key order.
    async fn query(&self, payment_id: i64) -> Result<Vec<Payment>>;

    /// Gets every record in the store, in store order.
    async fn scan(&self) -> Result<Vec<Payment>>;

    /// Writes records in one or more batches.
    ///
    /// A record whose key is already stored replaces the stored one whole,
    /// timestamps included. Callers that need to keep `created_at` read the
    /// existing record first.
    async fn put_batch(&self, payments: &[Payment]) -> Result<BatchWriteReport>;

    /// Creates the table. Succeeds with `AlreadyExists` if it is already there.
    async fn create_schema(&self, schema: &TableSchema) -> Result<SchemaOutcome>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_report_merge() {
        let mut report = BatchWriteReport {
            written: 2,
            unprocessed: Vec::new(),
        };
        report.merge(BatchWriteReport {
            written: 1,
            unprocessed: vec![PaymentKey::new(3, "pending")],
        });

        assert_eq!(report.written, 3);
        assert_eq!(report.unprocessed, vec![PaymentKey::new(3, "pending")]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_empty_report_is_complete() {
        assert!(BatchWriteReport::default().is_complete());
    }
}
