//! Payment repository.
//!
//! Domain-shaped operations over a [`PaymentStore`]. Callers deal in payment
//! ids and statuses; partition and sort keys stay inside the store.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};

use paylookup_core::payment::{
    resolve_lookup, LookupError, LookupOutcome, LookupPolicy, Payment, PaymentKey,
};
use paylookup_core::storage::{PaymentStore, RepositoryError};

/// Failure of a repository read.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// What a seeding run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: Vec<PaymentKey>,
    pub unprocessed: Vec<PaymentKey>,
}

/// Typed access to payment records.
#[derive(Clone)]
pub struct PaymentRepository {
    store: Arc<dyn PaymentStore>,
    policy: LookupPolicy,
}

impl PaymentRepository {
    pub fn new(store: Arc<dyn PaymentStore>, policy: LookupPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<dyn PaymentStore> {
        &self.store
    }

    /// Every stored record, in store order.
    pub async fn list_all(&self) -> Result<Vec<Payment>, RepositoryError> {
        self.store.scan().await
    }

    /// Looks a payment up by id alone, resolving multiple records with the
    /// repository's [`LookupPolicy`].
    pub async fn get_by_id(&self, payment_id: i64) -> Result<Option<Payment>, LookupFailure> {
        let candidates = self.store.query(payment_id).await?;
        Ok(resolve_lookup(payment_id, candidates, self.policy)?)
    }

    /// Looks a payment up by its full key. The policy does not apply.
    pub async fn get_by_key(
        &self,
        payment_id: i64,
        status: &str,
    ) -> Result<Option<Payment>, RepositoryError> {
        self.store.get(&PaymentKey::new(payment_id, status)).await
    }

    /// Lookup used by the request handlers: full key when a status is given,
    /// policy-resolved otherwise.
    #[tracing::instrument(skip(self), fields(policy = %self.policy))]
    pub async fn lookup(
        &self,
        payment_id: i64,
        status: Option<&str>,
    ) -> Result<LookupOutcome, LookupFailure> {
        let payment = match status {
            Some(status) => self.get_by_key(payment_id, status).await?,
            None => self.get_by_id(payment_id).await?,
        };
        Ok(LookupOutcome::from_option(payment_id, payment))
    }

    /// Inserts records whose key is not stored yet.
    ///
    /// Existing keys are skipped so a second run changes nothing. Written
    /// records share one `created_at`; `modified_at` advances by a millisecond
    /// per record in input order, so later entries of a payment's history are
    /// the most recent. Items the store could not write are reported, not
    /// retried.
    pub async fn seed(&self, payments: Vec<Payment>) -> Result<SeedReport, RepositoryError> {
        let mut report = SeedReport::default();
        let mut seen = HashSet::new();
        let mut to_write = Vec::with_capacity(payments.len());
        let now = Utc::now();

        for payment in payments {
            let key = payment.key();
            if !seen.insert(key.clone()) || self.store.get(&key).await?.is_some() {
                tracing::debug!(%key, "Skipping existing payment");
                report.skipped.push(key);
                continue;
            }
            let mut payment = payment.with_timestamps(now);
            payment.touch(now + Duration::milliseconds(to_write.len() as i64));
            to_write.push(payment);
        }

        if to_write.is_empty() {
            return Ok(report);
        }

        let batch = self.store.put_batch(&to_write).await?;
        report.inserted = batch.written;
        report.unprocessed = batch.unprocessed;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped.len(),
            unprocessed = report.unprocessed.len(),
            "Seeded payments"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use paylookup_core::payment::sample_payments;

    fn repository(policy: LookupPolicy) -> PaymentRepository {
        let store = InMemoryStore::with_payments(sample_payments(Utc::now()));
        PaymentRepository::new(Arc::new(store), policy)
    }

    #[tokio::test]
    async fn test_list_all_returns_every_record() {
        let repo = repository(LookupPolicy::default());
        let payments = repo.list_all().await.unwrap();
        assert_eq!(payments.len(), 3);
    }

    #[tokio::test]
    async fn test_list_all_is_repeatable() {
        let repo = repository(LookupPolicy::default());
        assert_eq!(repo.list_all().await.unwrap(), repo.list_all().await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_on_empty_store() {
        let repo = PaymentRepository::new(Arc::new(InMemoryStore::new()), LookupPolicy::default());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_returns_matching_id_for_every_record() {
        let repo = repository(LookupPolicy::default());
        for payment in repo.list_all().await.unwrap() {
            let found = repo.get_by_id(payment.payment_id).await.unwrap().unwrap();
            assert_eq!(found.payment_id, payment.payment_id);
        }
    }

    #[tokio::test]
    async fn test_get_by_id_most_recent() {
        let repo = repository(LookupPolicy::MostRecentlyModified);
        let found = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.status, "succeeded");
        assert_eq!(found.amount, Some(300));
    }

    #[tokio::test]
    async fn test_get_by_id_first_found() {
        let repo = repository(LookupPolicy::FirstFound);
        let found = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.status, "pending");
    }

    #[tokio::test]
    async fn test_get_by_id_require_status() {
        let repo = repository(LookupPolicy::RequireStatus);
        assert_eq!(
            repo.get_by_id(1).await,
            Err(LookupFailure::Lookup(LookupError::StatusRequired {
                payment_id: 1
            }))
        );
    }

    #[tokio::test]
    async fn test_get_by_id_require_status_missing_id_is_absent() {
        let repo = repository(LookupPolicy::RequireStatus);
        assert_eq!(repo.get_by_id(99).await, Ok(None));
        assert_eq!(repo.lookup(99, None).await, Ok(LookupOutcome::NotFound(99)));
    }

    #[tokio::test]
    async fn test_lookup_with_status_bypasses_policy() {
        let repo = repository(LookupPolicy::RequireStatus);
        let outcome = repo.lookup(1, Some("pending")).await.unwrap();
        match outcome {
            LookupOutcome::Found(payment) => assert_eq!(payment.status, "pending"),
            other => panic!("expected a payment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_missing_id_is_not_found() {
        let repo = repository(LookupPolicy::default());
        assert_eq!(repo.lookup(99, None).await, Ok(LookupOutcome::NotFound(99)));
        assert_eq!(
            repo.lookup(1, Some("refunded")).await,
            Ok(LookupOutcome::NotFound(1))
        );
    }

    #[tokio::test]
    async fn test_seed_keeps_both_statuses() {
        let repo = PaymentRepository::new(Arc::new(InMemoryStore::new()), LookupPolicy::default());
        let report = repo
            .seed(vec![Payment::new(1, "pending"), Payment::new(1, "succeeded")])
            .await
            .unwrap();

        assert_eq!(report.inserted, 2);
        assert!(repo.get_by_key(1, "pending").await.unwrap().is_some());
        assert!(repo.get_by_key(1, "succeeded").await.unwrap().is_some());
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_input_order_decides_most_recent() {
        let repo = PaymentRepository::new(
            Arc::new(InMemoryStore::new()),
            LookupPolicy::MostRecentlyModified,
        );
        repo.seed(vec![Payment::new(3, "succeeded"), Payment::new(3, "refunded")])
            .await
            .unwrap();

        let found = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(found.status, "refunded");

        let first = repo.get_by_key(3, "succeeded").await.unwrap().unwrap();
        assert!(first.modified_at < found.modified_at);
        assert_eq!(first.created_at, found.created_at);
    }

    #[tokio::test]
    async fn test_seed_twice_skips_existing() {
        let repo = PaymentRepository::new(Arc::new(InMemoryStore::new()), LookupPolicy::default());

        let first = repo.seed(sample_payments(Utc::now())).await.unwrap();
        let before = repo.list_all().await.unwrap();
        let second = repo.seed(sample_payments(Utc::now())).await.unwrap();

        assert_eq!(first.inserted, 3);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped.len(), 3);
        assert_eq!(repo.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_seed_skips_duplicates_within_input() {
        let repo = PaymentRepository::new(Arc::new(InMemoryStore::new()), LookupPolicy::default());
        let report = repo
            .seed(vec![Payment::new(4, "pending"), Payment::new(4, "pending")])
            .await
            .unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, vec![PaymentKey::new(4, "pending")]);
    }

    #[tokio::test]
    async fn test_seed_stamps_timestamps() {
        let repo = PaymentRepository::new(Arc::new(InMemoryStore::new()), LookupPolicy::default());
        let before = Utc::now();
        repo.seed(vec![Payment::new(5, "pending")]).await.unwrap();

        let stored = repo.get_by_key(5, "pending").await.unwrap().unwrap();
        assert!(stored.created_at >= before);
        assert_eq!(stored.created_at, stored.modified_at);
    }
}
