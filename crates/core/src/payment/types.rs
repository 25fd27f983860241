use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single payment record.
///
/// One logical payment may be stored as several records that differ only by
/// `status` (for example `pending` followed by `succeeded`). The pair
/// (`payment_id`, `status`) is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// The composite key of a payment record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentKey {
    pub payment_id: i64,
    pub status: String,
}

impl PaymentKey {
    pub fn new(payment_id: i64, status: impl Into<String>) -> Self {
        Self {
            payment_id,
            status: status.into(),
        }
    }
}

impl std::fmt::Display for PaymentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.payment_id, self.status)
    }
}

impl Payment {
    /// Creates a new payment record with both timestamps set to now.
    pub fn new(payment_id: i64, status: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            payment_id,
            status: status.into(),
            amount: None,
            created_at: now,
            modified_at: now,
        }
    }

    /// Sets the amount for this payment.
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets both timestamps to the given instant.
    pub fn with_timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.modified_at = at;
        self
    }

    /// Marks the record as modified at `now`. `created_at` is left untouched.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_at = now;
    }

    /// Returns the composite key of this record.
    pub fn key(&self) -> PaymentKey {
        PaymentKey::new(self.payment_id, self.status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_sets_equal_timestamps() {
        let payment = Payment::new(1, "pending");
        assert_eq!(payment.created_at, payment.modified_at);
        assert_eq!(payment.amount, None);
    }

    #[test]
    fn test_touch_only_moves_modified_at() {
        let mut payment = Payment::new(1, "pending").with_timestamps(at(100));
        payment.touch(at(200));

        assert_eq!(payment.created_at, at(100));
        assert_eq!(payment.modified_at, at(200));
    }

    #[test]
    fn test_key() {
        let payment = Payment::new(7, "succeeded");
        assert_eq!(payment.key(), PaymentKey::new(7, "succeeded"));
        assert_eq!(payment.key().to_string(), "7#succeeded");
    }

    #[test]
    fn test_serializes_camel_case() {
        let payment = Payment::new(1, "pending")
            .with_amount(300)
            .with_timestamps(at(0));
        let json = serde_json::to_value(&payment).unwrap();

        assert_eq!(json["paymentId"], 1);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["amount"], 300);
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["modifiedAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_missing_amount_is_omitted() {
        let payment = Payment::new(1, "pending");
        let json = serde_json::to_value(&payment).unwrap();
        assert!(json.get("amount").is_none());
    }
}
