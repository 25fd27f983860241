//! Sample payment records for seeding and tests.

use chrono::{DateTime, Duration, Utc};

use super::types::Payment;

/// Returns the fixed sample set, stamped relative to `now`.
///
/// Payment 1 has a `pending` and a `succeeded` record. Each record is one
/// second newer than the previous one so recency-based lookups are stable.
pub fn sample_payments(now: DateTime<Utc>) -> Vec<Payment> {
    let rows: [(i64, &str, u64); 3] = [
        (1, "pending", 300),
        (1, "succeeded", 300),
        (2, "succeeded", 500),
    ];

    rows.iter()
        .enumerate()
        .map(|(offset, (id, status, amount))| {
            Payment::new(*id, *status)
                .with_amount(*amount)
                .with_timestamps(now + Duration::seconds(offset as i64))
        })
        .collect()
}
