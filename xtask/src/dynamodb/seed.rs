//! Seed command implementation.

use paylookup::repository::{PaymentRepository, SeedReport};
use paylookup_core::payment::Payment;

use super::error::{DynamodbError, Result};

/// Inserts `payments` through the repository write path.
///
/// Records already stored are skipped. Any record the store could not write
/// turns the whole run into an error after the report is returned to the
/// caller for display.
pub async fn seed_payments(
    repository: &PaymentRepository,
    payments: Vec<Payment>,
) -> Result<SeedReport> {
    Ok(repository.seed(payments).await?)
}

/// Fails when the report lists records the store left unwritten.
pub fn ensure_complete(report: &SeedReport) -> Result<()> {
    if report.unprocessed.is_empty() {
        Ok(())
    } else {
        Err(DynamodbError::PartialSeed {
            count: report.unprocessed.len(),
        })
    }
}

/// Format a payment for display.
pub fn format_payment(payment: &Payment) -> String {
    match payment.amount {
        Some(amount) => format!("{} (amount: {})", payment.key(), amount),
        None => payment.key().to_string(),
    }
}
