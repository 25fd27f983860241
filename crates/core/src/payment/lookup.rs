//! Resolution of a lookup keyed on `payment_id` alone.
//!
//! The store's unique key is (`payment_id`, `status`), so a partition can hold
//! several records. [`LookupPolicy`] names the rule used to pick one of them.

use std::str::FromStr;

use super::error::LookupError;
use super::types::Payment;

/// Rule used to pick a single record out of a payment's partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPolicy {
    /// First record in store order (sort key ascending).
    FirstFound,
    /// Record with the latest `modified_at`. Ties go to the greatest status.
    #[default]
    MostRecentlyModified,
    /// Callers must name the status; an id on its own is rejected.
    RequireStatus,
}

impl LookupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupPolicy::FirstFound => "first-found",
            LookupPolicy::MostRecentlyModified => "most-recent",
            LookupPolicy::RequireStatus => "require-status",
        }
    }
}

impl FromStr for LookupPolicy {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-found" | "first" => Ok(LookupPolicy::FirstFound),
            "most-recent" | "latest" => Ok(LookupPolicy::MostRecentlyModified),
            "require-status" => Ok(LookupPolicy::RequireStatus),
            other => Err(LookupError::UnknownPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for LookupPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain result of a get-by-id lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Payment),
    NotFound(i64),
}

impl LookupOutcome {
    pub fn from_option(payment_id: i64, payment: Option<Payment>) -> Self {
        match payment {
            Some(payment) => LookupOutcome::Found(payment),
            None => LookupOutcome::NotFound(payment_id),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// Picks one record from the candidates of a single partition.
///
/// `candidates` must be in store order and share one `payment_id`.
/// An empty partition resolves to `Ok(None)` under every policy.
pub fn resolve_lookup(
    payment_id: i64,
    candidates: Vec<Payment>,
    policy: LookupPolicy,
) -> Result<Option<Payment>, LookupError> {
    if candidates.is_empty() {
        return Ok(None);
    }

    match policy {
        LookupPolicy::FirstFound => Ok(candidates.into_iter().next()),
        LookupPolicy::MostRecentlyModified => Ok(candidates
            .into_iter()
            .max_by(|a, b| {
                a.modified_at
                    .cmp(&b.modified_at)
                    .then_with(|| a.status.cmp(&b.status))
            })),
        LookupPolicy::RequireStatus => Err(LookupError::StatusRequired { payment_id }),
    }
}
