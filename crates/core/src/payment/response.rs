//! Response shaping.
//!
//! Every successful body is `{"data": ...}`. A not-found lookup still uses the
//! envelope, with a message string as the payload. Failures use [`ErrorBody`]
//! so callers can tell them apart from a not-found result.

use serde::{Deserialize, Serialize};

use super::lookup::LookupOutcome;

/// The uniform `{"data": ...}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body used for malformed input and backend failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Message carried in the envelope when a payment id has no record.
pub fn not_found_message(payment_id: i64) -> String {
    format!("Error: payment id {payment_id} does not exist")
}

/// Shapes a lookup outcome into its envelope.
pub fn outcome_envelope(outcome: &LookupOutcome) -> serde_json::Value {
    match outcome {
        LookupOutcome::Found(payment) => serde_json::json!({ "data": payment }),
        LookupOutcome::NotFound(id) => serde_json::json!({ "data": not_found_message(*id) }),
    }
}
