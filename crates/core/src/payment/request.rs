use serde::Deserialize;

use super::error::RequestError;

/// Parses the `{id}` path segment of a get-payment request.
///
/// Only a plain base-10 integer is accepted. Trailing garbage (`12abc`) and
/// surrounding whitespace are both rejected rather than truncated.
pub fn parse_payment_id(raw: &str) -> Result<i64, RequestError> {
    raw.parse::<i64>()
        .map_err(|_| RequestError::MalformedId(raw.to_string()))
}

/// Query parameters accepted by the get-payment endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetPaymentQuery {
    /// Selects one record of the partition by its sort key.
    pub status: Option<String>,
}

impl GetPaymentQuery {
    /// Returns the requested status, rejecting an explicitly empty one.
    pub fn status(&self) -> Result<Option<&str>, RequestError> {
        match self.status.as_deref() {
            Some(s) if s.trim().is_empty() => Err(RequestError::EmptyStatus),
            other => Ok(other),
        }
    }
}
