use thiserror::Error;

/// Errors raised while parsing an inbound payment request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid payment id '{0}': expected an integer")]
    MalformedId(String),
    #[error("Status selector cannot be empty")]
    EmptyStatus,
}

/// Errors raised while resolving a lookup by payment id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Payment id {payment_id} needs a status to pick a record")]
    StatusRequired { payment_id: i64 },
    #[error("Unknown lookup policy: {0}")]
    UnknownPolicy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        assert_eq!(
            RequestError::MalformedId("abc".to_string()).to_string(),
            "Invalid payment id 'abc': expected an integer"
        );
        assert_eq!(
            RequestError::EmptyStatus.to_string(),
            "Status selector cannot be empty"
        );
    }

    #[test]
    fn test_lookup_error_display() {
        assert_eq!(
            LookupError::StatusRequired { payment_id: 4 }.to_string(),
            "Payment id 4 needs a status to pick a record"
        );
    }
}
