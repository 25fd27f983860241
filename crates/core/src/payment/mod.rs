mod error;
mod lookup;
mod mock_data;
mod request;
mod response;
mod types;

pub use error::{LookupError, RequestError};
pub use lookup::{resolve_lookup, LookupOutcome, LookupPolicy};
pub use mock_data::sample_payments;
pub use request::{parse_payment_id, GetPaymentQuery};
pub use response::{not_found_message, outcome_envelope, Envelope, ErrorBody};
pub use types::{Payment, PaymentKey};
