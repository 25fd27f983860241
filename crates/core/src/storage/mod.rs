mod error;
mod http_mapping;
mod schema;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use schema::{
    payments_table_schema, AttributeType, Capacity, KeyAttribute, TableSchema,
    PAYMENTS_TABLE_NAME, PARTITION_KEY_NAME, SORT_KEY_NAME,
};
pub use traits::{BatchWriteReport, PaymentStore, SchemaOutcome};
