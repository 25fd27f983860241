//! Table schema definition (pure data).

/// Default table name.
pub const PAYMENTS_TABLE_NAME: &str = "payments-table";
/// Partition key attribute.
pub const PARTITION_KEY_NAME: &str = "paymentId";
/// Sort key attribute.
pub const SORT_KEY_NAME: &str = "status";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
    pub capacity: Capacity,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// Scalar attribute types usable in a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Number,
    String,
}

impl AttributeType {
    /// Short DynamoDB-style type code.
    pub fn code(&self) -> &'static str {
        match self {
            AttributeType::Number => "N",
            AttributeType::String => "S",
        }
    }
}

/// Throughput settings for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    OnDemand,
    Provisioned { read: i64, write: i64 },
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::Provisioned { read: 1, write: 1 }
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capacity::OnDemand => f.write_str("PAY_PER_REQUEST"),
            Capacity::Provisioned { read, write } => {
                write!(f, "PROVISIONED (read: {read}, write: {write})")
            }
        }
    }
}

impl TableSchema {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Sets the throughput settings.
    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Returns the canonical payments table schema.
pub fn payments_table_schema() -> TableSchema {
    TableSchema {
        table_name: PAYMENTS_TABLE_NAME.to_string(),
        partition_key: KeyAttribute {
            name: PARTITION_KEY_NAME.to_string(),
            attribute_type: AttributeType::Number,
        },
        sort_key: KeyAttribute {
            name: SORT_KEY_NAME.to_string(),
            attribute_type: AttributeType::String,
        },
        capacity: Capacity::default(),
    }
}
