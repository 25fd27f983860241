//! DynamoDB record store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ProvisionedThroughput, PutRequest, ScalarAttributeType, WriteRequest,
};
use aws_sdk_dynamodb::Client;

use paylookup_core::payment::{Payment, PaymentKey};
use paylookup_core::storage::{
    AttributeType, BatchWriteReport, Capacity, KeyAttribute, PaymentStore, RepositoryError,
    Result, SchemaOutcome, TableSchema,
};

use super::client::{create_client, StoreConfig};
use super::conversions::{item_to_key, item_to_payment, payment_to_item};
use super::error::{
    map_batch_write_error, map_create_table_error, map_describe_table_error, map_get_item_error,
    map_query_error, map_scan_error,
};
use super::keys;

/// BatchWriteItem accepts at most 25 requests.
const BATCH_WRITE_LIMIT: usize = 25;

/// DynamoDB-based record store.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store from an explicit connection configuration.
    pub async fn connect(config: &StoreConfig) -> Self {
        let client = create_client(config).await;
        Self::new(client, config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get the underlying SDK client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Pages through a Scan or Query until `LastEvaluatedKey` is empty.
    async fn collect_pages<F, Fut>(&self, mut page: F) -> Result<Vec<Payment>>
    where
        F: FnMut(Option<HashMap<String, AttributeValue>>) -> Fut,
        Fut: std::future::Future<
            Output = Result<(
                Vec<HashMap<String, AttributeValue>>,
                Option<HashMap<String, AttributeValue>>,
            )>,
        >,
    {
        let mut payments = Vec::new();
        let mut start_key = None;

        loop {
            let (items, last_key) = page(start_key).await?;
            for item in &items {
                payments.push(item_to_payment(item)?);
            }
            match last_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(payments)
    }

    async fn write_chunk(&self, chunk: &[Payment]) -> Result<BatchWriteReport> {
        let write_requests = chunk
            .iter()
            .map(|payment| {
                PutRequest::builder()
                    .set_item(Some(payment_to_item(payment)))
                    .build()
                    .map(|put| WriteRequest::builder().put_request(put).build())
                    .map_err(|e| RepositoryError::Serialization(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, write_requests)
            .send()
            .await
            .map_err(map_batch_write_error)?;

        let unprocessed = output
            .unprocessed_items
            .unwrap_or_default()
            .remove(&self.table_name)
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.put_request())
            .map(|put| item_to_key(put.item()))
            .collect::<Result<Vec<_>>>()?;

        Ok(BatchWriteReport {
            written: chunk.len() - unprocessed.len(),
            unprocessed,
        })
    }
}

#[async_trait]
impl PaymentStore for DynamoDbStore {
    async fn get(&self, key: &PaymentKey) -> Result<Option<Payment>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::item_key(key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_payment(&item)?)),
            None => Ok(None),
        }
    }

    async fn query(&self, payment_id: i64) -> Result<Vec<Payment>> {
        self.collect_pages(|start_key| async move {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression(keys::partition_condition())
                .expression_attribute_values(":pk", keys::partition_key(payment_id))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;
            Ok((output.items.unwrap_or_default(), output.last_evaluated_key))
        })
        .await
    }

    async fn scan(&self) -> Result<Vec<Payment>> {
        self.collect_pages(|start_key| async move {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;
            Ok((output.items.unwrap_or_default(), output.last_evaluated_key))
        })
        .await
    }

    async fn put_batch(&self, payments: &[Payment]) -> Result<BatchWriteReport> {
        let mut report = BatchWriteReport::default();

        for chunk in payments.chunks(BATCH_WRITE_LIMIT) {
            let chunk_report = self.write_chunk(chunk).await?;
            if !chunk_report.is_complete() {
                tracing::warn!(
                    table = %self.table_name,
                    unprocessed = chunk_report.unprocessed.len(),
                    "Batch write left items unprocessed"
                );
            }
            report.merge(chunk_report);
        }

        Ok(report)
    }

    async fn create_schema(&self, schema: &TableSchema) -> Result<SchemaOutcome> {
        let key_schema = vec![
            key_schema_element(&schema.partition_key, KeyType::Hash)?,
            key_schema_element(&schema.sort_key, KeyType::Range)?,
        ];
        let attribute_definitions = vec![
            attribute_definition(&schema.partition_key)?,
            attribute_definition(&schema.sort_key)?,
        ];

        let mut request = self
            .client
            .create_table()
            .table_name(&schema.table_name)
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attribute_definitions));

        request = match schema.capacity {
            Capacity::OnDemand => request.billing_mode(BillingMode::PayPerRequest),
            Capacity::Provisioned { read, write } => request
                .billing_mode(BillingMode::Provisioned)
                .provisioned_throughput(
                    ProvisionedThroughput::builder()
                        .read_capacity_units(read)
                        .write_capacity_units(write)
                        .build()
                        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?,
                ),
        };

        match request.send().await {
            Ok(_) => {
                tracing::info!(table = %schema.table_name, capacity = %schema.capacity, "Created table");
                Ok(SchemaOutcome::Created)
            }
            Err(err) => match map_create_table_error(err, &schema.table_name) {
                RepositoryError::AlreadyExists { .. } => {
                    tracing::info!(table = %schema.table_name, "Table already exists");
                    Ok(SchemaOutcome::AlreadyExists)
                }
                other => Err(other),
            },
        }
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_describe_table_error(e, &self.table_name))?;
        Ok(())
    }
}

fn key_schema_element(attribute: &KeyAttribute, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&attribute.name)
        .key_type(key_type)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))
}

fn attribute_definition(attribute: &KeyAttribute) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&attribute.name)
        .attribute_type(to_scalar_type(attribute.attribute_type))
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))
}

fn to_scalar_type(attribute_type: AttributeType) -> ScalarAttributeType {
    match attribute_type {
        AttributeType::Number => ScalarAttributeType::N,
        AttributeType::String => ScalarAttributeType::S,
    }
}
