//! AWS SDK client setup.

use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;

use paylookup_core::storage::PAYMENTS_TABLE_NAME;

/// Connection settings for the DynamoDB store.
///
/// Built once at process start and handed to [`create_client`]. None of the
/// values are validated here; the SDK reports anything it cannot use.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
    /// Table holding payment records.
    pub table_name: String,
    /// Static access key id. Falls back to the default credential chain when unset.
    pub access_key_id: Option<String>,
    /// Static secret access key, paired with `access_key_id`.
    pub secret_access_key: Option<String>,
    /// Per-operation timeout passed to the SDK.
    pub operation_timeout: Duration,
    /// Total attempts per request. 1 disables SDK retries.
    pub max_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }
}

impl StoreConfig {
    /// Builds the configuration from a variable lookup.
    ///
    /// Variables:
    /// - `AWS_ENDPOINT_URL` - Use local DynamoDB (e.g., http://localhost:8000)
    /// - `AWS_REGION` - AWS region (default: "eu-west-2")
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "payments-table")
    /// - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` - Static credentials
    /// - `STORE_TIMEOUT_MS` - Operation timeout in milliseconds (default: 5000)
    /// - `STORE_MAX_ATTEMPTS` - Attempts per request (default: 1)
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint_url: get("AWS_ENDPOINT_URL"),
            region: get("AWS_REGION").unwrap_or_else(|| "eu-west-2".to_string()),
            table_name: get("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|| PAYMENTS_TABLE_NAME.to_string()),
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            operation_timeout: get("STORE_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(5)),
            max_attempts: get("STORE_MAX_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }

    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &StoreConfig) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(config.operation_timeout)
                .build(),
        )
        .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts.max(1)));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
        loader = loader.credentials_provider(Credentials::new(
            key_id.clone(),
            secret.clone(),
            None,
            None,
            "paylookup-static",
        ));
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}
