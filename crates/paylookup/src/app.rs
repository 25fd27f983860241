use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::{livez, readyz},
        payments::{get_payment, list_payments},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/payments", get(list_payments))
        .route("/payments/{id}", get(get_payment))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use paylookup_core::payment::{LookupPolicy, Payment, PaymentKey};
    use paylookup_core::storage::{
        BatchWriteReport, PaymentStore, RepositoryError, Result as RepoResult, SchemaOutcome,
        TableSchema,
    };
    use tower::ServiceExt;

    use crate::config::{Config, NotFoundStatus};

    fn demo_app(config: Config) -> Router {
        create_app(AppState::with_demo_data(&config), Duration::from_secs(10))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    /// Store whose every call fails as if the backend were unreachable.
    struct UnreachableStore;

    #[async_trait]
    impl PaymentStore for UnreachableStore {
        async fn get(&self, _key: &PaymentKey) -> RepoResult<Option<Payment>> {
            Err(RepositoryError::ConnectionFailed("connection refused".to_string()))
        }

        async fn query(&self, _payment_id: i64) -> RepoResult<Vec<Payment>> {
            Err(RepositoryError::ConnectionFailed("connection refused".to_string()))
        }

        async fn scan(&self) -> RepoResult<Vec<Payment>> {
            Err(RepositoryError::ConnectionFailed("connection refused".to_string()))
        }

        async fn put_batch(&self, _payments: &[Payment]) -> RepoResult<BatchWriteReport> {
            Err(RepositoryError::ConnectionFailed("connection refused".to_string()))
        }

        async fn create_schema(&self, _schema: &TableSchema) -> RepoResult<SchemaOutcome> {
            Err(RepositoryError::ConnectionFailed("connection refused".to_string()))
        }

        async fn ping(&self) -> RepoResult<()> {
            Err(RepositoryError::ConnectionFailed("connection refused".to_string()))
        }
    }

    fn unreachable_app() -> Router {
        let state = AppState::with_store(Arc::new(UnreachableStore), &Config::default());
        create_app(state, Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_list_payments() {
        let (status, json) = get_json(demo_app(Config::default()), "/payments").await;

        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert!(data.iter().all(|p| p["paymentId"].is_i64()));
    }

    #[tokio::test]
    async fn test_list_payments_empty() {
        let app = create_app(AppState::default(), Duration::from_secs(10));
        let (status, json) = get_json(app, "/payments").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "data": [] }));
    }

    #[tokio::test]
    async fn test_get_payment_found() {
        let (status, json) = get_json(demo_app(Config::default()), "/payments/2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["paymentId"], 2);
        assert_eq!(json["data"]["status"], "succeeded");
        assert_eq!(json["data"]["amount"], 500);
    }

    #[tokio::test]
    async fn test_get_payment_picks_most_recent_by_default() {
        let (status, json) = get_json(demo_app(Config::default()), "/payments/1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "succeeded");
        assert_eq!(json["data"]["amount"], 300);
    }

    #[tokio::test]
    async fn test_get_payment_with_status() {
        let (status, json) =
            get_json(demo_app(Config::default()), "/payments/1?status=pending").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["paymentId"], 1);
        assert_eq!(json["data"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_get_payment_with_unknown_status() {
        let (status, json) =
            get_json(demo_app(Config::default()), "/payments/1?status=refunded").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], "Error: payment id 1 does not exist");
    }

    #[tokio::test]
    async fn test_get_payment_not_found_uses_envelope() {
        let (status, json) = get_json(demo_app(Config::default()), "/payments/99").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({ "data": "Error: payment id 99 does not exist" })
        );
    }

    #[tokio::test]
    async fn test_get_payment_not_found_with_404() {
        let config = Config {
            not_found_status: NotFoundStatus::NotFound,
            ..Config::default()
        };
        let (status, json) = get_json(demo_app(config), "/payments/99").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["data"], "Error: payment id 99 does not exist");
    }

    #[tokio::test]
    async fn test_get_payment_malformed_id() {
        let (status, json) = get_json(demo_app(Config::default()), "/payments/abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("abc"));
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_get_payment_trailing_garbage_is_malformed() {
        let (status, _) = get_json(demo_app(Config::default()), "/payments/12abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_payment_empty_status() {
        let (status, json) = get_json(demo_app(Config::default()), "/payments/1?status=").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_require_status_policy() {
        let config = Config {
            lookup_policy: LookupPolicy::RequireStatus,
            ..Config::default()
        };

        let (status, json) = get_json(demo_app(config.clone()), "/payments/1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("needs a status"));

        let (status, json) = get_json(demo_app(config), "/payments/1?status=succeeded").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "succeeded");
    }

    #[tokio::test]
    async fn test_require_status_policy_unknown_id_is_not_found() {
        let config = Config {
            lookup_policy: LookupPolicy::RequireStatus,
            ..Config::default()
        };
        let (status, json) = get_json(demo_app(config), "/payments/99").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({ "data": "Error: payment id 99 does not exist" })
        );
    }

    #[tokio::test]
    async fn test_first_found_policy() {
        let config = Config {
            lookup_policy: LookupPolicy::FirstFound,
            ..Config::default()
        };
        let (status, json) = get_json(demo_app(config), "/payments/1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["paymentId"], 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_not_found() {
        let (status, json) = get_json(unreachable_app(), "/payments/1").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(json["error"].as_str().unwrap().contains("connection refused"));
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_list_store_failure() {
        let (status, json) = get_json(unreachable_app(), "/payments").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_livez() {
        let response = demo_app(Config::default())
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz() {
        let (status, json) = get_json(demo_app(Config::default()), "/readyz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ready"], true);

        let (status, json) = get_json(unreachable_app(), "/readyz").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["ready"], false);
    }
}
