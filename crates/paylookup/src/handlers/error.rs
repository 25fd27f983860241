use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use paylookup_core::payment::{ErrorBody, LookupError, RequestError};
use paylookup_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::repository::LookupFailure;

/// Handler error rendered as `{"error": "..."}`.
///
/// Malformed requests map to 400, store failures through
/// [`repository_error_to_status_code`], anything else to 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if self.0.downcast_ref::<RequestError>().is_some()
            || self.0.downcast_ref::<LookupError>().is_some()
        {
            return StatusCode::BAD_REQUEST;
        }

        let repo_error = match self.0.downcast_ref::<LookupFailure>() {
            Some(LookupFailure::Lookup(_)) => return StatusCode::BAD_REQUEST,
            Some(LookupFailure::Store(e)) => Some(e),
            None => self.0.downcast_ref::<RepositoryError>(),
        };

        match repo_error {
            Some(e) => StatusCode::from_u16(repository_error_to_status_code(e))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        (status_code, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
