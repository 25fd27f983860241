use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use paylookup_core::payment::{
    outcome_envelope, parse_payment_id, Envelope, GetPaymentQuery, Payment,
};

use crate::{config::NotFoundStatus, handlers::AppError, state::AppState};

/// GET /payments - List every stored payment record.
#[tracing::instrument(skip(state))]
pub async fn list_payments(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Payment>>>, AppError> {
    let payments = state.repository.list_all().await?;
    tracing::debug!(count = payments.len(), "Listed payments");
    Ok(Json(Envelope::new(payments)))
}

/// GET /payments/{id} - Look a payment up by id.
///
/// `?status=` selects one record by its full key. Without it the configured
/// lookup policy picks among the records sharing the id.
#[tracing::instrument(skip(state))]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<GetPaymentQuery>,
) -> Result<Response, AppError> {
    let payment_id = parse_payment_id(&id)?;
    let status = query.status()?;

    let outcome = state.repository.lookup(payment_id, status).await?;
    let status_code = match state.not_found_status {
        NotFoundStatus::NotFound if !outcome.is_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };

    Ok((status_code, Json(outcome_envelope(&outcome))).into_response())
}
