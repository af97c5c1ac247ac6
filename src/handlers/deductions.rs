// src/handlers/deductions.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireAdmin},
    models::deduction::{CreateDeductionPayload, DeductionTransaction},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListDeductionsQuery {
    pub barber_id: Uuid,
    /// Fecha de referencia; se usa la semana que la contiene. Por defecto, hoy.
    pub date: Option<NaiveDate>,
}

#[utoipa::path(
    get,
    path = "/api/deductions",
    tag = "Deductions",
    security(("api_jwt" = [])),
    params(ListDeductionsQuery),
    responses((status = 200, body = [DeductionTransaction]))
)]
pub async fn list_deductions(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ListDeductionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reference = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let transactions = app_state
        .ledger_service
        .list_for_barber(query.barber_id, reference)
        .await?;
    Ok(Json(transactions))
}

/// Apunte nuevo en el libro: positivo descuenta, negativo abona.
#[utoipa::path(
    post,
    path = "/api/deductions",
    tag = "Deductions",
    security(("api_jwt" = [])),
    request_body = CreateDeductionPayload,
    responses((status = 201, body = DeductionTransaction))
)]
pub async fn create_deduction(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<CreateDeductionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let transaction = app_state
        .ledger_service
        .create(payload.barber_id.unwrap(), payload.amount, &payload.concept)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    delete,
    path = "/api/deductions/{id}",
    tag = "Deductions",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del apunte")),
    responses((status = 204), (status = 404))
)]
pub async fn delete_deduction(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.ledger_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
