// src/handlers/services.rs

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
    middleware::auth::AuthenticatedUser,
    models::service::{CreateServicePayload, ServiceRecord},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListServicesQuery {
    /// Fecha de referencia; se usa la semana que la contiene. Por defecto, hoy.
    pub date: Option<NaiveDate>,
    /// Limita a un barbero; sin él se devuelve toda la barbería.
    pub barber_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Services",
    security(("api_jwt" = [])),
    params(ListServicesQuery),
    responses((status = 200, body = [ServiceRecord]))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ListServicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reference = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let records = app_state
        .barber_service
        .list_services_in_week(query.barber_id, reference)
        .await?;
    Ok(Json(records))
}

/// Alta de un servicio. La promo devuelve dos filas (un evento, dos
/// registros con el mismo timestamp).
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Services",
    security(("api_jwt" = [])),
    request_body = CreateServicePayload,
    responses((status = 201, body = [ServiceRecord]), (status = 400))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let created = app_state
        .barber_service
        .record_service(
            payload.barber_id.unwrap(),
            &payload.service_type,
            payload.earning_amount,
            payload.payment_method,
            payload.customer_name.as_deref(),
            payload.proof_photo_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Services",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del servicio")),
    responses((status = 204), (status = 404))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.barber_service.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
