// src/handlers/barbers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireAdmin},
    models::barber::{Barber, CreateBarberPayload, UpdateBarberPayload},
};

#[utoipa::path(
    get,
    path = "/api/barbers",
    tag = "Barbers",
    security(("api_jwt" = [])),
    responses((status = 200, body = [Barber]))
)]
pub async fn list_barbers(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let barbers = app_state.barber_service.get_all().await?;
    Ok(Json(barbers))
}

#[utoipa::path(
    get,
    path = "/api/barbers/{id}",
    tag = "Barbers",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del barbero")),
    responses((status = 200, body = Barber), (status = 404))
)]
pub async fn get_barber(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let barber = app_state.barber_service.find(id).await?;
    Ok(Json(barber))
}

#[utoipa::path(
    post,
    path = "/api/barbers",
    tag = "Barbers",
    security(("api_jwt" = [])),
    request_body = CreateBarberPayload,
    responses((status = 201, body = Barber))
)]
pub async fn create_barber(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<CreateBarberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let barber = app_state
        .barber_service
        .create(
            &payload.name,
            payload.phone.as_deref(),
            payload.photo_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(barber)))
}

#[utoipa::path(
    put,
    path = "/api/barbers/{id}",
    tag = "Barbers",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del barbero")),
    request_body = UpdateBarberPayload,
    responses((status = 200, body = Barber), (status = 404))
)]
pub async fn update_barber(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBarberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let barber = app_state
        .barber_service
        .update(
            id,
            &payload.name,
            payload.phone.as_deref(),
            payload.photo_url.as_deref(),
        )
        .await?;

    Ok(Json(barber))
}

#[utoipa::path(
    delete,
    path = "/api/barbers/{id}",
    tag = "Barbers",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del barbero")),
    responses((status = 204), (status = 404))
)]
pub async fn delete_barber(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.barber_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
