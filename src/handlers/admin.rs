// src/handlers/admin.rs
//
// El borrado total de datos pasa por dos confirmaciones encadenadas antes
// de ejecutar nada irreversible.

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::RequireAdmin,
    services::wipe_service::WipeStatus,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WipeConfirmPayload {
    pub token: Uuid,
}

#[utoipa::path(
    get,
    path = "/api/admin/wipe",
    tag = "Admin",
    security(("api_jwt" = [])),
    responses((status = 200, body = WipeStatus))
)]
pub async fn wipe_status(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.wipe_service.status()))
}

/// Paso 1: solicitar el borrado. Devuelve el token para el paso 2.
#[utoipa::path(
    post,
    path = "/api/admin/wipe/request",
    tag = "Admin",
    security(("api_jwt" = [])),
    responses((status = 200, body = WipeStatus), (status = 409))
)]
pub async fn wipe_request(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, AppError> {
    let status = app_state.wipe_service.request()?;
    Ok(Json(status))
}

/// Paso 2: confirmar con el token del paso 1. Devuelve el token final.
#[utoipa::path(
    post,
    path = "/api/admin/wipe/confirm",
    tag = "Admin",
    security(("api_jwt" = [])),
    request_body = WipeConfirmPayload,
    responses((status = 200, body = WipeStatus), (status = 409))
)]
pub async fn wipe_confirm(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<WipeConfirmPayload>,
) -> Result<impl IntoResponse, AppError> {
    let status = app_state.wipe_service.confirm(payload.token)?;
    Ok(Json(status))
}

/// Paso 3: ejecutar el borrado con el token final.
#[utoipa::path(
    post,
    path = "/api/admin/wipe/execute",
    tag = "Admin",
    security(("api_jwt" = [])),
    request_body = WipeConfirmPayload,
    responses((status = 200, body = WipeStatus), (status = 409))
)]
pub async fn wipe_execute(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<WipeConfirmPayload>,
) -> Result<impl IntoResponse, AppError> {
    let status = app_state.wipe_service.execute(payload.token).await?;
    Ok(Json(status))
}
