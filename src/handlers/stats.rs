// src/handlers/stats.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireAdmin},
    models::stats::{LedgerSummary, WeeklyReport},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    /// Fecha de referencia; se usa la semana que la contiene. Por defecto, hoy.
    pub date: Option<NaiveDate>,
}

fn reference(query: &WeekQuery) -> NaiveDate {
    query.date.unwrap_or_else(|| Utc::now().date_naive())
}

/// Estadísticas semanales del barbero vinculado al usuario autenticado.
#[utoipa::path(
    get,
    path = "/api/stats/me",
    tag = "Stats",
    security(("api_jwt" = [])),
    params(WeekQuery),
    responses((status = 200, body = WeeklyReport), (status = 409, description = "Usuario sin barbero vinculado"))
)]
pub async fn weekly_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let barber_id = current
        .profile
        .and_then(|p| p.barber_id)
        .ok_or(AppError::LinkageMissing)?;

    let report = app_state
        .stats_service
        .weekly_for_barber(barber_id, reference(&query))
        .await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/stats/barbers/{id}",
    tag = "Stats",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del barbero"), WeekQuery),
    responses((status = 200, body = WeeklyReport))
)]
pub async fn weekly_barber(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .stats_service
        .weekly_for_barber(id, reference(&query))
        .await?;
    Ok(Json(report))
}

/// Vista de administración: la semana de toda la barbería.
#[utoipa::path(
    get,
    path = "/api/stats/overview",
    tag = "Stats",
    security(("api_jwt" = [])),
    params(WeekQuery),
    responses((status = 200, body = WeeklyReport))
)]
pub async fn weekly_overview(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .stats_service
        .weekly_overview(reference(&query))
        .await?;
    Ok(Json(report))
}

/// Ganancias recalculadas con la tabla de comisiones del personal de
/// tarifa especial.
#[utoipa::path(
    get,
    path = "/api/stats/special-rate",
    tag = "Stats",
    security(("api_jwt" = [])),
    params(WeekQuery),
    responses((status = 200, body = WeeklyReport))
)]
pub async fn weekly_special_rate(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .stats_service
        .weekly_special_rate(reference(&query))
        .await?;
    Ok(Json(report))
}

/// Resumen semanal del libro de bonos/descuentos por barbero.
#[utoipa::path(
    get,
    path = "/api/stats/ledger",
    tag = "Stats",
    security(("api_jwt" = [])),
    params(WeekQuery),
    responses((status = 200, body = LedgerSummary))
)]
pub async fn weekly_ledger(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .ledger_service
        .weekly_summary(reference(&query))
        .await?;
    Ok(Json(summary))
}
