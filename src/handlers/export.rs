// src/handlers/export.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::RequireAdmin,
    services::export_service::{ledger_tabular, weekly_report_tabular, Tabular},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    /// Fecha de referencia; se usa la semana que la contiene. Por defecto, hoy.
    pub date: Option<NaiveDate>,
    /// Limita a un barbero; sin él se exporta toda la barbería.
    pub barber_id: Option<Uuid>,
}

async fn weekly_tabular(
    app_state: &AppState,
    query: &ExportQuery,
) -> Result<Tabular, AppError> {
    let reference = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let (report, title) = match query.barber_id {
        Some(barber_id) => {
            let barber = app_state.barber_service.find(barber_id).await?;
            let report = app_state
                .stats_service
                .weekly_for_barber(barber_id, reference)
                .await?;
            (report, format!("Informe semanal — {}", barber.name))
        }
        None => {
            let report = app_state.stats_service.weekly_overview(reference).await?;
            (report, "Informe semanal — Barbería".to_string())
        }
    };
    Ok(weekly_report_tabular(&report, &title))
}

#[utoipa::path(
    get,
    path = "/api/export/weekly.csv",
    tag = "Export",
    security(("api_jwt" = [])),
    params(ExportQuery),
    responses((status = 200, description = "CSV del informe semanal"))
)]
pub async fn weekly_csv(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let table = weekly_tabular(&app_state, &query).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        table.to_csv(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/export/weekly.pdf",
    tag = "Export",
    security(("api_jwt" = [])),
    params(ExportQuery),
    responses((status = 200, description = "PDF del informe semanal"))
)]
pub async fn weekly_pdf(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let table = weekly_tabular(&app_state, &query).await?;
    let bytes = table.to_pdf(&app_state.export_font_dir)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        bytes,
    ))
}

#[utoipa::path(
    get,
    path = "/api/export/ledger.csv",
    tag = "Export",
    security(("api_jwt" = [])),
    params(ExportQuery),
    responses((status = 200, description = "CSV del libro de bonos/descuentos"))
)]
pub async fn ledger_csv(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reference = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let summary = app_state.ledger_service.weekly_summary(reference).await?;
    let table = ledger_tabular(&summary, "Libro de bonos y descuentos");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        table.to_csv(),
    ))
}
