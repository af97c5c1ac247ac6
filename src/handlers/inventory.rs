// src/handlers/inventory.rs

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
    models::inventory::{
        CreateItemPayload, CreateMovementPayload, CreateSalePayload, InventoryItem,
        InventorySale, StockMovement, UpdateItemPayload,
    },
};

// ---
// Productos
// ---

#[utoipa::path(
    get,
    path = "/api/inventory/items",
    tag = "Inventory",
    security(("api_jwt" = [])),
    responses((status = 200, body = [InventoryItem]))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.get_all_items().await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/inventory/items",
    tag = "Inventory",
    security(("api_jwt" = [])),
    request_body = CreateItemPayload,
    responses((status = 201, body = InventoryItem))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let item = app_state
        .inventory_service
        .create_item(
            &payload.name,
            &payload.category,
            payload.quantity,
            payload.min_stock,
            payload.unit_price,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del producto")),
    request_body = UpdateItemPayload,
    responses((status = 200, body = InventoryItem), (status = 404))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let item = app_state
        .inventory_service
        .update_item(
            id,
            &payload.name,
            &payload.category,
            payload.min_stock,
            payload.unit_price,
        )
        .await?;

    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del producto")),
    responses((status = 204), (status = 404))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Movimientos (entrada / salida)
// ---

#[utoipa::path(
    get,
    path = "/api/inventory/items/{id}/movements",
    tag = "Inventory",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID del producto")),
    responses((status = 200, body = [StockMovement]))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state.inventory_service.list_movements(id).await?;
    Ok(Json(movements))
}

/// Entrada o salida manual de stock. Una salida que dejaría la cantidad en
/// negativo se rechaza sin tocar nada.
#[utoipa::path(
    post,
    path = "/api/inventory/movements",
    tag = "Inventory",
    security(("api_jwt" = [])),
    request_body = CreateMovementPayload,
    responses((status = 201, body = StockMovement), (status = 409, description = "Stock insuficiente"))
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let movement = app_state
        .inventory_service
        .record_movement(
            payload.item_id.unwrap(),
            payload.kind,
            payload.quantity,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

// ---
// Ventas
// ---

#[utoipa::path(
    get,
    path = "/api/inventory/sales",
    tag = "Inventory",
    security(("api_jwt" = [])),
    responses((status = 200, body = [InventorySale]))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.inventory_service.get_all_sales().await?;
    Ok(Json(sales))
}

#[utoipa::path(
    post,
    path = "/api/inventory/sales",
    tag = "Inventory",
    security(("api_jwt" = [])),
    request_body = CreateSalePayload,
    responses((status = 201, body = InventorySale), (status = 409, description = "Stock insuficiente"))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state
        .inventory_service
        .sell_item(
            payload.item_id.unwrap(),
            payload.quantity,
            payload.sale_price,
            payload.customer_name.as_deref(),
            payload.payment_method,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

/// Borra una venta devolviendo la cantidad al producto origen si sigue
/// existiendo.
#[utoipa::path(
    delete,
    path = "/api/inventory/sales/{id}",
    tag = "Inventory",
    security(("api_jwt" = [])),
    params(("id" = Uuid, Path, description = "ID de la venta")),
    responses((status = 204), (status = 404))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
