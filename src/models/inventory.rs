// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Producto del almacén (snacks, bebidas, productos de venta).
/// Invariante: `quantity` nunca baja de cero; toda salida o venta que lo
/// rompería se rechaza antes de tocar la base de datos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub min_stock: i32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tipo de movimiento de almacén.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Entrada,
    Salida,
}

/// Histórico de entradas/salidas manuales de stock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub item_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Venta de un producto. `unit_cost` es una foto del precio unitario del
/// producto en el momento de la venta: cambios de precio posteriores no
/// alteran el beneficio histórico. `item_id` queda a NULL si el producto
/// origen se borra después.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySale {
    pub id: Uuid,
    pub item_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub sale_price: Decimal,
    pub profit: Decimal,
    pub customer_name: Option<String>,
    pub payment_method: crate::models::catalog::PaymentMethod,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub name: String,

    #[validate(length(min = 1, message = "La categoría es obligatoria."))]
    pub category: String,

    #[validate(range(min = 0, message = "La cantidad no puede ser negativa."))]
    pub quantity: i32,

    #[validate(range(min = 0, message = "El stock mínimo no puede ser negativo."))]
    pub min_stock: i32,

    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub name: String,

    #[validate(length(min = 1, message = "La categoría es obligatoria."))]
    pub category: String,

    #[validate(range(min = 0, message = "El stock mínimo no puede ser negativo."))]
    pub min_stock: i32,

    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementPayload {
    #[validate(required(message = "Debes seleccionar un producto."))]
    pub item_id: Option<Uuid>,

    pub kind: MovementKind,

    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero."))]
    pub quantity: i32,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[validate(required(message = "Debes seleccionar un producto."))]
    pub item_id: Option<Uuid>,

    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero."))]
    pub quantity: i32,

    /// Precio de venta por unidad. Puede quedar por debajo del coste: una
    /// venta a pérdida se permite, no se rechaza.
    pub sale_price: Decimal,

    pub customer_name: Option<String>,
    pub payment_method: crate::models::catalog::PaymentMethod,
}
