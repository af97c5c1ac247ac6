// src/models/deduction.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Ajuste con signo sobre las ganancias de un barbero, fuera del ingreso
/// normal por servicios. Importe positivo = descuento; negativo = bono.
/// Se borra individualmente; no existe actualización.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeductionTransaction {
    pub id: Uuid,
    pub barber_id: Uuid,
    pub amount: Decimal,
    pub concept: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeductionPayload {
    #[validate(required(message = "Debes seleccionar un barbero."))]
    pub barber_id: Option<Uuid>,

    /// Positivo descuenta, negativo abona.
    pub amount: Decimal,

    #[validate(length(min = 1, message = "El concepto es obligatorio."))]
    pub concept: String,
}
