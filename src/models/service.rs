// src/models/service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::catalog::PaymentMethod;

/// Un servicio realizado en caja. Inmutable salvo borrado; la foto del
/// justificante de pago es una URL opaca del almacén de ficheros externo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: Uuid,
    pub barber_id: Uuid,
    pub service_type: String,
    pub earning_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub customer_name: Option<String>,
    pub proof_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(required(message = "Debes seleccionar un barbero."))]
    pub barber_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Debes seleccionar un servicio."))]
    pub service_type: String,

    pub earning_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub customer_name: Option<String>,
    pub proof_photo_url: Option<String>,
}
