// src/models/barber.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Ficha de un barbero. Los contadores son caches de mejor esfuerzo que se
/// actualizan en la misma transacción que el alta/baja del servicio, pero no
/// se garantiza que cuadren con el histórico completo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub cuts_count: i32,
    pub beards_count: i32,
    pub eyebrows_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBarberPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub name: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBarberPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub name: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}
