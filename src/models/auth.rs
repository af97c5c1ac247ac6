// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Representa un usuario que viene de la base de datos
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para seguridad
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rol del usuario. Catálogo cerrado: o administra la barbería o es estilista.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Estilista,
}

/// Perfil del usuario. `barber_id` es el vínculo (opcional) con la ficha de
/// barbero: sin él no hay estadísticas personales.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub barber_id: Option<Uuid>,
}

/// Contexto de identidad que viaja con cada petición autenticada. Se llena
/// al validar el token y se descarta al terminar: nada de estado global.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub role: Role,
    pub profile: Option<Profile>,
}

// Datos para registrar un usuario nuevo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "El e-mail no es válido."))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, message = "El nombre completo es obligatorio."))]
    pub full_name: String,
}

// Datos para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(email(message = "El e-mail no es válido."))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

// Respuesta de autenticación con el token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

/// Lo que ve el usuario en /me: su identidad más el vínculo con barbero.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: User,
    pub role: Role,
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkBarberPayload {
    #[validate(required(message = "Debes indicar el usuario."))]
    pub user_id: Option<Uuid>,
    /// `null` desvincula.
    pub barber_id: Option<Uuid>,
}

// Estructura de datos ("claims") dentro del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID del usuario)
    pub exp: usize, // Expiration time (cuándo caduca el token)
    pub iat: usize, // Issued At (cuándo se emitió el token)
}
