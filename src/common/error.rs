use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("El e-mail ya existe")]
    EmailAlreadyExists,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acceso restringido a administradores")]
    Forbidden,

    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("Barbero no encontrado")]
    BarberNotFound,

    #[error("Servicio no encontrado")]
    ServiceNotFound,

    #[error("Movimiento no encontrado")]
    DeductionNotFound,

    #[error("Producto no encontrado")]
    ItemNotFound,

    #[error("Venta no encontrada")]
    SaleNotFound,

    // El usuario no tiene barbero vinculado: no puede ver estadísticas propias.
    #[error("El usuario no tiene barbero asociado")]
    LinkageMissing,

    #[error("Stock insuficiente: disponibles {available}, solicitadas {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    // Transición inválida en la máquina de confirmación del borrado total.
    #[error("Confirmación inválida: {0}")]
    WipeState(String),

    #[error("Violación de unicidad: {0}")]
    UniqueConstraintViolation(String),

    // Variante para errores de base de datos (sqlx)
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolvemos todos los detalles de la validación.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail ya está en uso.".to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "E-mail o contraseña inválidos.".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Necesitas permisos de administrador para esta acción.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuario no encontrado.".to_string())
            }
            AppError::BarberNotFound => {
                (StatusCode::NOT_FOUND, "Barbero no encontrado.".to_string())
            }
            AppError::ServiceNotFound => {
                (StatusCode::NOT_FOUND, "Servicio no encontrado.".to_string())
            }
            AppError::DeductionNotFound => {
                (StatusCode::NOT_FOUND, "Movimiento no encontrado.".to_string())
            }
            AppError::ItemNotFound => {
                (StatusCode::NOT_FOUND, "Producto no encontrado.".to_string())
            }
            AppError::SaleNotFound => {
                (StatusCode::NOT_FOUND, "Venta no encontrada.".to_string())
            }
            AppError::LinkageMissing => (
                StatusCode::CONFLICT,
                "Tu usuario no está vinculado a ningún barbero.".to_string(),
            ),
            ref e @ AppError::InsufficientStock { .. } => {
                (StatusCode::CONFLICT, e.to_string())
            }
            AppError::WipeState(msg) => (StatusCode::CONFLICT, msg),
            AppError::UniqueConstraintViolation(constraint) => (
                StatusCode::CONFLICT,
                format!("Registro duplicado ({constraint})."),
            ),

            // Todos los demás errores (DatabaseError, InternalServerError) son 500.
            // El `tracing` registra el mensaje detallado que nos da `thiserror`.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.".to_string(),
                )
            }
        };

        // Respuesta estándar para errores simples que solo llevan un mensaje.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
