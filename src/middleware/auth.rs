// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{CurrentUser, Role},
};

// El middleware: valida el Bearer y deja el contexto de identidad en los
// "extensions" de la petición.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::InvalidToken)?;

    let current = app_state.auth_service.validate_token(bearer.token()).await?;
    request.extensions_mut().insert(current);
    Ok(next.run(request).await)
}

// Extractor para obtener la identidad autenticada en los handlers.
pub struct AuthenticatedUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

/// Guardián de rutas de administración: como `AuthenticatedUser`, pero
/// rechaza con 403 a quien no tenga el rol de administrador.
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if current.role != Role::Admin {
            return Err(AppError::Forbidden);
        }
        Ok(RequireAdmin(current))
    }
}
