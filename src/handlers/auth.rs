// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireAdmin},
    models::auth::{
        AuthResponse, LinkBarberPayload, LoginUserPayload, MeResponse, Profile,
        RegisterUserPayload,
    },
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses((status = 200, body = AuthResponse), (status = 409, description = "E-mail duplicado"))
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_user(&payload.email, &payload.password, &payload.full_name)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses((status = 200, body = AuthResponse), (status = 401, description = "Credenciales inválidas"))
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler de la ruta protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("api_jwt" = [])),
    responses((status = 200, body = MeResponse))
)]
pub async fn get_me(AuthenticatedUser(current): AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: current.user,
        role: current.role,
        profile: current.profile,
    })
}

/// Vincula el perfil de un usuario a una ficha de barbero (solo admin).
#[utoipa::path(
    post,
    path = "/api/users/link-barber",
    tag = "Users",
    security(("api_jwt" = [])),
    request_body = LinkBarberPayload,
    responses((status = 200, body = Profile))
)]
pub async fn link_barber(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<LinkBarberPayload>,
) -> Result<Json<Profile>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let profile = app_state
        .auth_service
        .link_barber(payload.user_id.unwrap(), payload.barber_id)
        .await?;

    Ok(Json(profile))
}
