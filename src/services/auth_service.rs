// src/services/auth_service.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BarberRepository, UserRepository},
    models::auth::{Claims, CurrentUser, Profile, Role},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    barber_repo: BarberRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        barber_repo: BarberRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            barber_repo,
            jwt_secret,
            pool,
        }
    }

    /// Registro: usuario + perfil + rol en UNA transacción (el registro
    /// tiene como efecto colateral la fila de perfil y la de rol). El primer
    /// usuario de la instalación queda como administrador; el resto entra
    /// como estilista.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<String, AppError> {
        // El hashing puede quedar fuera de la transacción: no toca la base.
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Fallo en la task de hashing: {}", e))??;

        let mut tx = self.pool.begin().await?;

        let existing = self.user_repo.count_users(&mut *tx).await?;
        let role = if existing == 0 {
            Role::Admin
        } else {
            Role::Estilista
        };

        let new_user = self
            .user_repo
            .create_user(&mut *tx, email, &hashed_password)
            .await?;
        self.user_repo
            .create_profile(&mut *tx, new_user.id, full_name)
            .await?;
        self.user_repo
            .create_role(&mut *tx, new_user.id, role)
            .await?;

        tx.commit().await?;

        tracing::info!("👤 Usuario registrado como {:?}", role);
        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Verificación en un hilo aparte para no bloquear el runtime.
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Fallo en la task de verificación: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    /// Valida el token y reconstruye el contexto de identidad completo
    /// (usuario + rol + perfil) que viaja con la petición.
    pub async fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;
        let role = self
            .user_repo
            .find_role(user.id)
            .await?
            .unwrap_or(Role::Estilista);
        let profile = self.user_repo.find_profile(user.id).await?;

        Ok(CurrentUser {
            user,
            role,
            profile,
        })
    }

    /// Vincula (o desvincula) el perfil de un usuario a una ficha de barbero.
    pub async fn link_barber(
        &self,
        user_id: Uuid,
        barber_id: Option<Uuid>,
    ) -> Result<Profile, AppError> {
        if let Some(id) = barber_id {
            self.barber_repo
                .find_by_id(id)
                .await?
                .ok_or(AppError::BarberNotFound)?;
        }
        self.user_repo
            .link_profile_to_barber(&self.pool, user_id, barber_id)
            .await
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
