// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Profile, Role, User},
};

// Repositorio de usuarios: tablas 'users', 'profiles' y 'user_roles'.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn count_users<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await?;
        Ok(count.0)
    }

    // Crea un usuario nuevo, con tratamiento específico del e-mail duplicado.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    /// Efecto colateral del registro: fila de perfil para el usuario.
    pub async fn create_profile<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        full_name: &str,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, full_name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .fetch_one(executor)
        .await?;
        Ok(profile)
    }

    /// Efecto colateral del registro: fila de rol para el usuario.
    pub async fn create_role<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    pub async fn find_role(&self, user_id: Uuid) -> Result<Option<Role>, AppError> {
        let role: Option<(Role,)> =
            sqlx::query_as("SELECT role FROM user_roles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(role.map(|r| r.0))
    }

    /// Vincula (o desvincula, con NULL) el perfil de un usuario a un barbero.
    pub async fn link_profile_to_barber<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        barber_id: Option<Uuid>,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET barber_id = $2
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(barber_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::UserNotFound)?;
        Ok(profile)
    }
}
