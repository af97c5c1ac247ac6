// src/db/barber_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{barber::Barber, catalog::CounterKind},
};

#[derive(Clone)]
pub struct BarberRepository {
    pool: PgPool,
}

impl BarberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Barber>, AppError> {
        let barbers = sqlx::query_as::<_, Barber>("SELECT * FROM barbers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(barbers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Barber>, AppError> {
        let barber = sqlx::query_as::<_, Barber>("SELECT * FROM barbers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(barber)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Barber, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let barber = sqlx::query_as::<_, Barber>(
            r#"
            INSERT INTO barbers (name, phone, photo_url)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(photo_url)
        .fetch_one(executor)
        .await?;
        Ok(barber)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        phone: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<Barber, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let barber = sqlx::query_as::<_, Barber>(
            r#"
            UPDATE barbers
            SET name = $2, phone = $3, photo_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(photo_url)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::BarberNotFound)?;
        Ok(barber)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM barbers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::BarberNotFound);
        }
        Ok(())
    }

    /// Ajusta el contador de cache que corresponde al servicio. `delta` es
    /// +1 en alta y -1 en baja; el decremento nunca baja de cero (la cache
    /// es de mejor esfuerzo, no contabilidad).
    pub async fn bump_counter<'e, E>(
        &self,
        executor: E,
        barber_id: Uuid,
        kind: CounterKind,
        delta: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let column = match kind {
            CounterKind::Cortes => "cuts_count",
            CounterKind::Barbas => "beards_count",
            CounterKind::Cejas => "eyebrows_count",
        };
        // El nombre de columna sale de un match cerrado, nunca de entrada
        // del usuario.
        let query = format!(
            "UPDATE barbers SET {column} = GREATEST({column} + $2, 0), updated_at = NOW() WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(barber_id)
            .bind(delta)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::BarberNotFound);
        }
        Ok(())
    }
}
