// src/db/service_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{catalog::PaymentMethod, service::ServiceRecord, stats::WeekWindow},
};

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Servicios de toda la barbería dentro de la ventana semanal
    /// (rango inclusivo sobre created_at).
    pub async fn list_in_week(&self, window: &WeekWindow) -> Result<Vec<ServiceRecord>, AppError> {
        let records = sqlx::query_as::<_, ServiceRecord>(
            r#"
            SELECT * FROM services
            WHERE created_at >= $1 AND created_at <= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(window.start.and_utc())
        .bind(window.end.and_utc())
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Servicios de un barbero dentro de la ventana semanal.
    pub async fn list_for_barber_in_week(
        &self,
        barber_id: Uuid,
        window: &WeekWindow,
    ) -> Result<Vec<ServiceRecord>, AppError> {
        let records = sqlx::query_as::<_, ServiceRecord>(
            r#"
            SELECT * FROM services
            WHERE barber_id = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(barber_id)
        .bind(window.start.and_utc())
        .bind(window.end.and_utc())
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceRecord>, AppError> {
        let record = sqlx::query_as::<_, ServiceRecord>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        barber_id: Uuid,
        service_type: &str,
        earning_amount: Decimal,
        payment_method: PaymentMethod,
        customer_name: Option<&str>,
        proof_photo_url: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<ServiceRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, ServiceRecord>(
            r#"
            INSERT INTO services
                (barber_id, service_type, earning_amount, payment_method,
                 customer_name, proof_photo_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(barber_id)
        .bind(service_type)
        .bind(earning_amount)
        .bind(payment_method)
        .bind(customer_name)
        .bind(proof_photo_url)
        .bind(created_at)
        .fetch_one(executor)
        .await?;
        Ok(record)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ServiceNotFound);
        }
        Ok(())
    }
}
