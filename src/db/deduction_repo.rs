// src/db/deduction_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{deduction::DeductionTransaction, stats::WeekWindow},
};

#[derive(Clone)]
pub struct DeductionRepository {
    pool: PgPool,
}

impl DeductionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_in_week(
        &self,
        window: &WeekWindow,
    ) -> Result<Vec<DeductionTransaction>, AppError> {
        let transactions = sqlx::query_as::<_, DeductionTransaction>(
            r#"
            SELECT * FROM barber_deductions
            WHERE created_at >= $1 AND created_at <= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(window.start.and_utc())
        .bind(window.end.and_utc())
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }

    pub async fn list_for_barber_in_week(
        &self,
        barber_id: Uuid,
        window: &WeekWindow,
    ) -> Result<Vec<DeductionTransaction>, AppError> {
        let transactions = sqlx::query_as::<_, DeductionTransaction>(
            r#"
            SELECT * FROM barber_deductions
            WHERE barber_id = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(barber_id)
        .bind(window.start.and_utc())
        .bind(window.end.and_utc())
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        barber_id: Uuid,
        amount: Decimal,
        concept: &str,
    ) -> Result<DeductionTransaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, DeductionTransaction>(
            r#"
            INSERT INTO barber_deductions (barber_id, amount, concept)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(barber_id)
        .bind(amount)
        .bind(concept)
        .fetch_one(executor)
        .await?;
        Ok(transaction)
    }

    // No hay actualización: un apunte se crea o se borra.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM barber_deductions WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::DeductionNotFound);
        }
        Ok(())
    }
}
