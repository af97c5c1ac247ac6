// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        catalog::PaymentMethod,
        inventory::{InventoryItem, InventorySale, MovementKind, StockMovement},
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Productos
    // ---

    pub async fn get_all_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items =
            sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    /// Lectura con bloqueo de fila. Los flujos venta/salida validan el stock
    /// sobre esta lectura dentro de la transacción.
    pub async fn find_item_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        name: &str,
        category: &str,
        quantity: i32,
        min_stock: i32,
        unit_price: Decimal,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items (name, category, quantity, min_stock, unit_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(quantity)
        .bind(min_stock)
        .bind(unit_price)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(name.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        category: &str,
        min_stock: i32,
        unit_price: Decimal,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items
            SET name = $2, category = $3, min_stock = $4, unit_price = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(min_stock)
        .bind(unit_price)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::ItemNotFound)?;
        Ok(item)
    }

    /// Aplica un delta (positivo o negativo) a la cantidad de un producto.
    pub async fn adjust_item_quantity<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: i32,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items
            SET quantity = quantity + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::ItemNotFound)?;
        Ok(item)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ItemNotFound);
        }
        Ok(())
    }

    // ---
    // Movimientos (entrada / salida)
    // ---

    pub async fn list_movements(&self, item_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            "SELECT * FROM inventory_movements WHERE item_id = $1 ORDER BY created_at DESC",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        kind: MovementKind,
        quantity: i32,
        notes: Option<&str>,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO inventory_movements (item_id, kind, quantity, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(kind)
        .bind(quantity)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    // ---
    // Ventas
    // ---

    pub async fn get_all_sales(&self) -> Result<Vec<InventorySale>, AppError> {
        let sales = sqlx::query_as::<_, InventorySale>(
            "SELECT * FROM inventory_sales ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    pub async fn find_sale_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<InventorySale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, InventorySale>(
            "SELECT * FROM inventory_sales WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(sale)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        product_name: &str,
        quantity: i32,
        unit_cost: Decimal,
        sale_price: Decimal,
        profit: Decimal,
        customer_name: Option<&str>,
        payment_method: PaymentMethod,
    ) -> Result<InventorySale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, InventorySale>(
            r#"
            INSERT INTO inventory_sales
                (item_id, product_name, quantity, unit_cost, sale_price, profit,
                 customer_name, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(product_name)
        .bind(quantity)
        .bind(unit_cost)
        .bind(sale_price)
        .bind(profit)
        .bind(customer_name)
        .bind(payment_method)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    pub async fn delete_sale<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventory_sales WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::SaleNotFound);
        }
        Ok(())
    }
}
