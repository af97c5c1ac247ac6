// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::{
        catalog::PaymentMethod,
        inventory::{InventoryItem, InventorySale, MovementKind, StockMovement},
    },
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: PgPool) -> Self {
        Self {
            inventory_repo,
            pool,
        }
    }

    pub async fn get_all_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.get_all_items().await
    }

    pub async fn create_item(
        &self,
        name: &str,
        category: &str,
        quantity: i32,
        min_stock: i32,
        unit_price: Decimal,
    ) -> Result<InventoryItem, AppError> {
        self.inventory_repo
            .create_item(&self.pool, name, category, quantity, min_stock, unit_price)
            .await
    }

    pub async fn update_item(
        &self,
        id: Uuid,
        name: &str,
        category: &str,
        min_stock: i32,
        unit_price: Decimal,
    ) -> Result<InventoryItem, AppError> {
        self.inventory_repo
            .update_item(&self.pool, id, name, category, min_stock, unit_price)
            .await
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        self.inventory_repo.delete_item(&self.pool, id).await
    }

    pub async fn list_movements(&self, item_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        self.inventory_repo.list_movements(item_id).await
    }

    /// Entrada o salida manual de stock. La salida que dejaría la cantidad
    /// por debajo de cero se rechaza sin tocar nada. Ajuste de cantidad y
    /// apunte de histórico van en UNA transacción.
    pub async fn record_movement(
        &self,
        item_id: Uuid,
        kind: MovementKind,
        quantity: i32,
        notes: Option<&str>,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        let item = self
            .inventory_repo
            .find_item_for_update(&mut *tx, item_id)
            .await?
            .ok_or(AppError::ItemNotFound)?;

        let delta = match kind {
            MovementKind::Entrada => quantity,
            MovementKind::Salida => {
                ensure_stock(item.quantity, quantity)?;
                -quantity
            }
        };

        self.inventory_repo
            .adjust_item_quantity(&mut *tx, item_id, delta)
            .await?;
        let movement = self
            .inventory_repo
            .record_movement(&mut *tx, item_id, kind, quantity, notes)
            .await?;

        tx.commit().await?;
        Ok(movement)
    }

    pub async fn get_all_sales(&self) -> Result<Vec<InventorySale>, AppError> {
        self.inventory_repo.get_all_sales().await
    }

    /// Venta de un producto. Valida el stock, fotografía el coste unitario
    /// del momento, calcula el beneficio y descuenta la cantidad; el
    /// decremento y el alta de la venta van en UNA transacción, no en dos
    /// escrituras sueltas.
    pub async fn sell_item(
        &self,
        item_id: Uuid,
        quantity: i32,
        sale_price: Decimal,
        customer_name: Option<&str>,
        payment_method: PaymentMethod,
    ) -> Result<InventorySale, AppError> {
        let mut tx = self.pool.begin().await?;

        let item = self
            .inventory_repo
            .find_item_for_update(&mut *tx, item_id)
            .await?
            .ok_or(AppError::ItemNotFound)?;

        ensure_stock(item.quantity, quantity)?;

        // Una venta a pérdida (beneficio negativo) se permite.
        let profit = compute_profit(sale_price, item.unit_price, quantity);

        self.inventory_repo
            .adjust_item_quantity(&mut *tx, item_id, -quantity)
            .await?;
        let sale = self
            .inventory_repo
            .create_sale(
                &mut *tx,
                item_id,
                &item.name,
                quantity,
                item.unit_price,
                sale_price,
                profit,
                customer_name,
                payment_method,
            )
            .await?;

        tx.commit().await?;
        tracing::info!(
            "Venta registrada: {} x{} (beneficio {})",
            sale.product_name,
            sale.quantity,
            sale.profit
        );
        Ok(sale)
    }

    /// Borra una venta. Si el producto origen sigue existiendo, le devuelve
    /// exactamente la cantidad vendida; si ya no existe, el borrado del
    /// registro es lo único que ocurre.
    pub async fn delete_sale(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = self
            .inventory_repo
            .find_sale_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        if let Some(item_id) = sale.item_id {
            let item = self
                .inventory_repo
                .find_item_for_update(&mut *tx, item_id)
                .await?;
            if item.is_some() {
                self.inventory_repo
                    .adjust_item_quantity(&mut *tx, item_id, sale.quantity)
                    .await?;
            }
        }

        self.inventory_repo.delete_sale(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// beneficio = (precio de venta − coste unitario) × cantidad.
pub fn compute_profit(sale_price: Decimal, unit_cost: Decimal, quantity: i32) -> Decimal {
    (sale_price - unit_cost) * Decimal::from(quantity)
}

/// Rechaza toda disposición que supere el stock disponible.
pub fn ensure_stock(available: i32, requested: i32) -> Result<(), AppError> {
    if requested > available {
        return Err(AppError::InsufficientStock {
            available,
            requested,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_multiplies_margin_by_quantity() {
        // (2.50 - 1.00) * 4 = 6.00
        assert_eq!(
            compute_profit(Decimal::new(250, 2), Decimal::new(100, 2), 4),
            Decimal::new(600, 2)
        );
    }

    #[test]
    fn loss_making_sale_yields_negative_profit() {
        // (0.80 - 1.00) * 5 = -1.00; se permite, no se rechaza.
        assert_eq!(
            compute_profit(Decimal::new(80, 2), Decimal::new(100, 2), 5),
            Decimal::new(-100, 2)
        );
    }

    #[test]
    fn stock_check_rejects_overdraw_and_allows_exact_drain() {
        assert!(ensure_stock(10, 10).is_ok());
        let err = ensure_stock(3, 4).unwrap_err();
        match err {
            AppError::InsufficientStock {
                available,
                requested,
            } => {
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("error inesperado: {other:?}"),
        }
    }
}
