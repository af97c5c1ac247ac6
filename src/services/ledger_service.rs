// src/services/ledger_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BarberRepository, DeductionRepository},
    models::{
        barber::Barber,
        deduction::DeductionTransaction,
        stats::{BarberLedger, LedgerSummary, WeekWindow},
    },
};

#[derive(Clone)]
pub struct LedgerService {
    deduction_repo: DeductionRepository,
    barber_repo: BarberRepository,
    pool: sqlx::PgPool,
}

impl LedgerService {
    pub fn new(
        deduction_repo: DeductionRepository,
        barber_repo: BarberRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            deduction_repo,
            barber_repo,
            pool,
        }
    }

    pub async fn create(
        &self,
        barber_id: Uuid,
        amount: Decimal,
        concept: &str,
    ) -> Result<DeductionTransaction, AppError> {
        self.barber_repo
            .find_by_id(barber_id)
            .await?
            .ok_or(AppError::BarberNotFound)?;
        self.deduction_repo
            .create(&self.pool, barber_id, amount, concept)
            .await
    }

    pub async fn list_for_barber(
        &self,
        barber_id: Uuid,
        reference: NaiveDate,
    ) -> Result<Vec<DeductionTransaction>, AppError> {
        let window = WeekWindow::containing(reference);
        self.deduction_repo
            .list_for_barber_in_week(barber_id, &window)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.deduction_repo.delete(&self.pool, id).await
    }

    /// Resumen semanal del libro: bonos, descuentos y neto por barbero más
    /// los totales de la barbería. Recalcula siempre desde el conjunto
    /// completo de la semana; no hay actualización incremental.
    pub async fn weekly_summary(&self, reference: NaiveDate) -> Result<LedgerSummary, AppError> {
        let window = WeekWindow::containing(reference);
        let transactions = self.deduction_repo.list_in_week(&window).await?;
        let barbers = self.barber_repo.get_all().await?;
        Ok(net_ledger(&transactions, &barbers, &window))
    }
}

/// Netea los apuntes de la semana por barbero. Importe >= 0 descuenta,
/// importe < 0 abona (magnitud); neto = bonos − descuentos, puede quedar
/// negativo. Función pura: recalcula todo cada vez.
pub fn net_ledger(
    transactions: &[DeductionTransaction],
    barbers: &[Barber],
    window: &WeekWindow,
) -> LedgerSummary {
    let mut rows = Vec::with_capacity(barbers.len());
    let mut total_additions = Decimal::ZERO;
    let mut total_deductions = Decimal::ZERO;

    for barber in barbers {
        let mut additions = Decimal::ZERO;
        let mut deductions = Decimal::ZERO;
        for transaction in transactions.iter().filter(|t| t.barber_id == barber.id) {
            if transaction.amount.is_sign_negative() && !transaction.amount.is_zero() {
                additions += -transaction.amount;
            } else {
                deductions += transaction.amount;
            }
        }
        total_additions += additions;
        total_deductions += deductions;
        rows.push(BarberLedger {
            barber_id: barber.id,
            barber_name: barber.name.clone(),
            additions,
            deductions,
            net: additions - deductions,
        });
    }

    LedgerSummary {
        week_start: window.start.date(),
        week_end: window.end.date(),
        barbers: rows,
        total_additions,
        total_deductions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn barber(name: &str) -> Barber {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 8, 0, 0).unwrap();
        Barber {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: None,
            photo_url: None,
            cuts_count: 0,
            beards_count: 0,
            eyebrows_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn apunte(barber_id: Uuid, amount: Decimal) -> DeductionTransaction {
        DeductionTransaction {
            id: Uuid::new_v4(),
            barber_id,
            amount,
            concept: "test".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap(),
        }
    }

    fn window() -> WeekWindow {
        WeekWindow::containing(chrono::NaiveDate::from_ymd_opt(2026, 8, 26).unwrap())
    }

    #[test]
    fn net_is_additions_minus_deductions_and_can_be_negative() {
        let b = barber("Luis");
        let transactions = vec![
            apunte(b.id, Decimal::new(30, 0)),  // descuento 30
            apunte(b.id, Decimal::new(-10, 0)), // bono 10
            apunte(b.id, Decimal::new(5, 0)),   // descuento 5
        ];
        let summary = net_ledger(&transactions, &[b], &window());
        let row = &summary.barbers[0];
        assert_eq!(row.additions, Decimal::new(10, 0));
        assert_eq!(row.deductions, Decimal::new(35, 0));
        assert_eq!(row.net, Decimal::new(-25, 0));
    }

    #[test]
    fn zero_amount_counts_as_deduction() {
        let b = barber("Ana");
        let transactions = vec![apunte(b.id, Decimal::ZERO)];
        let summary = net_ledger(&transactions, &[b], &window());
        assert_eq!(summary.barbers[0].additions, Decimal::ZERO);
        assert_eq!(summary.barbers[0].deductions, Decimal::ZERO);
        assert_eq!(summary.barbers[0].net, Decimal::ZERO);
    }

    #[test]
    fn shop_totals_sum_per_barber_figures() {
        let a = barber("Ana");
        let b = barber("Luis");
        let transactions = vec![
            apunte(a.id, Decimal::new(-20, 0)),
            apunte(a.id, Decimal::new(15, 0)),
            apunte(b.id, Decimal::new(-5, 0)),
        ];
        let summary = net_ledger(&transactions, &[a, b], &window());
        assert_eq!(summary.total_additions, Decimal::new(25, 0));
        assert_eq!(summary.total_deductions, Decimal::new(15, 0));
    }

    #[test]
    fn removing_a_transaction_changes_the_recomputed_sums() {
        let b = barber("Luis");
        let keep = apunte(b.id, Decimal::new(-10, 0));
        let dropped = apunte(b.id, Decimal::new(40, 0));
        let before = net_ledger(&[keep.clone(), dropped], &[b.clone()], &window());
        let after = net_ledger(&[keep], &[b], &window());
        assert_eq!(before.barbers[0].net, Decimal::new(-30, 0));
        assert_eq!(after.barbers[0].net, Decimal::new(10, 0));
    }
}
