// src/services/stats_service.rs
//
// El núcleo del sistema: la agregación semanal de ganancias. Las funciones
// de agregación son puras (misma entrada, misma salida, sin mutar nada);
// el servicio solo las alimenta con los registros de la semana.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ServiceRepository,
    models::{
        catalog::{special_rate_commission, ClassificationStrategy, BUNDLE_SERVICE, SERVICE_CATALOG},
        service::ServiceRecord,
        stats::{DayRow, ServiceTypeCount, WeekTotalRow, WeekWindow, WeeklyReport, DAY_LABELS},
    },
};

#[derive(Clone)]
pub struct StatsService {
    service_repo: ServiceRepository,
}

impl StatsService {
    pub fn new(service_repo: ServiceRepository) -> Self {
        Self { service_repo }
    }

    /// Informe semanal de un barbero, con los importes guardados en cada
    /// servicio.
    pub async fn weekly_for_barber(
        &self,
        barber_id: Uuid,
        reference: NaiveDate,
    ) -> Result<WeeklyReport, AppError> {
        let window = WeekWindow::containing(reference);
        let records = self
            .service_repo
            .list_for_barber_in_week(barber_id, &window)
            .await?;
        Ok(aggregate_week(
            &records,
            &window,
            ClassificationStrategy::ExactCatalog,
        ))
    }

    /// Informe semanal de toda la barbería (vista de administración).
    pub async fn weekly_overview(&self, reference: NaiveDate) -> Result<WeeklyReport, AppError> {
        let window = WeekWindow::containing(reference);
        let records = self.service_repo.list_in_week(&window).await?;
        Ok(aggregate_week(
            &records,
            &window,
            ClassificationStrategy::ExactCatalog,
        ))
    }

    /// Informe semanal del personal de tarifa especial: ganancias recalculadas
    /// desde la tabla de comisiones sobre los servicios de toda la barbería.
    pub async fn weekly_special_rate(
        &self,
        reference: NaiveDate,
    ) -> Result<WeeklyReport, AppError> {
        let window = WeekWindow::containing(reference);
        let records = self.service_repo.list_in_week(&window).await?;
        Ok(aggregate_week_special_rate(&records, &window))
    }
}

/// Agrega una semana de servicios: una fila por día (lunes..sábado) con
/// recuentos por tipo del catálogo y suma de ganancias, más la fila de
/// totales. Determinista e independiente del orden de entrada.
pub fn aggregate_week(
    records: &[ServiceRecord],
    window: &WeekWindow,
    strategy: ClassificationStrategy,
) -> WeeklyReport {
    let refs: Vec<&ServiceRecord> = records.iter().collect();
    aggregate_rows(&refs, window, strategy, |record| record.earning_amount)
}

/// Variante de tarifa especial: suma la comisión fija por tipo en lugar del
/// importe guardado. Para la promo (dos filas con el mismo timestamp por un
/// único evento comisionable) deduplica por (timestamp, tipo) antes de
/// agregar; regla deliberada contra el doble cobro.
pub fn aggregate_week_special_rate(
    records: &[ServiceRecord],
    window: &WeekWindow,
) -> WeeklyReport {
    let mut seen_bundles = HashSet::new();
    let refs: Vec<&ServiceRecord> = records
        .iter()
        .filter(|record| {
            if record.service_type != BUNDLE_SERVICE {
                return true;
            }
            seen_bundles.insert((record.created_at, record.service_type.clone()))
        })
        .collect();

    aggregate_rows(
        &refs,
        window,
        ClassificationStrategy::ExactCatalog,
        |record| special_rate_commission(&record.service_type),
    )
}

fn aggregate_rows(
    records: &[&ServiceRecord],
    window: &WeekWindow,
    strategy: ClassificationStrategy,
    earning_of: impl Fn(&ServiceRecord) -> Decimal,
) -> WeeklyReport {
    let mut week_counts = vec![0i64; SERVICE_CATALOG.len()];
    let mut week_earnings = Decimal::ZERO;
    let mut days = Vec::with_capacity(DAY_LABELS.len());

    for (day_index, day) in window.days().into_iter().enumerate() {
        // Comparación solo por fecha natural del timestamp del registro.
        let day_records: Vec<&&ServiceRecord> = records
            .iter()
            .filter(|record| record.created_at.naive_utc().date() == day)
            .collect();

        let mut counts = Vec::with_capacity(SERVICE_CATALOG.len());
        let mut day_total = 0i64;
        for (type_index, canonical) in SERVICE_CATALOG.iter().enumerate() {
            let count = day_records
                .iter()
                .filter(|record| strategy.matches(&record.service_type, canonical))
                .count() as i64;
            week_counts[type_index] += count;
            day_total += count;
            counts.push(ServiceTypeCount {
                service_type: canonical.to_string(),
                count,
            });
        }

        // Las ganancias sí suman todos los registros del día, también los de
        // tipo fuera del catálogo.
        let earnings: Decimal = day_records.iter().map(|record| earning_of(record)).sum();
        week_earnings += earnings;

        days.push(DayRow {
            label: DAY_LABELS[day_index].to_string(),
            date: day,
            counts,
            total_services: day_total,
            earnings,
        });
    }

    let total_services = week_counts.iter().sum();
    let total = WeekTotalRow {
        counts: SERVICE_CATALOG
            .iter()
            .zip(week_counts)
            .map(|(canonical, count)| ServiceTypeCount {
                service_type: canonical.to_string(),
                count,
            })
            .collect(),
        total_services,
        earnings: week_earnings,
    };

    WeeklyReport {
        week_start: window.start.date(),
        week_end: window.end.date(),
        days,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::PaymentMethod;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn record(service_type: &str, earning: Decimal, created_at: DateTime<Utc>) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4(),
            barber_id: Uuid::new_v4(),
            service_type: service_type.to_string(),
            earning_amount: earning,
            payment_method: PaymentMethod::Efectivo,
            customer_name: None,
            proof_photo_url: None,
            created_at,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn window() -> WeekWindow {
        // Semana del lunes 2026-08-24 al sábado 2026-08-29.
        WeekWindow::containing(NaiveDate::from_ymd_opt(2026, 8, 26).unwrap())
    }

    fn count_for(row_counts: &[ServiceTypeCount], service_type: &str) -> i64 {
        row_counts
            .iter()
            .find(|c| c.service_type == service_type)
            .map(|c| c.count)
            .unwrap()
    }

    #[test]
    fn empty_input_yields_all_zeroes() {
        let report = aggregate_week(&[], &window(), ClassificationStrategy::ExactCatalog);
        assert_eq!(report.days.len(), 6);
        for day in &report.days {
            assert_eq!(day.total_services, 0);
            assert_eq!(day.earnings, Decimal::ZERO);
            assert!(day.counts.iter().all(|c| c.count == 0));
        }
        assert_eq!(report.total.total_services, 0);
        assert_eq!(report.total.earnings, Decimal::ZERO);
    }

    #[test]
    fn tuesday_scenario_matches_expected_rows() {
        // 3 "Corte" a 4.6 y 1 "Barba Premium" a 2, todos el martes.
        let tuesday = at(2026, 8, 25, 10);
        let records = vec![
            record("Corte", Decimal::new(46, 1), tuesday),
            record("Corte", Decimal::new(46, 1), at(2026, 8, 25, 12)),
            record("Corte", Decimal::new(46, 1), at(2026, 8, 25, 17)),
            record("Barba Premium", Decimal::new(2, 0), at(2026, 8, 25, 18)),
        ];
        let report = aggregate_week(&records, &window(), ClassificationStrategy::ExactCatalog);

        let martes = &report.days[1];
        assert_eq!(martes.label, "Martes");
        assert_eq!(count_for(&martes.counts, "Corte"), 3);
        assert_eq!(count_for(&martes.counts, "Barba Premium"), 1);
        assert_eq!(count_for(&martes.counts, "Cejas"), 0);
        assert_eq!(martes.total_services, 4);
        assert_eq!(martes.earnings, Decimal::new(158, 1)); // 15.8

        // El resto de días queda a cero y los totales coinciden.
        assert_eq!(report.days[0].total_services, 0);
        assert_eq!(report.total.total_services, 4);
        assert_eq!(report.total.earnings, Decimal::new(158, 1));
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut records = vec![
            record("Corte", Decimal::new(46, 1), at(2026, 8, 24, 9)),
            record("Barba", Decimal::new(3, 0), at(2026, 8, 25, 11)),
            record("Tinte", Decimal::new(12, 0), at(2026, 8, 29, 13)),
            record("Corte", Decimal::new(46, 1), at(2026, 8, 24, 19)),
        ];
        let forwards = aggregate_week(&records, &window(), ClassificationStrategy::ExactCatalog);
        records.reverse();
        let backwards = aggregate_week(&records, &window(), ClassificationStrategy::ExactCatalog);
        assert_eq!(forwards, backwards);
    }

    #[test]
    fn per_type_day_sums_equal_week_totals() {
        let records = vec![
            record("Corte", Decimal::ONE, at(2026, 8, 24, 9)),
            record("Corte", Decimal::ONE, at(2026, 8, 26, 9)),
            record("Cejas", Decimal::ONE, at(2026, 8, 27, 9)),
            record("Barba", Decimal::ONE, at(2026, 8, 29, 9)),
        ];
        let report = aggregate_week(&records, &window(), ClassificationStrategy::ExactCatalog);
        for canonical in SERVICE_CATALOG {
            let day_sum: i64 = report
                .days
                .iter()
                .map(|day| count_for(&day.counts, canonical))
                .sum();
            assert_eq!(day_sum, count_for(&report.total.counts, canonical));
        }
    }

    #[test]
    fn unknown_type_is_excluded_from_counts_but_not_from_earnings() {
        let records = vec![
            record("Masaje Capilar", Decimal::new(10, 0), at(2026, 8, 24, 9)),
            record("Corte", Decimal::new(46, 1), at(2026, 8, 24, 10)),
        ];
        let report = aggregate_week(&records, &window(), ClassificationStrategy::ExactCatalog);
        let lunes = &report.days[0];
        // El tipo desconocido no cuenta en ningún desglose ni en el total
        // mostrado, pero su importe sí entra en las ganancias del día.
        assert_eq!(lunes.total_services, 1);
        assert_eq!(lunes.earnings, Decimal::new(146, 1));
    }

    #[test]
    fn legacy_strategy_still_groups_by_keyword() {
        let records = vec![record("corte degradado", Decimal::ONE, at(2026, 8, 24, 9))];
        let exact = aggregate_week(&records, &window(), ClassificationStrategy::ExactCatalog);
        let legacy = aggregate_week(&records, &window(), ClassificationStrategy::KeywordLegacy);
        assert_eq!(count_for(&exact.days[0].counts, "Corte"), 0);
        assert_eq!(count_for(&legacy.days[0].counts, "Corte"), 1);
    }

    #[test]
    fn special_rate_uses_commission_table_not_stored_earnings() {
        let records = vec![
            record("Corte", Decimal::new(46, 1), at(2026, 8, 24, 9)),
            record("Tinte", Decimal::new(25, 0), at(2026, 8, 24, 11)),
        ];
        let report = aggregate_week_special_rate(&records, &window());
        // 2.50 + 3.00, ignorando los importes guardados.
        assert_eq!(report.days[0].earnings, Decimal::new(550, 2));
        assert_eq!(report.total.earnings, Decimal::new(550, 2));
    }

    #[test]
    fn bundle_commission_counts_once_per_timestamp() {
        let shared = at(2026, 8, 25, 16);
        let records = vec![
            record(BUNDLE_SERVICE, Decimal::new(5, 0), shared),
            record(BUNDLE_SERVICE, Decimal::new(5, 0), shared),
            // Otra promo en otro momento: sí comisiona aparte.
            record(BUNDLE_SERVICE, Decimal::new(5, 0), at(2026, 8, 25, 18)),
        ];
        let report = aggregate_week_special_rate(&records, &window());
        let martes = &report.days[1];
        assert_eq!(count_for(&martes.counts, BUNDLE_SERVICE), 2);
        // 3.50 por evento, dos eventos reales.
        assert_eq!(martes.earnings, Decimal::new(700, 2));
    }

    #[test]
    fn sunday_records_fall_outside_the_report() {
        let records = vec![record("Corte", Decimal::ONE, at(2026, 8, 30, 12))];
        let report = aggregate_week(&records, &window(), ClassificationStrategy::ExactCatalog);
        assert_eq!(report.total.total_services, 0);
        assert_eq!(report.total.earnings, Decimal::ZERO);
    }
}
