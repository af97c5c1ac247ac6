// src/models/stats.rs

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Nombres de los días laborables, lunes a sábado. El domingo no existe para
/// los informes: la semana de trabajo es de 6 días.
pub const DAY_LABELS: [&str; 6] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

/// Ventana semanal de informes: [lunes 00:00:00, sábado 23:59:59] de la
/// semana que contiene la fecha de referencia. Valor derivado, nunca se
/// persiste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekWindow {
    /// Resuelve la ventana de la semana que contiene `reference`. Función
    /// pura: la misma fecha produce siempre la misma ventana.
    pub fn containing(reference: NaiveDate) -> Self {
        let offset = reference.weekday().num_days_from_monday() as u64;
        let monday = reference - Days::new(offset);
        let saturday = monday + Days::new(5);
        Self {
            start: monday.and_time(NaiveTime::MIN),
            end: saturday.and_hms_opt(23, 59, 59).expect("23:59:59 es una hora válida"),
        }
    }

    /// Rango inclusivo por ambos extremos.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Los 6 días naturales de la ventana, lunes..sábado.
    pub fn days(&self) -> [NaiveDate; 6] {
        let monday = self.start.date();
        [
            monday,
            monday + Days::new(1),
            monday + Days::new(2),
            monday + Days::new(3),
            monday + Days::new(4),
            monday + Days::new(5),
        ]
    }
}

/// Recuento de una etiqueta del catálogo dentro de un día o de la semana.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypeCount {
    pub service_type: String,
    pub count: i64,
}

/// Fila de un día del informe semanal. `total_services` es la suma de los
/// recuentos por tipo, NO el número bruto de filas: un tipo fuera del
/// catálogo queda excluido también del total mostrado.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayRow {
    pub label: String,
    pub date: NaiveDate,
    pub counts: Vec<ServiceTypeCount>,
    pub total_services: i64,
    pub earnings: Decimal,
}

/// Fila final del informe con los totales de la semana.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekTotalRow {
    pub counts: Vec<ServiceTypeCount>,
    pub total_services: i64,
    pub earnings: Decimal,
}

/// Informe semanal completo: 6 filas de día más la fila de totales.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DayRow>,
    pub total: WeekTotalRow,
}

/// Resumen del libro de bonos/descuentos de un barbero en la semana.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarberLedger {
    pub barber_id: Uuid,
    pub barber_name: String,
    /// Suma de magnitudes de los importes negativos (bonos).
    pub additions: Decimal,
    /// Suma de los importes no negativos (descuentos).
    pub deductions: Decimal,
    /// bonos − descuentos; puede ser negativo.
    pub net: Decimal,
}

/// Resumen del libro de toda la barbería en la semana.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub barbers: Vec<BarberLedger>,
    pub total_additions: Decimal,
    pub total_deductions: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_spans_monday_to_saturday_for_every_weekday() {
        // 2026-08-24 es lunes.
        let monday = date(2026, 8, 24);
        for offset in 0..7 {
            let reference = monday + Days::new(offset);
            let window = WeekWindow::containing(reference);
            if offset < 6 {
                assert_eq!(window.start.date(), monday, "referencia {reference}");
                assert_eq!(window.end.date(), date(2026, 8, 29));
            } else {
                // El domingo cae ya en la semana siguiente.
                assert_eq!(window.start.date(), date(2026, 8, 31));
            }
        }
    }

    #[test]
    fn window_is_stable_under_repeated_calls() {
        let reference = date(2026, 8, 26);
        assert_eq!(
            WeekWindow::containing(reference),
            WeekWindow::containing(reference)
        );
    }

    #[test]
    fn window_has_exactly_six_days() {
        let window = WeekWindow::containing(date(2026, 1, 1));
        let days = window.days();
        assert_eq!(days.len(), 6);
        assert_eq!(days[0].weekday(), chrono::Weekday::Mon);
        assert_eq!(days[5].weekday(), chrono::Weekday::Sat);
    }

    #[test]
    fn window_bounds_are_inclusive_and_exclude_sunday() {
        let window = WeekWindow::containing(date(2026, 8, 26));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        let sunday = date(2026, 8, 30).and_time(NaiveTime::MIN);
        assert!(!window.contains(sunday));
    }
}
