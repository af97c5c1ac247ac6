// src/models/catalog.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catálogo fijo de servicios. Las agrupaciones de las estadísticas usan
/// estas etiquetas literalmente: un servicio guardado con un tipo que no
/// figura aquí no suma en ningún desglose por tipo.
pub const SERVICE_CATALOG: [&str; 9] = [
    "Corte",
    "Corte Niño",
    "Barba",
    "Barba Premium",
    "Cejas",
    "Tinte",
    "Mascarilla",
    "Diseño Capilar",
    "Promo Corte + Barba",
];

/// La promo genera DOS filas de servicio con el mismo timestamp para un
/// único evento comisionable. El recálculo de tarifa especial debe
/// deduplicar por (timestamp, tipo) solo para esta etiqueta.
pub const BUNDLE_SERVICE: &str = "Promo Corte + Barba";

/// Comisión fija por tipo de servicio para el personal de tarifa especial
/// (Manuel). Independiente del importe guardado en cada fila; un tipo fuera
/// de la tabla comisiona cero.
pub fn special_rate_commission(service_type: &str) -> Decimal {
    match service_type {
        "Corte" => Decimal::new(250, 2),               // 2.50
        "Corte Niño" => Decimal::new(200, 2),          // 2.00
        "Barba" => Decimal::new(150, 2),               // 1.50
        "Barba Premium" => Decimal::new(200, 2),       // 2.00
        "Cejas" => Decimal::new(100, 2),               // 1.00
        "Tinte" => Decimal::new(300, 2),               // 3.00
        "Mascarilla" => Decimal::new(100, 2),          // 1.00
        "Diseño Capilar" => Decimal::new(150, 2),      // 1.50
        "Promo Corte + Barba" => Decimal::new(350, 2), // 3.50
        _ => Decimal::ZERO,
    }
}

/// Métodos de pago aceptados en caja.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Efectivo,
    Tarjeta,
    Bizum,
}

/// Contador de cache en la ficha del barbero al que aporta un servicio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Cortes,
    Barbas,
    Cejas,
}

/// Las dos estrategias de clasificación de tipos de servicio. La versión
/// antigua agrupaba por subcadena ("corte"/"barba"/"ceja"); la actual exige
/// coincidencia exacta con el catálogo. Son comportamientos con nombre, no
/// se mezclan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassificationStrategy {
    /// Comportamiento de producción: igualdad exacta con la etiqueta del
    /// catálogo, sensible a mayúsculas.
    #[default]
    ExactCatalog,
    /// Comportamiento heredado: mismo bucket de palabra clave.
    KeywordLegacy,
}

impl ClassificationStrategy {
    /// ¿El tipo guardado cuenta para la etiqueta canónica dada?
    pub fn matches(&self, stored: &str, canonical: &str) -> bool {
        match self {
            ClassificationStrategy::ExactCatalog => stored == canonical,
            ClassificationStrategy::KeywordLegacy => {
                match (keyword_bucket(stored), keyword_bucket(canonical)) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
        }
    }

    /// Contador de la ficha del barbero al que suma el servicio. Los
    /// contadores conservan el emparejado por palabra clave incluso con la
    /// estrategia exacta activa: es donde sobrevive el comportamiento
    /// heredado en el modelo de datos.
    pub fn counter_kind(service_type: &str) -> Option<CounterKind> {
        keyword_bucket(service_type)
    }
}

fn keyword_bucket(label: &str) -> Option<CounterKind> {
    let lower = label.to_lowercase();
    if lower.contains("corte") {
        Some(CounterKind::Cortes)
    } else if lower.contains("barba") {
        Some(CounterKind::Barbas)
    } else if lower.contains("ceja") {
        Some(CounterKind::Cejas)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_strategy_is_case_sensitive() {
        let s = ClassificationStrategy::ExactCatalog;
        assert!(s.matches("Corte", "Corte"));
        assert!(!s.matches("corte", "Corte"));
        assert!(!s.matches("Corte Niño", "Corte"));
    }

    #[test]
    fn legacy_strategy_groups_by_keyword() {
        let s = ClassificationStrategy::KeywordLegacy;
        assert!(s.matches("corte degradado", "Corte"));
        assert!(s.matches("Barba Premium", "Barba"));
        assert!(!s.matches("Tinte", "Corte"));
    }

    #[test]
    fn counter_kind_uses_keywords() {
        assert_eq!(
            ClassificationStrategy::counter_kind("Corte Niño"),
            Some(CounterKind::Cortes)
        );
        assert_eq!(
            ClassificationStrategy::counter_kind("Barba Premium"),
            Some(CounterKind::Barbas)
        );
        assert_eq!(
            ClassificationStrategy::counter_kind("Cejas"),
            Some(CounterKind::Cejas)
        );
        assert_eq!(ClassificationStrategy::counter_kind("Tinte"), None);
    }

    #[test]
    fn commission_covers_the_whole_catalog() {
        for label in SERVICE_CATALOG {
            assert!(special_rate_commission(label) > Decimal::ZERO);
        }
        assert_eq!(special_rate_commission("Masaje"), Decimal::ZERO);
    }

    #[test]
    fn bundle_label_is_part_of_the_catalog() {
        assert!(SERVICE_CATALOG.contains(&BUNDLE_SERVICE));
    }
}
