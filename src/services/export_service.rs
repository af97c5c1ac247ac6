// src/services/export_service.rs
//
// Colaborador de exportación: dada una tabla {título, cabeceras, filas}
// produce hoja de cálculo (CSV) o documento paginado (PDF con genpdf).

use std::path::Path;

use genpdf::{elements, style, Element};

use crate::{
    common::error::AppError,
    models::stats::{LedgerSummary, WeeklyReport},
};

/// Tabla neutra lista para exportar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabular {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Tabular {
    /// Render a CSV (separador coma, campos entrecomillados si hace falta).
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&csv_line(&self.headers));
        for row in &self.rows {
            out.push_str(&csv_line(row));
        }
        out
    }

    /// Render a PDF. Las fuentes se cargan del directorio configurado
    /// (EXPORT_FONT_DIR); genpdf no trae ninguna embebida.
    pub fn to_pdf(&self, font_dir: &Path) -> Result<Vec<u8>, AppError> {
        let font_family = genpdf::fonts::from_files(font_dir, "LiberationSans", None)
            .map_err(|e| anyhow::anyhow!("No se pudieron cargar las fuentes del PDF: {}", e))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(self.title.clone());
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new(self.title.clone())
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Break::new(1));

        let mut table = elements::TableLayout::new(vec![1; self.headers.len().max(1)]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let mut header_row = table.row();
        for header in &self.headers {
            header_row = header_row.element(
                elements::Paragraph::new(header.clone())
                    .styled(style::Style::new().bold())
                    .padded(1),
            );
        }
        header_row
            .push()
            .map_err(|e| anyhow::anyhow!("Error montando la cabecera del PDF: {}", e))?;

        for row in &self.rows {
            let mut table_row = table.row();
            for cell in row {
                table_row =
                    table_row.element(elements::Paragraph::new(cell.clone()).padded(1));
            }
            table_row
                .push()
                .map_err(|e| anyhow::anyhow!("Error montando una fila del PDF: {}", e))?;
        }

        doc.push(table);

        let mut bytes = Vec::new();
        doc.render(&mut bytes)
            .map_err(|e| anyhow::anyhow!("Error generando el PDF: {}", e))?;
        Ok(bytes)
    }
}

fn csv_line(fields: &[String]) -> String {
    let escaped: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    format!("{}\n", escaped.join(","))
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Adapta el informe semanal a la tabla de exportación: una fila por día
/// más la de totales, en el mismo orden que la vista.
pub fn weekly_report_tabular(report: &WeeklyReport, title: &str) -> Tabular {
    let mut headers = vec!["Día".to_string()];
    if let Some(first) = report.days.first() {
        for count in &first.counts {
            headers.push(count.service_type.clone());
        }
    }
    headers.push("Servicios".to_string());
    headers.push("Ganancias".to_string());

    let mut rows = Vec::with_capacity(report.days.len() + 1);
    for day in &report.days {
        let mut row = vec![day.label.clone()];
        for count in &day.counts {
            row.push(count.count.to_string());
        }
        row.push(day.total_services.to_string());
        row.push(day.earnings.to_string());
        rows.push(row);
    }

    let mut total_row = vec!["Total".to_string()];
    for count in &report.total.counts {
        total_row.push(count.count.to_string());
    }
    total_row.push(report.total.total_services.to_string());
    total_row.push(report.total.earnings.to_string());
    rows.push(total_row);

    Tabular {
        title: title.to_string(),
        headers,
        rows,
    }
}

/// Adapta el resumen del libro de bonos/descuentos.
pub fn ledger_tabular(summary: &LedgerSummary, title: &str) -> Tabular {
    let headers = vec![
        "Barbero".to_string(),
        "Bonos".to_string(),
        "Descuentos".to_string(),
        "Neto".to_string(),
    ];
    let mut rows: Vec<Vec<String>> = summary
        .barbers
        .iter()
        .map(|b| {
            vec![
                b.barber_name.clone(),
                b.additions.to_string(),
                b.deductions.to_string(),
                b.net.to_string(),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".to_string(),
        summary.total_additions.to_string(),
        summary.total_deductions.to_string(),
        (summary.total_additions - summary.total_deductions).to_string(),
    ]);

    Tabular {
        title: title.to_string(),
        headers,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_escapes_commas_and_quotes() {
        let table = Tabular {
            title: "t".to_string(),
            headers: vec!["a".to_string(), "b,c".to_string()],
            rows: vec![vec!["x\"y".to_string(), "z".to_string()]],
        };
        let csv = table.to_csv();
        assert_eq!(csv, "a,\"b,c\"\n\"x\"\"y\",z\n");
    }

    #[test]
    fn weekly_tabular_has_one_row_per_day_plus_total() {
        use crate::models::stats::WeekWindow;
        use crate::services::stats_service::aggregate_week;
        use crate::models::catalog::ClassificationStrategy;

        let window = WeekWindow::containing(
            chrono::NaiveDate::from_ymd_opt(2026, 8, 26).unwrap(),
        );
        let report = aggregate_week(&[], &window, ClassificationStrategy::ExactCatalog);
        let table = weekly_report_tabular(&report, "Semana");
        assert_eq!(table.rows.len(), 7); // 6 días + total
        assert_eq!(table.rows[6][0], "Total");
        // Día + 9 tipos + servicios + ganancias
        assert_eq!(table.headers.len(), 12);
    }
}
