//! Common export pre-step
//!
//! Maps the filtered+sorted record list and the selected field descriptors
//! into one header row plus one display-string row per record. Every export
//! target consumes these rows, which is what keeps a cell identical across
//! xlsx, csv, pdf and print output.

use chrono::Local;

use crate::fields::FieldDescriptor;
use crate::format::format_cell;
use crate::record::Record;

/// Header labels plus formatted body rows, column order matching the
/// selected descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRows {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportRows {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Build the shared rows for a record list.
pub fn build_rows(records: &[&Record], fields: &[&FieldDescriptor]) -> ExportRows {
    let header = fields.iter().map(|f| f.label.clone()).collect();
    let rows = records
        .iter()
        .map(|record| {
            fields.iter().map(|f| format_cell(record.get_path(&f.key), f.kind)).collect()
        })
        .collect();
    ExportRows { header, rows }
}

/// Column width (in characters) per column: the longest of the header and
/// every cell in that column, capped at `cap`.
pub fn column_widths(rows: &ExportRows, cap: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = rows.header.iter().map(|h| h.chars().count()).collect();
    for row in &rows.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    widths.iter().map(|w| (*w).min(cap)).collect()
}

/// Deterministic download name: `<slug>_<YYYY-MM-DD>.<ext>`.
pub fn export_filename(slug: &str, extension: &str) -> String {
    format!("{}_{}.{}", slug, Local::now().format("%Y-%m-%d"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("name", "Driver Name"),
            FieldDescriptor::currency("cost", "Cost"),
            FieldDescriptor::text("description", "Description"),
        ]
    }

    #[test]
    fn test_rows_follow_field_order_and_formatting() {
        let fields = fields();
        let records = vec![Record::from_pairs([
            ("name", json!("Kwame Mensah")),
            ("cost", json!(1500)),
            ("description", json!(null)),
        ])];
        let refs: Vec<&Record> = records.iter().collect();
        let field_refs: Vec<&FieldDescriptor> = fields.iter().collect();
        let rows = build_rows(&refs, &field_refs);
        assert_eq!(rows.header, vec!["Driver Name", "Cost", "Description"]);
        assert_eq!(rows.rows, vec![vec!["Kwame Mensah", "$1,500.00", "N/A"]]);
    }

    #[test]
    fn test_column_widths_capped() {
        let rows = ExportRows {
            header: vec!["Id".into(), "Description".into()],
            rows: vec![
                vec!["1".into(), "x".repeat(80)],
                vec!["12".into(), "short".into()],
            ],
        };
        assert_eq!(column_widths(&rows, 60), vec![2, 60]);
    }

    #[test]
    fn test_filename_shape() {
        let name = export_filename("drivers", "csv");
        assert!(name.starts_with("drivers_"));
        assert!(name.ends_with(".csv"));
        // drivers_YYYY-MM-DD.csv
        assert_eq!(name.len(), "drivers_".len() + 10 + ".csv".len());
    }
}
