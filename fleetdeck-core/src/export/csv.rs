//! Delimited-text export

use csv::{QuoteStyle, WriterBuilder};

use super::rows::ExportRows;
use super::ExportError;

/// Serialize the shared rows as CSV: every cell double-quote-wrapped with
/// internal quotes escaped by doubling, rows joined by newline.
pub fn to_csv(rows: &ExportRows) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(&rows.header)?;
    for row in &rows.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(std::io::Error::other(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> ExportRows {
        ExportRows {
            header: vec!["Name".into(), "Note".into()],
            rows: vec![vec!["Kwame".into(), "said \"ok\"".into()]],
        }
    }

    #[test]
    fn test_every_cell_quoted() {
        let bytes = to_csv(&rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(r#""Name","Note""#));
        assert_eq!(lines.next(), Some(r#""Kwame","said ""ok""""#));
        assert_eq!(lines.next(), None);
    }
}
