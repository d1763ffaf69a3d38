//! Spreadsheet export

use rust_xlsxwriter::{Format, Workbook};

use super::rows::{column_widths, ExportRows};
use super::ExportError;

/// Column width cap, in characters.
const MAX_COLUMN_WIDTH: usize = 60;

/// Write the shared rows into a single-sheet workbook: bold header row,
/// auto-width columns (max of header and cell lengths, capped).
pub fn to_xlsx(rows: &ExportRows, sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let header_format = Format::new().set_bold();
    for (col, label) in rows.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, label, &header_format)?;
    }

    for (r, row) in rows.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            worksheet.write_string((r + 1) as u32, c as u16, cell)?;
        }
    }

    for (col, width) in column_widths(rows, MAX_COLUMN_WIDTH).iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_is_a_zip_container() {
        let rows = ExportRows {
            header: vec!["Name".into(), "Status".into()],
            rows: vec![vec!["Kwame".into(), "Active".into()]],
        };
        let bytes = to_xlsx(&rows, "drivers").unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_empty_body_still_writes_header() {
        let rows = ExportRows { header: vec!["Name".into()], rows: vec![] };
        assert!(to_xlsx(&rows, "drivers").is_ok());
    }
}
