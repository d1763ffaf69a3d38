//! Exporter
//!
//! Re-serializes the currently filtered+sorted list (never just the visible
//! page) into a spreadsheet, CSV, PDF report or print-formatted HTML
//! document. All four targets consume the rows built by [`rows::build_rows`],
//! so the logical cell content is identical across formats; only the
//! container differs.

pub mod csv;
pub mod pdf;
pub mod print;
pub mod rows;
pub mod xlsx;

use thiserror::Error;

use crate::catalog::EntityDef;
use crate::fields::FieldDescriptor;
use crate::record::Record;

pub use rows::{build_rows, export_filename, ExportRows};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Pdf,
    Print,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, ExportError> {
        match s {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            "print" | "html" => Ok(Self::Print),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Print => "html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
            Self::Print => "text/html; charset=utf-8",
        }
    }
}

/// A finished export, ready to download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Export the filtered+sorted list for one entity.
///
/// `records` must already have the view's filter and sort applied (see
/// [`crate::table::filtered_sorted`]); `fields` is the view's current column
/// selection.
pub fn export(
    records: &[&Record],
    fields: &[&FieldDescriptor],
    entity: &EntityDef,
    format: ExportFormat,
) -> Result<ExportFile, ExportError> {
    let rows = build_rows(records, fields);
    let bytes = match format {
        ExportFormat::Xlsx => xlsx::to_xlsx(&rows, entity.slug)?,
        ExportFormat::Csv => csv::to_csv(&rows)?,
        ExportFormat::Pdf => pdf::to_pdf(&rows, entity.title),
        ExportFormat::Print => print::to_print_html(&rows, entity.title).into_bytes(),
    };
    Ok(ExportFile {
        filename: export_filename(entity.slug, format.extension()),
        content_type: format.content_type(),
        bytes,
    })
}
