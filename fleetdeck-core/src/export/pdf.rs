//! Paginated-document export
//!
//! A small self-contained PDF 1.4 writer: titled report, generation
//! timestamp, header row repeated on every page, fixed rows per page.
//! Content streams are uncompressed and only the built-in Helvetica fonts
//! are referenced.

use chrono::Local;

use super::rows::{column_widths, ExportRows};
use crate::format::CELL_MAX_LEN;

// A4 landscape, points
const PAGE_WIDTH: f64 = 842.0;
const PAGE_HEIGHT: f64 = 595.0;
const MARGIN: f64 = 40.0;

const TITLE_SIZE: f64 = 14.0;
const META_SIZE: f64 = 9.0;
const BODY_SIZE: f64 = 8.0;
const LINE_HEIGHT: f64 = 12.0;

/// Average glyph width at body size, used for column placement.
const CHAR_WIDTH: f64 = 4.8;
const COLUMN_GAP: f64 = 10.0;
/// Column width cap for x placement: the widest cell the formatter can
/// produce (the text cap plus its ellipsis). Cell text itself is never cut,
/// so the document carries exactly what the other export formats carry.
const COLUMN_CAP: usize = CELL_MAX_LEN + 1;

/// Render the shared rows as a paginated PDF report.
pub fn to_pdf(rows: &ExportRows, title: &str) -> Vec<u8> {
    let widths = column_widths(rows, COLUMN_CAP);
    let generated = format!("Generated {}", Local::now().format("%d/%m/%Y %H:%M"));

    let body_top = PAGE_HEIGHT - MARGIN - 55.0;
    let rows_per_page = ((body_top - MARGIN) / LINE_HEIGHT).floor() as usize;
    let rows_per_page = rows_per_page.max(1);

    let chunks: Vec<&[Vec<String>]> = if rows.rows.is_empty() {
        vec![&[]]
    } else {
        rows.rows.chunks(rows_per_page).collect()
    };

    let pages: Vec<Vec<u8>> = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            page_content(title, &generated, &rows.header, chunk, &widths, i + 1, chunks.len())
        })
        .collect();

    assemble(&pages)
}

/// Build one page's content stream.
fn page_content(
    title: &str,
    generated: &str,
    header: &[String],
    rows: &[Vec<String>],
    widths: &[usize],
    page_no: usize,
    page_count: usize,
) -> Vec<u8> {
    let mut content = Vec::new();

    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;
    text_at(&mut content, "F2", TITLE_SIZE, MARGIN, y, title);
    y -= META_SIZE + 6.0;
    text_at(&mut content, "F1", META_SIZE, MARGIN, y, generated);
    let folio = format!("Page {} of {}", page_no, page_count);
    text_at(&mut content, "F1", META_SIZE, PAGE_WIDTH - MARGIN - 80.0, y, &folio);

    y -= LINE_HEIGHT + 8.0;
    row_at(&mut content, "F2", y, header, widths);
    y -= LINE_HEIGHT;
    for row in rows {
        row_at(&mut content, "F1", y, row, widths);
        y -= LINE_HEIGHT;
    }

    content
}

/// Emit one table row, each cell positioned at its column's x offset. Cells
/// are written in full; the column widths only drive placement.
fn row_at(out: &mut Vec<u8>, font: &str, y: f64, cells: &[String], widths: &[usize]) {
    let mut x = MARGIN;
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(COLUMN_CAP);
        text_at(out, font, BODY_SIZE, x, y, cell);
        x += width as f64 * CHAR_WIDTH + COLUMN_GAP;
    }
}

fn text_at(out: &mut Vec<u8>, font: &str, size: f64, x: f64, y: f64, text: &str) {
    out.extend_from_slice(format!("BT /{} {:.1} Tf {:.1} {:.1} Td (", font, size, x, y).as_bytes());
    out.extend_from_slice(&escape_text(text));
    out.extend_from_slice(b") Tj ET\n");
}

/// PDF string escaping plus a WinAnsi-ish byte mapping: ASCII passes
/// through, Latin-1 maps to its byte, the truncation ellipsis maps to 0x85,
/// anything else degrades to `?`.
fn escape_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => bytes.extend_from_slice(b"\\("),
            ')' => bytes.extend_from_slice(b"\\)"),
            '\\' => bytes.extend_from_slice(b"\\\\"),
            '…' => bytes.push(0x85),
            c if (c as u32) < 0x80 => bytes.push(c as u8),
            c if (c as u32) < 0x100 => bytes.push(c as u32 as u8),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}

/// Lay the document out: catalog, page tree, two fonts, then one page
/// object + one content stream per page, followed by the xref table.
fn assemble(pages: &[Vec<u8>]) -> Vec<u8> {
    let mut doc: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let object_count = 4 + pages.len() * 2;
    let mut offsets: Vec<usize> = vec![0; object_count + 1];

    let kids: Vec<String> =
        (0..pages.len()).map(|i| format!("{} 0 R", 5 + i * 2)).collect();

    let mut write_obj = |doc: &mut Vec<u8>, id: usize, body: &[u8]| {
        offsets[id] = doc.len();
        doc.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        doc.extend_from_slice(body);
        doc.extend_from_slice(b"\nendobj\n");
    };

    write_obj(&mut doc, 1, b"<< /Type /Catalog /Pages 2 0 R >>");
    write_obj(
        &mut doc,
        2,
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()).as_bytes(),
    );
    write_obj(
        &mut doc,
        3,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    write_obj(
        &mut doc,
        4,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );

    for (i, content) in pages.iter().enumerate() {
        let page_id = 5 + i * 2;
        let content_id = page_id + 1;
        write_obj(
            &mut doc,
            page_id,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, content_id
            )
            .as_bytes(),
        );

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content);
        stream.extend_from_slice(b"endstream");
        write_obj(&mut doc, content_id, &stream);
    }

    let xref_offset = doc.len();
    doc.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
    doc.extend_from_slice(b"0000000000 65535 f \n");
    for id in 1..=object_count {
        doc.extend_from_slice(format!("{:010} 00000 n \n", offsets[id]).as_bytes());
    }
    doc.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            object_count + 1,
            xref_offset
        )
        .as_bytes(),
    );

    doc
}
