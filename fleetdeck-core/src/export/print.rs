//! Print export
//!
//! Renders the shared rows as a standalone HTML document with basic styling
//! (colored header, banded rows) and an auto-print script, meant to be
//! opened in a new browsing context and handed to the print pipeline.

use chrono::Local;

use super::rows::ExportRows;

/// Render the print document.
pub fn to_print_html(rows: &ExportRows, title: &str) -> String {
    let mut html = String::with_capacity(2048 + rows.rows.len() * 128);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(
        "<style>\n\
         body { font-family: Arial, Helvetica, sans-serif; margin: 24px; }\n\
         h1 { font-size: 18px; margin-bottom: 2px; }\n\
         .generated { color: #666; font-size: 11px; margin-bottom: 12px; }\n\
         table { border-collapse: collapse; width: 100%; font-size: 12px; }\n\
         th { background: #2c3e50; color: #fff; text-align: left; padding: 6px 8px; }\n\
         td { border-bottom: 1px solid #ddd; padding: 5px 8px; }\n\
         tr:nth-child(even) td { background: #f2f2f2; }\n\
         @media print { body { margin: 0; } }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    html.push_str(&format!(
        "<div class=\"generated\">Generated {}</div>\n",
        Local::now().format("%d/%m/%Y %H:%M")
    ));

    html.push_str("<table>\n<thead>\n<tr>");
    for label in &rows.header {
        html.push_str(&format!("<th>{}</th>", escape_html(label)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &rows.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<script>window.onload = function () { window.print(); };</script>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
