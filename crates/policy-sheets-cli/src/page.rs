//! Session page

use std::fmt::Write;

use policy_sheets::ReportTable;

use crate::session::{Session, SessionState};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;font-size:0.85em}\
th,td{border:1px solid #999;padding:4px;vertical-align:top;white-space:pre-wrap}\
th{background:#D9E1F2}\
.error{color:#a00}\
.warning{color:#a60}";

/// Render the page for the session's current state
pub fn render(session: &Session) -> String {
    let title = session
        .config()
        .style
        .title_text
        .clone()
        .unwrap_or_else(|| "Policy Definitions".to_string());

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head><body>\n<h1>{title}</h1>\n",
        title = escape_html(&title),
    );
    html.push_str(
        "<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\
<input type=\"file\" name=\"file\" accept=\".json,application/json\"> \
<button type=\"submit\">Upload</button></form>\n",
    );

    match session.state() {
        // Parsed never outlasts `Session::handle_upload`
        SessionState::Idle | SessionState::Parsed { .. } => {
            html.push_str("<p>Upload a JSON export of policy definitions.</p>\n");
        }
        SessionState::Failed { message } => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(message));
        }
        SessionState::Rendered(report) => {
            let skipped = report.table.skipped();
            if !skipped.is_empty() {
                let positions: Vec<String> = skipped.iter().map(|i| (i + 1).to_string()).collect();
                let _ = writeln!(
                    html,
                    "<p class=\"warning\">Skipped {} records that are not objects: {}</p>",
                    skipped.len(),
                    positions.join(", ")
                );
            }
            let _ = writeln!(
                html,
                "<p><a href=\"/download\" download=\"{name}\">Download {name}</a></p>",
                name = escape_html(report.artifact.file_name()),
            );
            html.push_str(&table_html(&report.table));
        }
    }

    html.push_str("</body></html>\n");
    html
}

fn table_html(table: &ReportTable) -> String {
    let mut html = String::from("<table>\n<thead><tr>");
    for header in table.headers() {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in table.rows() {
        html.push_str("<tr>");
        for value in row.values() {
            let _ = write!(html, "<td>{}</td>", escape_html(value));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody></table>\n");
    html
}

/// Escape text for element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
