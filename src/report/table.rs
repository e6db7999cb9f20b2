use super::{ReportRow, HEADERS};
use crate::ArticleRecord;

const GAP: &str = "  ";

fn width(text: &str) -> usize {
    text.chars().count()
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Left-aligned console table with a header and a dashed separator.
pub fn render_table(records: &[ArticleRecord]) -> String {
    let rows: Vec<ReportRow> = records.iter().map(ReportRow::from).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| width(h)).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, &row.cells(), &widths);
    }
    out
}
