use serde::Serialize;

use super::SortDirection;
use crate::core::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    /// Set only on the column the table is currently sorted by.
    #[serde(skip)]
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub id: RecordId,
    pub cells: Vec<String>,
}

/// Display-ready snapshot of a table: headers plus rows in view order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Left-aligned plain-text grid, one header line, a rule, then rows.
    pub fn to_text(&self) -> String {
        let labels: Vec<String> = self
            .headers
            .iter()
            .map(|h| match h.sort {
                Some(direction) => format!("{} {}", h.label, direction.arrow()),
                None => h.label.clone(),
            })
            .collect();

        let mut widths: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &labels, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, &row.cells, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
