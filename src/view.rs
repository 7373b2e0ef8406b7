//! Text renderings of the stored records
//!
//! Every renderer falls back to a "no data" indicator instead of drawing an
//! empty table or chart.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::record::COLUMNS;
use crate::{PartnershipRecord, PartnershipType, Ugx};

pub const TITLE: &str = "Orphanage Partnership Database";
pub const FORM_TITLE: &str = "Enter Partnership Details";
pub const TABLE_TITLE: &str = "Collected Partnership Data";
pub const CHART_TITLE: &str = "Total Donations by Partnership Type";
pub const SUBMITTED: &str = "Partnership data submitted successfully!";

/// Shown instead of the table while there are no records
pub const NO_RECORDS: &str = "No partnership data yet.";
/// Shown instead of the chart while there is nothing to sum up
pub const NO_CHART_DATA: &str = "No data to chart yet.";

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 32;

/// Width of the longest bar in the chart
const BAR_WIDTH: usize = 40;

/// Renders `records` as a fixed width table with one row per record
pub fn render_table(records: &[PartnershipRecord]) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_owned();
    }

    let rows = records
        .iter()
        .map(|record| record.cells().map(|cell| truncate(&flatten(&cell), MAX_COLUMN_WIDTH)))
        .collect::<Vec<_>>();

    let mut widths = COLUMNS.map(|column| column.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{separator}+");

    let mut out = String::new();
    let _ = writeln!(out, "{separator}");
    push_row(&mut out, COLUMNS.iter().copied(), &widths);
    let _ = writeln!(out, "{separator}");
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    let _ = write!(out, "{separator}\n({} rows)", rows.len());

    tracing::debug!(rows = rows.len(), "rendered table");
    out
}

/// Renders the per type totals as a horizontal bar chart
///
/// Bars are scaled relative to the largest total.
pub fn render_chart(totals: &BTreeMap<PartnershipType, Ugx>) -> String {
    if totals.is_empty() {
        return NO_CHART_DATA.to_owned();
    }

    let max = totals.values().copied().max().unwrap_or_default();
    let label_width = totals
        .keys()
        .map(|ty| ty.as_str().len())
        .max()
        .unwrap_or_default()
        .max("Partnership Type".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<label_width$} | Amount (UGX)", "Partnership Type");
    for (ty, total) in totals {
        let bar = "#".repeat(bar_length(*total, max));
        let _ = writeln!(out, "{:<label_width$} | {bar} {total}", ty.as_str());
    }
    out.pop();

    tracing::debug!(bars = totals.len(), "rendered chart");
    out
}

/// The CSV download of all records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    contents: String,
}

impl ExportFile {
    pub const FILE_NAME: &'static str = "orphanage_partnerships.csv";
    pub const CONTENT_TYPE: &'static str = "text/csv";

    pub fn new(contents: String) -> Self {
        Self { contents }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Saves the export as [`ExportFile::FILE_NAME`] inside `dir`
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(Self::FILE_NAME);
        std::fs::write(&path, &self.contents)?;
        tracing::info!(path = %path.display(), bytes = self.contents.len(), "wrote export");
        Ok(path)
    }
}

fn bar_length(total: Ugx, max: Ugx) -> usize {
    if max == Ugx::from_num(0) {
        return 0;
    }
    let ratio = total.to_num::<f64>() / max.to_num::<f64>();
    // non-zero totals always get at least one mark
    match (ratio * BAR_WIDTH as f64).round() as usize {
        0 if total > Ugx::from_num(0) => 1,
        length => length,
    }
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    out.push('|');
    for (cell, &width) in cells.zip(widths) {
        let _ = write!(out, " {cell:<width$} |");
    }
    out.push('\n');
}

fn flatten(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn truncate(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_owned()
    } else {
        let take = max_width - 3;
        format!("{}...", value.chars().take(take).collect::<String>())
    }
}
