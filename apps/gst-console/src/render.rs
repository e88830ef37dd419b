//! Plain-text rendering of dashboard pages

use crate::edit::{EditForm, EditState};
use crate::screen::Screen;
use gst_types::CompanyRecord;
use gst_view::{SortDirection, SortKey, SortSpec, View};
use std::fmt::Write;

const MAX_CELL_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    LegalName,
    Gstin,
    State,
    FetchDate,
    AnnualTurnover,
    DelayDays,
    DelayedFilling,
    Result,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::LegalName => "Legal Name",
            Column::Gstin => "GSTIN",
            Column::State => "State",
            Column::FetchDate => "Fetch Date",
            Column::AnnualTurnover => "Annual Turnover",
            Column::DelayDays => "Delay Days",
            Column::DelayedFilling => "Delayed Filing %",
            Column::Result => "Result",
        }
    }

    /// Sort key behind a clickable header
    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            Column::Id => None,
            Column::LegalName => Some(SortKey::LegalName),
            Column::Gstin => Some(SortKey::Gstin),
            Column::State => Some(SortKey::State),
            Column::FetchDate => Some(SortKey::FetchDate),
            Column::AnnualTurnover => Some(SortKey::AnnualTurnover),
            Column::DelayDays => Some(SortKey::DelayDays),
            Column::DelayedFilling => Some(SortKey::DelayedFilling),
            Column::Result => Some(SortKey::Result),
        }
    }

    pub fn cell(self, record: &CompanyRecord) -> String {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        match self {
            Column::Id => record.id.map(|id| id.to_string()).unwrap_or_default(),
            Column::LegalName => text(&record.legal_name),
            Column::Gstin => text(&record.gstin),
            Column::State => text(&record.state),
            Column::FetchDate => text(&record.fetch_date),
            Column::AnnualTurnover => record
                .annual_turnover
                .map(|t| format!("{}", t))
                .unwrap_or_default(),
            Column::DelayDays => text(&record.delay_days),
            Column::DelayedFilling => text(&record.delayed_filling),
            Column::Result => text(&record.result),
        }
    }
}

pub fn columns(screen: Screen) -> &'static [Column] {
    match screen {
        Screen::Admin => &[
            Column::Id,
            Column::LegalName,
            Column::Gstin,
            Column::State,
            Column::FetchDate,
            Column::AnnualTurnover,
            Column::Result,
        ],
        Screen::User => &[
            Column::LegalName,
            Column::Gstin,
            Column::State,
            Column::FetchDate,
            Column::DelayDays,
            Column::DelayedFilling,
            Column::Result,
        ],
        Screen::Checker => &[
            Column::Id,
            Column::LegalName,
            Column::Gstin,
            Column::State,
            Column::FetchDate,
            Column::Result,
        ],
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

fn header_label(column: Column, sort: Option<SortSpec>) -> String {
    match (column.sort_key(), sort) {
        (Some(key), Some(spec)) if spec.key == key => match spec.direction {
            SortDirection::Ascending => format!("{} ^", column.header()),
            SortDirection::Descending => format!("{} v", column.header()),
        },
        _ => column.header().to_string(),
    }
}

/// Render one page as an aligned text table with a page footer
pub fn render_page(screen: Screen, view: &View<'_>, sort: Option<SortSpec>) -> String {
    let columns = columns(screen);
    let header: Vec<String> = columns.iter().map(|c| header_label(*c, sort)).collect();
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| truncate(&c.cell(record), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(&header));
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    if rows.is_empty() {
        let _ = writeln!(out, "No companies match.");
    }
    for row in &rows {
        let _ = writeln!(out, "{}", line(row));
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} companies)",
        view.page,
        view.total_pages.max(1),
        view.total_rows
    );
    out
}

/// Describe the edit form, if one is open
pub fn render_edit(state: &EditState) -> Option<String> {
    let (form, label): (&EditForm, &str) = match state {
        EditState::Closed => return None,
        EditState::Open(form) => (form, "Editing"),
        EditState::Submitting(form) => (form, "Saving"),
    };

    let status = form
        .status_draft
        .map(|s| s.to_string())
        .or_else(|| form.current_status().map(String::from))
        .unwrap_or_else(|| "-".to_string());
    let turnover = if form.turnover_draft.trim().is_empty() {
        form.current_turnover()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string())
    } else {
        form.turnover_draft.clone()
    };

    Some(format!(
        "{} {} (id {}): status {}, annual turnover {}",
        label,
        form.record.gstin.as_deref().unwrap_or("?"),
        form.record
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "?".to_string()),
        status,
        turnover
    ))
}
