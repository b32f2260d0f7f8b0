//! Filtered inventory summary table.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per filtered
//! record and a coloured status column.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Table},
    Frame,
};

use inventory_core::formatting;
use inventory_data::aggregator::SummaryRow;

use crate::components::no_data::{panel_block, render_no_data};
use crate::themes::Theme;

pub const TITLE: &str = "Resumen de Inventario";

const HEADERS: [&str; 6] = [
    "Categoría",
    "Tienda",
    "Stock",
    "Stock Mín.",
    "Costo Unit.",
    "Estado",
];

/// Rows that fit in `area` once the border and header are accounted for.
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

/// Clamp a scroll offset so the last page stays full.
pub fn clamp_offset(offset: usize, total: usize, visible: usize) -> usize {
    offset.min(total.saturating_sub(visible))
}

/// Render the summary table starting at row `offset`, or the "no data"
/// placeholder.
pub fn render_summary_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[SummaryRow],
    offset: usize,
    theme: &Theme,
) {
    if rows.is_empty() {
        render_no_data(frame, area, TITLE, theme);
        return;
    }

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h).style(theme.table_header)))
        .height(1);

    let visible = visible_rows(area);
    let offset = clamp_offset(offset, rows.len(), visible);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.category.clone()),
                Cell::from(row.store.clone()),
                Cell::from(formatting::format_count(row.stock)),
                Cell::from(formatting::format_count(row.stock_minimum)),
                Cell::from(formatting::format_currency(row.unit_cost, 0)),
                Cell::from(row.status.display_label()).style(theme.status_style(row.status)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let title = if rows.len() > visible {
        format!(
            "{TITLE} ({}–{} de {})",
            offset + 1,
            (offset + visible).min(rows.len()),
            rows.len()
        )
    } else {
        format!("{TITLE} ({})", rows.len())
    };

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(panel_block(&title, theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
