//! Horizontal bar ranking of stock per category, largest on top.

use ratatui::{
    layout::{Direction, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
    Frame,
};

use inventory_core::formatting::format_count;
use inventory_data::aggregator::CategoryStock;

use crate::components::no_data::{counted_title, panel_block, render_no_data};
use crate::text::truncate;
use crate::themes::Theme;

pub const TITLE: &str = "Ranking de Categorías";

const LABEL_WIDTH: usize = 12;

/// Bars in display order (top to bottom).
///
/// The ranking arrives ascending, so it is reversed to put the largest
/// category first. Bars cannot be negative; the printed value keeps the
/// real total.
pub fn ranking_bars(ranking: &[CategoryStock], theme: &Theme) -> Vec<Bar<'static>> {
    ranking
        .iter()
        .rev()
        .map(|c| {
            Bar::default()
                .label(Line::from(truncate(&c.category, LABEL_WIDTH)))
                .value(c.stock.max(0) as u64)
                .text_value(format_count(c.stock))
                .style(theme.ranking_bar)
                .value_style(theme.value)
        })
        .collect()
}

/// Bars that fit in `area`: one row each inside the border.
pub fn visible_bars(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

/// Render the ranking, or the "no data" placeholder.
///
/// When the panel is too short only the largest categories are drawn and the
/// title shows how many.
pub fn render_ranking(frame: &mut Frame, area: Rect, ranking: &[CategoryStock], theme: &Theme) {
    if ranking.is_empty() {
        render_no_data(frame, area, TITLE, theme);
        return;
    }

    let mut bars = ranking_bars(ranking, theme);
    bars.truncate(visible_bars(area));
    let title = counted_title(TITLE, bars.len(), ranking.len());
    let chart = BarChart::default()
        .block(panel_block(&title, theme))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .label_style(theme.label)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
