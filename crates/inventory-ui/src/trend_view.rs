//! Monthly stock trend line chart.

use ratatui::{
    layout::Rect,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType},
    Frame,
};

use inventory_core::calendar::MONTH_ABBREVIATIONS;
use inventory_core::formatting::format_count;
use inventory_data::aggregator::MonthlyStock;

use crate::components::no_data::{panel_block, render_no_data};
use crate::themes::Theme;

pub const TITLE: &str = "Tendencia Mensual de Stock";

/// `(month, stock)` pairs for the chart.
pub fn chart_points(trend: &[MonthlyStock]) -> Vec<(f64, f64)> {
    trend
        .iter()
        .map(|m| (m.month as f64, m.stock as f64))
        .collect()
}

/// Y-axis bounds: always include zero, with headroom above the maximum.
pub fn y_bounds(trend: &[MonthlyStock]) -> [f64; 2] {
    let min = trend.iter().map(|m| m.stock).min().unwrap_or(0).min(0) as f64;
    let max = trend.iter().map(|m| m.stock).max().unwrap_or(0).max(0) as f64;
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    [min, top]
}

/// Render the trend chart, or the "no data" placeholder.
pub fn render_trend(frame: &mut Frame, area: Rect, trend: &[MonthlyStock], theme: &Theme) {
    if trend.is_empty() {
        render_no_data(frame, area, TITLE, theme);
        return;
    }

    let points = chart_points(trend);
    let [y_min, y_max] = y_bounds(trend);

    let dataset = Dataset::default()
        .name("Stock")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.trend_line)
        .data(&points);

    // Twelve evenly spaced labels over [1, 12] land exactly on each month.
    let x_labels: Vec<Span> = MONTH_ABBREVIATIONS
        .iter()
        .map(|m| Span::styled(*m, theme.label))
        .collect();
    let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
        .iter()
        .map(|v| Span::styled(format_count(v.round() as i64), theme.label))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(panel_block(TITLE, theme))
        .x_axis(
            Axis::default()
                .style(theme.dim)
                .bounds([1.0, 12.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.dim)
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
