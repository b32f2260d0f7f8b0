use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use inventory_core::formatting::{format_count, format_currency};
use inventory_core::models::{KpiScope, Kpis};

use super::no_data::panel_block;
use crate::themes::Theme;

/// Title and formatted value of each KPI card, left to right.
pub fn kpi_card_values(kpis: &Kpis) -> [(&'static str, String); 3] {
    [
        ("Total Stock", format_count(kpis.total_stock)),
        ("Valor Total", format_currency(kpis.total_value, 0)),
        ("Bajo Stock", format_count(kpis.low_stock_count as i64)),
    ]
}

/// Caption stating which record set the cards summarise.
pub fn scope_caption(scope: KpiScope) -> &'static str {
    match scope {
        KpiScope::Full => "inventario completo",
        KpiScope::Filtered => "selección actual",
    }
}

/// Render the three KPI cards side by side.
pub fn render_kpi_cards(frame: &mut Frame, area: Rect, kpis: &Kpis, scope: KpiScope, theme: &Theme) {
    let cards = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    for (idx, (title, value)) in kpi_card_values(kpis).into_iter().enumerate() {
        let value_style = if idx == 2 && kpis.low_stock_count > 0 {
            theme.status_low
        } else {
            theme.value
        };
        let lines = vec![
            Line::from(Span::styled(value, value_style)),
            Line::from(Span::styled(scope_caption(scope), theme.dim)),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(panel_block(title, theme)),
            cards[idx],
        );
    }
}
