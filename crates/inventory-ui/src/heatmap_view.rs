//! Category × period demand heatmap.
//!
//! Rows are categories, columns are `YYYY-MM` periods labelled by their
//! Spanish month abbreviation; each cell shows its row count on a colour ramp.

use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use inventory_core::calendar;
use inventory_data::aggregator::HeatmapMatrix;

use crate::components::no_data::{counted_title, panel_block, render_no_data};
use crate::text::truncate;
use crate::themes::Theme;

pub const TITLE: &str = "Demanda por Categoría y Mes";

const LABEL_WIDTH: u16 = 12;
const CELL_WIDTH: u16 = 4;

/// Column header for a `"YYYY-MM"` period key. Falls back to the raw key.
pub fn period_label(period: &str) -> String {
    period
        .split_once('-')
        .and_then(|(_, month)| month.parse::<u32>().ok())
        .and_then(calendar::month_abbreviation)
        .map(str::to_string)
        .unwrap_or_else(|| period.to_string())
}

/// Category rows that fit in `area` below the border and header.
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

/// Render the heatmap, or the "no data" placeholder when it is empty.
///
/// Rows beyond the panel height are dropped and the title shows how many
/// categories are on screen.
pub fn render_heatmap(frame: &mut Frame, area: Rect, heatmap: &HeatmapMatrix, theme: &Theme) {
    if heatmap.is_empty() {
        render_no_data(frame, area, TITLE, theme);
        return;
    }

    let max = heatmap.max_count();

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(heatmap.periods.iter().map(|p| Cell::from(period_label(p))))
            .collect::<Vec<_>>(),
    )
    .style(theme.table_header);

    let visible = visible_rows(area).min(heatmap.categories.len());
    let rows: Vec<Row> = heatmap
        .categories
        .iter()
        .zip(&heatmap.counts)
        .take(visible)
        .map(|(category, counts)| {
            let label = Cell::from(truncate(category, LABEL_WIDTH as usize)).style(theme.label);
            let cells = counts.iter().map(|&count| {
                let bg = theme.heat_color(count, max);
                Cell::from(Span::styled(format!("{count:>3}"), theme.text.bg(bg)))
            });
            Row::new(std::iter::once(label).chain(cells).collect::<Vec<_>>())
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(LABEL_WIDTH))
        .chain(heatmap.periods.iter().map(|_| Constraint::Length(CELL_WIDTH)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(0)
        .block(panel_block(
            &counted_title(TITLE, visible, heatmap.categories.len()),
            theme,
        ));

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn matrix() -> HeatmapMatrix {
        HeatmapMatrix {
            categories: vec!["Blusas".into(), "Pantalones".into()],
            periods: vec!["2023-01".into(), "2023-02".into()],
            counts: vec![vec![0, 2], vec![1, 1]],
        }
    }

    fn rendered(heatmap: &HeatmapMatrix, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_heatmap(frame, area, heatmap, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label("2023-01"), "Ene");
        assert_eq!(period_label("2024-12"), "Dic");
        assert_eq!(period_label("weird"), "weird");
    }

    #[test]
    fn test_render_heatmap_shows_labels() {
        let content = rendered(&matrix(), 60, 8);
        assert!(content.contains("Blusas"));
        assert!(content.contains("Ene"));
        assert!(content.contains("Feb"));
    }

    #[test]
    fn test_render_heatmap_reports_hidden_categories() {
        let heatmap = HeatmapMatrix {
            categories: (0..20).map(|i| format!("Cat{i:02}")).collect(),
            periods: vec!["2023-01".into()],
            counts: vec![vec![1]; 20],
        };
        // 10 rows high: two border rows and the header leave 7 categories.
        let content = rendered(&heatmap, 60, 10);
        assert!(content.contains("(7 de 20)"));
        assert!(content.contains("Cat06"));
        assert!(!content.contains("Cat07"));
    }

    #[test]
    fn test_render_heatmap_that_fits_has_plain_title() {
        let content = rendered(&matrix(), 60, 8);
        assert!(content.contains(TITLE));
        assert!(!content.contains('('));
    }

    #[test]
    fn test_render_empty_heatmap_shows_no_data() {
        let content = rendered(&HeatmapMatrix::default(), 60, 8);
        assert!(content.contains("Sin datos"));
    }

    #[test]
    fn test_render_heatmap_narrow_area_does_not_panic() {
        rendered(&matrix(), 10, 3);
    }
}
