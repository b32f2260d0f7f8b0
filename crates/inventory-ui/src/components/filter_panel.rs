use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use inventory_core::models::{Choice, FilterSelection};
use inventory_data::analysis::FilterOptions;

use super::no_data::panel_block;
use crate::text::truncate;
use crate::themes::Theme;

/// Marker in front of the selected option.
const SELECTED: &str = "▸ ";
const UNSELECTED: &str = "  ";
const MARKER_WIDTH: usize = 2;

/// Build the sidebar lines: one section per filter followed by key help.
///
/// Each section lists every option with the current one marked; store and
/// category lists start with "Todas".
pub fn build_filter_lines(
    selection: &FilterSelection,
    options: &FilterOptions,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(section_title("Año", "y/Y", theme));
    for year in &options.years {
        lines.push(option_line(&year.to_string(), *year == selection.year, width, theme));
    }
    lines.push(Line::from(""));

    lines.push(section_title("Tienda", "s/S", theme));
    push_choice_options(&mut lines, &selection.store, &options.stores, width, theme);
    lines.push(Line::from(""));

    lines.push(section_title("Categoría", "c/C", theme));
    push_choice_options(&mut lines, &selection.category, &options.categories, width, theme);
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("[r] ", theme.info),
        Span::styled("Limpiar Filtros", theme.text),
    ]));
    lines.push(Line::from(vec![
        Span::styled("[↑↓] ", theme.info),
        Span::styled("Desplazar tabla", theme.text),
    ]));
    lines.push(Line::from(vec![
        Span::styled("[q] ", theme.info),
        Span::styled("Salir", theme.text),
    ]));
    lines
}

/// Render the filter sidebar.
pub fn render_filter_panel(
    frame: &mut Frame,
    area: Rect,
    selection: &FilterSelection,
    options: &FilterOptions,
    theme: &Theme,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = build_filter_lines(selection, options, inner_width, theme);
    frame.render_widget(
        Paragraph::new(lines).block(panel_block("Filtros", theme)),
        area,
    );
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn section_title(name: &'static str, keys: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(name, theme.label.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" ({keys})"), theme.dim),
    ])
}

fn option_line(value: &str, selected: bool, width: usize, theme: &Theme) -> Line<'static> {
    let label = truncate(value, width.saturating_sub(MARKER_WIDTH));
    if selected {
        Line::from(vec![
            Span::styled(SELECTED, theme.filter_active),
            Span::styled(label, theme.filter_active),
        ])
    } else {
        Line::from(vec![
            Span::raw(UNSELECTED),
            Span::styled(label, theme.text),
        ])
    }
}

fn push_choice_options(
    lines: &mut Vec<Line<'static>>,
    current: &Choice,
    values: &[String],
    width: usize,
    theme: &Theme,
) {
    lines.push(option_line(Choice::All.label(), current.is_all(), width, theme));
    for value in values {
        lines.push(option_line(value, current.matches(value) && !current.is_all(), width, theme));
    }
}
