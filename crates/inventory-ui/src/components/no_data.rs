use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::themes::Theme;

/// Message shown by a panel whose aggregate is empty.
pub const NO_DATA_MESSAGE: &str = "Sin datos para la selección actual";

/// Render the "no data" placeholder inside a bordered block titled `title`.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA_MESSAGE, theme.warning)),
        Line::from(Span::styled("Pulse 'r' para limpiar los filtros", theme.dim)),
    ]);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(panel_block(title, theme)),
        area,
    );
}

/// Panel title with a `(shown de total)` suffix when rows were cut off.
pub fn counted_title(title: &str, shown: usize, total: usize) -> String {
    if shown < total {
        format!("{title} ({shown} de {total})")
    } else {
        title.to_string()
    }
}

/// Bordered block shared by every dashboard panel.
pub fn panel_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border)
        .title(Span::styled(format!(" {title} "), theme.panel_title))
}
