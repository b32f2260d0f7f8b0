use crate::themes::Theme;
use inventory_core::formatting::format_count;
use ratatui::text::{Line, Span};

/// Dashboard title.
pub const TITLE: &str = "DASHBOARD DE INVENTARIO TEXTIL – LÍNEA MUJER";

/// Decoration placed either side of the title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Dashboard header rendering three lines:
///
/// 1. Title with accent decorations.
/// 2. A separator as wide as `width`.
/// 3. Dataset info in `[ 2023 – 2024 | 1,234 registros ]` format.
pub struct Header<'a> {
    /// First and last year in the dataset, `None` when it is empty.
    pub year_span: Option<(i32, i32)>,
    /// Rows in the base dataset.
    pub record_count: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(year_span: Option<(i32, i32)>, record_count: usize, theme: &'a Theme) -> Self {
        Self {
            year_span,
            record_count,
            theme,
        }
    }

    /// Human-readable year span: `"2023"`, `"2023 – 2024"` or `"sin datos"`.
    pub fn span_label(&self) -> String {
        match self.year_span {
            Some((first, last)) if first == last => first.to_string(),
            Some((first, last)) => format!("{first} – {last}"),
            None => "sin datos".to_string(),
        }
    }

    /// Render the header as exactly three lines.
    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let separator = "═".repeat(width as usize);

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(format!(" {TITLE} "), self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.span_label(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} registros", format_count(self.record_count as i64)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new(Some((2023, 2024)), 10, &theme).to_lines(60);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new(Some((2023, 2024)), 10, &theme).to_lines(60);
        let title = line_text(&lines[0]);
        assert!(title.contains(TITLE), "got: {title}");
        assert!(title.starts_with(ACCENT));
    }

    #[test]
    fn test_header_separator_matches_width() {
        let theme = Theme::dark();
        let lines = Header::new(None, 0, &theme).to_lines(42);
        let sep = line_text(&lines[1]);
        assert_eq!(sep.chars().count(), 42);
        assert!(sep.chars().all(|c| c == '═'));
    }

    #[test]
    fn test_header_info_line() {
        let theme = Theme::dark();
        let lines = Header::new(Some((2022, 2024)), 1_500, &theme).to_lines(60);
        let info = line_text(&lines[2]);
        assert_eq!(info, "[ 2022 – 2024 | 1,500 registros ]");
        assert_eq!(lines[2].spans.len(), 5);
    }

    #[test]
    fn test_span_label_variants() {
        let theme = Theme::dark();
        assert_eq!(Header::new(Some((2023, 2023)), 1, &theme).span_label(), "2023");
        assert_eq!(Header::new(None, 0, &theme).span_label(), "sin datos");
    }
}
