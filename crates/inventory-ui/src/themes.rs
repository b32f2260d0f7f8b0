use inventory_core::models::StockStatus;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark and 7–15 are light. Missing or unparseable values yield
/// `BackgroundType::Dark`.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Every style the dashboard panels use.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub panel_border: Style,
    pub panel_title: Style,
    /// Filter value currently narrowing the data.
    pub filter_active: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Heatmap ramp, coolest first.
    pub heat_ramp: [Color; 4],
    pub map_land: Color,
    pub map_marker: Style,
    pub trend_line: Style,
    pub ranking_bar: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub status_low: Style,
    pub status_ok: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::LightMagenta),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            panel_border: Style::default().fg(Color::DarkGray),
            panel_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            filter_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            heat_ramp: [Color::DarkGray, Color::Blue, Color::Magenta, Color::Red],
            map_land: Color::DarkGray,
            map_marker: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            trend_line: Style::default().fg(Color::Cyan),
            ranking_bar: Style::default().fg(Color::Magenta),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            status_low: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            status_ok: Style::default().fg(Color::Green),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Blue),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),

            panel_border: Style::default().fg(Color::Gray),
            panel_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            filter_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            heat_ramp: [Color::Gray, Color::Blue, Color::Magenta, Color::Red],
            map_land: Color::Gray,
            map_marker: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            trend_line: Style::default().fg(Color::Blue),
            ranking_bar: Style::default().fg(Color::Magenta),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            status_low: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            status_ok: Style::default().fg(Color::Green),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette and no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            panel_border: Style::default().fg(Color::DarkGray),
            panel_title: Style::default().fg(Color::Cyan),
            filter_active: Style::default().fg(Color::Yellow),

            heat_ramp: [Color::DarkGray, Color::Blue, Color::Yellow, Color::Red],
            map_land: Color::DarkGray,
            map_marker: Style::default().fg(Color::Red),
            trend_line: Style::default().fg(Color::Cyan),
            ranking_bar: Style::default().fg(Color::Yellow),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            status_low: Style::default().fg(Color::Red),
            status_ok: Style::default().fg(Color::Green),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Background colour for a heatmap cell holding `count` out of `max`.
    ///
    /// Zero always maps to the first ramp colour; non-zero counts are spread
    /// over the remaining three.
    pub fn heat_color(&self, count: u64, max: u64) -> Color {
        if count == 0 || max == 0 {
            return self.heat_ramp[0];
        }
        let ratio = count as f64 / max as f64;
        if ratio > 0.66 {
            self.heat_ramp[3]
        } else if ratio > 0.33 {
            self.heat_ramp[2]
        } else {
            self.heat_ramp[1]
        }
    }

    /// Summary-table style for a stock status.
    pub fn status_style(&self, status: StockStatus) -> Style {
        match status {
            StockStatus::Low => self.status_low,
            StockStatus::Ok => self.status_ok,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Magenta));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert_eq!(t.status_low.fg, Some(Color::Red));
        assert_eq!(t.status_ok.fg, Some(Color::Green));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
        assert_eq!(t.trend_line.fg, Some(Color::Blue));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.value.add_modifier.contains(Modifier::BOLD));
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.status_low.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").map_land, Color::DarkGray);
        assert_eq!(Theme::from_name("light").map_land, Color::Gray);
        assert_eq!(Theme::from_name("classic").header.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    // ── heat_color ───────────────────────────────────────────────────────────

    #[test]
    fn test_heat_color_zero_is_coolest() {
        let t = Theme::dark();
        assert_eq!(t.heat_color(0, 10), Color::DarkGray);
        assert_eq!(t.heat_color(0, 0), Color::DarkGray);
    }

    #[test]
    fn test_heat_color_ramp() {
        let t = Theme::dark();
        assert_eq!(t.heat_color(1, 10), Color::Blue);
        assert_eq!(t.heat_color(5, 10), Color::Magenta);
        assert_eq!(t.heat_color(10, 10), Color::Red);
    }

    // ── status_style ─────────────────────────────────────────────────────────

    #[test]
    fn test_status_style() {
        let t = Theme::dark();
        assert_eq!(t.status_style(StockStatus::Low).fg, Some(Color::Red));
        assert_eq!(t.status_style(StockStatus::Ok).fg, Some(Color::Green));
    }
}
