//! Main application state and TUI event loop.
//!
//! [`App`] owns the theme, the filter session and the table scroll offset.
//! Each key press is handled synchronously: the selection changes, the
//! session rebuilds its view, and the next frame draws it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame, Terminal,
};

use inventory_runtime::session::DashboardSession;
use tracing::debug;

use crate::components::{filter_panel, header::Header, kpi_cards};
use crate::themes::Theme;
use crate::{geo_view, heatmap_view, ranking_view, table_view, trend_view};

const SIDEBAR_WIDTH: u16 = 26;
const KPI_HEIGHT: u16 = 4;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub session: DashboardSession,
    /// First summary-table row on screen, kept within the last full page.
    pub table_offset: usize,
    /// Summary rows that fit in the table as of the last frame.
    pub table_visible: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, session: DashboardSession) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            session,
            table_offset: 0,
            table_visible: 0,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Esc` or `Ctrl+C`.
    ///
    /// Polls for key events with a 250 ms timeout so resizes are redrawn
    /// promptly.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        debug!(records = self.session.dataset().len(), "dashboard loop started");

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        debug!(quit = self.should_quit, "dashboard loop finished");

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('y') => self.change_selection(|s| s.cycle_year(true)),
            KeyCode::Char('Y') => self.change_selection(|s| s.cycle_year(false)),
            KeyCode::Char('s') => self.change_selection(|s| s.cycle_store(true)),
            KeyCode::Char('S') => self.change_selection(|s| s.cycle_store(false)),
            KeyCode::Char('c') => self.change_selection(|s| s.cycle_category(true)),
            KeyCode::Char('C') => self.change_selection(|s| s.cycle_category(false)),
            KeyCode::Char('r') | KeyCode::Char('R') => self.change_selection(|s| s.reset()),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            KeyCode::PageDown => self.scroll(10),
            KeyCode::PageUp => self.scroll(-10),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the whole dashboard into `frame`.
    ///
    /// Records the table height and re-clamps the scroll offset so key
    /// presses always move the rows on screen.
    pub fn render(&mut self, frame: &mut Frame) {
        let [header_area, kpi_area, body_area] = dashboard_rows(frame.area());
        let [sidebar_area, main_area] = split_body(body_area);
        let [grid_area, table_area] = split_grid(main_area);

        self.table_visible = table_view::visible_rows(table_area);
        self.table_offset = table_view::clamp_offset(
            self.table_offset,
            self.session.view().summary.len(),
            self.table_visible,
        );

        let view = self.session.view();
        let dataset = self.session.dataset();
        let theme = &self.theme;

        let header = Header::new(dataset.options().year_span(), dataset.len(), theme);
        frame.render_widget(Paragraph::new(header.to_lines(header_area.width)), header_area);

        kpi_cards::render_kpi_cards(frame, kpi_area, &view.kpis, view.kpi_scope, theme);

        filter_panel::render_filter_panel(
            frame,
            sidebar_area,
            self.session.selection(),
            dataset.options(),
            theme,
        );

        let [top, bottom] =
            Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(grid_area);
        let [heat_area, geo_area] = split_halves(top);
        let [trend_area, ranking_area] = split_halves(bottom);

        heatmap_view::render_heatmap(frame, heat_area, &view.heatmap, theme);
        geo_view::render_geo(frame, geo_area, &view.geo, theme);
        trend_view::render_trend(frame, trend_area, &view.monthly_trend, theme);
        ranking_view::render_ranking(frame, ranking_area, &view.category_ranking, theme);
        table_view::render_summary_table(frame, table_area, &view.summary, self.table_offset, theme);
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn change_selection(&mut self, apply: impl FnOnce(&mut DashboardSession)) {
        apply(&mut self.session);
        self.table_offset = 0;
    }

    fn scroll(&mut self, delta: isize) {
        self.table_offset = table_view::clamp_offset(
            self.table_offset.saturating_add_signed(delta),
            self.session.view().summary.len(),
            self.table_visible,
        );
    }
}

fn dashboard_rows(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(KPI_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(area)
}

fn split_body(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(area)
}

fn split_grid(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(area)
}

fn split_halves(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(area)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use inventory_core::models::{Choice, InventoryRecord, KpiScope};
    use inventory_runtime::dataset_cache::Dataset;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn record(category: &str, store: &str, stock: i64, date: &str) -> InventoryRecord {
        InventoryRecord {
            category: category.to_string(),
            store: store.to_string(),
            stock,
            stock_minimum: 15,
            unit_cost: 20_000.0,
            intake_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn app(records: Vec<InventoryRecord>) -> App {
        let dataset = Arc::new(Dataset::from_records(records));
        App::new("dark", DashboardSession::new(dataset, KpiScope::Full))
    }

    fn sample_app() -> App {
        app(vec![
            record("Pantalones", "Bogotá", 10, "2023-01-15"),
            record("Pantalones", "Bogotá", 30, "2023-02-10"),
            record("Blusas", "Cali", 20, "2024-03-01"),
            record("Faldas", "Pereira", 8, "2023-05-05"),
        ])
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut a = sample_app();
            press(&mut a, code);
            assert!(a.should_quit);
        }

        let mut a = sample_app();
        a.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(a.should_quit);
    }

    #[test]
    fn test_filter_keys_change_selection() {
        let mut a = sample_app();
        assert_eq!(a.session.selection().year, 2023);

        press(&mut a, KeyCode::Char('y'));
        assert_eq!(a.session.selection().year, 2024);

        press(&mut a, KeyCode::Char('s'));
        assert_eq!(a.session.selection().store, Choice::Only("Bogotá".into()));

        press(&mut a, KeyCode::Char('c'));
        assert_eq!(a.session.selection().category, Choice::Only("Pantalones".into()));
        assert!(!a.should_quit);

        press(&mut a, KeyCode::Char('r'));
        assert_eq!(a.session.selection().year, 2023);
        assert!(a.session.selection().store.is_all());
        assert!(a.session.selection().category.is_all());
    }

    fn long_app(rows: usize) -> App {
        app((0..rows)
            .map(|i| record(&format!("Cat{i:02}"), "Bogotá", i as i64, "2023-03-01"))
            .collect())
    }

    #[test]
    fn test_scroll_is_clamped_to_last_page() {
        let mut a = long_app(40);
        draw(&mut a, 160, 50);
        let visible = a.table_visible;
        assert!(visible > 0 && visible < 40);

        for _ in 0..5 {
            press(&mut a, KeyCode::PageDown);
        }
        assert_eq!(a.table_offset, 40 - visible);
        let bottom = draw(&mut a, 160, 50);

        press(&mut a, KeyCode::Up);
        assert_eq!(a.table_offset, 40 - visible - 1);
        let after_up = draw(&mut a, 160, 50);
        assert_ne!(bottom, after_up);

        press(&mut a, KeyCode::PageUp);
        press(&mut a, KeyCode::PageUp);
        press(&mut a, KeyCode::PageUp);
        press(&mut a, KeyCode::PageUp);
        assert_eq!(a.table_offset, 0);
    }

    #[test]
    fn test_scroll_is_reset_on_filter_change() {
        let mut a = long_app(40);
        draw(&mut a, 160, 50);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Char('j'));
        assert_eq!(a.table_offset, 2);

        press(&mut a, KeyCode::Char('s'));
        assert_eq!(a.table_offset, 0);
    }

    #[test]
    fn test_scroll_short_table_stays_at_top() {
        let mut a = sample_app();
        draw(&mut a, 160, 50);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::PageDown);
        assert_eq!(a.table_offset, 0);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_full_dashboard() {
        let mut a = sample_app();
        let content = draw(&mut a, 160, 50);
        assert!(content.contains("DASHBOARD DE INVENTARIO TEXTIL"));
        assert!(content.contains("Total Stock"));
        assert!(content.contains("Valor Total"));
        assert!(content.contains("$1,360,000"));
        assert!(content.contains("Filtros"));
        assert!(content.contains("Bajo Stock"));
    }

    #[test]
    fn test_render_empty_selection_shows_no_data() {
        let mut a = sample_app();
        a.session.set_selection(
            inventory_core::models::FilterSelection::new(2023)
                .with_store(Choice::Only("Cali".into())),
        );
        let content = draw(&mut a, 160, 50);
        assert!(content.contains("Sin datos"));
        // KPIs still cover the full dataset.
        assert!(content.contains("68"));
    }

    #[test]
    fn test_render_empty_dataset_does_not_panic() {
        let mut a = app(vec![]);
        let content = draw(&mut a, 120, 40);
        assert!(content.contains("sin datos"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let mut a = sample_app();
        draw(&mut a, 40, 12);
    }

    #[test]
    fn test_render_light_theme_does_not_panic() {
        let mut a = sample_app();
        a.theme = Theme::light();
        draw(&mut a, 120, 40);
    }
}
