//! Store map: a canvas world map zoomed onto the known stores, one marker per
//! store sized by its stock, plus a legend.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Map, MapResolution},
        Paragraph,
    },
    Frame,
};

use inventory_core::formatting::format_count;
use inventory_data::aggregator::{GeoPoint, GeoView};

use crate::components::no_data::{panel_block, render_no_data};
use crate::text::truncate;
use crate::themes::Theme;

pub const TITLE: &str = "Stock por Tienda";

/// Longitude range shown by the map.
pub const LONGITUDE_BOUNDS: [f64; 2] = [-80.0, -70.0];
/// Latitude range shown by the map.
pub const LATITUDE_BOUNDS: [f64; 2] = [0.0, 13.0];

const MIN_RADIUS: f64 = 0.25;
const MAX_RADIUS: f64 = 1.0;
const LEGEND_WIDTH: u16 = 24;

/// Marker radius in map degrees, proportional to the store's share of the
/// largest stock. Non-positive stock gets the minimum radius.
pub fn marker_radius(stock: i64, max_stock: i64) -> f64 {
    if stock <= 0 || max_stock <= 0 {
        return MIN_RADIUS;
    }
    MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * (stock as f64 / max_stock as f64)
}

/// Legend lines: one per placed store, then any stores without coordinates.
pub fn legend_lines(geo: &GeoView, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = geo
        .points
        .iter()
        .map(|p| {
            Line::from(vec![
                Span::styled("● ", theme.map_marker),
                Span::styled(truncate(&p.store, width.saturating_sub(10)), theme.text),
                Span::styled(format!(" {}", format_count(p.stock)), theme.value),
            ])
        })
        .collect();

    if !geo.unlocated_stores.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Sin ubicación:", theme.warning)));
        for store in &geo.unlocated_stores {
            lines.push(Line::from(Span::styled(
                format!("  {}", truncate(store, width.saturating_sub(2))),
                theme.dim,
            )));
        }
    }
    lines
}

/// Render the map and legend, or the "no data" placeholder when no store
/// contributed stock. Stores without coordinates only appear in the legend,
/// so the map may be blank.
pub fn render_geo(frame: &mut Frame, area: Rect, geo: &GeoView, theme: &Theme) {
    if geo.is_empty() {
        render_no_data(frame, area, TITLE, theme);
        return;
    }

    let block = panel_block(TITLE, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [map_area, legend_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(LEGEND_WIDTH)]).areas(inner);

    let max_stock = geo.points.iter().map(|p| p.stock).max().unwrap_or(0);
    let points: &[GeoPoint] = &geo.points;
    let land = theme.map_land;
    let marker_color = theme.map_marker.fg.unwrap_or(land);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(LONGITUDE_BOUNDS)
        .y_bounds(LATITUDE_BOUNDS)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: land,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for p in points {
                ctx.draw(&Circle {
                    x: p.longitude,
                    y: p.latitude,
                    radius: marker_radius(p.stock, max_stock),
                    color: marker_color,
                });
            }
            for p in points {
                ctx.print(p.longitude + MAX_RADIUS, p.latitude, p.store.clone());
            }
        });
    frame.render_widget(canvas, map_area);

    let legend = legend_lines(geo, legend_area.width as usize, theme);
    frame.render_widget(Paragraph::new(legend), legend_area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
