use std::path::{Path, PathBuf};
use std::sync::Mutex;

use inventory_core::models::{Choice, FilterSelection};
use inventory_core::settings::Settings;
use inventory_data::analysis::FilterOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application directory under the user's home.
pub const APP_DIR: &str = ".textile-dashboard";

/// Data file looked up relative to the working directory.
pub const LOCAL_DATA_FILE: &str = "data/inventario_mujer.csv";

/// Data file looked up inside [`APP_DIR`].
pub const HOME_DATA_FILE: &str = "inventario.csv";

/// Home directory, or `.` when it cannot be determined.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `<home>/.textile-dashboard/` and its `logs/` subdirectory exist.
pub fn ensure_directories(home: &Path) -> anyhow::Result<()> {
    let app_dir = home.join(APP_DIR);
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

/// Log file used by the interactive dashboard when `--log-file` is absent, so
/// log lines never land on the alternate screen.
pub fn default_log_file(home: &Path) -> PathBuf {
    home.join(APP_DIR).join("logs").join("textile-dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a settings log level to an [`EnvFilter`] directive.
pub fn filter_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file`, events are appended to that file without ANSI colours;
/// otherwise they go to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = if file_layer.is_none() {
        Some(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Locate the inventory CSV.
///
/// Checks, in order, and returns the first file that exists:
/// 1. `<cwd>/data/inventario_mujer.csv`
/// 2. `<home>/.textile-dashboard/inventario.csv`
pub fn discover_data_path(cwd: &Path, home: &Path) -> Option<PathBuf> {
    let candidates = [
        cwd.join(LOCAL_DATA_FILE),
        home.join(APP_DIR).join(HOME_DATA_FILE),
    ];
    candidates.into_iter().find(|p| p.is_file())
}

// ── Initial selection ──────────────────────────────────────────────────────────

/// Selection requested on the command line, completed with the earliest year
/// of the dataset. `None` when no year is given and the dataset is empty.
///
/// Values absent from the dataset are kept (they yield an empty view) but
/// logged.
pub fn initial_selection(settings: &Settings, options: &FilterOptions) -> Option<FilterSelection> {
    let year = settings.year.or_else(|| options.default_year())?;
    if !options.years.contains(&year) {
        tracing::warn!(year, "requested year has no inventory records");
    }

    let store = settings.store_choice();
    if let Choice::Only(name) = &store {
        if !options.stores.contains(name) {
            tracing::warn!(store = %name, "requested store has no inventory records");
        }
    }
    let category = settings.category_choice();
    if let Choice::Only(name) = &category {
        if !options.categories.contains(name) {
            tracing::warn!(category = %name, "requested category has no inventory records");
        }
    }

    Some(
        FilterSelection::new(year)
            .with_store(store)
            .with_category(category),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
