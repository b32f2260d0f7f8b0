use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{Choice, KpiScope};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive textile inventory dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "textile-dashboard",
    about = "Interactive textile inventory dashboard",
    version
)]
pub struct Settings {
    /// Inventory CSV file (discovered automatically if not specified)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Initial year filter (defaults to the earliest year in the data)
    #[arg(long)]
    pub year: Option<i32>,

    /// Initial store filter ("all" for every store)
    #[arg(long, default_value = "all")]
    pub store: String,

    /// Initial category filter ("all" for every category)
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Record set summarised by the KPI cards
    #[arg(long, default_value = "full", value_parser = ["full", "filtered"])]
    pub kpi_scope: String,

    /// Output mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

impl Settings {
    /// Initial store filter as a [`Choice`].
    pub fn store_choice(&self) -> Choice {
        Choice::parse(&self.store)
    }

    /// Initial category filter as a [`Choice`].
    pub fn category_choice(&self) -> Choice {
        Choice::parse(&self.category)
    }

    pub fn kpi_scope(&self) -> KpiScope {
        KpiScope::from_name(&self.kpi_scope)
    }
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Display preferences persisted to `~/.textile-dashboard/last_used.json`.
///
/// Filter state is deliberately absent: every session starts from the CLI
/// values.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

impl LastUsedParams {
    /// Default location of the persisted preferences.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".textile-dashboard").join("last_used.json")
    }

    /// Load from `path`; `Default` when absent or unreadable.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable last-used params");
                Self::default()
            }
        }
    }

    /// Atomically write to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the file at `path` if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings loading ───────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments, merge persisted preferences and save them back.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear last-used params");
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if settings.data.is_none() {
            settings.data = last.data_path;
        }

        settings = Self::apply_debug(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist last-used params");
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            data_path: s.data.clone(),
        }
    }
}

/// `true` when `name` was supplied on the command line (not a default).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}
