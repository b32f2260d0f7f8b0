mod bootstrap;

use anyhow::{bail, Context, Result};
use inventory_core::settings::Settings;
use inventory_runtime::dataset_cache::DatasetCache;
use inventory_runtime::session::DashboardSession;
use inventory_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();
    let home = bootstrap::home_dir();

    bootstrap::ensure_directories(&home)?;
    let log_file = settings.log_file.clone().or_else(|| {
        (settings.view == "dashboard").then(|| bootstrap::default_log_file(&home))
    });
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Textile Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, KPI scope: {}",
        settings.view,
        settings.theme,
        settings.kpi_scope
    );

    let cwd = std::env::current_dir()?;
    let data_path = match settings
        .data
        .clone()
        .or_else(|| bootstrap::discover_data_path(&cwd, &home))
    {
        Some(path) => path,
        None => bail!(
            "no inventory file found; pass --data <CSV> or place it at ./{}",
            bootstrap::LOCAL_DATA_FILE
        ),
    };

    let mut cache = DatasetCache::new();
    let dataset = cache
        .get_or_load(&data_path)
        .with_context(|| format!("cannot load inventory from {}", data_path.display()))?;

    let session = match bootstrap::initial_selection(&settings, dataset.options()) {
        Some(selection) => DashboardSession::with_selection(dataset, settings.kpi_scope(), selection),
        None => DashboardSession::new(dataset, settings.kpi_scope()),
    };

    match settings.view.as_str() {
        "json" => {
            let snapshot = serde_json::json!({
                "dataset": session.dataset().info(),
                "view": session.view(),
            });
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        _ => {
            tracing::info!("Starting interactive dashboard...");
            App::new(&settings.theme, session).run()?;
        }
    }

    Ok(())
}
