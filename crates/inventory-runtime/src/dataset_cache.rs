//! Load-once cache for the inventory dataset.
//!
//! [`DatasetCache`] is an explicit handle rather than process-global state:
//! the binary creates one at startup and tests create their own. A dataset is
//! keyed by the canonical source path plus a SHA-256 fingerprint of its bytes,
//! so the same file with the same content is parsed exactly once and every
//! later request gets the same [`Arc<Dataset>`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use inventory_core::models::InventoryRecord;
use inventory_core::{DashboardError, Result};
use inventory_data::analysis::FilterOptions;
use inventory_data::reader::load_inventory;
use serde::Serialize;
use sha2::{Digest, Sha256};

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The immutable base dataset plus the values offered by the filter controls.
#[derive(Debug)]
pub struct Dataset {
    source: PathBuf,
    fingerprint: String,
    records: Vec<InventoryRecord>,
    options: FilterOptions,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(source: PathBuf, fingerprint: String, records: Vec<InventoryRecord>) -> Self {
        let options = FilterOptions::from_records(&records);
        Self {
            source,
            fingerprint,
            records,
            options,
            loaded_at: Utc::now(),
        }
    }

    /// Build a dataset from in-memory records, fingerprinted by their debug
    /// representation.
    pub fn from_records(records: Vec<InventoryRecord>) -> Self {
        let fingerprint = fingerprint(format!("{records:?}").as_bytes());
        Self::new(PathBuf::from("<memory>"), fingerprint, records)
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Hex SHA-256 of the source bytes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            source: self.source.clone(),
            fingerprint: self.fingerprint.clone(),
            record_count: self.records.len(),
            years: self.options.years.clone(),
            loaded_at: self.loaded_at.to_rfc3339(),
        }
    }
}

/// Serialisable description of a loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub source: PathBuf,
    pub fingerprint: String,
    pub record_count: usize,
    pub years: Vec<i32>,
    /// ISO-8601 load timestamp.
    pub loaded_at: String,
}

// ── DatasetCache ──────────────────────────────────────────────────────────────

/// Read-only dataset cache. Entries are never invalidated; they live as long
/// as the cache.
///
/// # Example
/// ```no_run
/// use inventory_runtime::dataset_cache::DatasetCache;
/// use std::path::Path;
///
/// let mut cache = DatasetCache::new();
/// let dataset = cache.get_or_load(Path::new("data/inventario_mujer.csv")).unwrap();
/// println!("{} records", dataset.len());
/// ```
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<(PathBuf, String), Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `path`, loading and parsing it on first request.
    ///
    /// The file is read on every call to compute its fingerprint; parsing
    /// only happens for an unseen (path, fingerprint) pair.
    ///
    /// # Errors
    ///
    /// [`DashboardError::DataPathNotFound`] when `path` does not exist,
    /// [`DashboardError::FileRead`] when it cannot be read, and any
    /// data-format error raised while parsing.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        let canonical = std::fs::canonicalize(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DashboardError::DataPathNotFound(path.to_path_buf())
            } else {
                DashboardError::FileRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let bytes = std::fs::read(&canonical).map_err(|source| DashboardError::FileRead {
            path: canonical.clone(),
            source,
        })?;
        let key = (canonical, fingerprint(&bytes));

        if let Some(dataset) = self.entries.get(&key) {
            tracing::debug!(path = %key.0.display(), "returning cached dataset");
            return Ok(Arc::clone(dataset));
        }

        let records = load_inventory(bytes.as_slice())?;
        tracing::info!(
            path = %key.0.display(),
            records = records.len(),
            fingerprint = %key.1,
            "inventory dataset loaded"
        );

        let dataset = Arc::new(Dataset::new(key.0.clone(), key.1.clone(), records));
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Number of distinct datasets held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
