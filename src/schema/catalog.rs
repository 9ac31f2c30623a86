//! Descriptor catalog: named table descriptors persisted as JSON
//!
//! - Files live at `<data_dir>/metadata/descriptors/<table>.json`
//! - One file per table, holding `{"table": ..., "fields": [...]}`
//! - Registered descriptors are immutable; re-registering a table fails
//! - Malformed files abort the load unless `skip_malformed` is configured

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::descriptor::TupleDesc;
use super::errors::{CatalogError, CatalogResult};
use super::types::Type;
use crate::config::CatalogConfig;
use crate::observability::{Event, LogSink, Severity};

/// On-disk form of one catalog entry
#[derive(Debug, Serialize, Deserialize)]
struct CatalogEntry {
    table: String,
    fields: TupleDesc<Type>,
}

/// In-memory registry of table descriptors backed by a directory of JSON files.
pub struct DescriptorCatalog {
    config: CatalogConfig,
    descriptor_dir: PathBuf,
    tables: HashMap<String, TupleDesc<Type>>,
    log: LogSink,
}

impl DescriptorCatalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_log_sink(config, LogSink::stdio())
    }

    /// Catalog whose events are written to `log`
    pub fn with_log_sink(config: &CatalogConfig, log: LogSink) -> Self {
        Self {
            config: config.clone(),
            descriptor_dir: config.descriptor_dir(),
            tables: HashMap::new(),
            log,
        }
    }

    pub fn descriptor_dir(&self) -> &Path {
        &self.descriptor_dir
    }

    /// Loads every `*.json` file in the descriptor directory.
    ///
    /// The load is all-or-nothing: on error no table from this pass is added.
    /// Files are read in name order so that failures are reproducible.
    pub fn load_all(&mut self) -> CatalogResult<()> {
        let dir = self.descriptor_dir.display().to_string();
        self.log.event(Event::CatalogLoadBegin, &[("dir", dir.as_str())]);

        match self.read_all(&dir) {
            Ok(loaded) => {
                for (table, desc) in loaded {
                    self.log.event(Event::DescriptorLoaded, &[("table", table.as_str())]);
                    self.tables.insert(table, desc);
                }
                self.log.event(
                    Event::CatalogLoadComplete,
                    &[("descriptors", self.tables.len().to_string().as_str())],
                );
                Ok(())
            }
            Err(e) => {
                let severity = if e.is_fatal() {
                    Severity::Fatal
                } else {
                    Event::CatalogLoadFailed.severity()
                };
                self.log.log(
                    severity,
                    Event::CatalogLoadFailed.as_str(),
                    &[("code", e.code()), ("error", e.to_string().as_str())],
                );
                Err(e)
            }
        }
    }

    /// Reads and validates the directory without touching `self.tables`.
    fn read_all(&self, dir: &str) -> CatalogResult<BTreeMap<String, TupleDesc<Type>>> {
        let mut loaded = BTreeMap::new();

        if !self.descriptor_dir.exists() {
            fs::create_dir_all(&self.descriptor_dir).map_err(|e| {
                CatalogError::io(dir, format!("failed to create descriptor directory: {}", e))
            })?;
            return Ok(loaded);
        }

        let entries = fs::read_dir(&self.descriptor_dir).map_err(|e| {
            CatalogError::io(dir, format!("failed to read descriptor directory: {}", e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| CatalogError::io(dir, format!("failed to read directory entry: {}", e)))?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let entry = match self.read_file(&path) {
                Ok(entry) => entry,
                Err(e @ CatalogError::Malformed { .. }) if self.config.skip_malformed => {
                    self.log.event(
                        Event::MalformedDescriptorSkipped,
                        &[
                            ("path", path.display().to_string().as_str()),
                            ("reason", e.to_string().as_str()),
                        ],
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            if self.tables.contains_key(&entry.table) || loaded.contains_key(&entry.table) {
                return Err(CatalogError::DuplicateTable(entry.table));
            }
            loaded.insert(entry.table, entry.fields);
        }

        Ok(loaded)
    }

    fn read_file(&self, path: &Path) -> CatalogResult<CatalogEntry> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::io(&display, format!("failed to read file: {}", e)))?;

        let entry: CatalogEntry = serde_json::from_str(&content)
            .map_err(|e| CatalogError::malformed(&display, format!("invalid JSON: {}", e)))?;

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem != entry.table {
            return Err(CatalogError::malformed(
                &display,
                format!("file holds table '{}'", entry.table),
            ));
        }
        validate_table_name(&entry.table)
            .map_err(|_| CatalogError::malformed(&display, "invalid table name"))?;

        Ok(entry)
    }

    /// Registers a descriptor for `table`. A table's descriptor can be set once.
    pub fn register(&mut self, table: impl Into<String>, desc: TupleDesc<Type>) -> CatalogResult<()> {
        let table = table.into();
        validate_table_name(&table)?;

        if self.tables.contains_key(&table) {
            return Err(CatalogError::DuplicateTable(table));
        }

        self.log.event(
            Event::DescriptorRegistered,
            &[("table", table.as_str()), ("fields", desc.field_count().to_string().as_str())],
        );
        self.tables.insert(table, desc);
        Ok(())
    }

    pub fn get(&self, table: &str) -> Option<&TupleDesc<Type>> {
        self.tables.get(table)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Registered table names, sorted
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Tables whose descriptor has the same type shape as `desc`, sorted.
    /// Field names play no part in the match.
    pub fn tables_with_shape(&self, desc: &TupleDesc<Type>) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tables
            .iter()
            .filter(|(_, d)| *d == desc)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Writes a registered table's descriptor to disk. Existing files are
    /// never overwritten.
    pub fn save(&self, table: &str) -> CatalogResult<PathBuf> {
        let desc = self
            .tables
            .get(table)
            .ok_or_else(|| CatalogError::UnknownTable(table.to_string()))?;

        let path = self.descriptor_dir.join(format!("{}.json", table));
        let display = path.display().to_string();
        if path.exists() {
            return Err(CatalogError::DuplicateTable(table.to_string()));
        }

        fs::create_dir_all(&self.descriptor_dir).map_err(|e| {
            CatalogError::io(
                self.descriptor_dir.display().to_string(),
                format!("failed to create descriptor directory: {}", e),
            )
        })?;

        let entry = CatalogEntry {
            table: table.to_string(),
            fields: desc.clone(),
        };
        let content = if self.config.pretty {
            serde_json::to_string_pretty(&entry)
        } else {
            serde_json::to_string(&entry)
        }
        .map_err(|e| CatalogError::io(&display, format!("failed to serialize descriptor: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| CatalogError::io(&display, format!("failed to write file: {}", e)))?;

        self.log.event(
            Event::DescriptorSaved,
            &[("path", display.as_str()), ("table", table)],
        );
        Ok(path)
    }
}

fn validate_table_name(table: &str) -> CatalogResult<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidTableName(table.to_string()))
    }
}
