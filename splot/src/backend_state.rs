use std::path::{Path, PathBuf};

use app_core::backend::BackendState;
use tabular::DataTable;

/// State owned by the backend worker thread. File parsing runs here so a
/// slow read never blocks the UI thread.
pub struct BackendAppState {
    last_loaded: Option<PathBuf>,
}

impl BackendAppState {
    pub fn new() -> Self {
        Self { last_loaded: None }
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<DataTable, String> {
        let table = tabular::from_path(path)?;
        log::info!("parsed {} rows from {:?}", table.len(), path);
        self.last_loaded = Some(path.to_owned());
        table_non_empty(table)
    }

    pub fn parse_bundled(&mut self, json: &str) -> Result<DataTable, String> {
        let table = tabular::from_json_str(json)?;
        log::info!("parsed {} rows from bundled dataset", table.len());
        self.last_loaded = None;
        table_non_empty(table)
    }

    pub fn last_loaded(&self) -> Option<&Path> {
        self.last_loaded.as_deref()
    }
}

impl Default for BackendAppState {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendState for BackendAppState {}

fn table_non_empty(table: DataTable) -> Result<DataTable, String> {
    if table.is_empty() {
        Err("no data rows parsed".into())
    } else {
        Ok(table)
    }
}
