mod logic;
mod ui;

use std::path::PathBuf;

use app_core::frontend::UIParameter;
use tabular::DataTable;

/// Owns the currently loaded table, the user's field selection and the
/// status line shown in the side panel.
pub struct DatasetHandler {
    table: UIParameter<Result<DataTable, String>>,
    mapping: FieldMapping,
    options: FieldOptions,
    status: String,
    source: DataSource,
}

/// The user's current choice of which fields drive X, Y, color and the
/// tooltip image. Valid for rendering only once x, y and color are all set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMapping {
    pub x: Option<String>,
    pub y: Option<String>,
    pub color: Option<String>,
    pub image: Option<String>,
}

impl FieldMapping {
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.color.is_some()
    }
}

/// Dropdown contents, rebuilt from the field classification whenever a new
/// table arrives.
#[derive(Clone, Debug, Default)]
struct FieldOptions {
    /// Offered for X/Y: the numeric fields, or all fields if none are
    /// numeric.
    position: Vec<String>,
    /// Offered for color: every field.
    color: Vec<String>,
    /// Offered for the tooltip image: categorical fields only.
    image: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum DataSource {
    #[default]
    None,
    Bundled,
    File(PathBuf),
}

/// What the user asked for in the side panel this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetAction {
    None,
    OpenFile,
    Render,
    Reset,
}

/// Outcome of polling the backend parse channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetUpdate {
    /// No reply arrived this frame.
    None,
    /// A new table arrived; scenes built from the old one are stale.
    Loaded,
    /// Parsing failed; a previously rendered scene may stay on screen.
    Failed,
}

impl Default for DatasetHandler {
    fn default() -> Self {
        Self {
            table: UIParameter::new(Err("no dataset loaded".to_string())),
            mapping: FieldMapping::default(),
            options: FieldOptions::default(),
            status: "load a data file or use the bundled example".to_string(),
            source: DataSource::None,
        }
    }
}

impl DatasetHandler {
    pub fn table(&self) -> Result<&DataTable, &String> {
        self.table.value().as_ref()
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn row_count(&self) -> usize {
        self.table().map(|table| table.len()).unwrap_or(0)
    }

    pub fn render_enabled(&self) -> bool {
        self.table().is_ok() && self.mapping.is_complete()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_owned();
    }
}
