use std::path::Path;

use app_core::{
    backend::{BackendEventLoop, BackendLink},
    BACKEND_HUNG_UP_MSG,
};

use crate::{app::DynRequestSender, BackendAppState};

use super::{DataSource, DatasetHandler, DatasetUpdate, FieldMapping, FieldOptions};

/// The MNIST t-SNE projection shipped with the application.
const BUNDLED_DATASET: &str = include_str!("../../../../assets/mnist_tsne.json");

/// Field names that are auto-selected when present in an uploaded dataset.
const DEFAULT_X_FIELD: &str = "x";
const DEFAULT_Y_FIELD: &str = "y";
const DEFAULT_COLOR_FIELD: &str = "label";
const IMAGE_FIELD_CANDIDATES: [&str; 4] = ["image", "img", "url", "picture"];

impl DatasetHandler {
    /// Dispatch parsing of a local file to the backend thread. The result
    /// arrives through `try_update`.
    pub fn load_path(&mut self, path: &Path, request_tx: &mut DynRequestSender) {
        self.source = DataSource::File(path.to_owned());
        self.status = format!(
            "loading {} …",
            path.file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("file")
        );
        let path = path.to_owned();
        let (rx, linker) = BackendLink::new(
            &format!("load dataset from file {:?}", path),
            move |b: &mut BackendEventLoop<BackendAppState>| {
                b.state.parse_file(&path).map_err(|err| {
                    log::error!("{}", err);
                    err
                })
            },
        );
        request_tx
            .send(Box::new(linker))
            .expect(BACKEND_HUNG_UP_MSG);
        self.table.set_recv(rx);
    }

    pub fn load_bundled(&mut self, request_tx: &mut DynRequestSender) {
        self.source = DataSource::Bundled;
        self.status = "loading bundled example …".to_string();
        let (rx, linker) = BackendLink::new(
            "load bundled dataset",
            move |b: &mut BackendEventLoop<BackendAppState>| {
                b.state.parse_bundled(BUNDLED_DATASET).map_err(|err| {
                    log::error!("{}", err);
                    err
                })
            },
        );
        request_tx
            .send(Box::new(linker))
            .expect(BACKEND_HUNG_UP_MSG);
        self.table.set_recv(rx);
    }

    /// Parse the current source again, e.g. after the file changed on disk.
    pub fn reload(&mut self, request_tx: &mut DynRequestSender) {
        match self.source.clone() {
            DataSource::None => self.status = "nothing to reload yet".to_string(),
            DataSource::Bundled => self.load_bundled(request_tx),
            DataSource::File(path) => self.load_path(&path, request_tx),
        }
    }

    /// Poll the backend channel; when a parse result arrives, rebuild the
    /// dropdown options and auto-select default fields. The caller decides
    /// what a `Failed` result means for already rendered output.
    pub fn try_update(&mut self) -> DatasetUpdate {
        if !self.table.try_update() {
            return DatasetUpdate::None;
        }
        self.ingest();
        if self.table.value().is_ok() {
            DatasetUpdate::Loaded
        } else {
            DatasetUpdate::Failed
        }
    }

    fn ingest(&mut self) {
        match self.table.value() {
            Ok(table) => {
                let numeric = table.numeric_fields();
                let all: Vec<String> = table.field_names().to_vec();
                let categorical = table.categorical_fields();

                let options = FieldOptions {
                    position: if numeric.is_empty() {
                        all.clone()
                    } else {
                        numeric
                    },
                    color: all,
                    image: categorical,
                };
                let mapping = auto_select(&options);
                let row_count = table.len();

                self.options = options;
                self.mapping = mapping;
                self.status = format!("{row_count} rows loaded, pick fields and hit Render");
            }
            Err(msg) => {
                let msg = format!("failed to load data: {msg}");
                self.options = FieldOptions::default();
                self.mapping = FieldMapping::default();
                self.status = msg;
            }
        }
    }

    /// Drop the table and all selections, blank the status back to its
    /// initial prompt.
    pub fn reset(&mut self) {
        *self = Self::default();
        self.status = "session cleared, load a data file".to_string();
    }

    #[cfg(test)]
    pub(crate) fn set_table_for_test(&mut self, table: Result<tabular::DataTable, String>) {
        self.table = app_core::frontend::UIParameter::new(table);
        self.ingest();
    }
}

/// Pick conventional default field names if present, otherwise fall back to
/// the first offered option (mirroring a dropdown that jumps to its first
/// real entry).
fn auto_select(options: &FieldOptions) -> FieldMapping {
    let pick = |candidates: &[&str], offered: &[String]| -> Option<String> {
        candidates
            .iter()
            .find(|name| offered.iter().any(|o| o == *name))
            .map(|name| name.to_string())
            .or_else(|| offered.first().cloned())
    };
    FieldMapping {
        x: pick(&[DEFAULT_X_FIELD], &options.position),
        y: pick(&[DEFAULT_Y_FIELD], &options.position),
        color: pick(&[DEFAULT_COLOR_FIELD], &options.color),
        // The image field stays empty unless a conventional name exists.
        image: IMAGE_FIELD_CANDIDATES
            .iter()
            .find(|name| options.image.iter().any(|o| o == *name))
            .map(|name| name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use app_core::backend::BackendRequest;

    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn two_row_table() -> tabular::DataTable {
        tabular::from_csv_str("a,b,c\n1,2,foo\n3,4,bar\n").unwrap()
    }

    /// Push a parse result through the real backend channel, as if the
    /// backend thread had replied.
    fn deliver(
        handler: &mut DatasetHandler,
        result: Result<tabular::DataTable, String>,
    ) -> DatasetUpdate {
        let (_request_tx, request_rx) =
            std::sync::mpsc::channel::<Box<dyn BackendRequest<BackendAppState>>>();
        let mut backend = BackendEventLoop::new(request_rx, BackendAppState::new());
        let (rx, linker) = BackendLink::new(
            "deliver parse result",
            move |_: &mut BackendEventLoop<BackendAppState>| result.clone(),
        );
        handler.table.set_recv(rx);
        linker.run_on_backend(&mut backend);
        handler.try_update()
    }

    #[test]
    fn test_failed_parse_reports_failed_and_disables_render() {
        init();
        let mut handler = DatasetHandler::default();
        let update = deliver(&mut handler, Ok(two_row_table()));
        assert_eq!(update, DatasetUpdate::Loaded);
        assert!(handler.render_enabled());

        // A later failure disables rendering and zeroes the counter, but is
        // reported as Failed so the caller keeps the rendered scene.
        let update = deliver(&mut handler, Err("unable to parse JSON".to_string()));
        assert_eq!(update, DatasetUpdate::Failed);
        assert_eq!(handler.row_count(), 0);
        assert!(!handler.render_enabled());
        assert!(handler.status().contains("failed to load data"));
    }

    #[test]
    fn test_ingest_classifies_and_counts() {
        init();
        let mut handler = DatasetHandler::default();
        handler.set_table_for_test(Ok(two_row_table()));

        assert_eq!(handler.row_count(), 2);
        assert_eq!(handler.options.position, vec!["a", "b"]);
        assert_eq!(handler.options.color, vec!["a", "b", "c"]);
        assert_eq!(handler.options.image, vec!["c"]);
    }

    #[test]
    fn test_ingest_auto_selects_first_options() {
        init();
        let mut handler = DatasetHandler::default();
        handler.set_table_for_test(Ok(two_row_table()));

        // No conventional names present, so X/Y fall back to the first
        // numeric field and color to the first field overall.
        assert_eq!(handler.mapping.x.as_deref(), Some("a"));
        assert_eq!(handler.mapping.y.as_deref(), Some("a"));
        assert_eq!(handler.mapping.color.as_deref(), Some("a"));
        assert_eq!(handler.mapping.image, None);
        assert!(handler.render_enabled());
    }

    #[test]
    fn test_ingest_prefers_conventional_names() {
        init();
        let table = tabular::from_csv_str("y,label,x,image\n1,cat,2,a.png\n").unwrap();
        let mut handler = DatasetHandler::default();
        handler.set_table_for_test(Ok(table));

        assert_eq!(handler.mapping.x.as_deref(), Some("x"));
        assert_eq!(handler.mapping.y.as_deref(), Some("y"));
        assert_eq!(handler.mapping.color.as_deref(), Some("label"));
        assert_eq!(handler.mapping.image.as_deref(), Some("image"));
    }

    #[test]
    fn test_ingest_failure_disables_render() {
        init();
        let mut handler = DatasetHandler::default();
        handler.set_table_for_test(Err("no data rows parsed".to_string()));

        assert_eq!(handler.row_count(), 0);
        assert!(!handler.render_enabled());
        assert!(!handler.status().is_empty());
        assert_eq!(handler.mapping, FieldMapping::default());
    }

    #[test]
    fn test_reset_restores_placeholder_state() {
        init();
        let mut handler = DatasetHandler::default();
        handler.set_table_for_test(Ok(two_row_table()));
        assert!(handler.render_enabled());

        handler.reset();
        assert_eq!(handler.row_count(), 0);
        assert_eq!(handler.mapping, FieldMapping::default());
        assert!(handler.options.position.is_empty());
        assert!(!handler.render_enabled());
    }

    #[test]
    fn test_all_text_table_offers_all_fields_for_position() {
        init();
        let table = tabular::from_csv_str("p,q\nfoo,bar\n").unwrap();
        let mut handler = DatasetHandler::default();
        handler.set_table_for_test(Ok(table));
        assert_eq!(handler.options.position, vec!["p", "q"]);
    }
}
