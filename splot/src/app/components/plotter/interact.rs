use std::collections::HashSet;

use tabular::{Record, Value};

/// Hover/click behavior on rendered marks, decoupled from the plot widget
/// so a different charting backend could be substituted.
pub trait Interaction {
    /// Tooltip content for a hovered record, if any.
    fn hover_content(&self, record: &Record) -> Option<String>;
    /// Indices of the records to highlight after a click.
    fn highlight_set(&self, clicked: &Record, records: &[Record]) -> HashSet<usize>;
}

/// The default behavior: the tooltip shows the image-field value, a click
/// highlights every record sharing the clicked record's color-field value.
pub struct CategoryHighlight {
    pub color_field: String,
    pub image_field: Option<String>,
}

impl Interaction for CategoryHighlight {
    fn hover_content(&self, record: &Record) -> Option<String> {
        let field = self.image_field.as_ref()?;
        let value = record.get(field);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn highlight_set(&self, clicked: &Record, records: &[Record]) -> HashSet<usize> {
        let key = category_key(clicked.get(&self.color_field));
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| category_key(record.get(&self.color_field)) == key)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Legend/marker key for a color-field value. Null values form their own
/// category instead of being dropped.
pub(crate) fn category_key(value: &Value) -> String {
    match value {
        Value::Null => "(empty)".to_string(),
        other => other.to_string(),
    }
}
