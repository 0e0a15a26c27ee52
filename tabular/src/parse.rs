use std::path::Path;

use app_core::string_error::ErrorStringExt;

use crate::table::{DataTable, Record, Value};

/// Parse CSV text: the first row is the header, every following row becomes
/// one record. Fails on malformed CSV and on input with zero data rows.
pub fn from_csv_str(text: &str) -> Result<DataTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .err_to_string("unable to read CSV header")?
        .clone();

    let mut table = DataTable::new();
    for row in reader.records() {
        let row = row.err_to_string("unable to parse CSV row")?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(field, raw)| (field, Value::from_csv_field(raw)))
            .collect();
        table.push(record);
    }
    if table.is_empty() {
        return Err("no data rows parsed".into());
    }
    Ok(table)
}

/// Parse JSON text: either a top-level array of records, or an object with
/// a `data` array property. Any other shape yields an error.
pub fn from_json_str(text: &str) -> Result<DataTable, String> {
    let json: serde_json::Value =
        serde_json::from_str(text).err_to_string("unable to parse JSON")?;
    let rows = match &json {
        serde_json::Value::Array(rows) => rows.as_slice(),
        serde_json::Value::Object(obj) => match obj.get("data") {
            Some(serde_json::Value::Array(rows)) => rows.as_slice(),
            _ => return Err("no data rows parsed (expected an array of records)".into()),
        },
        _ => return Err("no data rows parsed (expected an array of records)".into()),
    };

    let mut table = DataTable::new();
    for row in rows {
        let serde_json::Value::Object(obj) = row else {
            log::warn!("skipping non-object row in JSON input: {row}");
            continue;
        };
        let record: Record = obj
            .iter()
            .map(|(field, value)| (field.as_str(), convert_json_value(value)))
            .collect();
        table.push(record);
    }
    if table.is_empty() {
        return Err("no data rows parsed".into());
    }
    Ok(table)
}

fn convert_json_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Number(num) => match num.as_f64() {
            Some(num) if num.is_finite() => Value::Number(num),
            _ => Value::Text(num.to_string()),
        },
        serde_json::Value::String(text) if text.is_empty() => Value::Null,
        serde_json::Value::String(text) => Value::Text(text.clone()),
        serde_json::Value::Bool(b) => Value::Text(b.to_string()),
        // Nested structures are kept as their JSON text, which then simply
        // classifies as categorical.
        other => Value::Text(other.to_string()),
    }
}

/// Load a table from a file, dispatching on the extension: `.csv` parses as
/// CSV, everything else as JSON.
pub fn from_path(path: &Path) -> Result<DataTable, String> {
    let text = std::fs::read_to_string(path)
        .err_to_string(&format!("unable to read file {path:?}"))?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        from_csv_str(&text)
    } else {
        from_json_str(&text)
    }
}
