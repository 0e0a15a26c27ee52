#![warn(clippy::all, rust_2018_idioms)]

//! Row-oriented tabular data with no enforced schema, plus CSV/JSON
//! ingestion and field-type inference.

mod parse;
mod table;

pub use parse::{from_csv_str, from_json_str, from_path};
pub use table::{DataTable, FieldKind, Record, Value};
