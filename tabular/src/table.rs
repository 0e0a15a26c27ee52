use std::fmt;

/// A single cell of the dataset. Whatever the input format, cells are
/// reduced to these three shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Null,
}

const NULL: Value = Value::Null;

impl Value {
    /// Parse a raw CSV field. Empty fields become `Null`, fields that parse
    /// to a finite number become `Number`, everything else stays text.
    pub fn from_csv_field(raw: &str) -> Self {
        if raw.is_empty() {
            return Value::Null;
        }
        match raw.trim().parse::<f64>() {
            Ok(num) if num.is_finite() => Value::Number(num),
            _ => Value::Text(raw.to_owned()),
        }
    }

    /// Numeric view of the value, also accepting text that parses to a
    /// finite number (CSV data arrives as text).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(num) if num.is_finite() => Some(*num),
            Value::Number(_) => None,
            Value::Text(text) => text.trim().parse::<f64>().ok().filter(|num| num.is_finite()),
            Value::Null => None,
        }
    }

    /// Null and empty-text cells are ignored by field classification.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(text) => text.is_empty(),
            Value::Number(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers print without a trailing ".0" so that labels
            // like "3" read naturally in legends and dropdowns.
            Value::Number(num) if num.fract() == 0.0 && num.abs() < 1e15 => {
                write!(f, "{}", *num as i64)
            }
            Value::Number(num) => write!(f, "{num}"),
            Value::Text(text) => write!(f, "{text}"),
            Value::Null => Ok(()),
        }
    }
}

/// One row of the dataset: a field-name to value mapping in insertion
/// order. Rows are small, so lookup is a linear scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            entry.1 = value;
        } else {
            self.entries.push((field, value));
        }
    }

    /// Missing fields read as `Null` (mapping a field name that is absent
    /// from a row is not an error).
    pub fn get(&self, field: &str) -> &Value {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
            .unwrap_or(&NULL)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (S, Value)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

/// Classification of a field, inferred from the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// An ordered sequence of [`Record`]s together with the union of field
/// names observed across all rows, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct DataTable {
    field_names: Vec<String>,
    records: Vec<Record>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        for field in record.fields() {
            if !self.field_names.iter().any(|name| name == field) {
                self.field_names.push(field.to_owned());
            }
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Classify a field: numeric iff at least one non-empty value was
    /// observed and every non-empty value parses to a finite number.
    /// Mixed or entirely empty fields degrade to categorical silently.
    pub fn field_kind(&self, field: &str) -> FieldKind {
        let mut saw_value = false;
        for record in &self.records {
            let value = record.get(field);
            if value.is_empty() {
                continue;
            }
            saw_value = true;
            if value.as_number().is_none() {
                return FieldKind::Categorical;
            }
        }
        if saw_value {
            FieldKind::Numeric
        } else {
            FieldKind::Categorical
        }
    }

    pub fn numeric_fields(&self) -> Vec<String> {
        self.field_names
            .iter()
            .filter(|name| self.field_kind(name) == FieldKind::Numeric)
            .cloned()
            .collect()
    }

    pub fn categorical_fields(&self) -> Vec<String> {
        self.field_names
            .iter()
            .filter(|name| self.field_kind(name) == FieldKind::Categorical)
            .cloned()
            .collect()
    }

    /// Distinct non-null values of a field, each exactly once. Sorted
    /// ascending when all values are numeric, otherwise in first-seen
    /// order.
    pub fn distinct_values(&self, field: &str) -> Vec<Value> {
        let mut seen: Vec<Value> = Vec::new();
        for record in &self.records {
            let value = record.get(field);
            if matches!(value, Value::Null) {
                continue;
            }
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
        let all_numeric = seen.iter().all(|v| matches!(v, Value::Number(_)));
        if all_numeric {
            seen.sort_by(|a, b| {
                let (Value::Number(a), Value::Number(b)) = (a, b) else {
                    unreachable!()
                };
                a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn table(rows: &[&[(&str, Value)]]) -> DataTable {
        let mut tbl = DataTable::new();
        for row in rows {
            tbl.push(row.iter().map(|(k, v)| (*k, v.clone())).collect());
        }
        tbl
    }

    #[test]
    fn test_all_numeric_field_is_numeric() {
        init();
        let tbl = table(&[
            &[("a", Value::Number(1.0))],
            &[("a", Value::Text("2.5".into()))],
            &[("a", Value::Null)],
        ]);
        assert_eq!(tbl.field_kind("a"), FieldKind::Numeric);
    }

    #[test]
    fn test_mixed_field_is_categorical() {
        init();
        let tbl = table(&[
            &[("a", Value::Number(1.0))],
            &[("a", Value::Text("cat".into()))],
        ]);
        assert_eq!(tbl.field_kind("a"), FieldKind::Categorical);
    }

    #[test]
    fn test_empty_field_is_categorical() {
        init();
        let tbl = table(&[
            &[("a", Value::Null)],
            &[("a", Value::Text(String::new()))],
        ]);
        assert_eq!(tbl.field_kind("a"), FieldKind::Categorical);
        // A field never observed at all behaves the same.
        assert_eq!(tbl.field_kind("missing"), FieldKind::Categorical);
    }

    #[test]
    fn test_distinct_values_numeric_sorted() {
        init();
        let tbl = table(&[
            &[("label", Value::Number(7.0))],
            &[("label", Value::Number(1.0))],
            &[("label", Value::Number(7.0))],
            &[("label", Value::Number(3.0))],
        ]);
        assert_eq!(
            tbl.distinct_values("label"),
            vec![Value::Number(1.0), Value::Number(3.0), Value::Number(7.0)]
        );
    }

    #[test]
    fn test_distinct_values_text_first_seen_order() {
        init();
        let tbl = table(&[
            &[("label", Value::Text("b".into()))],
            &[("label", Value::Text("a".into()))],
            &[("label", Value::Text("b".into()))],
        ]);
        assert_eq!(
            tbl.distinct_values("label"),
            vec![Value::Text("b".into()), Value::Text("a".into())]
        );
    }

    #[test]
    fn test_field_union_keeps_first_seen_order() {
        init();
        let tbl = table(&[
            &[("x", Value::Number(0.0)), ("y", Value::Number(1.0))],
            &[("x", Value::Number(2.0)), ("z", Value::Text("q".into()))],
        ]);
        assert_eq!(tbl.field_names(), &["x", "y", "z"]);
    }

    #[test]
    fn test_value_display() {
        init();
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(3.25).to_string(), "3.25");
        assert_eq!(Value::Text("seven".into()).to_string(), "seven");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_missing_field_reads_null() {
        init();
        let record: Record = [("a", Value::Number(1.0))].into_iter().collect();
        assert_eq!(record.get("nope"), &Value::Null);
    }
}
