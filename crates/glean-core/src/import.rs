//! Dataset loading from CSV and JSON exports
//!
//! Loaders do not guess types. CSV cells arrive as text, the way many
//! database drivers return decimals, and are typed later by
//! [`crate::coerce`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::dataset::{Column, Dataset, Value};
use crate::error::{Error, Result};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Pick a format from the file extension (anything but `.json` is CSV)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Load a dataset from disk, choosing the parser by extension
pub fn import_file(path: &Path) -> Result<Dataset> {
    let format = InputFormat::from_path(path);
    let reader = BufReader::new(File::open(path)?);
    let dataset = match format {
        InputFormat::Csv => parse_csv(reader)?,
        InputFormat::Json => parse_json(reader)?,
    };
    debug!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Parse CSV with a header row. Empty cells become missing values.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for result in rdr.records() {
        let record = result?;
        for (i, cell) in record.iter().enumerate() {
            let cell = cell.trim();
            columns[i].push(if cell.is_empty() {
                Value::Missing
            } else {
                Value::Text(cell.to_string())
            });
        }
    }

    Dataset::new(
        headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.trim(), values))
            .collect(),
    )
}

/// Parse a JSON array of row objects.
///
/// Column order follows the first appearance of each key; keys absent from
/// a row are missing in that row.
pub fn parse_json<R: Read>(reader: R) -> Result<Dataset> {
    let rows: Vec<serde_json::Map<String, JsonValue>> = serde_json::from_reader(reader)?;

    let mut names: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let values = rows
            .iter()
            .map(|row| json_to_value(&name, row.get(&name)))
            .collect::<Result<Vec<_>>>()?;
        columns.push(Column::new(name, values));
    }

    Dataset::new(columns)
}

fn json_to_value(column: &str, value: Option<&JsonValue>) -> Result<Value> {
    match value {
        None | Some(JsonValue::Null) => Ok(Value::Missing),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| Error::InvalidData(format!("Number out of range in '{}'", column))),
        Some(JsonValue::String(s)) => Ok(Value::Text(s.clone())),
        Some(JsonValue::Bool(b)) => Ok(Value::Text(b.to_string())),
        Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) => Err(Error::InvalidData(
            format!("Nested value in column '{}'", column),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ColumnKind;
    use crate::test_utils::temp_file;

    #[test]
    fn test_parse_csv_keeps_text() {
        let data = "region,revenue\nWest,850.00\nEast,\n";
        let dataset = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(dataset.row_count(), 2);
        let revenue = dataset.column("revenue").unwrap();
        assert_eq!(
            revenue.values(),
            &[Value::Text("850.00".into()), Value::Missing]
        );
    }

    #[test]
    fn test_parse_csv_rejects_ragged_rows() {
        let data = "a,b\n1,2\n3\n";
        assert!(matches!(parse_csv(data.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn test_parse_csv_header_only() {
        let dataset = parse_csv("a,b\n".as_bytes()).unwrap();
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.row_count(), 0);
    }

    #[test]
    fn test_parse_json_rows() {
        let data = r#"[
            {"region": "West", "revenue": 850, "active": true},
            {"region": "East", "revenue": null},
            {"revenue": "40.5", "region": "North"}
        ]"#;
        let dataset = parse_json(data.as_bytes()).unwrap();

        let names: Vec<_> = dataset.columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["region", "revenue", "active"]);

        let revenue = dataset.column("revenue").unwrap();
        assert_eq!(revenue.values()[0], Value::Number(850.0));
        assert_eq!(revenue.values()[1], Value::Missing);
        assert_eq!(revenue.values()[2], Value::Text("40.5".into()));
        assert_eq!(revenue.kind(), ColumnKind::Categorical);

        let active = dataset.column("active").unwrap();
        assert_eq!(
            active.values(),
            &[Value::Text("true".into()), Value::Missing, Value::Missing]
        );
    }

    #[test]
    fn test_parse_json_rejects_nested() {
        let data = r#"[{"a": [1, 2]}]"#;
        assert!(matches!(
            parse_json(data.as_bytes()),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_import_file_by_extension() {
        let csv = temp_file(".csv", "x,y\n1,2\n3,4\n");
        assert_eq!(import_file(csv.path()).unwrap().row_count(), 2);

        let json = temp_file(".json", r#"[{"x": 1}, {"x": 2}, {"x": 3}]"#);
        assert_eq!(import_file(json.path()).unwrap().row_count(), 3);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("q.JSON")),
            InputFormat::Json
        );
        assert_eq!(InputFormat::from_path(Path::new("q.tsv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("q")), InputFormat::Csv);
    }
}
