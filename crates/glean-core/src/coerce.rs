//! Numeric coercion
//!
//! Database drivers often hand back exact decimals as text. Before any
//! detector runs, every non-numeric column in which at least one value
//! parses as a number is rewritten as a numeric column; values that fail to
//! parse become [`Value::Missing`]. Columns where nothing parses are left
//! as they are and stay categorical.
//!
//! The transform returns a new [`Dataset`]; the input is never modified.

use tracing::debug;

use crate::dataset::{Column, ColumnKind, Dataset, Value};

/// Produce a derived dataset with text-encoded numeric columns converted
pub fn coerce_numeric(dataset: &Dataset) -> Dataset {
    dataset.map_columns(coerce_column)
}

fn coerce_column(column: &Column) -> Column {
    if column.kind() == ColumnKind::Numeric {
        return column.clone();
    }

    let parsed: Vec<Option<f64>> = column.values().iter().map(parse_number).collect();
    let parsed_count = parsed.iter().filter(|v| v.is_some()).count();
    if parsed_count == 0 {
        return column.clone();
    }

    debug!(
        column = column.name(),
        parsed = parsed_count,
        dropped = column.non_missing_count() - parsed_count,
        "Coerced column to numeric"
    );

    Column::new(
        column.name(),
        parsed.into_iter().map(Value::from).collect(),
    )
}

/// Parse a single cell as a finite number
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n).filter(|n| !n.is_nan()),
        Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Missing => None,
    }
}
