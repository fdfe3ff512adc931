//! In-memory tabular dataset
//!
//! A [`Dataset`] is an ordered list of named [`Column`]s whose values are
//! aligned by row position. The engine never reorders or resizes a dataset;
//! the only transform applied to one is numeric coercion (see
//! [`crate::coerce`]), which produces a new dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Numeric content of the cell. `NaN` is treated as missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(n) => n.is_nan(),
            Value::Text(_) => false,
        }
    }

    /// Key used when this value groups rows (e.g. Pareto grouping)
    pub fn group_key(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) => Some(n.to_string()),
            Value::Text(s) => Some(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Value::Missing, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Missing => write!(f, ""),
        }
    }
}

/// Logical type of a column, derived from its current content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, ordered sequence of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a fully populated numeric column
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, values.into_iter().map(Value::Number).collect())
    }

    /// Build a text column (values are not parsed)
    pub fn text<S: AsRef<str>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            values
                .into_iter()
                .map(|s| Value::Text(s.as_ref().to_string()))
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn non_missing_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_missing()).count()
    }

    /// Numeric if there is at least one non-missing value and every
    /// non-missing value is a number.
    pub fn kind(&self) -> ColumnKind {
        let mut seen_number = false;
        for value in &self.values {
            match value {
                Value::Text(_) => return ColumnKind::Categorical,
                Value::Number(n) if !n.is_nan() => seen_number = true,
                _ => {}
            }
        }
        if seen_number {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// Non-missing numeric values in row order
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_number).collect()
    }
}

/// Columns partitioned by logical type, original order preserved
#[derive(Debug)]
pub struct Classification<'a> {
    pub numeric: Vec<&'a Column>,
    pub categorical: Vec<&'a Column>,
}

/// An in-memory table of equal-length columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset, rejecting columns of unequal length
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(Error::InvalidData(format!(
                    "Column '{}' has {} rows, expected {}",
                    bad.name(),
                    bad.len(),
                    expected
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Partition columns into numeric and categorical lists
    pub fn classify(&self) -> Classification<'_> {
        let (numeric, categorical): (Vec<&Column>, Vec<&Column>) = self
            .columns
            .iter()
            .partition(|c| c.kind() == ColumnKind::Numeric);
        Classification {
            numeric,
            categorical,
        }
    }

    pub(crate) fn map_columns<F>(&self, f: F) -> Self
    where
        F: FnMut(&Column) -> Column,
    {
        Self {
            columns: self.columns.iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_ragged_columns() {
        let result = Dataset::new(vec![
            Column::numeric("a", [1.0, 2.0, 3.0]),
            Column::numeric("b", [1.0, 2.0]),
        ]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_row_count_of_empty_dataset() {
        let dataset = Dataset::new(vec![]).unwrap();
        assert_eq!(dataset.row_count(), 0);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_column_kind() {
        assert_eq!(
            Column::numeric("n", [1.0, 2.0]).kind(),
            ColumnKind::Numeric
        );
        assert_eq!(
            Column::text("t", ["a", "b"]).kind(),
            ColumnKind::Categorical
        );
        // All-missing columns carry no numeric evidence
        assert_eq!(
            Column::new("m", vec![Value::Missing, Value::Missing]).kind(),
            ColumnKind::Categorical
        );
        // Mixed numbers and text are not numeric until coerced
        assert_eq!(
            Column::new("x", vec![Value::Number(1.0), "2".into()]).kind(),
            ColumnKind::Categorical
        );
        assert_eq!(
            Column::new("y", vec![Value::Number(1.0), Value::Missing]).kind(),
            ColumnKind::Numeric
        );
    }

    #[test]
    fn test_classify_preserves_order() {
        let dataset = Dataset::new(vec![
            Column::text("region", ["n", "s"]),
            Column::numeric("revenue", [1.0, 2.0]),
            Column::text("product", ["x", "y"]),
            Column::numeric("units", [3.0, 4.0]),
        ])
        .unwrap();

        let classes = dataset.classify();
        let numeric: Vec<_> = classes.numeric.iter().map(|c| c.name()).collect();
        let categorical: Vec<_> = classes.categorical.iter().map(|c| c.name()).collect();
        assert_eq!(numeric, vec!["revenue", "units"]);
        assert_eq!(categorical, vec!["region", "product"]);
    }

    #[test]
    fn test_numbers_drop_missing_and_nan() {
        let column = Column::new(
            "v",
            vec![1.0.into(), Value::Missing, f64::NAN.into(), 4.0.into()],
        );
        assert_eq!(column.numbers(), vec![1.0, 4.0]);
        assert_eq!(column.non_missing_count(), 2);
    }
}
