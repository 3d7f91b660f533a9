//! Factor matrix and forward-return targets.
//!
//! A [`FactorMatrix`] holds one nullable column per factor, all sharing the
//! index of the source series. Columns keep their insertion order, which is
//! the deterministic tie-break order used when ranking scored factors.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SableError};

/// A named, nullable factor column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorColumn {
    name: String,
    values: Vec<Option<f64>>,
}

impl FactorColumn {
    /// The factor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column values, indexed like the source series.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }
}

/// An insertion-ordered collection of factor columns of uniform length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactorMatrix {
    len: usize,
    columns: Vec<FactorColumn>,
}

impl FactorMatrix {
    /// Creates an empty matrix whose columns must have `len` rows.
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            columns: Vec::new(),
        }
    }

    /// Number of rows (the series length).
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the matrix has no rows.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of factor columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// [`SableError::ShapeMismatch`] if the column length differs from the
    /// matrix row count, [`SableError::DuplicateColumn`] if the name is
    /// already present. Callers in the factor bank treat both as a per-factor
    /// skip rather than a pipeline failure.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        if values.len() != self.len {
            return Err(SableError::ShapeMismatch {
                name,
                expected: self.len,
                actual: values.len(),
            });
        }
        if self.columns.iter().any(|c| c.name == name) {
            return Err(SableError::DuplicateColumn { name });
        }
        self.columns.push(FactorColumn { name, values });
        Ok(())
    }

    /// The columns in insertion order.
    pub fn columns(&self) -> &[FactorColumn] {
        &self.columns
    }

    /// Column names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }
}

/// Forward returns at a fixed horizon, aligned to the series index.
///
/// `values[t]` is `close[t+h]/close[t] - 1`; the last `h` entries are null
/// because the look-ahead is undefined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSeries {
    /// Number of future bars the return is measured over.
    pub horizon: usize,
    /// Forward returns, null where undefined.
    pub values: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut matrix = FactorMatrix::new(3);
        matrix
            .insert("momentum_1", vec![None, Some(0.1), Some(-0.2)])
            .unwrap();
        assert_eq!(matrix.width(), 1);
        assert_eq!(matrix.column("momentum_1").unwrap()[1], Some(0.1));
        assert!(matrix.column("missing").is_none());
    }

    #[test]
    fn test_insert_rejects_wrong_length() {
        let mut matrix = FactorMatrix::new(3);
        let err = matrix.insert("short", vec![None]).unwrap_err();
        assert!(matches!(
            err,
            SableError::ShapeMismatch {
                expected: 3,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_insert_rejects_duplicate_name() {
        let mut matrix = FactorMatrix::new(1);
        matrix.insert("rsi_14", vec![Some(50.0)]).unwrap();
        let err = matrix.insert("rsi_14", vec![Some(60.0)]).unwrap_err();
        assert!(matches!(err, SableError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_names_preserve_insertion_order() {
        let mut matrix = FactorMatrix::new(1);
        matrix.insert("b", vec![None]).unwrap();
        matrix.insert("a", vec![None]).unwrap();
        matrix.insert("c", vec![None]).unwrap();
        let names: Vec<_> = matrix.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
