// src/table/mod.rs

//! Row/column helpers over already-decoded tabular data.
//!
//! Row 0 is always the header. Rows are not required to have equal length;
//! short rows only become an error where a helper needs the missing cell.

pub mod csv;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Deref;

use thiserror::Error;

/// One record keyed by header name.
pub type Record = BTreeMap<String, String>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("expected header and one row")]
    NotEnoughRows,

    #[error("could not find {column} in columns {header:?}")]
    ColumnNotFound { column: String, header: Vec<String> },

    #[error("row too short for column {column}: {row:?}")]
    RowTooShort { column: String, row: Vec<String> },

    #[error("missing key column {0}")]
    MissingKeyColumn(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowsOfFields(pub Vec<Vec<String>>);

impl RowsOfFields {
    /// Distinct non-empty values of `column` across all data rows, in no
    /// particular order. Rows too short to have the column are skipped.
    pub fn select_column_distinct_values(&self, column: &str) -> Result<Vec<String>, TableError> {
        let (header, data) = self.split_header()?;
        let index = header
            .iter()
            .position(|field| field == column)
            .ok_or_else(|| TableError::ColumnNotFound {
                column: column.to_string(),
                header: header.to_vec(),
            })?;

        let values: HashSet<&str> = data
            .iter()
            .filter_map(|row| row.get(index))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
            .collect();

        Ok(values.into_iter().map(str::to_string).collect())
    }

    /// Map every data row to a [`Record`], keyed by the concatenation of its
    /// `keys` columns.
    ///
    /// Key values are joined with no separator, so different splits of the
    /// same characters collide; a later row silently replaces an earlier one
    /// with the same composite key.
    pub fn rows_to_maps<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> Result<HashMap<String, Record>, TableError> {
        let (header, data) = self.split_header()?;
        let mut result = HashMap::new();

        for row in data {
            let mut record = Record::new();
            for (idx, column) in header.iter().enumerate() {
                let cell = row.get(idx).ok_or_else(|| TableError::RowTooShort {
                    column: column.clone(),
                    row: row.clone(),
                })?;
                record.insert(column.clone(), cell.clone());
            }

            let mut composite = String::new();
            for key in keys {
                let key = key.as_ref();
                let value = record
                    .get(key)
                    .ok_or_else(|| TableError::MissingKeyColumn(key.to_string()))?;
                composite.push_str(value);
            }
            result.insert(composite, record);
        }

        Ok(result)
    }

    fn split_header(&self) -> Result<(&[String], &[Vec<String>]), TableError> {
        match self.0.split_first() {
            Some((header, data)) if !data.is_empty() => Ok((header.as_slice(), data)),
            _ => Err(TableError::NotEnoughRows),
        }
    }
}

impl Deref for RowsOfFields {
    type Target = Vec<Vec<String>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Vec<String>>> for RowsOfFields {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }
}
