//! Report tables and source metadata.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::{ChannelError, Result};

use super::value::Value;

/// Metadata about a source report file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}

/// Tabular report data, stored column by column.
///
/// Native tables use the channel's column names; canonical tables use dotted
/// `granularity.property` names. Every column holds exactly `row_count` values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTable {
    columns: IndexMap<String, Vec<Value>>,
    row_count: usize,
}

impl ReportTable {
    /// Create an empty table with no rows and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and row-major data. Short rows are padded
    /// with nulls and long rows truncated.
    ///
    /// Cells are assigned by header position. A repeated header gets the
    /// first free `.1`, `.2`, ... suffix, so `cost,cost` reads as
    /// `cost,cost.1`.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        let headers = unique_headers(headers);
        let mut values: Vec<Vec<Value>> = vec![Vec::with_capacity(row_count); headers.len()];
        for row in rows {
            let mut cells = row.into_iter();
            for column in values.iter_mut() {
                column.push(cells.next().unwrap_or(Value::Null));
            }
        }
        let columns = headers.into_iter().zip(values).collect();
        Self { columns, row_count }
    }

    /// Build a table from named columns, checking that lengths agree.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.insert_column(name, values)?;
        }
        Ok(table)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has neither rows nor columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.row_count == 0
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        self.columns.get_mut(name)
    }

    /// Insert or replace a column. The first column of an empty table sets
    /// the row count.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        let replacing_only = self.columns.len() == 1 && self.columns.contains_key(&name);
        if self.columns.is_empty() || replacing_only {
            self.row_count = values.len();
        } else if values.len() != self.row_count {
            return Err(ChannelError::ShapeMismatch {
                column: name,
                expected: self.row_count,
                found: values.len(),
            });
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Remove a column, returning its values.
    pub fn remove_column(&mut self, name: &str) -> Option<Vec<Value>> {
        let removed = self.columns.shift_remove(name);
        if self.columns.is_empty() {
            self.row_count = 0;
        }
        removed
    }

    /// New table with the named columns that exist, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> ReportTable {
        let columns: IndexMap<String, Vec<Value>> = names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                self.columns
                    .get(name)
                    .map(|values| (name.to_string(), values.clone()))
            })
            .collect();
        let row_count = if columns.is_empty() { 0 } else { self.row_count };
        ReportTable { columns, row_count }
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.columns.get(column).and_then(|v| v.get(row))
    }

    /// Values of one row in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.values().map(|v| &v[index]).collect())
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> {
        (0..self.row_count).map(move |i| self.columns.values().map(|v| &v[i]).collect())
    }

    /// Rows as ordered JSON-ready records.
    pub fn records(&self) -> Vec<IndexMap<&str, &Value>> {
        (0..self.row_count)
            .map(|i| {
                self.columns
                    .iter()
                    .map(|(name, values)| (name.as_str(), &values[i]))
                    .collect()
            })
            .collect()
    }

    /// Write the table as delimited text with a header row.
    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        if self.columns.is_empty() {
            csv_writer.flush().map_err(|e| ChannelError::Io {
                path: PathBuf::from("<output>"),
                source: e,
            })?;
            return Ok(());
        }
        csv_writer.write_record(self.column_names())?;
        for row in self.rows() {
            csv_writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
        csv_writer.flush().map_err(|e| ChannelError::Io {
            path: PathBuf::from("<output>"),
            source: e,
        })?;
        Ok(())
    }

    /// SHA-256 digest over column names and rendered cells.
    ///
    /// Two tables with the same columns, rows and order share a digest.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for name in self.column_names() {
            hasher.update(name.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
        for row in self.rows() {
            for value in row {
                hasher.update(value.to_string().as_bytes());
                hasher.update([0x1f]);
            }
            hasher.update([0x1e]);
        }
        format!("sha256:{:x}", hasher.finalize())
    }
}

/// Rename repeated headers in place of their first occurrence.
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::with_capacity(headers.len());
    for header in headers {
        if seen.contains(&header) {
            let renamed = (1..)
                .map(|n| format!("{}.{}", header, n))
                .find(|candidate| !seen.contains(candidate))
                .unwrap_or_default();
            warn!(header = %header, renamed = %renamed, "duplicate column header renamed");
            seen.insert(renamed);
        } else {
            seen.insert(header);
        }
    }
    seen.into_iter().collect()
}
