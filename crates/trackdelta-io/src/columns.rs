//! Header lookup and cell decoding shared by the CSV readers.

use std::collections::HashMap;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::IoError;

/// A parsed CSV file: header lookup plus every data row.
pub(crate) struct Table {
    pub(crate) columns: ColumnIndex,
    pub(crate) records: Vec<StringRecord>,
}

/// Read a headed CSV file into memory.
///
/// Rows may be shorter than the header; missing trailing cells read as `""`.
pub(crate) fn read_table(path: &Path) -> Result<Table, IoError> {
    let file = std::fs::File::open(path).map_err(|e| IoError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let header = rdr.headers().map_err(|e| IoError::CsvParse {
        path: path.to_path_buf(),
        offset: e.position().map_or(0, |p| p.byte()),
        source: e,
    })?;
    let columns = ColumnIndex::from_header(header);
    debug!(n_columns = header.len(), "read CSV header");

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| IoError::CsvParse {
            path: path.to_path_buf(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(IoError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }
    debug!(n_rows = records.len(), "read CSV rows");
    Ok(Table { columns, records })
}

/// Maps column names (case-insensitive) to their position in the header.
pub(crate) struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub(crate) fn from_header(header: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (i, name) in header.iter().enumerate() {
            // first occurrence wins on duplicate headers
            positions.entry(name.trim().to_ascii_lowercase()).or_insert(i);
        }
        Self { positions }
    }

    /// Position of `column`, if present.
    pub(crate) fn find(&self, column: &str) -> Option<usize> {
        self.positions.get(&column.to_ascii_lowercase()).copied()
    }

    /// Position of `column`, or [`IoError::MissingColumn`].
    pub(crate) fn require(&self, path: &Path, column: &'static str) -> Result<usize, IoError> {
        self.find(column).ok_or_else(|| IoError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })
    }
}

/// True for cells the provider writes for absent values.
pub(crate) fn is_missing(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "nan" | "na" | "nat" | "none" | "null"
    )
}

/// Decode a numeric or boolean channel cell.
///
/// Missing markers decode to `None`; `True`/`False` decode to 1/0.
pub(crate) fn parse_channel(
    path: &Path,
    row_index: usize,
    column: &'static str,
    raw: &str,
) -> Result<Option<f64>, IoError> {
    if is_missing(raw) {
        return Ok(None);
    }
    let invalid = || IoError::InvalidValue {
        path: path.to_path_buf(),
        row_index,
        column,
        raw: raw.to_string(),
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => return Ok(Some(1.0)),
        "false" => return Ok(Some(0.0)),
        _ => {}
    }
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(Some(value))
}

/// Cell at `position` of `record`, or `""` when the row is short.
pub(crate) fn cell(record: &StringRecord, position: Option<usize>) -> &str {
    position.and_then(|p| record.get(p)).unwrap_or("")
}
