//! CSV export of result tables.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::values::any_to_string;

/// Writes `df` to `path` with a header row of its column names.
///
/// Nulls are written as empty fields and integers without formatting, so a
/// result table exports unmatched rows as blank match and score cells.
pub fn write_results_csv(path: &Path, df: &DataFrame) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let csv_error = |source: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));
    writer
        .write_record(df.get_column_names().iter().map(|name| name.as_str()))
        .map_err(csv_error)?;

    let columns = df.get_columns();
    let mut record: Vec<String> = Vec::with_capacity(columns.len());
    for row in 0..df.height() {
        record.clear();
        for column in columns {
            record.push(any_to_string(column.get(row)?));
        }
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}
