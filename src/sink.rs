//! Output sinks for exhaustive generation.
//!
//! The generator treats persistence as a collaborator behind
//! [`StimulusSink`]: a sequence of typed rows goes in, a table with a fixed
//! column header comes out.  [`CsvSink`] is the bundled implementation;
//! [`MemorySink`] keeps rows in memory for tests.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::{ExhaustiveRow, SinkError};

/// Column header of the persisted table, written exactly once.
pub const TABLE_HEADER: [&str; 6] = [
    "left_p",
    "left_x0",
    "right_p",
    "right_x0",
    "lottery_type",
    "comment",
];

/// A row-at-a-time consumer of exhaustive-mode output.
///
/// The sink owns the monotonically increasing row index — the only mutable
/// state the generation run shares.  `close` flushes to durable storage and
/// is called exactly once, at the end of a successful run.
pub trait StimulusSink {
    fn append(&mut self, row: &ExhaustiveRow) -> Result<(), SinkError>;
    fn close(&mut self) -> Result<(), SinkError>;
}

/// CSV-backed sink: one header row, one data row per stimulus.
///
/// The parent directory is created if absent; the header is written at
/// construction, before any data row.
pub struct CsvSink {
    writer: csv::Writer<File>,
    rows: usize,
}

impl CsvSink {
    /// Default output location, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "data/stimuli.csv";

    /// Create the table at `path`, creating parent directories as needed,
    /// and write the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| SinkError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let mut writer = csv::Writer::from_path(path).map_err(|source| SinkError::Open {
            path: PathBuf::from(path),
            source,
        })?;
        writer.write_record(TABLE_HEADER).map_err(SinkError::Header)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Create the table at [`CsvSink::DEFAULT_PATH`].
    pub fn create_default() -> Result<Self, SinkError> {
        Self::create(Self::DEFAULT_PATH)
    }

    /// Number of data rows appended so far (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows
    }
}

impl StimulusSink for CsvSink {
    fn append(&mut self, row: &ExhaustiveRow) -> Result<(), SinkError> {
        self.writer
            .write_record([
                row.left_p.to_string(),
                row.left_x0.to_string(),
                row.right_p.to_string(),
                row.right_x0.to_string(),
                row.lottery_type.to_string(),
                row.comment.to_string(),
            ])
            .map_err(|source| SinkError::Append {
                row: self.rows,
                source,
            })?;
        self.rows += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory sink for tests: records every row and counts `close` calls.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<ExhaustiveRow>,
    pub closed: usize,
}

impl StimulusSink for MemorySink {
    fn append(&mut self, row: &ExhaustiveRow) -> Result<(), SinkError> {
        self.rows.push(*row);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.closed += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn sample_row() -> ExhaustiveRow {
        ExhaustiveRow {
            left_p: 0.25,
            left_x0: 1,
            right_p: 0.25,
            right_x0: 2,
            lottery_type: Category::ControlPositive.id(),
            comment: Category::ControlPositive.comment(),
        }
    }

    #[test]
    fn memory_sink_records_rows_and_close_calls() {
        let mut sink = MemorySink::default();
        sink.append(&sample_row()).unwrap();
        sink.append(&sample_row()).unwrap();
        sink.close().unwrap();
        assert_eq!(sink.rows.len(), 2);
        assert_eq!(sink.closed, 1);
    }

    #[test]
    fn csv_sink_writes_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("stimuli.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&sample_row()).unwrap();
        sink.close().unwrap();
        assert_eq!(sink.rows_written(), 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], TABLE_HEADER.join(","));
        assert!(lines[1].starts_with("0.25,1,0.25,2,2,"));
    }
}
