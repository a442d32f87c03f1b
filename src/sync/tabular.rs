//! CSV reading and writing.
//!
//! Guest lists are plain comma-separated files with no header row. Reading
//! yields every row as an ordered list of string fields; field counts may
//! vary here because the row mapper owns the width contract. Writing appends
//! one complete row per call.
//!
//! Quoting is strict: a quote may only open a field, close it, or be doubled
//! inside a quoted field. Anything else is a format error rather than a field
//! that silently swallows the following rows.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::sync::file::ensure_parent_dir;
use crate::sync::types::{SyncError, SyncResult};

/// One row of a CSV file, fields in file order.
pub type TabularRow = Vec<String>;

/// Read every row of a CSV file.
///
/// Fields are returned exactly as written (no trimming).
///
/// # Errors
///
/// Returns [`SyncError::Io`] if the file cannot be read and
/// [`SyncError::Format`] if the quoting is malformed or the content is not
/// valid UTF-8.
pub fn read_rows(path: &Path) -> SyncResult<Vec<TabularRow>> {
    let content = fs::read(path).map_err(|e| SyncError::io(path, e))?;
    check_quoting(&content).map_err(|(line, message)| SyncError::Format {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_slice());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote inside a quoted field: either the closing quote or the first
    /// half of an escaped `""`.
    QuoteInQuoted,
}

/// Check the quote structure of raw CSV bytes.
///
/// Returns the 1-based line and a message for the first violation. An
/// unterminated quoted field is reported at the line where it opened.
fn check_quoting(content: &[u8]) -> Result<(), (u64, &'static str)> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut quote_line = 1;

    for (idx, &byte) in content.iter().enumerate() {
        state = match (state, byte) {
            (QuoteState::FieldStart, b'"') => {
                quote_line = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted | QuoteState::QuoteInQuoted, b',') => {
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted | QuoteState::QuoteInQuoted, b'\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::Unquoted, b'"') => {
                return Err((line, "bare \" in non-quoted field"));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, b'\n') => {
                line += 1;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'\r') if content.get(idx + 1) == Some(&b'\n') => {
                QuoteState::QuoteInQuoted
            }
            (QuoteState::QuoteInQuoted, _) => {
                return Err((line, "extraneous or missing \" in quoted field"));
            }
        };
    }

    if state == QuoteState::Quoted {
        return Err((quote_line, "quoted field is never closed"));
    }
    Ok(())
}

fn csv_error(path: &Path, err: csv::Error) -> SyncError {
    let line = err.position().map_or(0, csv::Position::line);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => SyncError::io(path, source),
        _ => SyncError::Format {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}

/// Appends rows to a CSV file.
///
/// Each [`TabularWriter::write_row`] encodes the row in memory and hands it to
/// the file with a single append, so no row is ever half-buffered between
/// calls. The file is synced on [`TabularWriter::finish`], or on drop if the
/// caller bails out early.
#[derive(Debug)]
pub struct TabularWriter {
    path: PathBuf,
    file: File,
    rows: usize,
    finished: bool,
}

impl TabularWriter {
    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or file cannot be created.
    pub fn append(path: &Path) -> SyncResult<Self> {
        ensure_parent_dir(path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SyncError::io(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            rows: 0,
            finished: false,
        })
    }

    /// Append one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be encoded or written.
    pub fn write_row<I, T>(&mut self, row: I) -> SyncResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut encoder = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        encoder
            .write_record(row)
            .map_err(|e| csv_error(&self.path, e))?;
        let line = encoder
            .into_inner()
            .map_err(|e| SyncError::io(&self.path, e.into_error()))?;

        self.file
            .write_all(&line)
            .map_err(|e| SyncError::io(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Sync the file to disk and return the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    pub fn finish(mut self) -> SyncResult<usize> {
        self.finished = true;
        self.file
            .sync_all()
            .map_err(|e| SyncError::io(&self.path, e))?;
        Ok(self.rows)
    }
}

impl Drop for TabularWriter {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.file.sync_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_rows_no_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("guests.csv");
        fs::write(
            &path,
            "Asha,Smt. Asha Rao,2,98100,\"12, MG Road\",mehendi|sangeet,family,,\n\
             Ravi,,1,,,,,,veg only\n",
        )
        .unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Asha");
        assert_eq!(rows[0][4], "12, MG Road");
        assert_eq!(rows[0].len(), 9);
        assert_eq!(rows[1][8], "veg only");
    }

    #[test]
    fn test_read_rows_keeps_whitespace_and_varying_width() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("guests.csv");
        fs::write(&path, " Asha ,a\nRavi\n").unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows[0], vec![" Asha ", "a"]);
        assert_eq!(rows[1], vec!["Ravi"]);
    }

    #[test]
    fn test_read_rows_invalid_utf8_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("guests.csv");
        fs::write(&path, b"Asha,,2\n\xff\xfe,,1\n").unwrap();

        let result = read_rows(&path);

        match result {
            Err(SyncError::Format { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_rows_unterminated_quote_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("guests.csv");
        fs::write(&path, "Asha,,2,,,,,,\"veg\nRavi,,1,,,,,,\n").unwrap();

        match read_rows(&path) {
            Err(SyncError::Format { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_rows_bare_quote_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("guests.csv");
        fs::write(&path, "Asha,,2,,,,,,\nDev \"Bhai\",,1,,,,,,\n").unwrap();

        match read_rows(&path) {
            Err(SyncError::Format { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_rows_text_after_closing_quote_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("guests.csv");
        fs::write(&path, "\"Asha\"x,,2,,,,,,\n").unwrap();

        assert!(matches!(read_rows(&path), Err(SyncError::Format { line: 1, .. })));
    }

    #[test]
    fn test_read_rows_accepts_escaped_and_multiline_quotes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("guests.csv");
        fs::write(
            &path,
            "\"Dev \"\"Bhai\"\"\",,1\r\n\"12 MG Road\nBengaluru\",,2\n\"\",x\n",
        )
        .unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "Dev \"Bhai\"");
        assert_eq!(rows[1][0], "12 MG Road\nBengaluru");
        assert_eq!(rows[2], vec!["", "x"]);
    }

    #[test]
    fn test_read_rows_missing_file() {
        let result = read_rows(Path::new("/nonexistent/guests.csv"));
        assert!(matches!(result, Err(SyncError::Io { .. })));
    }

    #[test]
    fn test_writer_creates_and_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("export.csv");

        let mut writer = TabularWriter::append(&path).unwrap();
        writer.write_row(["1", "Asha", "12, MG Road"]).unwrap();
        assert_eq!(writer.finish().unwrap(), 1);

        let mut writer = TabularWriter::append(&path).unwrap();
        writer.write_row(["2", "Ravi", ""]).unwrap();
        drop(writer);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1,Asha,\"12, MG Road\"\n2,Ravi,\n");
    }

    #[test]
    fn test_written_rows_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.csv");
        let row = vec!["3", "Dev \"Bhai\"", "line one\nline two", ""];

        let mut writer = TabularWriter::append(&path).unwrap();
        writer.write_row(&row).unwrap();
        writer.finish().unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows, vec![row]);
    }
}
