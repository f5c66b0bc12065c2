// mistlog/src/utils/log_store.rs
//! Persistence of the mistake log.
//!
//! The log is a CSV file with a UTF-8 BOM (so spreadsheet tools pick the
//! right encoding), a header row of column labels and every field quoted.
//!
//! Every operation that changes the log holds an exclusive advisory lock on a
//! `<log>.lock` sidecar for its whole read-modify-write, so appends and
//! rewrites from separate processes are serialized. Readers take the same lock
//! shared. Whole-file rewrites (merge, delete, export) write a uniquely named
//! temporary sibling and rename it over the target.

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use fs2::FileExt;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use mistlog_core::{clean_error_type, FieldName, LogRow};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const LOCK_SUFFIX: &str = ".lock";

/// Errors raised while reading or writing a log file.
#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Log file not found: '{0}'")]
    NotFound(PathBuf),
}

trait PathContext<T> {
    fn at(self, path: &Path) -> Result<T, LogStoreError>;
}

impl<T> PathContext<T> for Result<T, io::Error> {
    fn at(self, path: &Path) -> Result<T, LogStoreError> {
        self.map_err(|source| LogStoreError::Io { path: path.to_path_buf(), source })
    }
}

impl<T> PathContext<T> for Result<T, csv::Error> {
    fn at(self, path: &Path) -> Result<T, LogStoreError> {
        self.map_err(|source| LogStoreError::Csv { path: path.to_path_buf(), source })
    }
}

/// Advisory lock on a log's sidecar file, released on drop.
///
/// The sidecar is never renamed, so every process contends on the same inode
/// even after a rewrite has replaced the log itself.
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn exclusive(log: &Path) -> Result<Self, LogStoreError> {
        Self::acquire(log, true)
    }

    fn shared(log: &Path) -> Result<Self, LogStoreError> {
        Self::acquire(log, false)
    }

    fn acquire(log: &Path, exclusive: bool) -> Result<Self, LogStoreError> {
        ensure_parent_dir(log)?;
        let path = lock_path_for(log);
        let file = OpenOptions::new().create(true).truncate(false).write(true).open(&path).at(&path)?;
        let locked = if exclusive { file.lock_exclusive() } else { file.lock_shared() };
        locked.at(&path)?;
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Outcome of [`MistakeLog::merge_from`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub files_merged: usize,
    pub rows_imported: usize,
    pub total_rows: usize,
}

/// Outcome of [`MistakeLog::delete_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteReport {
    pub removed: Vec<usize>,
    pub out_of_range: Vec<usize>,
}

/// A CSV mistake log on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeLog {
    path: PathBuf,
}

impl MistakeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, writing the BOM and header first if the file is new or empty.
    pub fn append(&self, row: &LogRow) -> Result<(), LogStoreError> {
        let _lock = StoreLock::exclusive(&self.path)?;

        let file = OpenOptions::new().create(true).append(true).open(&self.path).at(&self.path)?;
        let needs_header = file.metadata().at(&self.path)?.len() == 0;
        write_rows(&file, needs_header, std::iter::once(row)).at(&self.path)?;

        debug!("Appended row to {} (header written: {})", self.path.display(), needs_header);
        Ok(())
    }

    /// Reads every row, normalized to the fixed column order.
    ///
    /// A missing file reads as an empty log. Unknown columns are dropped and
    /// missing ones are filled with `""`.
    pub fn read_all(&self) -> Result<Vec<LogRow>, LogStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        // A read-only directory still gets read, just without the lock.
        let _lock = match StoreLock::shared(&self.path) {
            Ok(lock) => Some(lock),
            Err(e) => {
                debug!("Reading {} unlocked: {}", self.path.display(), e);
                None
            }
        };
        read_file(&self.path)
    }

    /// Replaces the whole log with `rows`.
    pub fn write_all(&self, rows: &[LogRow]) -> Result<(), LogStoreError> {
        let _lock = StoreLock::exclusive(&self.path)?;
        write_atomically(&self.path, rows)
    }

    /// Merges older logs into this one.
    ///
    /// Current rows come first, then each file's rows in order. Rows sharing a
    /// Timestamp are collapsed to the last one seen, so an imported row wins
    /// over the current one.
    pub fn merge_from(&self, sources: &[PathBuf]) -> Result<MergeReport, LogStoreError> {
        for source in sources {
            if !source.is_file() {
                return Err(LogStoreError::NotFound(source.clone()));
            }
        }

        let _lock = StoreLock::exclusive(&self.path)?;
        let mut rows = read_file(&self.path)?;
        let mut rows_imported = 0;
        for source in sources {
            let imported = read_file(source)?;
            info!("Read {} row(s) from {}", imported.len(), source.display());
            rows_imported += imported.len();
            rows.extend(imported);
        }

        let rows = dedup_by_timestamp(rows);
        write_atomically(&self.path, &rows)?;
        Ok(MergeReport { files_merged: sources.len(), rows_imported, total_rows: rows.len() })
    }

    /// Removes the rows at the given 0-based indices.
    ///
    /// Indices past the end are reported and otherwise ignored. The file is
    /// only rewritten when something was removed.
    pub fn delete_rows(&self, indices: &[usize]) -> Result<DeleteReport, LogStoreError> {
        let _lock = StoreLock::exclusive(&self.path)?;
        let rows = read_file(&self.path)?;

        let mut report = DeleteReport::default();
        for &index in indices {
            if index >= rows.len() {
                report.out_of_range.push(index);
            } else if !report.removed.contains(&index) {
                report.removed.push(index);
            }
        }
        report.removed.sort_unstable();

        if !report.removed.is_empty() {
            let kept: Vec<LogRow> = rows
                .into_iter()
                .enumerate()
                .filter(|(i, _)| report.removed.binary_search(i).is_err())
                .map(|(_, row)| row)
                .collect();
            write_atomically(&self.path, &kept)?;
        }
        Ok(report)
    }

    /// Writes a cleaned copy of the log to `dest` and returns its row count.
    ///
    /// Error types lose their decorative icons; everything else is copied as is.
    /// The log stays locked against writers until the copy is in place.
    pub fn export_to(&self, dest: &Path) -> Result<usize, LogStoreError> {
        let _lock = StoreLock::shared(&self.path)?;
        let error_type = FieldName::ErrorType.column_index();
        let rows: Vec<LogRow> = read_file(&self.path)?
            .into_iter()
            .map(|mut row| {
                row[error_type] = clean_error_type(&row[error_type]);
                row
            })
            .collect();

        write_atomically(dest, &rows)?;
        Ok(rows.len())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), LogStoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).at(parent),
        _ => Ok(()),
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(LOCK_SUFFIX);
    path.with_file_name(name)
}

/// Reads a log without locking; a missing file is an empty log.
fn read_file(path: &Path) -> Result<Vec<LogRow>, LogStoreError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).at(path),
    };
    read_rows(raw.strip_prefix(UTF8_BOM).unwrap_or(&raw), path)
}

fn write_atomically(path: &Path, rows: &[LogRow]) -> Result<(), LogStoreError> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).at(dir)?;
    write_rows(tmp.as_file(), true, rows).at(tmp.path())?;
    tmp.as_file().sync_all().at(tmp.path())?;
    tmp.persist(path).map_err(|e| e.error).at(path)?;
    debug!("Rewrote {} with {} row(s)", path.display(), rows.len());
    Ok(())
}

fn write_rows<'a, W, I>(mut out: W, header: bool, rows: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a LogRow>,
{
    if header {
        out.write_all(UTF8_BOM)?;
    }
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(out);
    if header {
        writer.write_record(FieldName::ALL.iter().map(|f| f.label()))?;
    }
    for row in rows {
        writer.write_record(row.iter())?;
    }
    writer.flush()?;
    Ok(())
}

fn read_rows(input: &[u8], path: &Path) -> Result<Vec<LogRow>, LogStoreError> {
    let mut reader = ReaderBuilder::new().flexible(true).has_headers(true).from_reader(input);
    let columns: Vec<Option<usize>> = reader.byte_headers().at(path)?.iter().map(column_for_header).collect();
    if !columns.iter().any(Option::is_some) {
        warn!("No known columns in {}; treating it as empty", path.display());
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for (line, record) in reader.byte_records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable row {} in {}: {}", line + 1, path.display(), e);
                continue;
            }
        };
        let mut row: LogRow = Default::default();
        for (value, column) in record.iter().zip(&columns) {
            if let Some(column) = column {
                row[*column] = String::from_utf8_lossy(value).into_owned();
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

fn column_for_header(header: &[u8]) -> Option<usize> {
    let name = String::from_utf8_lossy(header);
    name.trim_start_matches('\u{feff}')
        .trim()
        .parse::<FieldName>()
        .ok()
        .map(FieldName::column_index)
}

fn dedup_by_timestamp(rows: Vec<LogRow>) -> Vec<LogRow> {
    let ts = FieldName::Timestamp.column_index();
    let mut last_seen: HashMap<String, usize> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        last_seen.insert(row[ts].clone(), i);
    }
    rows.into_iter()
        .enumerate()
        .filter(|(i, row)| last_seen.get(&row[ts]) == Some(i))
        .map(|(_, row)| row)
        .collect()
}
