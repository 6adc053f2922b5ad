use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures the sample store can surface. Malformed rows inside the
/// database never appear here — the load path drops them instead.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// A sample could not be encoded for storage.
    SampleEncode(serde_json::Error),
    /// A dataset export file could not be read or written.
    WireFile { path: PathBuf, source: io::Error },
    /// A dataset export file was not valid wire-format JSON.
    WireFormat(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(e) => write!(f, "sample database error: {e}"),
            StoreError::SampleEncode(e) => write!(f, "failed to encode sample: {e}"),
            StoreError::WireFile { path, source } => {
                write!(f, "dataset file {}: {source}", path.display())
            }
            StoreError::WireFormat(e) => write!(f, "malformed dataset export: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Sqlite(e) => Some(e),
            StoreError::SampleEncode(e) | StoreError::WireFormat(e) => Some(e),
            StoreError::WireFile { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
