//! Tabular sink trait and error types
//!
//! The crawl produces heterogeneous flat records; a sink renders or
//! exports them with sparse-table semantics over the union of keys.

use crate::record::ResultSet;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Consumer of a finished crawl's record sequence
///
/// Implementations must tolerate per-record key sets that differ: the
/// column set is the union of keys, and a record without a column simply
/// has an empty cell there.
pub trait TabularSink {
    /// Writes the complete result set
    fn write(&mut self, results: &ResultSet) -> OutputResult<()>;
}
