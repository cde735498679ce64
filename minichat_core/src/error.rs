use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemoryError>;

/// Errors raised at the persistence boundary of the memory layer.
///
/// The buffer and topic operations never fail; only reading or writing a
/// snapshot file can.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot is not a list of turn records: {0}")]
    InvalidSnapshot(String),
}
