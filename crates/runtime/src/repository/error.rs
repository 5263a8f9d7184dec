//! Repository error types.

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("checksum mismatch in slot '{slot}'")]
    ChecksumMismatch { slot: String },

    #[error("no writable save directory available")]
    NoSaveDirectory,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
