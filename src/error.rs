use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no pending file found in '{dir}'")]
    NoPendingFile { dir: String },

    #[error("pending file '{path}' could not be read: {source}")]
    PendingFileUnreadable {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
