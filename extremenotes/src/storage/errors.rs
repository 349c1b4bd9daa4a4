use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("data directory is not initialized properly")]
    DataDirNotInitialized,

    #[error("data directory is not a directory")]
    NotADirectory,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("corrupted note document: {0}")]
    Corrupted(serde_json::Error),

    #[error("cannot serialize note: {0}")]
    Serialization(serde_json::Error),

    #[error("note not found")]
    NoteNotFound,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DraftError {
    #[error("title required")]
    TitleRequired,
}
