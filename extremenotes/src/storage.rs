mod document;
mod draft;
mod errors;
mod memory;

use std::fmt::{Display, Formatter};
use api_data::model::Note;
use api_data::NoteId;
use async_trait::async_trait;
use log::{info, warn};
use crate::config::app_config::AppConfig;

pub use document::DocumentNoteStore;
pub use draft::NoteDraft;
pub use errors::{DraftError, StorageError};
pub use memory::MemoryNoteStore;

/// Where the service keeps its notes.
///
/// Implementations are shared between concurrently running request
/// handlers; each operation is independent of the others.
#[async_trait]
pub trait NoteStore: Send + Sync + 'static {
    fn kind(&self) -> StoreKind;

    async fn create(&self, draft: NoteDraft) -> Result<Note, StorageError>;

    /// All notes, newest first.
    async fn list(&self) -> Result<Vec<Note>, StorageError>;

    async fn get(&self, id: &NoteId) -> Result<Note, StorageError>;

    async fn update(
        &self,
        id: &NoteId,
        draft: NoteDraft,
    ) -> Result<Note, StorageError>;

    /// Succeeds for ids that do not exist.
    async fn delete(&self, id: &NoteId) -> Result<(), StorageError>;

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.list().await?.len())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StoreKind {
    Document,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Document => "document",
            StoreKind::Memory => "memory",
        }
    }
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub async fn open_note_store(
    app_config: &AppConfig,
) -> Result<Box<dyn NoteStore>, StorageError> {
    let Some(ref data_directory) = app_config.data_directory else {
        info!("no data directory configured, keeping notes in memory");
        return Ok(Box::new(MemoryNoteStore::new()));
    };
    match DocumentNoteStore::new(data_directory).await {
        Ok(store) => {
            info!(
                "keeping notes in the document store at \"{}\"",
                data_directory.display(),
            );
            Ok(Box::new(store))
        },
        Err(e) if app_config.memory_fallback => {
            warn!(
                "document store at \"{}\" is unavailable ({e}), \
                    falling back to keeping notes in memory",
                data_directory.display(),
            );
            Ok(Box::new(MemoryNoteStore::new()))
        },
        Err(e) => Err(e),
    }
}
