use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use api_data::model::Note;
use api_data::NoteId;
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error, trace, warn};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::lib_constants::{NOTE_DOCUMENT_EXTENSION, NOTES_DIRECTORY_PATH, TMP_FILENAME_INFIX};
use crate::storage::{NoteDraft, NoteStore, StorageError, StoreKind};

use io_trait::DocumentIo;
use io_trait::ProductionDocumentIo;

mod io_trait;

pub type DocumentNoteStore = DocumentNoteStoreImpl<ProductionDocumentIo>;

/// A collection of JSON documents, one per note, named after the note id.
#[allow(private_bounds)]
#[derive(Debug)]
pub struct DocumentNoteStoreImpl<Io: DocumentIo> {
    io: Io,
    basedir: PathBuf,
}

impl DocumentNoteStore {
    pub async fn new(
        data_directory: impl AsRef<Path>,
    ) -> Result<DocumentNoteStore, StorageError> {
        Self::new_internal(
            data_directory.as_ref(),
            ProductionDocumentIo::new(),
        ).await
    }
}

#[allow(private_bounds)]
impl<Io: DocumentIo> DocumentNoteStoreImpl<Io> {
    async fn new_internal(
        data_directory: &Path,
        io: Io,
    ) -> Result<DocumentNoteStoreImpl<Io>, StorageError> {
        debug!(
            "opening document store in \"{}\"",
            data_directory.display(),
        );
        let metadata = io.metadata(data_directory)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::DataDirNotInitialized,
                _ => StorageError::Io(e),
            })?;
        if !metadata.is_dir {
            return Err(StorageError::NotADirectory);
        }
        let basedir = data_directory.join(NOTES_DIRECTORY_PATH);
        io.create_dir_all(&basedir).await?;
        Ok(DocumentNoteStoreImpl {
            io,
            basedir,
        })
    }

    async fn read_document(&self, id: Uuid) -> Result<Note, StorageError> {
        let path = self.get_document_path(id);
        trace!("reading note document \"{}\"", path.display());
        let bytes = self.io
            .read_file(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::NoteNotFound,
                _ => StorageError::Io(e),
            })?;
        serde_json::from_slice(&bytes)
            .map_err(StorageError::Corrupted)
    }

    async fn write_document(
        &self,
        id: Uuid,
        note: &Note,
    ) -> Result<(), StorageError> {
        let filename = self.get_document_path(id);
        let data = serde_json::to_vec_pretty(note)
            .map_err(StorageError::Serialization)?;
        let tmp_filename = self.get_document_tmp_path(id);
        trace!(
            "tmp filename for note {id}: \"{}\"",
            tmp_filename.display(),
        );
        self.io.write_file(&tmp_filename, &data).await?;
        trace!(
            "renaming tmp file \"{}\" for note {id}",
            tmp_filename.display(),
        );
        if let Err(e) = self.io.rename_file(&tmp_filename, &filename).await {
            error!(
                "failed to rename tmp file \"{}\" for note {id}: {e}",
                tmp_filename.display(),
            );
            if let Err(e) = self.io.remove_file(&tmp_filename).await {
                error!(
                    "failed to remove tmp file \"{}\" for note {id}: {e}",
                    tmp_filename.display(),
                );
            }
            return Err(e.into())
        }
        Ok(())
    }

    async fn list_document_ids(&self) -> Result<Vec<Uuid>, StorageError> {
        let names = self.io.list_dir(&self.basedir).await?;
        Ok(
            names.into_iter()
                .filter_map(|name| {
                    let id = Self::try_extract_id(&name);
                    if id.is_none() {
                        trace!("skipping foreign file {name:?} in the note collection");
                    }
                    id
                })
                .collect()
        )
    }

    fn get_document_path(&self, id: Uuid) -> PathBuf {
        self.basedir.join(
            id.hyphenated().to_string() + NOTE_DOCUMENT_EXTENSION
        )
    }

    fn get_document_tmp_path(&self, id: Uuid) -> PathBuf {
        self.basedir.join(
            id.hyphenated().to_string()
                + TMP_FILENAME_INFIX
                + &self.io.generate_uuid().hyphenated().to_string()
        )
    }

    fn try_extract_id(filename: &OsString) -> Option<Uuid> {
        filename.to_str()
            .and_then(|name| name.strip_suffix(NOTE_DOCUMENT_EXTENSION))
            .and_then(parse_canonical_uuid)
    }
}

/// Only the lowercase hyphenated form names a document, so every id maps
/// to exactly one path inside the collection.
fn parse_canonical_uuid(s: &str) -> Option<Uuid> {
    Uuid::try_parse(s)
        .ok()
        .filter(|uuid| uuid.hyphenated().to_string() == s)
}

#[async_trait]
impl<Io: DocumentIo> NoteStore for DocumentNoteStoreImpl<Io> {
    fn kind(&self) -> StoreKind {
        StoreKind::Document
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note, StorageError> {
        let uuid = self.io.generate_uuid();
        debug!("creating note document {uuid}");
        let note = draft.into_new_note(
            NoteId::new(uuid.hyphenated().to_string()),
            OffsetDateTime::now_utc(),
        );
        self.write_document(uuid, &note).await?;
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>, StorageError> {
        debug!("listing note documents in \"{}\"", self.basedir.display());
        let ids = self.list_document_ids().await?;
        let documents = join_all(
            ids.iter().map(|id| self.read_document(*id))
        ).await;
        let mut notes = ids.into_iter()
            .zip(documents)
            .filter_map(|(id, document)| match document {
                Ok(note) => Some(note),
                Err(StorageError::NoteNotFound) => {
                    debug!("note document {id} disappeared while listing");
                    None
                },
                Err(e) => {
                    warn!("skipping unreadable note document {id}: {e}");
                    None
                },
            })
            .collect::<Vec<_>>();
        notes.sort_by(|a, b|
            b.created_at.cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        );
        Ok(notes)
    }

    async fn get(&self, id: &NoteId) -> Result<Note, StorageError> {
        debug!("reading note document {id}");
        let uuid = parse_canonical_uuid(id)
            .ok_or(StorageError::NoteNotFound)?;
        self.read_document(uuid).await
    }

    async fn update(
        &self,
        id: &NoteId,
        draft: NoteDraft,
    ) -> Result<Note, StorageError> {
        debug!("updating note document {id}");
        let uuid = parse_canonical_uuid(id)
            .ok_or(StorageError::NoteNotFound)?;
        let existing = self.read_document(uuid).await?;
        let note = draft.apply_to(existing, OffsetDateTime::now_utc());
        self.write_document(uuid, &note).await?;
        Ok(note)
    }

    async fn delete(&self, id: &NoteId) -> Result<(), StorageError> {
        debug!("deleting note document {id}");
        let Some(uuid) = parse_canonical_uuid(id) else {
            trace!("{id} cannot name a note document, nothing to delete");
            return Ok(())
        };
        match self.io.remove_file(&self.get_document_path(uuid)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Counts what `list` returns, so unreadable documents are left out.
    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.list().await?.len())
    }
}
