use std::collections::VecDeque;
use api_data::model::Note;
use api_data::NoteId;
use async_trait::async_trait;
use log::{debug, trace};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use crate::storage::{NoteDraft, NoteStore, StorageError, StoreKind};

/// Process-local note list, newest first.
///
/// Ids are millisecond timestamps, bumped past the last issued id when two
/// notes are created within the same millisecond.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    notes: VecDeque<Note>,
    last_id: u64,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Inner {
    fn next_id(&mut self, now: OffsetDateTime) -> NoteId {
        let timestamp = u64::try_from(now.unix_timestamp_nanos() / 1_000_000)
            .unwrap_or_default();
        self.last_id = timestamp.max(self.last_id + 1);
        NoteId::new(self.last_id.to_string())
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == *id)
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note, StorageError> {
        let now = OffsetDateTime::now_utc();
        let mut inner = self.inner.write().await;
        let id = inner.next_id(now);
        debug!("creating note {id} in memory");
        let note = draft.into_new_note(id, now);
        inner.notes.push_front(note.clone());
        Ok(note)
    }

    async fn list(&self) -> Result<Vec<Note>, StorageError> {
        let inner = self.inner.read().await;
        debug!("listing {} notes from memory", inner.notes.len());
        Ok(inner.notes.iter().cloned().collect())
    }

    async fn get(&self, id: &NoteId) -> Result<Note, StorageError> {
        debug!("reading note {id} from memory");
        let inner = self.inner.read().await;
        inner.position(id)
            .map(|idx| inner.notes[idx].clone())
            .ok_or(StorageError::NoteNotFound)
    }

    async fn update(
        &self,
        id: &NoteId,
        draft: NoteDraft,
    ) -> Result<Note, StorageError> {
        debug!("updating note {id} in memory");
        let mut inner = self.inner.write().await;
        let idx = inner.position(id)
            .ok_or(StorageError::NoteNotFound)?;
        let slot = &mut inner.notes[idx];
        let updated = draft.apply_to(slot.clone(), OffsetDateTime::now_utc());
        trace!("note {id} updated at {:?}", updated.updated_at);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &NoteId) -> Result<(), StorageError> {
        debug!("deleting note {id} from memory");
        self.inner.write().await
            .notes
            .retain(|note| note.id != *id);
        Ok(())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.inner.read().await.notes.len())
    }
}
