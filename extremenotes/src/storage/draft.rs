use api_data::model::{Note, NotePayload};
use api_data::NoteId;
use time::OffsetDateTime;
use crate::storage::errors::DraftError;
use crate::util::StrExt;

/// The writable part of a note, validated: the title is never blank.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoteDraft {
    title: String,
    content: Option<String>,
    sport: Option<String>,
}

impl NoteDraft {
    pub fn new(
        title: impl AsRef<str>,
        content: Option<String>,
        sport: Option<String>,
    ) -> Result<Self, DraftError> {
        Ok(
            NoteDraft {
                title: title.nonblank_to_some()
                    .ok_or(DraftError::TitleRequired)?,
                content,
                sport,
            }
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref()
    }

    pub(crate) fn into_new_note(
        self,
        id: NoteId,
        created_at: OffsetDateTime,
    ) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            sport: self.sport,
            created_at,
            updated_at: None,
        }
    }

    /// Overwrites every writable field of `note`, absent ones included.
    pub(crate) fn apply_to(self, note: Note, now: OffsetDateTime) -> Note {
        let last_change = note.updated_at.unwrap_or(note.created_at);
        Note {
            title: self.title,
            content: self.content,
            sport: self.sport,
            updated_at: Some(now.max(last_change)),
            ..note
        }
    }
}

impl TryFrom<NotePayload> for NoteDraft {
    type Error = DraftError;

    fn try_from(value: NotePayload) -> Result<Self, Self::Error> {
        NoteDraft::new(
            value.title.unwrap_or_default(),
            value.content,
            value.sport,
        )
    }
}

impl From<NoteDraft> for NotePayload {
    fn from(value: NoteDraft) -> Self {
        NotePayload {
            title: Some(value.title),
            content: value.content,
            sport: value.sport,
        }
    }
}
