use std::cmp::Reverse;
use api_data::model::{Note, NotePayload};
use api_data::NoteId;
use extremenotes::util::StrExt;
use log::debug;
use time::{Date, OffsetDateTime, UtcOffset};
use crate::api::NotesApi;
use crate::errors::{ClientError, Operation};
use crate::session::Session;

pub const PAGE_SIZE: usize = 5;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteFilter {
    sport: Option<String>,
    date: Option<Date>,
}

impl NoteFilter {
    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref()
    }

    pub fn date(&self) -> Option<Date> {
        self.date
    }

    /// Sport is a case-insensitive substring match, date is the UTC
    /// calendar day of `createdAt`.
    pub fn matches(&self, note: &Note) -> bool {
        let sport_matches = match self.sport {
            None => true,
            Some(ref filter) => note.sport.as_deref()
                .is_some_and(|sport|
                    sport.to_lowercase().contains(&filter.to_lowercase())
                ),
        };
        let date_matches = self.date.is_none_or(|date|
            note.created_at.to_offset(UtcOffset::UTC).date() == date
        );
        sport_matches && date_matches
    }
}

/// Editable text of a note: the creation draft or the edit buffer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    pub sport: String,
}

impl NoteForm {
    pub fn from_note(note: &Note) -> Self {
        NoteForm {
            title: note.title.clone(),
            content: note.content.clone().unwrap_or_default(),
            sport: note.sport.clone().unwrap_or_default(),
        }
    }

    fn to_payload(&self) -> Result<NotePayload, ClientError> {
        Ok(NotePayload {
            title: Some(
                self.title.nonblank_to_some()
                    .ok_or(ClientError::TitleRequired)?
            ),
            content: Some(self.content.clone()).filter(|s| !s.is_empty()),
            sport: Some(self.sport.clone()).filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditBuffer {
    id: NoteId,
    pub form: NoteForm,
}

impl EditBuffer {
    pub fn id(&self) -> &NoteId {
        &self.id
    }
}

#[derive(Debug)]
pub enum BoardView<'a> {
    List(NotePage<'a>),
    Detail(&'a Note),
}

#[derive(Debug)]
pub struct NotePage<'a> {
    pub notes: Vec<&'a Note>,
    pub page: usize,
    pub total_pages: usize,
    pub matching: usize,
}

/// Local copy of the note list with everything a front end shows on top of
/// it. Filtering, paging and the detail view never touch the service.
pub struct NoteBoard<Api: NotesApi> {
    api: Api,
    notes: Vec<Note>,
    filter: NoteFilter,
    page: usize,
    draft: NoteForm,
    editing: Option<EditBuffer>,
    detail: Option<NoteId>,
}

impl<Api: NotesApi> NoteBoard<Api> {
    pub fn new(api: Api) -> Self {
        NoteBoard {
            api,
            notes: Vec::new(),
            filter: NoteFilter::default(),
            page: 1,
            draft: NoteForm::default(),
            editing: None,
            detail: None,
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == *id)
    }

    pub fn refresh(&mut self) -> Result<(), ClientError> {
        let responses = self.api.list_notes()
            .map_err(|e| ClientError::failed(Operation::Refresh, e))?;
        let now = OffsetDateTime::now_utc();
        let mut notes = responses.into_iter()
            .map(|response| response.into_note(now))
            .collect::<Vec<_>>();
        notes.sort_by_key(|note| Reverse(note.created_at));
        debug!("loaded {} notes", notes.len());
        self.notes = notes;
        self.reset_page_if_out_of_range();
        Ok(())
    }

    pub fn draft(&self) -> &NoteForm {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NoteForm {
        &mut self.draft
    }

    pub fn create(&mut self, session: &Session) -> Result<&Note, ClientError> {
        let payload = self.draft.to_payload()?;
        let token = session.require_token()?;
        let response = self.api.create_note(token, &payload)
            .map_err(|e| ClientError::failed(Operation::Create, e))?;
        self.notes.insert(0, response.into_note(OffsetDateTime::now_utc()));
        self.draft = NoteForm::default();
        self.page = 1;
        Ok(&self.notes[0])
    }

    pub fn delete(&mut self, session: &Session, id: &NoteId) -> Result<(), ClientError> {
        let token = session.require_token()?;
        self.api.delete_note(token, id)
            .map_err(|e| ClientError::failed(Operation::Delete, e))?;
        self.notes.retain(|note| note.id != *id);
        if self.detail.as_ref() == Some(id) {
            self.detail = None;
        }
        if self.editing.as_ref().is_some_and(|buffer| buffer.id == *id) {
            self.editing = None;
        }
        self.reset_page_if_out_of_range();
        Ok(())
    }

    pub fn begin_edit(&mut self, id: &NoteId) -> Result<&mut EditBuffer, ClientError> {
        let note = self.note(id)
            .ok_or_else(|| ClientError::UnknownNote(id.clone()))?;
        let buffer = EditBuffer {
            id: note.id.clone(),
            form: NoteForm::from_note(note),
        };
        Ok(self.editing.insert(buffer))
    }

    pub fn editing(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditBuffer> {
        self.editing.as_mut()
    }

    pub fn save_edit(&mut self, session: &Session) -> Result<&Note, ClientError> {
        let buffer = self.editing.as_ref()
            .ok_or(ClientError::NotEditing)?;
        let payload = buffer.form.to_payload()?;
        let token = session.require_token()?;
        let response = self.api.update_note(token, &buffer.id, &payload)
            .map_err(|e| ClientError::failed(Operation::Update, e))?;

        let previous_created_at = self.note(&response.id)
            .map(|note| note.created_at)
            .unwrap_or_else(OffsetDateTime::now_utc);
        let updated = response.into_note(previous_created_at);
        self.editing = None;
        let index = match self.notes.iter().position(|note| note.id == updated.id) {
            Some(index) => {
                self.notes[index] = updated;
                index
            },
            None => {
                self.notes.insert(0, updated);
                0
            },
        };
        Ok(&self.notes[index])
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    /// An empty string clears the sport filter.
    pub fn set_sport_filter(&mut self, sport: Option<String>) {
        self.filter.sport = sport.filter(|s| !s.is_empty());
        self.reset_page_if_out_of_range();
    }

    pub fn set_date_filter(&mut self, date: Option<Date>) {
        self.filter.date = date;
        self.reset_page_if_out_of_range();
    }

    pub fn clear_filters(&mut self) {
        self.filter = NoteFilter::default();
        self.reset_page_if_out_of_range();
    }

    pub fn filtered(&self) -> Vec<&Note> {
        self.notes.iter()
            .filter(|note| self.filter.matches(note))
            .collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.filtered().len())
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page + 1)
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1))
    }

    pub fn open_detail(&mut self, id: NoteId) {
        self.detail = Some(id);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn view(&self) -> BoardView<'_> {
        if let Some(ref id) = self.detail
            && let Some(note) = self.note(id)
        {
            return BoardView::Detail(note)
        }
        let filtered = self.filtered();
        let matching = filtered.len();
        BoardView::List(NotePage {
            notes: filtered.into_iter()
                .skip((self.page - 1) * PAGE_SIZE)
                .take(PAGE_SIZE)
                .collect(),
            page: self.page,
            total_pages: page_count(matching),
            matching,
        })
    }

    fn reset_page_if_out_of_range(&mut self) {
        if self.page > self.total_pages() {
            self.page = 1;
        }
    }
}

fn page_count(notes: usize) -> usize {
    notes.div_ceil(PAGE_SIZE).max(1)
}

#[cfg(test)]
mod tests;
