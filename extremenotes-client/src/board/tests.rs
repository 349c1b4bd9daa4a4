use std::cell::{Cell, RefCell};
use api_data::model::NoteResponse;
use reqwest::StatusCode;
use time::macros::{date, datetime};
use crate::api::ApiError;
use crate::session::BearerToken;
use super::*;

#[derive(Debug, Clone, Eq, PartialEq)]
enum Call {
    List,
    Create(NotePayload),
    Update(NoteId, NotePayload),
    Delete(NoteId),
}

#[derive(Default)]
struct FakeApi {
    notes: RefCell<Vec<NoteResponse>>,
    calls: RefCell<Vec<Call>>,
    failing: Cell<bool>,
    omit_created_at: Cell<bool>,
    next_id: Cell<u64>,
}

impl FakeApi {
    fn with_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        let api = FakeApi::default();
        api.notes.replace(notes.into_iter().map(NoteResponse::from).collect());
        api
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn fail_if_asked(&self) -> Result<(), ApiError> {
        if self.failing.get() {
            Err(ApiError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: None,
            })
        } else {
            Ok(())
        }
    }

    fn respond(&self, mut response: NoteResponse) -> NoteResponse {
        if self.omit_created_at.get() {
            response.created_at = None;
        }
        response
    }
}

impl NotesApi for FakeApi {
    fn list_notes(&self) -> Result<Vec<NoteResponse>, ApiError> {
        self.calls.borrow_mut().push(Call::List);
        self.fail_if_asked()?;
        Ok(self.notes.borrow().clone())
    }

    fn create_note(
        &self,
        _token: &BearerToken,
        payload: &NotePayload,
    ) -> Result<NoteResponse, ApiError> {
        self.calls.borrow_mut().push(Call::Create(payload.clone()));
        self.fail_if_asked()?;
        self.next_id.set(self.next_id.get() + 1);
        let response = NoteResponse {
            id: NoteId::new(format!("new-{}", self.next_id.get())),
            title: payload.title.clone().unwrap_or_default(),
            content: payload.content.clone(),
            sport: payload.sport.clone(),
            created_at: Some(OffsetDateTime::now_utc()),
            updated_at: None,
        };
        self.notes.borrow_mut().insert(0, response.clone());
        Ok(self.respond(response))
    }

    fn update_note(
        &self,
        _token: &BearerToken,
        id: &NoteId,
        payload: &NotePayload,
    ) -> Result<NoteResponse, ApiError> {
        self.calls.borrow_mut().push(Call::Update(id.clone(), payload.clone()));
        self.fail_if_asked()?;
        let mut notes = self.notes.borrow_mut();
        let note = notes.iter_mut()
            .find(|note| note.id == *id)
            .ok_or(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: Some("not found".into()),
            })?;
        note.title = payload.title.clone().unwrap_or_default();
        note.content = payload.content.clone();
        note.sport = payload.sport.clone();
        note.updated_at = Some(OffsetDateTime::now_utc());
        Ok(self.respond(note.clone()))
    }

    fn delete_note(
        &self,
        _token: &BearerToken,
        id: &NoteId,
    ) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::Delete(id.clone()));
        self.fail_if_asked()?;
        self.notes.borrow_mut().retain(|note| note.id != *id);
        Ok(())
    }
}

fn note(id: &str, sport: Option<&str>, created_at: OffsetDateTime) -> Note {
    Note {
        id: NoteId::new(id),
        title: format!("title {id}"),
        content: Some(format!("content {id}")),
        sport: sport.map(str::to_owned),
        created_at,
        updated_at: None,
    }
}

fn logged_in() -> Session {
    Session::LoggedIn(BearerToken::new("demo-token"))
}

/// Twelve notes, one per hour on 2024-06-01, `n0` the oldest.
fn twelve_notes() -> Vec<Note> {
    (0..12)
        .map(|i| note(
            &format!("n{i}"),
            Some(if i % 2 == 0 { "Snowboard" } else { "surf" }),
            datetime!(2024-06-01 00:00 UTC) + time::Duration::hours(i),
        ))
        .collect()
}

fn loaded_board(notes: Vec<Note>) -> NoteBoard<FakeApi> {
    let mut board = NoteBoard::new(FakeApi::with_notes(notes));
    board.refresh().expect("refresh failed");
    board
}

fn page_ids(board: &NoteBoard<FakeApi>) -> Vec<String> {
    match board.view() {
        BoardView::List(page) => page.notes.iter().map(|note| note.id.to_string()).collect(),
        BoardView::Detail(note) => panic!("unexpected detail view of {}", note.id),
    }
}

#[test]
fn refresh_sorts_newest_first() {
    let board = loaded_board(vec![
        note("old", None, datetime!(2024-01-01 10:00 UTC)),
        note("new", None, datetime!(2024-03-01 10:00 UTC)),
        note("mid", None, datetime!(2024-02-01 10:00 UTC)),
    ]);
    let ids = board.notes().iter().map(|note| note.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[test]
fn refresh_fills_missing_created_at() {
    let api = FakeApi::default();
    api.notes.replace(vec![
        NoteResponse {
            id: NoteId::new("legacy"),
            title: "no date".into(),
            content: None,
            sport: None,
            created_at: None,
            updated_at: None,
        },
    ]);
    let before = OffsetDateTime::now_utc();
    let mut board = NoteBoard::new(api);
    board.refresh().unwrap();
    assert!(board.notes()[0].created_at >= before);
}

#[test]
fn refresh_failure_keeps_local_state() {
    let mut board = loaded_board(twelve_notes());
    board.api().failing.set(true);
    let err = board.refresh().expect_err("should fail");
    assert_eq!(err.to_string(), "failed to load notes");
    assert_eq!(board.notes().len(), 12);
}

#[test]
fn refresh_resets_page_past_the_end() {
    let mut board = loaded_board(twelve_notes());
    board.go_to_page(3);
    assert_eq!(board.page(), 3);
    board.api().notes.borrow_mut().truncate(4);
    board.refresh().unwrap();
    assert_eq!(board.page(), 1);
}

#[test]
fn pagination_clamps_to_range() {
    let mut board = loaded_board(twelve_notes());
    assert_eq!(board.total_pages(), 3);
    assert_eq!(page_ids(&board), vec!["n11", "n10", "n9", "n8", "n7"]);
    board.next_page();
    board.next_page();
    assert_eq!(page_ids(&board), vec!["n1", "n0"]);
    board.next_page();
    assert_eq!(board.page(), 3);
    board.go_to_page(0);
    assert_eq!(board.page(), 1);
    board.previous_page();
    assert_eq!(board.page(), 1);
    board.go_to_page(100);
    assert_eq!(board.page(), 3);
}

#[test]
fn empty_board_has_one_page() {
    let mut board = loaded_board(Vec::new());
    assert_eq!(board.total_pages(), 1);
    board.next_page();
    assert_eq!(board.page(), 1);
    assert!(page_ids(&board).is_empty());
}

#[test]
fn sport_filter_is_case_insensitive_substring() {
    let mut board = loaded_board(vec![
        note("a", Some("Snowboard"), datetime!(2024-06-01 10:00 UTC)),
        note("b", Some("surf"), datetime!(2024-06-01 11:00 UTC)),
        note("c", None, datetime!(2024-06-01 12:00 UTC)),
    ]);
    board.set_sport_filter(Some("BOARD".into()));
    assert_eq!(page_ids(&board), vec!["a"]);
    board.set_sport_filter(Some(String::new()));
    assert_eq!(board.filter().sport(), None);
    assert_eq!(page_ids(&board), vec!["c", "b", "a"]);
}

#[test]
fn date_filter_uses_utc_day() {
    let mut board = loaded_board(vec![
        note("late", None, datetime!(2024-06-01 23:30 -02:00)),
        note("same", None, datetime!(2024-06-01 09:00 UTC)),
        note("other", None, datetime!(2024-06-02 09:00 UTC)),
    ]);
    board.set_date_filter(Some(date!(2024-06-01)));
    assert_eq!(page_ids(&board), vec!["same"]);
    board.set_date_filter(Some(date!(2024-06-02)));
    assert_eq!(page_ids(&board), vec!["other", "late"]);
}

#[test]
fn filters_combine_and_reset_page() {
    let mut board = loaded_board(twelve_notes());
    board.go_to_page(3);
    board.set_sport_filter(Some("surf".into()));
    assert_eq!(board.page(), 1);
    assert_eq!(board.total_pages(), 2);
    board.set_date_filter(Some(date!(2024-05-31)));
    assert!(page_ids(&board).is_empty());
    assert_eq!(board.total_pages(), 1);
    board.clear_filters();
    assert_eq!(board.total_pages(), 3);
}

#[test]
fn filter_change_within_range_keeps_page() {
    let mut board = loaded_board(twelve_notes());
    board.go_to_page(2);
    board.set_sport_filter(Some("s".into()));
    assert_eq!(board.page(), 2);
}

#[test]
fn create_requires_title_then_session() {
    let mut board = loaded_board(Vec::new());
    board.draft_mut().title = "  ".into();
    let err = board.create(&Session::LoggedOut).expect_err("should fail");
    assert!(matches!(err, ClientError::TitleRequired), "wrong error type: {err:#?}");

    board.draft_mut().title = "Kicker".into();
    let err = board.create(&Session::LoggedOut).expect_err("should fail");
    assert!(matches!(err, ClientError::NotLoggedIn), "wrong error type: {err:#?}");
    assert_eq!(board.api().calls(), vec![Call::List]);
    assert_eq!(board.draft().title, "Kicker");
}

#[test]
fn create_prepends_and_resets() {
    let mut board = loaded_board(twelve_notes());
    board.go_to_page(2);
    *board.draft_mut() = NoteForm {
        title: " Kicker ".into(),
        content: String::new(),
        sport: "bmx".into(),
    };
    let created = board.create(&logged_in()).expect("create failed").clone();
    assert_eq!(created.title, "Kicker");
    assert_eq!(created.content, None);
    assert_eq!(board.notes()[0], created);
    assert_eq!(*board.draft(), NoteForm::default());
    assert_eq!(board.page(), 1);
    assert_eq!(
        board.api().calls().last(),
        Some(&Call::Create(NotePayload {
            title: Some("Kicker".into()),
            content: None,
            sport: Some("bmx".into()),
        })),
    );
}

#[test]
fn create_without_service_timestamp_uses_local_time() {
    let mut board = loaded_board(Vec::new());
    board.api().omit_created_at.set(true);
    board.draft_mut().title = "t".into();
    let before = OffsetDateTime::now_utc();
    let created = board.create(&logged_in()).unwrap();
    assert!(created.created_at >= before);
}

#[test]
fn create_failure_is_reported_statically() {
    let mut board = loaded_board(Vec::new());
    board.api().failing.set(true);
    board.draft_mut().title = "t".into();
    let err = board.create(&logged_in()).expect_err("should fail");
    assert_eq!(err.to_string(), "failed to create note");
    assert!(board.notes().is_empty());
    assert_eq!(board.draft().title, "t");
}

#[test]
fn delete_removes_locally() {
    let mut board = loaded_board(twelve_notes());
    let err = board.delete(&Session::LoggedOut, &NoteId::new("n3"))
        .expect_err("should fail");
    assert!(matches!(err, ClientError::NotLoggedIn), "wrong error type: {err:#?}");
    assert_eq!(board.notes().len(), 12);

    board.delete(&logged_in(), &NoteId::new("n3")).unwrap();
    assert_eq!(board.api().calls().last(), Some(&Call::Delete(NoteId::new("n3"))));
    assert_eq!(board.notes().len(), 11);
    assert!(board.note(&NoteId::new("n3")).is_none());
}

#[test]
fn delete_failure_keeps_note() {
    let mut board = loaded_board(twelve_notes());
    board.api().failing.set(true);
    let err = board.delete(&logged_in(), &NoteId::new("n3")).expect_err("should fail");
    assert_eq!(err.to_string(), "failed to delete note");
    assert_eq!(board.notes().len(), 12);
}

#[test]
fn deleting_the_detailed_note_returns_to_list() {
    let mut board = loaded_board(twelve_notes());
    board.open_detail(NoteId::new("n5"));
    assert!(matches!(board.view(), BoardView::Detail(note) if note.id.as_str() == "n5"));
    board.delete(&logged_in(), &NoteId::new("n5")).unwrap();
    assert!(matches!(board.view(), BoardView::List(_)));
}

#[test]
fn deleting_last_note_of_last_page_moves_to_first() {
    let mut board = loaded_board(twelve_notes()[..6].to_vec());
    board.go_to_page(2);
    assert_eq!(page_ids(&board), vec!["n0"]);
    board.delete(&logged_in(), &NoteId::new("n0")).unwrap();
    assert_eq!(board.page(), 1);
}

#[test]
fn edit_round_trip() {
    let mut board = loaded_board(twelve_notes());
    let original = board.note(&NoteId::new("n4")).unwrap().clone();
    let buffer = board.begin_edit(&NoteId::new("n4")).unwrap();
    assert_eq!(buffer.form.title, "title n4");
    buffer.form.title = "Backflip".into();
    buffer.form.content = String::new();

    let updated = board.save_edit(&logged_in()).expect("save failed").clone();

    assert_eq!(
        board.api().calls().last(),
        Some(&Call::Update(original.id.clone(), NotePayload {
            title: Some("Backflip".into()),
            content: None,
            sport: Some("Snowboard".into()),
        })),
    );
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.title, "Backflip");
    assert_eq!(updated.content, None);
    assert_eq!(updated.sport, original.sport);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at.is_some());
    assert_eq!(board.editing(), None);
    assert_eq!(board.note(&original.id), Some(&updated));
}

#[test]
fn edit_keeps_local_created_at_when_service_omits_it() {
    let mut board = loaded_board(twelve_notes());
    board.api().omit_created_at.set(true);
    board.begin_edit(&NoteId::new("n2")).unwrap().form.title = "x".into();
    let updated = board.save_edit(&logged_in()).unwrap();
    assert_eq!(updated.created_at, datetime!(2024-06-01 02:00 UTC));
}

#[test]
fn edit_validation_and_cancel() {
    let mut board = loaded_board(twelve_notes());
    let err = board.save_edit(&logged_in()).expect_err("should fail");
    assert!(matches!(err, ClientError::NotEditing), "wrong error type: {err:#?}");

    let err = board.begin_edit(&NoteId::new("missing")).expect_err("should fail");
    assert!(matches!(err, ClientError::UnknownNote(_)), "wrong error type: {err:#?}");

    board.begin_edit(&NoteId::new("n1")).unwrap().form.title = "".into();
    let err = board.save_edit(&logged_in()).expect_err("should fail");
    assert!(matches!(err, ClientError::TitleRequired), "wrong error type: {err:#?}");

    board.editing_mut().unwrap().form.title = "fine".into();
    let err = board.save_edit(&Session::LoggedOut).expect_err("should fail");
    assert!(matches!(err, ClientError::NotLoggedIn), "wrong error type: {err:#?}");
    assert!(board.editing().is_some());

    board.cancel_edit();
    assert_eq!(board.editing(), None);
    assert_eq!(board.note(&NoteId::new("n1")).unwrap().title, "title n1");
    assert_eq!(board.api().calls(), vec![Call::List]);
}

#[test]
fn edit_failure_keeps_buffer() {
    let mut board = loaded_board(twelve_notes());
    board.begin_edit(&NoteId::new("n1")).unwrap().form.title = "new".into();
    board.api().failing.set(true);
    let err = board.save_edit(&logged_in()).expect_err("should fail");
    assert_eq!(err.to_string(), "failed to update note");
    assert_eq!(board.editing().unwrap().form.title, "new");
    assert_eq!(board.note(&NoteId::new("n1")).unwrap().title, "title n1");
}

#[test]
fn detail_view_follows_edits_and_keeps_list_state() {
    let mut board = loaded_board(twelve_notes());
    board.set_sport_filter(Some("surf".into()));
    board.go_to_page(2);
    board.open_detail(NoteId::new("n3"));
    board.begin_edit(&NoteId::new("n3")).unwrap().form.title = "renamed".into();
    board.save_edit(&logged_in()).unwrap();
    match board.view() {
        BoardView::Detail(note) => assert_eq!(note.title, "renamed"),
        BoardView::List(_) => panic!("detail view closed"),
    }
    board.close_detail();
    assert_eq!(board.page(), 2);
    assert_eq!(board.filter().sport(), Some("surf"));
}

#[test]
fn detail_of_unknown_note_renders_list() {
    let mut board = loaded_board(twelve_notes());
    board.open_detail(NoteId::new("gone"));
    assert!(matches!(board.view(), BoardView::List(_)));
}
