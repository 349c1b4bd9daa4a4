use std::error::Error;
use assert_fs::TempDir;
use extremenotes_client::api::HttpNotesApi;
use extremenotes_client::board::{BoardView, NoteBoard, NoteForm};
use extremenotes_client::errors::ClientError;
use extremenotes_client::session::{CredentialStore, PlaceholderAuthenticator, SessionManager};
use test_utils::{setup_config, shutdown_assert_no_errors, spawn_daemon};
use crate::common::{list_notes, DAEMON_BIN_PATH};

mod common;

#[test]
fn client_session_against_the_daemon() -> Result<(), Box<dyn Error>> {
    let setup = setup_config();
    let (mut child, reader) = spawn_daemon(DAEMON_BIN_PATH, &setup)?;
    let client_dir = TempDir::new()?;

    let mut sessions = SessionManager::open(
        PlaceholderAuthenticator,
        CredentialStore::new(client_dir.path().join("token")),
    )?;
    let mut board = NoteBoard::new(HttpNotesApi::new(setup.base_url())?);
    board.refresh()?;
    assert!(board.notes().is_empty());

    board.draft_mut().title = "Session one".into();
    let err = board.create(sessions.session()).expect_err("should fail");
    assert!(matches!(err, ClientError::NotLoggedIn), "wrong error type: {err:#?}");

    sessions.login("rider", "secret")?;
    for i in 0..6 {
        *board.draft_mut() = NoteForm {
            title: format!("Session {i}"),
            content: String::new(),
            sport: if i % 2 == 0 { "surf" } else { "ski" }.into(),
        };
        board.create(sessions.session())?;
    }
    assert_eq!(list_notes(&setup)?.len(), 6);

    board.refresh()?;
    assert_eq!(board.total_pages(), 2);
    board.set_sport_filter(Some("SURF".into()));
    let surf_ids = match board.view() {
        BoardView::List(page) => page.notes.iter()
            .map(|note| note.id.clone())
            .collect::<Vec<_>>(),
        BoardView::Detail(_) => panic!("unexpected detail view"),
    };
    assert_eq!(surf_ids.len(), 3);

    let target = surf_ids[0].clone();
    board.begin_edit(&target)?.form.title = "Renamed".into();
    board.save_edit(sessions.session())?;
    board.delete(sessions.session(), &surf_ids[1])?;

    board.refresh()?;
    assert_eq!(board.notes().len(), 5);
    assert_eq!(board.note(&target).map(|note| note.title.as_str()), Some("Renamed"));
    assert!(board.note(&surf_ids[1]).is_none());

    sessions.logout()?;
    let err = board.delete(sessions.session(), &target).expect_err("should fail");
    assert!(matches!(err, ClientError::NotLoggedIn), "wrong error type: {err:#?}");

    shutdown_assert_no_errors(&mut child, reader)?;
    Ok(())
}

#[test]
fn unreachable_service_shows_static_message() -> Result<(), Box<dyn Error>> {
    let setup = setup_config();
    let mut board = NoteBoard::new(HttpNotesApi::new(setup.base_url())?);
    let err = board.refresh().expect_err("should fail");
    assert_eq!(err.to_string(), "failed to load notes");
    Ok(())
}
