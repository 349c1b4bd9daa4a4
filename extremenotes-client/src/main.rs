mod cli;

use api_data::model::Note;
use api_data::NoteId;
use clap::Parser;
use extremenotes::error_exit;
use extremenotes::logging::init_tool_logging;
use extremenotes_client::api::HttpNotesApi;
use extremenotes_client::board::{BoardView, NoteBoard, NoteForm};
use extremenotes_client::errors::ClientError;
use extremenotes_client::session::{CredentialStore, PlaceholderAuthenticator, SessionManager};
use log::debug;
use rpassword::prompt_password;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use crate::cli::{CliConfig, Command};

fn main() {
    init_tool_logging();

    let cli_config = CliConfig::parse();
    debug!("using the service at {}", cli_config.api_url);

    let mut sessions = SessionManager::open(
        PlaceholderAuthenticator,
        CredentialStore::new(&cli_config.token_file),
    )
        .unwrap_or_else(|e| error_exit!("{e}"));
    let api = HttpNotesApi::new(&cli_config.api_url)
        .unwrap_or_else(|e| error_exit!("{e}"));
    let mut board = NoteBoard::new(api);

    if let Err(e) = run(cli_config.command, &mut sessions, &mut board) {
        error_exit!("{e}")
    }
}

fn run(
    command: Command,
    sessions: &mut SessionManager<PlaceholderAuthenticator>,
    board: &mut NoteBoard<HttpNotesApi>,
) -> Result<(), ClientError> {
    match command {
        Command::Login { username, password } => {
            let password = password.unwrap_or_else(|| {
                prompt_password("Enter the password: ")
                    .unwrap_or_else(|e| error_exit!("could not read password: {}", e))
            });
            sessions.login(&username, &password)?;
            println!("logged in as {username}");
        },
        Command::Logout => {
            sessions.logout()?;
            println!("logged out");
        },
        Command::List { sport, date, page } => {
            board.refresh()?;
            board.set_sport_filter(sport);
            board.set_date_filter(date);
            board.go_to_page(page);
            print_view(board.view());
        },
        Command::Show { id } => {
            board.refresh()?;
            board.open_detail(NoteId::new(id.clone()));
            match board.view() {
                BoardView::Detail(note) => print_note(note),
                BoardView::List(_) => return Err(ClientError::UnknownNote(NoteId::new(id))),
            }
        },
        Command::Create { title, content, sport } => {
            *board.draft_mut() = NoteForm {
                title,
                content: content.unwrap_or_default(),
                sport: sport.unwrap_or_default(),
            };
            let note = board.create(sessions.session())?;
            println!("created {}", note.id);
        },
        Command::Edit { id, title, content, sport } => {
            board.refresh()?;
            let buffer = board.begin_edit(&NoteId::new(id))?;
            if let Some(title) = title {
                buffer.form.title = title;
            }
            if let Some(content) = content {
                buffer.form.content = content;
            }
            if let Some(sport) = sport {
                buffer.form.sport = sport;
            }
            let note = board.save_edit(sessions.session())?;
            println!("updated {}", note.id);
        },
        Command::Delete { id } => {
            board.delete(sessions.session(), &NoteId::new(id.clone()))?;
            println!("deleted {id}");
        },
    }
    Ok(())
}

fn print_view(view: BoardView<'_>) {
    match view {
        BoardView::Detail(note) => print_note(note),
        BoardView::List(page) => {
            for note in &page.notes {
                println!(
                    "{}  {}  {}  {}",
                    note.id,
                    format_time(note.created_at),
                    note.sport.as_deref().unwrap_or("-"),
                    note.title,
                );
            }
            println!(
                "page {} of {}, {} matching",
                page.page,
                page.total_pages,
                page.matching,
            );
        },
    }
}

fn print_note(note: &Note) {
    println!("id:      {}", note.id);
    println!("title:   {}", note.title);
    if let Some(ref sport) = note.sport {
        println!("sport:   {sport}");
    }
    println!("created: {}", format_time(note.created_at));
    if let Some(updated_at) = note.updated_at {
        println!("updated: {}", format_time(updated_at));
    }
    if let Some(ref content) = note.content {
        println!();
        println!("{content}");
    }
}

fn format_time(time: OffsetDateTime) -> String {
    time.format(&Rfc3339)
        .unwrap_or_else(|_| time.to_string())
}
