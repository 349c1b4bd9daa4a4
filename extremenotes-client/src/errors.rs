use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use api_data::NoteId;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    Refresh,
    Create,
    Update,
    Delete,
    Login,
    Logout,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Refresh => "failed to load notes",
            Operation::Create => "failed to create note",
            Operation::Update => "failed to update note",
            Operation::Delete => "failed to delete note",
            Operation::Login => "failed to log in",
            Operation::Logout => "failed to log out",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            match self {
                Operation::Refresh => "refresh",
                Operation::Create => "create",
                Operation::Update => "update",
                Operation::Delete => "delete",
                Operation::Login => "login",
                Operation::Logout => "logout",
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("title required")]
    TitleRequired,

    #[error("username and password required")]
    CredentialsRequired,

    #[error("log in first")]
    NotLoggedIn,

    #[error("no note with id {0}")]
    UnknownNote(NoteId),

    #[error("no note is being edited")]
    NotEditing,

    /// The cause is kept for logs only; users see the static message.
    #[error("{}", .operation.failure_message())]
    Failed {
        operation: Operation,
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ClientError {
    pub(crate) fn failed(
        operation: Operation,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        log::debug!("{operation} failed: {source}");
        ClientError::Failed {
            operation,
            source: Box::new(source),
        }
    }
}
