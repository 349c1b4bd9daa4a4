use std::fmt::{Debug, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use extremenotes::util::StrExt;
use log::debug;
use crate::errors::{ClientError, Operation};

/// Opaque credential attached to mutation requests.
#[derive(Clone, Eq, PartialEq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        BearerToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(BearerToken),
}

impl Session {
    pub fn token(&self) -> Option<&BearerToken> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn(token) => Some(token),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub(crate) fn require_token(&self) -> Result<&BearerToken, ClientError> {
        self.token().ok_or(ClientError::NotLoggedIn)
    }
}

pub trait Authenticator {
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<BearerToken, ClientError>;
}

pub const PLACEHOLDER_TOKEN: &str = "demo-token";

/// Accepts any non-empty pair and hands out the same fixed token. The
/// service does not check tokens, so there is nothing to verify against.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderAuthenticator;

impl Authenticator for PlaceholderAuthenticator {
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<BearerToken, ClientError> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::CredentialsRequired)
        }
        debug!("issuing the placeholder token to {username}");
        Ok(BearerToken::new(PLACEHOLDER_TOKEN))
    }
}

/// Keeps the token between runs in a single file.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CredentialStore {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn load(&self) -> Result<Session, std::io::Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(
                contents.nonblank_to_some()
                    .map(|token| Session::LoggedIn(BearerToken::new(token)))
                    .unwrap_or_default()
            ),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::LoggedOut),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, token: &BearerToken) -> Result<(), std::io::Error> {
        fs::write(&self.path, token.as_str())
    }

    pub fn clear(&self) -> Result<(), std::io::Error> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// The session state machine: `LoggedOut` to `LoggedIn` through an
/// [`Authenticator`], back on logout. Every transition is persisted.
pub struct SessionManager<A: Authenticator> {
    authenticator: A,
    store: CredentialStore,
    session: Session,
}

impl<A: Authenticator> SessionManager<A> {
    /// Restores whatever session the credential file holds.
    pub fn open(authenticator: A, store: CredentialStore) -> Result<Self, ClientError> {
        let session = store.load()
            .map_err(|e| ClientError::failed(Operation::Login, e))?;
        Ok(SessionManager {
            authenticator,
            store,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&Session, ClientError> {
        let token = self.authenticator.authenticate(username, password)?;
        self.store.save(&token)
            .map_err(|e| ClientError::failed(Operation::Login, e))?;
        self.session = Session::LoggedIn(token);
        Ok(&self.session)
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.store.clear()
            .map_err(|e| ClientError::failed(Operation::Logout, e))?;
        self.session = Session::LoggedOut;
        Ok(())
    }
}
