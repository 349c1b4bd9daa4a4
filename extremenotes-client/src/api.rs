use api_data::model::{DeleteResponse, ErrorResponse, NotePayload, NoteResponse};
use api_data::NoteId;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use crate::session::BearerToken;

/// The note service as the client sees it.
pub trait NotesApi {
    fn list_notes(&self) -> Result<Vec<NoteResponse>, ApiError>;

    fn create_note(
        &self,
        token: &BearerToken,
        payload: &NotePayload,
    ) -> Result<NoteResponse, ApiError>;

    fn update_note(
        &self,
        token: &BearerToken,
        id: &NoteId,
        payload: &NotePayload,
    ) -> Result<NoteResponse, ApiError>;

    fn delete_note(
        &self,
        token: &BearerToken,
        id: &NoteId,
    ) -> Result<(), ApiError>;
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("service responded with {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("service rejected the deletion")]
    NotDeleted,

    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("service url {0} cannot have a path")]
    NotABaseUrl(Url),
}

pub struct HttpNotesApi {
    client: Client,
    base_url: Url,
}

impl HttpNotesApi {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::NotABaseUrl(base_url))
        }
        Ok(HttpNotesApi {
            client: Client::new(),
            base_url,
        })
    }

    fn notes_url(&self) -> Url {
        self.endpoint(&["notes"])
    }

    fn note_url(&self, id: &NoteId) -> Url {
        self.endpoint(&["notes", id.as_str()])
    }

    // segments are percent-encoded by `Url`, so an id can never escape
    // its path segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl NotesApi for HttpNotesApi {
    fn list_notes(&self) -> Result<Vec<NoteResponse>, ApiError> {
        send(self.client.get(self.notes_url()))
    }

    fn create_note(
        &self,
        token: &BearerToken,
        payload: &NotePayload,
    ) -> Result<NoteResponse, ApiError> {
        send(
            self.client.post(self.notes_url())
                .bearer_auth(token.as_str())
                .json(payload)
        )
    }

    fn update_note(
        &self,
        token: &BearerToken,
        id: &NoteId,
        payload: &NotePayload,
    ) -> Result<NoteResponse, ApiError> {
        send(
            self.client.put(self.note_url(id))
                .bearer_auth(token.as_str())
                .json(payload)
        )
    }

    fn delete_note(
        &self,
        token: &BearerToken,
        id: &NoteId,
    ) -> Result<(), ApiError> {
        let response: DeleteResponse = send(
            self.client.delete(self.note_url(id))
                .bearer_auth(token.as_str())
        )?;
        if response.ok {
            Ok(())
        } else {
            Err(ApiError::NotDeleted)
        }
    }
}

fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send()?;
    let response = check_status(response)?;
    Ok(response.json()?)
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response)
    }
    let message = response.json::<ErrorResponse>()
        .map(|body| body.error)
        .inspect_err(|e| debug!("unreadable error body for {status}: {e}"))
        .ok();
    Err(ApiError::Status {
        status,
        message,
    })
}
