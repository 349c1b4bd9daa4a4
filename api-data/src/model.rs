use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::NoteId;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
    )]
    pub updated_at: Option<OffsetDateTime>,
}

/// Body of both the create and the update request.
///
/// Every field is optional on the wire; the service decides which ones are
/// required.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NotePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
}

/// A note as the client receives it. Unlike [`Note`], `createdAt` may be
/// missing, in which case the client supplies its own.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: NoteId,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
    )]
    pub created_at: Option<OffsetDateTime>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl NoteResponse {
    pub fn into_note(self, fallback_created_at: OffsetDateTime) -> Note {
        Note {
            id: self.id,
            title: self.title,
            content: self.content,
            sport: self.sport,
            created_at: self.created_at.unwrap_or(fallback_created_at),
            updated_at: self.updated_at,
        }
    }
}

impl From<Note> for NoteResponse {
    fn from(value: Note) -> Self {
        NoteResponse {
            id: value.id,
            title: value.title,
            content: value.content,
            sport: value.sport,
            created_at: Some(value.created_at),
            updated_at: value.updated_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ServiceDescriptor {
    pub service: String,
    pub status: String,
    pub version: String,
    pub store: String,
    pub endpoints: Vec<String>,
}
