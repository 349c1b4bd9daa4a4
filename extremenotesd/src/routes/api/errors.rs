use api_data::constants::{INTERNAL_ERROR, NOT_FOUND_ERROR, TITLE_REQUIRED_ERROR};
use api_data::model::ErrorResponse;
use extremenotes::storage::{DraftError, StorageError};
use log::error;
use rocket::Responder;
use rocket::serde::json::Json;

#[derive(Debug, Responder)]
pub enum ApiError {
    #[response(status = 400)]
    BadRequest(Json<ErrorResponse>),

    #[response(status = 404)]
    NotFound(Json<ErrorResponse>),

    #[response(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl From<DraftError> for ApiError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::TitleRequired
            => ApiError::BadRequest(Json(ErrorResponse::new(TITLE_REQUIRED_ERROR))),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NoteNotFound
            => ApiError::NotFound(Json(ErrorResponse::new(NOT_FOUND_ERROR))),

            e => {
                error!("note store failure: {e}");
                ApiError::Internal(Json(ErrorResponse::new(INTERNAL_ERROR)))
            },
        }
    }
}
