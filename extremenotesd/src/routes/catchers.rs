use api_data::constants::{INTERNAL_ERROR, NOT_FOUND_ERROR};
use api_data::model::ErrorResponse;
use rocket::catch;
use rocket::serde::json::Json;

#[catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("bad request"))
}

#[catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(NOT_FOUND_ERROR))
}

#[catch(422)]
pub fn unprocessable_entity() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("invalid request body"))
}

#[catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(INTERNAL_ERROR))
}
