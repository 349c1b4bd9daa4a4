mod authentication_guard;
mod errors;

use api_data::model::{DeleteResponse, Note, NotePayload};
use api_data::NoteId;
use extremenotes::storage::{NoteDraft, NoteStore};
use log::debug;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, routes, Route, State};

use authentication_guard::MaybeBearer;
pub use errors::ApiError;

type Store = State<Box<dyn NoteStore>>;

#[post("/notes", data = "<payload>")]
async fn create_note(
    bearer: MaybeBearer,
    store: &Store,
    payload: Json<NotePayload>,
) -> Result<Created<Json<Note>>, ApiError> {
    debug!("creating a note for {bearer}");
    let draft = NoteDraft::try_from(payload.into_inner())?;
    let note = store.create(draft).await?;
    Ok(
        Created::new(format!("/notes/{}", note.id))
            .body(Json(note))
    )
}

#[get("/notes")]
async fn list_notes(store: &Store) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(store.list().await?))
}

#[get("/notes/<id>")]
async fn get_note(
    id: &str,
    store: &Store,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(store.get(&NoteId::from(id)).await?))
}

#[put("/notes/<id>", data = "<payload>")]
async fn update_note(
    id: &str,
    bearer: MaybeBearer,
    store: &Store,
    payload: Json<NotePayload>,
) -> Result<Json<Note>, ApiError> {
    debug!("updating note {id} for {bearer}");
    let draft = NoteDraft::try_from(payload.into_inner())?;
    Ok(Json(store.update(&NoteId::from(id), draft).await?))
}

#[delete("/notes/<id>")]
async fn delete_note(
    id: &str,
    bearer: MaybeBearer,
    store: &Store,
) -> Result<Json<DeleteResponse>, ApiError> {
    debug!("deleting note {id} for {bearer}");
    store.delete(&NoteId::from(id)).await?;
    Ok(Json(DeleteResponse { ok: true }))
}

pub fn api_routes() -> Vec<Route> {
    routes![
        create_note,
        list_notes,
        get_note,
        update_note,
        delete_note,
    ]
}
