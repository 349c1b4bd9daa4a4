pub mod model;
mod note_id;

pub use note_id::NoteId;

pub mod constants {
    pub const HEALTH_STATUS_OK: &str = "ok";
    pub const TITLE_REQUIRED_ERROR: &str = "Title required";
    pub const NOT_FOUND_ERROR: &str = "not found";
    pub const INTERNAL_ERROR: &str = "internal";
}
