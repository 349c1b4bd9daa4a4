// relative to the data directory
pub const NOTES_DIRECTORY_PATH: &str = "notes";

pub const NOTE_DOCUMENT_EXTENSION: &str = ".json";
pub const TMP_FILENAME_INFIX: &str = ".tmp.";
