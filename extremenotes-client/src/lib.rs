pub mod api;
pub mod board;
pub mod errors;
pub mod session;
