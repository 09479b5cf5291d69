//! Read-only HTTP API over an in-memory collection of notes and their ratings.

pub mod api;
pub mod config;
pub mod storage;

pub use api::{create_app, create_router, AppError, AppState};
pub use config::AppConfig;
pub use storage::NoteStore;
