use crate::api::models::AppState;
use crate::api::notes::handlers::{get_note_handler, list_notes_handler};
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes_handler))
        .route("/notes/{note_id}", get(get_note_handler))
}
