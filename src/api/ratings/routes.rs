use crate::api::models::AppState;
use crate::api::ratings::handlers::*;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes/{note_id}/ratings", get(list_note_ratings_handler))
        .route(
            "/notes/{note_id}/ratings/{rating_id}",
            get(get_note_rating_handler),
        )
        .route("/ratings", get(list_ratings_handler))
        .route("/ratings/{rating_id}", get(get_rating_handler))
}
