use crate::api::models::*;
use crate::storage::Rating;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

/// GET /notes/{note_id}/ratings
///
/// Ratings are projected to `{id, noteId, stars, comment}`. A known note with
/// no ratings yields an empty list, not a 404.
pub async fn list_note_ratings_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DataResponse<Vec<RatingSummary>>>, AppError> {
    let Path(raw_note_id) = path?;
    let note_id = PathId::parse(&raw_note_id);

    let note = note_id
        .value()
        .and_then(|id| state.store.find_note_by_id(id))
        .ok_or_else(|| AppError::NotFound("Note not found".to_string()))?;

    let ratings: Vec<RatingSummary> = state
        .store
        .find_ratings_by_note_id(note.id)
        .into_iter()
        .map(RatingSummary::from)
        .collect();

    debug!(note_id = note.id, found = ratings.len(), "Listed ratings for note");

    Ok(Json(DataResponse { data: ratings }))
}

/// GET /notes/{note_id}/ratings/{rating_id}
pub async fn get_note_rating_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<DataResponse<Rating>>, AppError> {
    let Path((raw_note_id, raw_rating_id)) = path?;
    let note_id = PathId::parse(&raw_note_id);
    let rating_id = PathId::parse(&raw_rating_id);

    let note = note_id
        .value()
        .and_then(|id| state.store.find_note_by_id(id))
        .ok_or_else(|| AppError::NotFound(format!("Note with ID {} not found", note_id)))?;

    let rating = rating_id
        .value()
        .and_then(|id| state.store.find_rating_by_note_and_rating_id(note.id, id))
        .ok_or_else(|| AppError::NotFound(format!("Rating with ID {} not found", rating_id)))?;

    Ok(Json(DataResponse {
        data: rating.clone(),
    }))
}

/// GET /ratings
///
/// Unlike the other routes this one carries the status in the body.
pub async fn list_ratings_handler(
    State(state): State<AppState>,
) -> Json<StatusDataResponse<Vec<Rating>>> {
    Json(StatusDataResponse {
        status: StatusCode::OK.as_u16(),
        data: state.store.ratings().to_vec(),
    })
}

/// GET /ratings/{rating_id}
pub async fn get_rating_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DataResponse<Rating>>, AppError> {
    let Path(raw_rating_id) = path?;
    let rating = PathId::parse(&raw_rating_id)
        .value()
        .and_then(|id| state.store.find_rating_by_id(id))
        .ok_or_else(|| AppError::NotFound("Rating not found".to_string()))?;

    Ok(Json(DataResponse {
        data: rating.clone(),
    }))
}
