use crate::api::models::*;
use crate::storage::Note;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use tracing::debug;

pub async fn list_notes_handler(State(state): State<AppState>) -> Json<DataResponse<Vec<Note>>> {
    Json(DataResponse {
        data: state.store.notes().to_vec(),
    })
}

pub async fn get_note_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DataResponse<Note>>, AppError> {
    let Path(raw_note_id) = path?;
    let note_id = PathId::parse(&raw_note_id);
    debug!(%note_id, "Fetching note");

    let note = note_id
        .value()
        .and_then(|id| state.store.find_note_by_id(id))
        .ok_or_else(|| AppError::NotFound(format!("Note {} not found", note_id)))?;

    Ok(Json(DataResponse { data: note.clone() }))
}
