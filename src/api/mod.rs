pub mod fallback;
pub mod models;
pub mod normalize;
pub mod notes;
pub mod ratings;

// Re-exports
pub use models::*;

use axum::{
    extract::{Request, State},
    response::Response,
    routing::get,
    Json, Router,
};
use std::convert::Infallible;
use tower::{Service, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer, normalize_path::NormalizePathLayer, trace::TraceLayer,
};

/// The service to serve: the router behind path normalization.
///
/// Normalization has to wrap the `Router` from outside, since layers added
/// with `Router::layer` only run after a route has been picked.
pub fn create_app(
    state: AppState,
) -> impl Service<Request, Response = Response, Error = Infallible, Future: Send + 'static>
+ Clone
+ Send
+ 'static {
    ServiceBuilder::new()
        .map_request(normalize::capture_original_uri)
        .layer(NormalizePathLayer::trim_trailing_slash())
        .map_request(normalize::fold_path_case)
        .service(create_router(state))
}

/// Build the full router. Specific routes are matched first; anything left
/// over goes through the fallback chain.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(notes::routes())
        .merge(ratings::routes())
        .method_not_allowed_fallback(fallback::method_not_allowed_handler)
        .fallback(fallback::unmatched_handler)
        .with_state(state)
        .layer(CatchPanicLayer::custom(fallback::handle_panic))
        .layer(TraceLayer::new_for_http())
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_notes: state.store.notes().len(),
        total_ratings: state.store.ratings().len(),
    })
}
