//! Request rewrites applied before routing.
//!
//! Paths are matched without regard to case or a trailing slash. Lowercasing
//! the whole path is safe for every route here: ids are parsed numerically,
//! and hex digits and percent escapes are case-insensitive anyway.

use axum::{
    extract::{OriginalUri, Request},
    http::{uri::PathAndQuery, Uri},
};

/// Remember the URL as the client sent it, before any rewriting.
pub fn capture_original_uri(mut req: Request) -> Request {
    if req.extensions().get::<OriginalUri>().is_none() {
        let uri = req.uri().clone();
        req.extensions_mut().insert(OriginalUri(uri));
    }
    req
}

/// Lowercase the path, leaving the query untouched.
pub fn fold_path_case(mut req: Request) -> Request {
    if let Some(uri) = lowercase_path(req.uri()) {
        *req.uri_mut() = uri;
    }
    req
}

fn lowercase_path(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    if !path.bytes().any(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let folded = match uri.query() {
        Some(query) => format!("{}?{}", path.to_ascii_lowercase(), query),
        None => path.to_ascii_lowercase(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(folded).ok()?);
    Uri::from_parts(parts).ok()
}
