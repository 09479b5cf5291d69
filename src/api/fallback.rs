//! Handling for requests that no route claims.
//!
//! Stages are ordered and every stage is terminal, so the first one answers.
//! With the default order the catch-all 405 stage answers everything and the
//! not-found stage is only reached when configured to run first.

use crate::api::models::{AppError, AppState};
use crate::config::UnmatchedPolicy;
use axum::{
    extract::{OriginalUri, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStage {
    /// Catch-all for any method on any path
    MethodNotAllowed,
    /// Reports the original URL as not found
    NotFound,
}

impl FallbackStage {
    fn handle(self, uri: &Uri) -> AppError {
        match self {
            FallbackStage::MethodNotAllowed => AppError::MethodNotAllowed,
            FallbackStage::NotFound => AppError::NotFound(format!("Not found: {}", uri)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    stages: Vec<FallbackStage>,
}

impl FallbackChain {
    pub fn new(stages: Vec<FallbackStage>) -> Self {
        Self { stages }
    }

    pub fn for_policy(policy: UnmatchedPolicy) -> Self {
        match policy {
            UnmatchedPolicy::MethodNotAllowed => Self::new(vec![
                FallbackStage::MethodNotAllowed,
                FallbackStage::NotFound,
            ]),
            UnmatchedPolicy::NotFound => Self::new(vec![
                FallbackStage::NotFound,
                FallbackStage::MethodNotAllowed,
            ]),
        }
    }

    pub fn stages(&self) -> &[FallbackStage] {
        &self.stages
    }

    /// Error for an unmatched request. An empty chain is a 500.
    pub fn resolve(&self, uri: &Uri) -> AppError {
        match self.stages.first() {
            Some(stage) => stage.handle(uri),
            None => AppError::Internal,
        }
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::for_policy(UnmatchedPolicy::default())
    }
}

/// Router fallback: no route matched the path
pub async fn unmatched_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppError {
    state.fallback.resolve(&uri)
}

/// A route matched the path but not the method
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

/// Turns a handler panic into the generic 500 response
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    error!(panic = %detail, "Handler panicked");
    AppError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_default_chain_answers_405() {
        let chain = FallbackChain::default();
        let uri: Uri = "/nowhere?x=1".parse().unwrap();

        assert_eq!(chain.stages()[0], FallbackStage::MethodNotAllowed);
        assert!(matches!(chain.resolve(&uri), AppError::MethodNotAllowed));
    }

    #[test]
    fn test_not_found_first_reports_original_url() {
        let chain = FallbackChain::for_policy(UnmatchedPolicy::NotFound);
        let uri: Uri = "/nowhere?x=1".parse().unwrap();

        match chain.resolve(&uri) {
            AppError::NotFound(message) => assert_eq!(message, "Not found: /nowhere?x=1"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_chain_is_internal_error() {
        let chain = FallbackChain::new(vec![]);
        let uri: Uri = "/".parse().unwrap();

        assert_eq!(chain.resolve(&uri).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_panic_becomes_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
