use crate::api::fallback::FallbackChain;
use crate::storage::{NoteStore, Rating};
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Number;
use std::fmt;
use std::sync::Arc;
use tracing::{error, warn};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<NoteStore>,
    pub fallback: Arc<FallbackChain>,
}

/// `{ "data": ... }` envelope used by most routes
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// `{ "status": 200, "data": ... }` envelope, only used by `GET /ratings`
#[derive(Debug, Serialize)]
pub struct StatusDataResponse<T> {
    pub status: u16,
    pub data: T,
}

/// Rating projected to its public fields, without any extra attributes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub id: i64,
    pub note_id: i64,
    pub stars: Number,
    pub comment: String,
}

impl From<&Rating> for RatingSummary {
    fn from(rating: &Rating) -> Self {
        Self {
            id: rating.id,
            note_id: rating.note_id,
            stars: rating.stars.clone(),
            comment: rating.comment.clone(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_notes: usize,
    pub total_ratings: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Numeric id taken from a path segment.
///
/// Parsing is lenient: leading whitespace and a sign are accepted, then the
/// longest run of digits (hex after `0x`). Anything unparsable becomes NaN,
/// which never matches a stored id and displays as `NaN`. Digit runs too large
/// for `i64` keep their approximate value for display but match nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathId {
    Int(i64),
    OutOfRange(f64),
    NaN,
}

impl PathId {
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim_start();
        let (negative, s) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (radix, s) = match s.get(..2) {
            Some("0x") | Some("0X") => (16, &s[2..]),
            _ => (10, s),
        };

        let end = s
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(s.len());
        if end == 0 {
            return PathId::NaN;
        }
        let digits = &s[..end];

        match i64::from_str_radix(digits, radix) {
            Ok(magnitude) => PathId::Int(if negative { -magnitude } else { magnitude }),
            Err(_) => {
                let magnitude = if radix == 10 {
                    digits.parse::<f64>().unwrap_or(f64::NAN)
                } else {
                    digits
                        .chars()
                        .filter_map(|c| c.to_digit(radix))
                        .fold(0.0_f64, |acc, d| acc * f64::from(radix) + f64::from(d))
                };
                PathId::OutOfRange(if negative { -magnitude } else { magnitude })
            }
        }
    }

    /// Id usable for lookups; `None` for NaN and out-of-range values
    pub fn value(self) -> Option<i64> {
        match self {
            PathId::Int(id) => Some(id),
            PathId::OutOfRange(_) | PathId::NaN => None,
        }
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathId::Int(id) => write!(f, "{}", id),
            PathId::NaN => f.write_str("NaN"),
            PathId::OutOfRange(v) if v.is_infinite() => {
                f.write_str(if v < 0.0 { "-Infinity" } else { "Infinity" })
            }
            PathId::OutOfRange(v) if v.abs() < 1e21 => write!(f, "{}", v),
            // 1e21 and above use exponent notation with an explicit sign
            PathId::OutOfRange(v) => {
                let formatted = format!("{:e}", v);
                f.write_str(&formatted.replacen('e', "e+", 1))
            }
        }
    }
}

/// Application error type. Its `IntoResponse` impl is the single place
/// errors are logged and turned into `{ "error": message }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Something went wrong!")]
    Internal,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id_plain_numbers() {
        assert_eq!(PathId::parse("42").value(), Some(42));
        assert_eq!(PathId::parse("-3").value(), Some(-3));
        assert_eq!(PathId::parse("+7").value(), Some(7));
        assert_eq!(PathId::parse("  8").value(), Some(8));
    }

    #[test]
    fn test_path_id_ignores_trailing_garbage() {
        assert_eq!(PathId::parse("12abc").value(), Some(12));
        assert_eq!(PathId::parse("1.9").value(), Some(1));
        assert_eq!(PathId::parse("0x1f").value(), Some(31));
    }

    #[test]
    fn test_path_id_nan() {
        for raw in ["abc", "", "-", "0x", "x1"] {
            let id = PathId::parse(raw);
            assert_eq!(id.value(), None, "input {:?}", raw);
            assert_eq!(id.to_string(), "NaN");
        }
    }

    #[test]
    fn test_path_id_out_of_range_keeps_its_value() {
        let id = PathId::parse("99999999999999999999");
        assert_eq!(id.value(), None);
        assert_eq!(id.to_string(), "100000000000000000000");

        assert_eq!(PathId::parse("-99999999999999999999").to_string(), "-100000000000000000000");
        assert_eq!(PathId::parse("1000000000000000000000").to_string(), "1e+21");
        assert_eq!(PathId::parse("0x10000000000000000").to_string(), "18446744073709552000");
        assert_eq!(PathId::parse(&"9".repeat(400)).to_string(), "Infinity");
    }

    #[test]
    fn test_rating_summary_drops_extra_fields() {
        let rating: Rating = serde_json::from_value(serde_json::json!({
            "id": 3, "noteId": 2, "stars": 4, "comment": "ok", "createdAt": "2024-02-11"
        }))
        .unwrap();

        let summary = serde_json::to_value(RatingSummary::from(&rating)).unwrap();
        assert_eq!(
            summary,
            serde_json::json!({ "id": 3, "noteId": 2, "stars": 4, "comment": "ok" })
        );
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Internal.to_string(), "Something went wrong!");
    }
}
