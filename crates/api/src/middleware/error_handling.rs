//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON bodies so every handler
//! fails the same way. A blocked save answers `409 Conflict` and lists every
//! clash under its heading:
//!
//! ```json
//! {
//!   "error": "Schedule conflict: 2 overlapping slot(s)",
//!   "conflicts": {
//!     "Overlap with own classes": ["Schedule 1: overlaps with Maths P5 on Monday (10:30-11:30)"],
//!     "Overlap with other classes": ["Schedule 2: overlaps with Physics S4 at Room 3 on Friday (09:00-10:00)"]
//!   }
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use tracing::error;
use tuition_core::errors::TuitionError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use tuition_api::middleware::error_handling::AppError;
/// use tuition_core::errors::TuitionError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.trim().is_empty() {
///         return Err(AppError(TuitionError::Validation("Name is required".into())));
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TuitionError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            TuitionError::NotFound(_) => StatusCode::NOT_FOUND,
            TuitionError::Validation(_) => StatusCode::BAD_REQUEST,
            TuitionError::ScheduleConflict(_) => StatusCode::CONFLICT,
            TuitionError::InvalidRecord(_)
            | TuitionError::Database(_)
            | TuitionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let mut body = json!({ "error": self.0.to_string() });
        if let TuitionError::ScheduleConflict(report) = &self.0 {
            let conflicts: Map<String, Value> = report
                .sections()
                .into_iter()
                .map(|(heading, messages)| (heading.to_string(), json!(messages)))
                .collect();
            body["conflicts"] = Value::Object(conflicts);
        }

        (status, Json(body)).into_response()
    }
}

/// Lets handlers use `?` on functions returning `TuitionResult<T>`.
impl From<TuitionError> for AppError {
    fn from(err: TuitionError) -> Self {
        AppError(err)
    }
}

/// Lets handlers use `?` on store calls.
///
/// A `TuitionError` carried inside the report (for example a stored record
/// that failed validation) keeps its own variant; anything else is a
/// database error.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        match err.downcast::<TuitionError>() {
            Ok(inner) => AppError(inner),
            Err(err) => AppError(TuitionError::Database(err)),
        }
    }
}

/// Maps a TuitionError to an HTTP response
pub fn map_error(err: TuitionError) -> Response {
    AppError(err).into_response()
}
