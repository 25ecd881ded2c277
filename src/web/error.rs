use crate::components::meeting_form::FieldError;
use crate::components::notice::Notice;
use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

/// Error returned by API handlers, rendered as a JSON notice
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: Error,
}

impl ApiError {
    /// Wrap an error with an explicit status code
    pub fn with_status(status: StatusCode, error: Error) -> Self {
        Self { status, error }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Status code for a crate error
pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) | Error::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::SlotUnavailable { .. } | Error::StaleWrite { .. } => StatusCode::CONFLICT,
        Error::NotFound(_) | Error::UnknownSlot(_) => StatusCode::NOT_FOUND,
        Error::Completion(_) | Error::Email(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self {
            status: status_for(&error),
            error,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    notice: Notice,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Request failed: {}", self.error);
        } else {
            warn!("Request rejected: {}", self.error);
        }

        let fields = match &self.error {
            Error::Validation(errors) => errors.errors.clone(),
            _ => Vec::new(),
        };
        let body = ErrorBody {
            error: self.error.to_string(),
            notice: Notice::from_error(&self.error),
            fields,
        };

        (self.status, Json(body)).into_response()
    }
}
