use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

use super::payload::ErrorResponse;
use crate::domain::error::AppError;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Record a failed request before it is rendered.
pub(super) fn log_failure(route: &str, err: &AppError) {
    if err.is_client_error() {
        warn!(route, error = %err, "Request rejected");
    } else {
        error!(route, error = %err, "Request failed");
    }
}
