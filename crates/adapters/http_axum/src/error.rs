//! HTTP error response mapping.

use askama::Template;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use wvadmin_domain::error::AdminError;

/// Status code and public message for an error.
///
/// Storage and host failures are logged and reported generically.
fn classify(err: &AdminError) -> (StatusCode, String) {
    match err {
        AdminError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        AdminError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        AdminError::Storage(source) => {
            tracing::error!(error = %source, "storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
        AdminError::Host(source) => {
            tracing::error!(error = %source, cause = ?source.source(), "host error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`AdminError`] to a JSON response with appropriate status code.
pub struct ApiError(AdminError);

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

/// Maps [`AdminError`] to an HTML error page.
pub struct DashboardError(AdminError);

impl From<AdminError> for DashboardError {
    fn from(err: AdminError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        let page = ErrorTemplate {
            status: status.as_u16(),
            message,
        };
        (status, Html(page.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wvadmin_domain::error::{NotFoundError, ValidationError};

    #[test]
    fn should_map_validation_to_bad_request() {
        let (status, message) = classify(&ValidationError::PasswordMismatch.into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "passwords do not match");
    }

    #[test]
    fn should_map_not_found_to_404() {
        let err = AdminError::from(NotFoundError {
            entity: "Settings page",
            id: "nope".to_string(),
        });
        let response = DashboardError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_hide_host_failure_details() {
        let err = AdminError::Host("interfaces: permission denied".into());
        let (status, message) = classify(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "internal server error");
    }
}
