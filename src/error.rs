// Error handling for routemap

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::fmt;

/// Errors raised while registering or compiling a route.
///
/// All of them are configuration errors: they surface when a route is added
/// to the table, before any request is matched against it.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    /// A parameter has both an inline default and an explicit default
    DefaultConflict { parameter: String },
    /// The template could not be parsed
    InvalidTemplate { template: String, reason: String },
    /// A constraint is not a valid pattern
    InvalidConstraint { parameter: String, reason: String },
    /// The same parameter name appears twice in one template
    DuplicateParameter { parameter: String },
    /// Two placeholders follow each other with no literal text between them
    AdjacentPlaceholders { first: String, second: String },
    /// A route with this name is already registered
    DuplicateRouteName { name: String },
    /// Registration input is neither a template nor a route definition
    InvalidRoute(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::DefaultConflict { parameter } => write!(
                f,
                "The route parameter \"{}\" has both an inline default value and an explicit default value specified. \
                 A route parameter cannot contain an inline default value when a default value is specified explicitly.",
                parameter
            ),
            RouteError::InvalidTemplate { template, reason } => {
                write!(f, "Invalid route template \"{}\": {}", template, reason)
            }
            RouteError::InvalidConstraint { parameter, reason } => {
                write!(f, "Invalid constraint for route parameter \"{}\": {}", parameter, reason)
            }
            RouteError::DuplicateParameter { parameter } => {
                write!(f, "The route parameter \"{}\" appears more than once", parameter)
            }
            RouteError::AdjacentPlaceholders { first, second } => write!(
                f,
                "The route parameters \"{}\" and \"{}\" must be separated by literal text",
                first, second
            ),
            RouteError::DuplicateRouteName { name } => {
                write!(f, "A route named \"{}\" is already registered", name)
            }
            RouteError::InvalidRoute(msg) => {
                write!(f, "A route template or route definition is expected: {}", msg)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Application error type for the HTTP service
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Implement IntoResponse so Axum can convert errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conflict_message_names_parameter() {
        let err = RouteError::DefaultConflict {
            parameter: "id".to_string(),
        };
        assert!(err.to_string().contains("\"id\""));
        assert!(err.to_string().contains("inline default"));
    }

    #[test]
    fn test_route_error_maps_to_bad_request() {
        let err: AppError = RouteError::DuplicateRouteName {
            name: "home".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
