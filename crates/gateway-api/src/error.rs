//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gateway_core::DomainError;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound(String),
    /// 406 Not Acceptable (invalid address, blank fields, gateway full)
    NotAcceptable(String),
    /// 409 Conflict (duplicate identifier or address)
    Conflict(String),
    /// 424 Failed Dependency (peripheral owned by another gateway)
    FailedDependency(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::NotAcceptable(msg) => (StatusCode::NOT_ACCEPTABLE, "not_acceptable", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::FailedDependency(msg) => {
                (StatusCode::FAILED_DEPENDENCY, "failed_dependency", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.parts();

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(error = error_type, %message, "API client error");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotFound { .. } => ApiError::NotFound(message),
            DomainError::DuplicateId { .. } | DomainError::DuplicateIpv4 { .. } => {
                ApiError::Conflict(message)
            }
            DomainError::InvalidIpv4 { .. }
            | DomainError::BlankFields { .. }
            | DomainError::CapacityExceeded { .. } => ApiError::NotAcceptable(message),
            DomainError::NotOwner { .. } => ApiError::FailedDependency(message),
            DomainError::Storage(_) => ApiError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_domain_errors_map_to_status() {
        assert_eq!(status_of(DomainError::gateway_not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::peripheral_not_found(1)), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::duplicate_gateway("x")), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::duplicate_ipv4("x")), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::invalid_ipv4("x")), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(
            status_of(DomainError::blank_fields("Create", "Gateway")),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            status_of(DomainError::capacity_exceeded("x", 10)),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(status_of(DomainError::not_owner("x", 1)), StatusCode::FAILED_DEPENDENCY);
        assert_eq!(
            status_of(DomainError::Storage("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_agrees_with_domain_codes() {
        let errors = [
            DomainError::gateway_not_found("x"),
            DomainError::duplicate_peripheral(2),
            DomainError::invalid_ipv4("x"),
            DomainError::not_owner("x", 1),
            DomainError::Storage("down".into()),
        ];
        for err in errors {
            let expected = err.status_code();
            assert_eq!(status_of(err).as_u16(), expected);
        }
    }

    #[test]
    fn test_message_is_kept() {
        let api: ApiError = DomainError::duplicate_gateway("RECM12345M8C").into();
        match api {
            ApiError::Conflict(msg) => {
                assert_eq!(msg, "Gateway with serial number : 'RECM12345M8C', already exists.")
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
