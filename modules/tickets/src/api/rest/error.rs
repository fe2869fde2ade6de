use api_ingress::AppError;

use crate::domain::error::DomainError;

/// Map a domain error to the HTTP error. Every ticket failure is a 400 with
/// the domain message as body, including unknown ids.
pub fn map_domain_error(e: &DomainError) -> AppError {
    if !e.is_validation() {
        tracing::debug!(error = ?e, "Ticket lookup failed");
    }
    AppError::bad_request(e.to_string())
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        map_domain_error(&e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_is_bad_request() {
        let err = map_domain_error(&DomainError::ticket_not_found("abc"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Ticket not found");
    }

    #[test]
    fn validation_keeps_message() {
        let err: AppError = DomainError::invalid_method(Some("x".into())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid method");
    }
}
