use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::dialogflow::ExtractError;

/// Rejections of a webhook call. The platform only ever sees a bare `400 Bad Request`; the cause
/// stays in the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("webhook body could not be read: {0}")]
    UnreadableBody(#[source] BytesRejection),
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnreadableBody(_) => "unreadable_body",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Extract(ExtractError::Parameters(_)) => "invalid_parameters",
            Self::Extract(ExtractError::UnknownContext(_)) => "unknown_context",
            Self::Extract(ExtractError::ContextParameters { .. }) => "invalid_context_parameters",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(code = self.code(), error = %self, "webhook request rejected");
        StatusCode::BAD_REQUEST.into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header;

    use super::*;

    #[test]
    fn every_error_is_a_bare_bad_request() {
        let errors = [
            AppError::MalformedPayload(
                serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json"),
            ),
            AppError::from(ExtractError::UnknownContext("ctx".to_string())),
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        }
    }

    #[test]
    fn codes_distinguish_causes_for_logging() {
        let err = AppError::from(ExtractError::UnknownContext("ctx".to_string()));
        assert_eq!(err.code(), "unknown_context");
        assert_eq!(err.to_string(), "context `ctx` is not present in the request");
    }
}
