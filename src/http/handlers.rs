//! Axum HTTP handlers for the web server

use axum::{body::Bytes, extract::rejection::BytesRejection, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialogflow::{Fulfillment, Message, Request, RichMessage};
use crate::errors::AppError;

/// Context whose parameters the webhook reads on every call.
pub const AWESOME_CONTEXT: &str = "my-awesome-context";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct Params {
    pub city: String,
    pub gender: String,
    pub age: i64,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn webhook(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Fulfillment>, AppError> {
    let body = body.map_err(AppError::UnreadableBody)?;
    fulfill(&body).map(Json)
}

/// Decodes a webhook call and builds its fulfillment.
///
/// The context parameters replace the query parameters; both extractions have to succeed.
pub fn fulfill(body: &[u8]) -> Result<Fulfillment, AppError> {
    let request: Request = serde_json::from_slice(body).map_err(AppError::MalformedPayload)?;

    let mut params: Params = request.params()?;
    debug!(
        city = %params.city,
        gender = %params.gender,
        age = params.age,
        "query parameters extracted"
    );

    params = request.context_params(AWESOME_CONTEXT)?;
    debug!(
        context = AWESOME_CONTEXT,
        city = %params.city,
        gender = %params.gender,
        age = params.age,
        "context parameters extracted"
    );

    Ok(Fulfillment::with_messages(vec![
        Message::for_google(RichMessage::single_simple_response("hello", "hello")),
        Message::text(["hello"]),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "responseId": "r-1",
        "session": "projects/demo/agent/sessions/s-1",
        "queryResult": {
            "queryText": "hi",
            "parameters": {"city": "Berlin", "gender": "female", "age": 31},
            "outputContexts": [{
                "name": "projects/demo/agent/sessions/s-1/contexts/my-awesome-context",
                "lifespanCount": 5,
                "parameters": {"city": "Hamburg", "gender": "female", "age": 32}
            }]
        }
    }"#;

    #[test]
    fn valid_request_yields_two_messages() {
        let fulfillment = fulfill(VALID.as_bytes()).expect("fulfillment");

        assert_eq!(fulfillment.fulfillment_messages.len(), 2);
        assert_eq!(
            fulfillment.fulfillment_messages[1],
            Message::text(["hello"])
        );
    }

    #[test]
    fn truncated_body_is_malformed() {
        let err = fulfill(&VALID.as_bytes()[..40]).expect_err("truncated");
        assert!(matches!(err, AppError::MalformedPayload(_)));
    }

    #[test]
    fn negative_and_large_ages_fulfill() {
        for age in ["-1", "5000000000"] {
            let body = VALID.replace("\"age\": 31", &format!("\"age\": {age}"));
            assert!(fulfill(body.as_bytes()).is_ok(), "age {age} should fulfill");
        }
    }

    #[test]
    fn trailing_data_after_request_is_malformed() {
        let body = format!("{VALID}\n{{}}");

        let err = fulfill(body.as_bytes()).expect_err("trailing value");
        assert!(matches!(err, AppError::MalformedPayload(_)));
    }

    #[test]
    fn context_is_required_even_when_query_params_decode() {
        let body = r#"{"queryResult":{"parameters":{"city":"Berlin","gender":"male","age":40}}}"#;

        let err = fulfill(body.as_bytes()).expect_err("missing context");
        assert_eq!(err.code(), "unknown_context");
    }

    #[test]
    fn query_params_are_checked_before_context() {
        let body = r#"{"queryResult":{
            "parameters":{"city":"Berlin","gender":"male","age":"40"},
            "outputContexts":[{"name":"my-awesome-context","parameters":{"city":"Berlin","gender":"male","age":40}}]
        }}"#;

        let err = fulfill(body.as_bytes()).expect_err("bad age");
        assert_eq!(err.code(), "invalid_parameters");
    }
}
