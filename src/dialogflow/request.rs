//! Incoming webhook request and parameter extraction

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("query parameters do not match the requested shape: {0}")]
    Parameters(#[source] serde_json::Error),
    #[error("context `{0}` is not present in the request")]
    UnknownContext(String),
    #[error("parameters of context `{name}` do not match the requested shape: {source}")]
    ContextParameters {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub response_id: String,
    #[serde(default)]
    pub session: String,
    pub query_result: QueryResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_detect_intent_request: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: String,
    #[serde(default)]
    pub language_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_recognition_confidence: Option<f64>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub all_required_params_present: bool,
    #[serde(default)]
    pub fulfillment_text: String,
    /// Kept opaque: the platform may echo message kinds this crate does not model.
    #[serde(default)]
    pub fulfillment_messages: Vec<Value>,
    #[serde(default)]
    pub webhook_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_payload: Option<Value>,
    #[serde(default)]
    pub output_contexts: Vec<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_detection_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_info: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_fallback: bool,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifespan_count: None,
            parameters: Map::new(),
        }
    }

    /// Last segment of the context name, e.g. `my-context` for
    /// `projects/p/agent/sessions/s/contexts/my-context`.
    pub fn short_name(&self) -> &str {
        last_segment(&self.name)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.short_name() == name
    }
}

impl Request {
    /// Decodes the top-level query parameters into `T`.
    pub fn params<T: DeserializeOwned>(&self) -> Result<T, ExtractError> {
        decode_parameters(&self.query_result.parameters).map_err(ExtractError::Parameters)
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.query_result
            .output_contexts
            .iter()
            .find(|context| context.matches(name))
    }

    /// Decodes the parameters of the first output context called `name` into `T`.
    pub fn context_params<T: DeserializeOwned>(&self, name: &str) -> Result<T, ExtractError> {
        let context = self
            .context(name)
            .ok_or_else(|| ExtractError::UnknownContext(name.to_string()))?;

        decode_parameters(&context.parameters).map_err(|source| ExtractError::ContextParameters {
            name: name.to_string(),
            source,
        })
    }

    pub fn action(&self) -> Option<&str> {
        non_empty(&self.query_result.action)
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.query_result
            .intent
            .as_ref()
            .and_then(|intent| non_empty(&intent.display_name))
    }

    pub fn session_id(&self) -> Option<&str> {
        non_empty(last_segment(&self.session))
    }
}

fn decode_parameters<T: DeserializeOwned>(
    parameters: &Map<String, Value>,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(parameters.clone()))
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
