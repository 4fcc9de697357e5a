//! Webhook fulfillment response

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{messages::Message, request::Context};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_event_input: Option<EventInput>,
}

/// Event to trigger on the agent instead of answering directly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl Fulfillment {
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            fulfillment_messages: messages,
            ..Self::default()
        }
    }
}
