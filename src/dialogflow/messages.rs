//! Rich fulfillment messages
//!
//! A [`Message`] carries an optional target platform and exactly one [`RichMessage`]. On the wire
//! the rich message is a single key next to `platform`, for example
//! `{"platform":"ACTIONS_ON_GOOGLE","simpleResponses":{...}}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    #[default]
    PlatformUnspecified,
    Facebook,
    Slack,
    Telegram,
    Kik,
    Skype,
    Line,
    Viber,
    ActionsOnGoogle,
    GoogleHangouts,
}

impl Platform {
    pub fn is_unspecified(&self) -> bool {
        *self == Self::PlatformUnspecified
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Platform::is_unspecified")]
    pub platform: Platform,
    #[serde(flatten)]
    pub rich_message: RichMessage,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RichMessage {
    Text(Text),
    Image(Image),
    QuickReplies(QuickReplies),
    Card(Card),
    SimpleResponses(SimpleResponses),
    BasicCard(BasicCard),
    Suggestions(Suggestions),
    LinkOutSuggestion(LinkOutSuggestion),
    /// Platform-specific custom payload, passed through untouched.
    Payload(Map<String, Value>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Text {
    #[serde(default)]
    pub text: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReplies {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<CardButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponses {
    #[serde(default)]
    pub simple_responses: Vec<SimpleResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_to_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssml: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<BasicCardButton>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicCardButton {
    pub title: String,
    pub open_uri_action: OpenUriAction,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OpenUriAction {
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Suggestions {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Suggestion {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOutSuggestion {
    pub destination_name: String,
    pub uri: String,
}

impl Message {
    pub fn new(rich_message: RichMessage) -> Self {
        Self::for_platform(Platform::PlatformUnspecified, rich_message)
    }

    pub fn for_platform(platform: Platform, rich_message: RichMessage) -> Self {
        Self {
            platform,
            rich_message,
        }
    }

    pub fn for_google(rich_message: RichMessage) -> Self {
        Self::for_platform(Platform::ActionsOnGoogle, rich_message)
    }

    /// Plain text message shown on every platform.
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RichMessage::Text(Text {
            text: lines.into_iter().map(Into::into).collect(),
        }))
    }
}

impl RichMessage {
    /// A simple response with one entry, spoken as `speech` and displayed as `display`.
    pub fn single_simple_response(display: impl Into<String>, speech: impl Into<String>) -> Self {
        Self::SimpleResponses(SimpleResponses {
            simple_responses: vec![SimpleResponse {
                text_to_speech: Some(speech.into()),
                ssml: None,
                display_text: Some(display.into()),
            }],
        })
    }
}
