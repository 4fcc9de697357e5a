//! Dialogflow v2 webhook data model
//!
//! Request payloads sent by the agent platform, and the fulfillment responses the webhook
//! answers with.

pub mod fulfillment;
pub mod messages;
pub mod request;

pub use fulfillment::{EventInput, Fulfillment};
pub use messages::{Message, Platform, RichMessage};
pub use request::{Context, ExtractError, Intent, QueryResult, Request};
