//! HTTP transport for the fulfillment webhook
//!
//! Provides the `/webhook` endpoint called by the agent platform, plus a health probe.

pub mod handlers;
