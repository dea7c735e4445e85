//! HTTP clients for the advisor backend
//!
//! This crate provides the chat transport used by the session manager and
//! the bulk AI-detection client.

pub mod chat;
pub mod detection;

pub use chat::ChatClient;
pub use detection::{DetectionClient, DetectionMetrics, DetectionReport};
