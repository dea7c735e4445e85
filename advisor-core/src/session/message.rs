//! Message data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The human side of the conversation
    User,
    /// The remote advisor service
    Agent,
}

/// A single conversation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message id
    pub id: String,
    /// Message author
    pub author: Author,
    /// Message content, may embed fenced code blocks
    pub content: String,
    /// Message timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message stamped with a fresh id and the current time
    pub fn new(author: Author, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Author::User, content)
    }

    /// Create an agent message
    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(Author::Agent, content)
    }
}
