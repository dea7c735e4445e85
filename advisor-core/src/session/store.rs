//! Session state machine
//!
//! All transitions here are pure state updates. Persistence and network
//! I/O are orchestrated by [`SessionManager`](super::manager::SessionManager).

use super::message::{Author, Message};
use crate::{Error, Result};

/// Request lifecycle status of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Ready for input
    #[default]
    Idle,
    /// One request is in flight
    AwaitingResponse,
    /// The last request failed; carries the detail shown as a banner
    Error(String),
}

/// A conversation session: ordered message history plus request status
#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    status: SessionStatus,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            status: SessionStatus::Idle,
        }
    }

    /// Create a session restored from previously stored history
    pub fn with_history(messages: Vec<Message>) -> Self {
        Self {
            messages,
            status: SessionStatus::Idle,
        }
    }

    /// Messages in append order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Current request status
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Whether a request is currently in flight
    pub fn is_awaiting(&self) -> bool {
        self.status == SessionStatus::AwaitingResponse
    }

    /// Error detail of the last failed request, if any
    pub fn error_detail(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Error(detail) => Some(detail),
            _ => None,
        }
    }

    /// Append the user's question and enter the in-flight state.
    ///
    /// Blank input is rejected without touching the session. Entering the
    /// in-flight state drops any error detail from a previous attempt;
    /// there is no separate dismiss action.
    pub fn submit(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(Error::Validation("message must not be empty".into()));
        }
        if self.is_awaiting() {
            return Err(Error::ConcurrentRequest);
        }

        self.messages.push(Message::new(Author::User, text));
        self.status = SessionStatus::AwaitingResponse;
        Ok(())
    }

    /// Append the service's reply and return to the idle state
    pub fn resolve(&mut self, content: impl Into<String>) -> Result<()> {
        if !self.is_awaiting() {
            return Err(Error::Session("no request in flight to resolve".into()));
        }

        self.messages.push(Message::new(Author::Agent, content));
        self.status = SessionStatus::Idle;
        Ok(())
    }

    /// Record a failed request.
    ///
    /// The question that triggered it stays in the history; only the
    /// status changes.
    pub fn fail(&mut self, detail: impl Into<String>) -> Result<()> {
        if !self.is_awaiting() {
            return Err(Error::Session("no request in flight to fail".into()));
        }

        self.status = SessionStatus::Error(detail.into());
        Ok(())
    }

    /// Drop all messages and any error state
    pub fn clear(&mut self) {
        self.messages.clear();
        self.status = SessionStatus::Idle;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
