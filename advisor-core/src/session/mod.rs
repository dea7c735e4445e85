//! Session management for the advisor conversation
//!
//! A session owns the ordered message history plus the request status.
//! History is persisted as JSON through an injectable storage backend
//! so the conversation survives program restarts.

pub mod manager;
pub mod message;
pub mod storage;
pub mod store;

pub use manager::SessionManager;
pub use message::{Author, Message};
pub use storage::{FileHistoryStore, HistoryStore, MemoryHistoryStore};
pub use store::{Session, SessionStatus};
