//! Core types and traits for advisor
//!
//! This crate provides the session state machine, history storage,
//! code-block formatting and configuration used by all other advisor
//! components.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod request;
pub mod session;
pub mod utils;

pub use error::{Error, Result};
