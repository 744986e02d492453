//! # Core Module
//!
//! Configuration and the reply type shared by every handler.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod config;
pub mod response;

pub use config::Config;
pub use response::{capitalize, Reply, CLARIFICATION, EMPTY_INPUT, FALLBACK, INTERNAL_ERROR};
