//! # Command System
//!
//! Intent dispatch for the assistant: a router in front of a registry of
//! per-intent handlers.
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Confidence-gated router over intent handlers
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod router;

pub use context::AssistantContext;
pub use handler::IntentHandler;
pub use handlers::create_all_handlers;
pub use registry::HandlerRegistry;
pub use router::CommandRouter;
