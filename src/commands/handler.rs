//! Intent handler trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Handlers receive the raw utterance and return a `Reply`
//! - 1.0.0: Initial implementation for modular intent handling

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::AssistantContext;
use crate::core::Reply;

/// Trait for intent handlers
///
/// Each handler implements this trait to process one or more intent labels.
/// Handlers are registered with a HandlerRegistry and dispatched by label.
///
/// # Example
///
/// ```ignore
/// pub struct TimeHandler;
///
/// #[async_trait]
/// impl IntentHandler for TimeHandler {
///     fn intent_names(&self) -> &'static [&'static str] {
///         &["tell_time"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<AssistantContext>,
///         intent: &str,
///         utterance: &str,
///     ) -> Result<Reply> {
///         Ok(Reply::text("It is noon."))
///     }
/// }
/// ```
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// Intent label(s) this handler processes
    ///
    /// A handler can process multiple intents if they share logic.
    fn intent_names(&self) -> &'static [&'static str];

    /// Handle one utterance
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared context with storage, notifier, launcher and user name
    /// * `intent` - The label the utterance was classified as
    /// * `utterance` - The trimmed user text, casing preserved
    ///
    /// Extraction problems are answered with a clarification `Reply`;
    /// only storage and launcher failures come back as `Err`.
    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        intent: &str,
        utterance: &str,
    ) -> Result<Reply>;
}
