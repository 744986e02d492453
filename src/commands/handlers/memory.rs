//! Memory intent handler
//!
//! Handles: store_memory
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::AssistantContext;
use crate::commands::handler::IntentHandler;
use crate::core::Reply;

/// Leading phrases dropped from the note, checked in order
const MEMORY_PREFIXES: &[&str] = &[
    "remember that",
    "save this",
    "note that",
    "store",
    "remember",
    "save",
];

/// Handler for store_memory
pub struct MemoryHandler;

#[async_trait]
impl IntentHandler for MemoryHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["store_memory"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        _intent: &str,
        utterance: &str,
    ) -> Result<Reply> {
        let content = memory_content(utterance);
        if content.is_empty() {
            return Ok(Reply::text(
                "I didn't catch what to remember. Could you repeat that?",
            ));
        }

        let memory_id = ctx.database.add_memory(content).await?;
        info!("Stored memory {memory_id}");
        Ok(Reply::text(format!("Memory saved: \"{content}\".")))
    }
}

/// The note with any leading "remember that"/"save"-style phrase removed
pub fn memory_content(text: &str) -> &str {
    let lowered = text.to_lowercase();
    let stripped = MEMORY_PREFIXES
        .iter()
        .find(|prefix| lowered.starts_with(*prefix))
        .and_then(|prefix| text.get(prefix.len()..))
        .map(|rest| rest.trim_matches([' ', ':', '.']));
    stripped.unwrap_or(text)
}
