//! # Assistant
//!
//! Request/response boundary: one utterance in, one [`Reply`] out. Owns
//! the router and the shared handler context, and keeps the user's name
//! in sync with storage.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

use crate::commands::{AssistantContext, CommandRouter};
use crate::core::{capitalize, Reply, EMPTY_INPUT, INTERNAL_ERROR};

/// Lead-ins people use when introducing themselves
const NAME_FILLERS: &[&str] = &["i am", "i'm", "my name is", "call me"];

/// "I'm John" -> "John". Only the first filler found is removed.
pub fn extract_name(response: &str) -> String {
    let lowered = response.to_lowercase();
    let name = NAME_FILLERS
        .iter()
        .find(|filler| lowered.contains(*filler))
        .map(|filler| lowered.replace(filler, ""))
        .unwrap_or_else(|| response.to_string());
    capitalize(name.trim())
}

pub struct Assistant {
    ctx: Arc<AssistantContext>,
    router: CommandRouter,
}

impl Assistant {
    /// Build the assistant and load the stored user name, if any
    pub async fn new(ctx: Arc<AssistantContext>, router: CommandRouter) -> Result<Self> {
        let name = ctx.database.get_user_name().await?;
        if let Some(name) = &name {
            info!("Welcome back, {name}");
        }
        ctx.set_user_name(name).await;
        Ok(Self { ctx, router })
    }

    pub fn context(&self) -> Arc<AssistantContext> {
        Arc::clone(&self.ctx)
    }

    /// Answer one utterance. Never fails: errors are logged and answered
    /// with a generic apology.
    pub async fn process(&self, utterance: &str) -> Reply {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Reply::text(EMPTY_INPUT);
        }

        match self.router.route(Arc::clone(&self.ctx), utterance).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Failed to handle {utterance:?}: {e:#}");
                Reply::text(INTERNAL_ERROR)
            }
        }
    }

    pub async fn user_name(&self) -> Option<String> {
        self.ctx.user_name().await
    }

    /// Store the user's name (capitalised); returns what was stored
    pub async fn set_user_name(&self, name: &str) -> Result<Option<String>> {
        let name = capitalize(name.trim());
        if name.is_empty() {
            return Ok(None);
        }
        self.ctx.database.save_user_name(&name).await?;
        self.ctx.set_user_name(Some(name.clone())).await;
        info!("User name set to {name}");
        Ok(Some(name))
    }

    /// Delete every reminder, expense, memory and contact. The profile stays.
    pub async fn reset_all(&self) -> Result<()> {
        self.ctx.database.clear_all_data().await?;
        info!("All assistant data cleared");
        Ok(())
    }

    /// Stop background work started on behalf of the user
    pub async fn shutdown(&self) {
        self.ctx.stop_study_sessions().await;
    }
}
