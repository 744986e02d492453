//! App launch and web search intent handlers
//!
//! Handles: open_app, search_google
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::commands::context::AssistantContext;
use crate::commands::handler::IntentHandler;
use crate::core::Reply;
use crate::features::launcher::{extract_app_name, extract_query, open_app, search_url};

/// Handler for open_app and search_google
pub struct LaunchHandler;

#[async_trait]
impl IntentHandler for LaunchHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["open_app", "search_google"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        intent: &str,
        utterance: &str,
    ) -> Result<Reply> {
        let text = match intent {
            "open_app" => self.handle_open(&ctx, utterance),
            "search_google" => self.handle_search(&ctx, utterance)?,
            _ => crate::core::FALLBACK.to_string(),
        };
        Ok(Reply::text(text))
    }
}

impl LaunchHandler {
    fn handle_open(&self, ctx: &AssistantContext, utterance: &str) -> String {
        let app_name = extract_app_name(utterance);
        if app_name.is_empty() {
            return "Which app would you like me to open?".to_string();
        }

        match open_app(ctx.launcher.as_ref(), &app_name) {
            Some(_) => format!("Opening {app_name}…"),
            None => {
                warn!("No command found for app {app_name:?}");
                format!(
                    "I couldn't find '{app_name}' on this system. \
                     Make sure it's installed and in your PATH."
                )
            }
        }
    }

    fn handle_search(&self, ctx: &AssistantContext, utterance: &str) -> Result<String> {
        let query = extract_query(utterance);
        if query.is_empty() {
            return Ok("What would you like me to search for?".to_string());
        }

        ctx.launcher.open_url(&search_url(&query))?;
        info!("Opened search for {query:?}");
        Ok(format!("Searching Google for: {query}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::tests::{test_context, test_context_with_programs};

    #[tokio::test]
    async fn test_open_known_app() {
        let t = test_context_with_programs(&["gnome-calculator"]).await;
        let reply = LaunchHandler
            .handle(t.ctx.clone(), "open_app", "Open Calculator")
            .await
            .unwrap();

        assert_eq!(reply.text, "Opening calculator…");
        assert_eq!(t.launcher.launched(), vec!["gnome-calculator"]);
    }

    #[tokio::test]
    async fn test_open_missing_app() {
        let t = test_context().await;
        let reply = LaunchHandler
            .handle(t.ctx.clone(), "open_app", "launch blender")
            .await
            .unwrap();
        assert_eq!(
            reply.text,
            "I couldn't find 'blender' on this system. Make sure it's installed and in your PATH."
        );

        let reply = LaunchHandler
            .handle(t.ctx.clone(), "open_app", "open")
            .await
            .unwrap();
        assert_eq!(reply.text, "Which app would you like me to open?");
    }

    #[tokio::test]
    async fn test_search_opens_browser() {
        let t = test_context().await;
        let reply = LaunchHandler
            .handle(t.ctx.clone(), "search_google", "search for rust tutorials")
            .await
            .unwrap();

        assert_eq!(reply.text, "Searching Google for: rust tutorials");
        assert_eq!(
            t.launcher.launched(),
            vec!["https://www.google.com/search?q=rust+tutorials"]
        );

        let reply = LaunchHandler
            .handle(t.ctx.clone(), "search_google", "search")
            .await
            .unwrap();
        assert_eq!(reply.text, "What would you like me to search for?");
    }
}
