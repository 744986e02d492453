//! Study mode intent handler
//!
//! Handles: study_mode
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
use crate::features::study::start_session;

/// Handler for study_mode
pub struct StudyHandler;

#[async_trait]
impl IntentHandler for StudyHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["study_mode"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        _intent: &str,
        _utterance: &str,
    ) -> Result<Reply> {
        let handle = start_session(ctx.study.clone(), Arc::clone(&ctx.notifier));
        ctx.track_study_session(handle).await;
        info!("Study session started");
        Ok(Reply::text(ctx.study.confirmation()))
    }
}
