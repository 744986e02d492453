//! Reminder intent handler
//!
//! Handles: set_reminder
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Time-of-day reminders parsed from free text
//! - 1.0.0: Extracted from the monolithic dispatcher

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::commands::context::AssistantContext;
use crate::commands::handler::IntentHandler;
use crate::core::Reply;
use crate::features::reminders::{parse_reminder, TimeError};

const NO_TIME: &str = "I couldn't figure out the time for the reminder. \
                       Please say something like 'remind me to drink water at 3 pm'.";

/// Handler for set_reminder
pub struct RemindHandler;

#[async_trait]
impl IntentHandler for RemindHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["set_reminder"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        _intent: &str,
        utterance: &str,
    ) -> Result<Reply> {
        let parsed = match parse_reminder(utterance) {
            Ok(parsed) => parsed,
            Err(TimeError::Missing) => {
                debug!("No time expression in {utterance:?}");
                return Ok(Reply::text(NO_TIME));
            }
            Err(e @ TimeError::OutOfRange { .. }) => {
                debug!("Rejected reminder time: {e:?}");
                return Ok(Reply::text(NO_TIME));
            }
        };

        let reminder_id = ctx
            .database
            .add_reminder(&parsed.message, &parsed.remind_at)
            .await?;
        info!(
            "Created reminder {reminder_id} for {} ({})",
            parsed.remind_at, parsed.message
        );

        Ok(Reply::text(format!(
            "Got it! I'll remind you to {} at {}.",
            parsed.message, parsed.remind_at
        )))
    }
}
