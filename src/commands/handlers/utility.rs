//! Utility intent handlers
//!
//! Handles: greeting, tell_time, exit
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Intent-based replies for the console assistant
//! - 1.0.0: Extracted from the monolithic dispatcher

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Timelike};
use log::info;
use std::sync::Arc;

use crate::commands::context::AssistantContext;
use crate::commands::handler::IntentHandler;
use crate::core::Reply;

/// Handler for greeting, tell_time and exit
pub struct UtilityHandler;

#[async_trait]
impl IntentHandler for UtilityHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["greeting", "tell_time", "exit"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        intent: &str,
        _utterance: &str,
    ) -> Result<Reply> {
        let name = ctx.user_name().await;
        let now = Local::now();
        let reply = match intent {
            "greeting" => Reply::text(greeting(now.hour(), name.as_deref())),
            "tell_time" => Reply::text(tell_time(&now)),
            "exit" => {
                info!("Exit requested");
                Reply::farewell(farewell(name.as_deref()))
            }
            _ => Reply::text(crate::core::FALLBACK),
        };
        Ok(reply)
    }
}

pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

pub fn greeting(hour: u32, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{}, {name}! How can I help you today?", time_of_day(hour)),
        None => format!("{}! How can I assist you?", time_of_day(hour)),
    }
}

pub fn tell_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "The current time is {} and today is {}.",
        now.format("%I:%M %p"),
        now.format("%A, %d %B %Y")
    )
}

pub fn farewell(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Goodbye, {name}! Have a great day!"),
        None => "Goodbye! Have a great day!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::tests::test_context;
    use chrono::Utc;

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(time_of_day(0), "Good morning");
        assert_eq!(time_of_day(11), "Good morning");
        assert_eq!(time_of_day(12), "Good afternoon");
        assert_eq!(time_of_day(16), "Good afternoon");
        assert_eq!(time_of_day(17), "Good evening");
        assert_eq!(time_of_day(23), "Good evening");
    }

    #[test]
    fn test_greeting_personalised() {
        assert_eq!(
            greeting(9, Some("Asha")),
            "Good morning, Asha! How can I help you today?"
        );
        assert_eq!(greeting(20, None), "Good evening! How can I assist you?");
    }

    #[test]
    fn test_tell_time_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 15, 7, 0).unwrap();
        assert_eq!(
            tell_time(&now),
            "The current time is 03:07 PM and today is Tuesday, 05 March 2024."
        );
    }

    #[tokio::test]
    async fn test_exit_is_terminal() {
        let t = test_context().await;
        t.ctx.set_user_name(Some("Ravi".into())).await;

        let reply = UtilityHandler.handle(t.ctx.clone(), "exit", "bye").await.unwrap();
        assert!(reply.exit);
        assert_eq!(reply.text, "Goodbye, Ravi! Have a great day!");

        let reply = UtilityHandler
            .handle(t.ctx.clone(), "greeting", "hello")
            .await
            .unwrap();
        assert!(!reply.exit);
        assert!(reply.text.contains("Ravi"));
    }
}
