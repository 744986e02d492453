//! Daily summary intent handler
//!
//! Handles: daily_summary
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::AssistantContext;
use crate::commands::handler::IntentHandler;
use crate::core::Reply;
use crate::database::{Expense, Reminder};

/// Handler for daily_summary
pub struct SummaryHandler;

#[async_trait]
impl IntentHandler for SummaryHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["daily_summary"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        _intent: &str,
        _utterance: &str,
    ) -> Result<Reply> {
        let name = ctx.user_name().await;
        let reminders = ctx.database.get_todays_reminders().await?;
        let expenses = ctx.database.get_todays_expenses().await?;
        let total = ctx.database.get_total_expenses_today().await?;
        let memory_count = ctx.database.get_all_memories().await?.len();

        Ok(Reply::text(format_summary(
            name.as_deref(),
            &reminders,
            &expenses,
            total,
            memory_count,
            &ctx.currency,
        )))
    }
}

pub fn format_summary(
    name: Option<&str>,
    reminders: &[Reminder],
    expenses: &[Expense],
    total: f64,
    memory_count: usize,
    currency: &str,
) -> String {
    let mut lines = Vec::new();
    if let Some(name) = name {
        lines.push(format!("Here is your daily summary, {name}."));
    }

    if reminders.is_empty() {
        lines.push("No reminders set for today.".to_string());
    } else {
        lines.push(format!("You have {} reminder(s):", reminders.len()));
        for reminder in reminders {
            let status = if reminder.notified { "✔ done" } else { "⏳ pending" };
            lines.push(format!(
                "  • {} at {} ({status})",
                reminder.message, reminder.remind_at
            ));
        }
    }

    if expenses.is_empty() {
        lines.push("No expenses logged today.".to_string());
    } else {
        lines.push(format!(
            "Today's expenses total {currency}{total:.2} across {} transaction(s).",
            expenses.len()
        ));
    }

    lines.push(format!("You have {memory_count} stored memory/memories."));
    lines.join("  ")
}
