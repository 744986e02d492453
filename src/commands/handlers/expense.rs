//! Expense intent handler
//!
//! Handles: log_expense
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
use crate::features::expenses::{detect_category, parse_amount};

const NO_AMOUNT: &str =
    "I couldn't find an amount in your message. Try saying something like 'I spent 150 on food'.";

/// Handler for log_expense
pub struct ExpenseHandler;

#[async_trait]
impl IntentHandler for ExpenseHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["log_expense"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        _intent: &str,
        utterance: &str,
    ) -> Result<Reply> {
        let Some(amount) = parse_amount(utterance).filter(|a| *a > 0.0) else {
            return Ok(Reply::text(NO_AMOUNT));
        };
        let category = detect_category(utterance);

        let expense_id = ctx.database.add_expense(amount, category, utterance).await?;
        let total = ctx.database.get_total_expenses_today().await?;
        info!("Logged expense {expense_id}: {amount:.2} ({category})");

        let currency = &ctx.currency;
        Ok(Reply::text(format!(
            "Logged expense: {currency}{amount:.2} under '{category}'. \
             Your total spending today is {currency}{total:.2}."
        )))
    }
}
