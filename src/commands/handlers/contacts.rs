//! Contact intent handlers
//!
//! Handles: add_contact, view_contact, list_contacts, delete_contact
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Lookups answer with the stored spelling of the name
//! - 1.0.0: Initial release

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::AssistantContext;
use crate::commands::handler::IntentHandler;
use crate::core::{capitalize, Reply};
use crate::database::Contact;
use crate::features::contacts::{
    extract_delete_name, extract_lookup_name, parse_new_contact, ContactParseError,
};

/// Handler for all contact intents
pub struct ContactsHandler;

#[async_trait]
impl IntentHandler for ContactsHandler {
    fn intent_names(&self) -> &'static [&'static str] {
        &["add_contact", "view_contact", "list_contacts", "delete_contact"]
    }

    async fn handle(
        &self,
        ctx: Arc<AssistantContext>,
        intent: &str,
        utterance: &str,
    ) -> Result<Reply> {
        let text = match intent {
            "add_contact" => self.handle_add(&ctx, utterance).await?,
            "view_contact" => self.handle_view(&ctx, utterance).await?,
            "list_contacts" => self.handle_list(&ctx).await?,
            "delete_contact" => self.handle_delete(&ctx, utterance).await?,
            _ => "Contact command not recognized.".to_string(),
        };
        Ok(Reply::text(text))
    }
}

impl ContactsHandler {
    async fn handle_add(&self, ctx: &AssistantContext, utterance: &str) -> Result<String> {
        let contact = match parse_new_contact(utterance) {
            Ok(contact) => contact,
            Err(ContactParseError::NoTrigger) => {
                return Ok("Could you say 'add contact' followed by name and number?".into())
            }
            Err(ContactParseError::MissingFields) => {
                return Ok("Please provide both a name and phone number. \
                           Example: 'add contact dad 9876543210'"
                    .into())
            }
            Err(ContactParseError::InvalidPhone(raw)) => {
                return Ok(format!("That doesn't look like a valid phone number: {raw}"))
            }
        };

        ctx.database
            .add_contact(&contact.name, Some(contact.phone.as_str()), None)
            .await?;
        info!("Saved contact {}", contact.name);
        Ok(format!("✓ Saved {}'s contact: {}", contact.name, contact.phone))
    }

    async fn handle_view(&self, ctx: &AssistantContext, utterance: &str) -> Result<String> {
        let Some(name) = extract_lookup_name(utterance) else {
            return Ok("Please specify which contact you'd like to call.".into());
        };

        let Some(contact) = ctx.database.get_contact(&name).await? else {
            return Ok(format!(
                "I don't have {} in contacts. Say 'add contact {name} <number>' first.",
                capitalize(&name)
            ));
        };

        Ok(match contact.phone.as_deref().filter(|p| !p.is_empty()) {
            Some(phone) => format!("📞 {}'s number: {phone}", contact.name),
            None => format!("{}'s contact has no phone number saved.", contact.name),
        })
    }

    async fn handle_list(&self, ctx: &AssistantContext) -> Result<String> {
        let contacts = ctx.database.get_all_contacts().await?;
        if contacts.is_empty() {
            return Ok(
                "You don't have any contacts saved yet. Say 'add contact' to create one.".into(),
            );
        }
        Ok(format_contact_list(&contacts))
    }

    async fn handle_delete(&self, ctx: &AssistantContext, utterance: &str) -> Result<String> {
        let name = match extract_delete_name(utterance) {
            Ok(name) => name,
            Err(ContactParseError::NoTrigger) => {
                return Ok("Which contact would you like to delete?".into())
            }
            Err(_) => return Ok("Please specify which contact to delete.".into()),
        };

        if ctx.database.delete_contact(&name).await? {
            info!("Deleted contact {name}");
            Ok(format!("✓ Deleted {name} from contacts."))
        } else {
            Ok(format!("I don't have {name} in contacts."))
        }
    }
}

pub fn format_contact_list(contacts: &[Contact]) -> String {
    let mut lines = vec!["📞 Your Contacts:".to_string()];
    for contact in contacts {
        let mut line = format!("  • {}", contact.name);
        if let Some(phone) = contact.phone.as_deref().filter(|p| !p.is_empty()) {
            line.push_str(&format!(": {phone}"));
        }
        if let Some(email) = contact.email.as_deref().filter(|e| !e.is_empty()) {
            line.push_str(&format!(" ({email})"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::tests::test_context;

    async fn say(ctx: &Arc<AssistantContext>, intent: &str, text: &str) -> String {
        ContactsHandler
            .handle(ctx.clone(), intent, text)
            .await
            .unwrap()
            .text
    }

    #[tokio::test]
    async fn test_add_twice_updates() {
        let t = test_context().await;
        assert_eq!(
            say(&t.ctx, "add_contact", "add contact dad 9876543210").await,
            "✓ Saved Dad's contact: 9876543210"
        );
        say(&t.ctx, "add_contact", "save contact DAD 1112223333").await;

        let contacts = t.ctx.database.get_all_contacts().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].phone.as_deref(), Some("1112223333"));
    }

    #[tokio::test]
    async fn test_add_clarifications() {
        let t = test_context().await;
        assert_eq!(
            say(&t.ctx, "add_contact", "add contact dad 12").await,
            "That doesn't look like a valid phone number: 12"
        );
        assert!(say(&t.ctx, "add_contact", "add contact dad")
            .await
            .starts_with("Please provide both"));
        assert!(t.ctx.database.get_all_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_view_contact() {
        let t = test_context().await;
        say(&t.ctx, "add_contact", "add contact mom 5551234567").await;

        assert_eq!(
            say(&t.ctx, "view_contact", "What's Mom's number?").await,
            "📞 Mom's number: 5551234567"
        );
        assert_eq!(
            say(&t.ctx, "view_contact", "call john").await,
            "I don't have John in contacts. Say 'add contact john <number>' first."
        );
        assert_eq!(
            say(&t.ctx, "view_contact", "phone number").await,
            "Please specify which contact you'd like to call."
        );
    }

    #[tokio::test]
    async fn test_list_contacts_sorted() {
        let t = test_context().await;
        assert!(say(&t.ctx, "list_contacts", "show my contacts")
            .await
            .starts_with("You don't have any contacts"));

        say(&t.ctx, "add_contact", "add contact zoe 5550000001").await;
        say(&t.ctx, "add_contact", "add contact adam 5550000002").await;
        assert_eq!(
            say(&t.ctx, "list_contacts", "list contacts").await,
            "📞 Your Contacts:\n  • Adam: 5550000002\n  • Zoe: 5550000001"
        );
    }

    #[tokio::test]
    async fn test_delete_contact() {
        let t = test_context().await;
        say(&t.ctx, "add_contact", "add contact dad 9876543210").await;

        assert_eq!(
            say(&t.ctx, "delete_contact", "remove dad from contacts").await,
            "✓ Deleted Dad from contacts."
        );
        assert_eq!(
            say(&t.ctx, "delete_contact", "delete contact dad").await,
            "I don't have Dad in contacts."
        );
        assert_eq!(
            say(&t.ctx, "delete_contact", "delete contact").await,
            "Please specify which contact to delete."
        );
    }
}
