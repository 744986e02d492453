//! Intent handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Keyed by intent label instead of command name
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::IntentHandler;

/// Registry mapping intent labels to handlers
///
/// Multiple labels can map to the same handler if they share logic.
///
/// # Example
///
/// ```ignore
/// let mut registry = HandlerRegistry::new();
/// registry.register(Arc::new(UtilityHandler));
///
/// if let Some(handler) = registry.get("greeting") {
///     let reply = handler.handle(ctx, "greeting", "hello").await?;
/// }
/// ```
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<&'static str, Arc<dyn IntentHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for every label in `intent_names()`
    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) {
        for name in handler.intent_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Build a registry from a list of handlers
    pub fn with_handlers(handlers: Vec<Arc<dyn IntentHandler>>) -> Self {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler);
        }
        registry
    }

    pub fn get(&self, intent: &str) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(intent).cloned()
    }

    pub fn contains(&self, intent: &str) -> bool {
        self.handlers.contains_key(intent)
    }

    /// Number of registered labels
    ///
    /// Note: a handler registered for several labels is counted once per label.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered labels
    pub fn intent_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::AssistantContext;
    use crate::core::Reply;
    use anyhow::Result;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl IntentHandler for MockHandler {
        fn intent_names(&self) -> &'static [&'static str] {
            self.names
        }

        async fn handle(
            &self,
            _ctx: Arc<AssistantContext>,
            _intent: &str,
            _utterance: &str,
        ) -> Result<Reply> {
            Ok(Reply::text("mock"))
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_single() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(MockHandler { names: &["greeting"] }));

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("greeting"));
        assert!(!registry.contains("exit"));
    }

    #[test]
    fn test_registry_register_multiple_names() {
        let registry = HandlerRegistry::with_handlers(vec![Arc::new(MockHandler {
            names: &["add_contact", "view_contact", "delete_contact"],
        })]);

        assert_eq!(registry.len(), 3);
        assert!(registry.contains("add_contact"));
        assert!(registry.contains("view_contact"));
        assert!(registry.contains("delete_contact"));
    }

    #[test]
    fn test_registry_get_returns_handler() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(MockHandler { names: &["tell_time"] }));

        assert!(registry.get("tell_time").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_default() {
        let registry = HandlerRegistry::default();
        assert!(registry.is_empty());
    }
}
