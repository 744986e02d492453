//! Intent routing
//!
//! Classifies an utterance and hands it to the handler registered for the
//! label. Low-confidence results never reach a handler.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;

use super::context::AssistantContext;
use super::registry::HandlerRegistry;
use crate::core::{Reply, CLARIFICATION, FALLBACK};
use crate::features::classifier::IntentClassify;

pub struct CommandRouter {
    classifier: Arc<dyn IntentClassify>,
    registry: HandlerRegistry,
    threshold: f64,
}

impl CommandRouter {
    pub fn new(
        classifier: Arc<dyn IntentClassify>,
        registry: HandlerRegistry,
        threshold: f64,
    ) -> Self {
        Self {
            classifier,
            registry,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify `utterance` and dispatch it.
    ///
    /// `utterance` must already be trimmed; the classifier lowercases it.
    pub async fn route(&self, ctx: Arc<AssistantContext>, utterance: &str) -> Result<Reply> {
        let classification = self.classifier.classify(utterance)?;
        let label = classification.label.as_str();
        let confidence = classification.confidence;
        debug!("Classified {utterance:?} as {label} ({confidence:.3})");

        if confidence < self.threshold {
            info!(
                "Low confidence for {label} ({confidence:.3} < {:.2}), asking to rephrase",
                self.threshold
            );
            return Ok(Reply::text(CLARIFICATION).with_intent(label, confidence));
        }

        let Some(handler) = self.registry.get(label) else {
            info!("No handler registered for intent {label}");
            return Ok(Reply::text(FALLBACK).with_intent(label, confidence));
        };

        info!("Dispatching intent {label} ({confidence:.3})");
        let reply = handler.handle(ctx, label, utterance).await?;
        Ok(Reply {
            intent: Some(label.to_string()),
            confidence: Some(confidence),
            ..reply
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::commands::context::tests::test_context;
    use crate::commands::handlers::create_all_handlers;
    use crate::features::classifier::{Classification, ClassifierError};

    /// Always answers with the same label and confidence
    pub(crate) struct FixedClassifier {
        pub label: &'static str,
        pub confidence: f64,
    }

    impl IntentClassify for FixedClassifier {
        fn classify(&self, _utterance: &str) -> Result<Classification, ClassifierError> {
            Ok(Classification {
                label: self.label.to_string(),
                confidence: self.confidence,
            })
        }
    }

    fn router(label: &'static str, confidence: f64) -> CommandRouter {
        CommandRouter::new(
            Arc::new(FixedClassifier { label, confidence }),
            HandlerRegistry::with_handlers(create_all_handlers()),
            0.35,
        )
    }

    #[tokio::test]
    async fn test_low_confidence_asks_for_clarification() {
        let t = test_context().await;
        let reply = router("log_expense", 0.2)
            .route(t.ctx.clone(), "i spent 50 dollars on food")
            .await
            .unwrap();

        assert_eq!(reply.text, CLARIFICATION);
        assert_eq!(reply.intent.as_deref(), Some("log_expense"));
        assert!(t.ctx.database.get_todays_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let t = test_context().await;
        let reply = router("log_expense", 0.35)
            .route(t.ctx.clone(), "i spent 50 dollars on food")
            .await
            .unwrap();

        assert!(reply.text.starts_with("Logged expense"));
        assert_eq!(t.ctx.database.get_todays_expenses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_label_falls_back() {
        let t = test_context().await;
        let reply = router("order_pizza", 0.9)
            .route(t.ctx.clone(), "order me a pizza")
            .await
            .unwrap();

        assert_eq!(reply.text, FALLBACK);
        assert!(!reply.exit);
    }

    #[tokio::test]
    async fn test_reply_carries_intent_and_confidence() {
        let t = test_context().await;
        let reply = router("exit", 0.8).route(t.ctx.clone(), "bye").await.unwrap();

        assert!(reply.exit);
        assert_eq!(reply.intent.as_deref(), Some("exit"));
        assert_eq!(reply.confidence, Some(0.8));
    }

    #[test]
    fn test_every_trained_label_has_a_handler() {
        let registry = HandlerRegistry::with_handlers(create_all_handlers());
        for (_, label) in crate::features::classifier::training_data::TRAINING_DATA {
            assert!(registry.contains(label), "no handler for {label}");
        }
    }
}
