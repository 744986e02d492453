//! Per-intent handler implementations
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: One handler per assistant feature, keyed by intent label
//! - 1.1.0: Add ContactsHandler (add, view, list, delete)
//! - 1.0.0: Initial extraction from the monolithic dispatcher

pub mod contacts;
pub mod expense;
pub mod launch;
pub mod memory;
pub mod remind;
pub mod study;
pub mod summary;
pub mod utility;

use std::sync::Arc;

use super::handler::IntentHandler;

/// Create all registered intent handlers
///
/// Returns a vector of handlers ready to be registered with HandlerRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn IntentHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(launch::LaunchHandler),
        Arc::new(remind::RemindHandler),
        Arc::new(summary::SummaryHandler),
        Arc::new(study::StudyHandler),
        Arc::new(expense::ExpenseHandler),
        Arc::new(memory::MemoryHandler),
        Arc::new(contacts::ContactsHandler),
    ]
}
