//! # Features
//!
//! Domain logic for each assistant capability. Handlers in `commands`
//! stay thin and call into these modules.

pub mod classifier;
pub mod contacts;
pub mod expenses;
pub mod launcher;
pub mod notify;
pub mod reminders;
pub mod study;

pub use classifier::{Classification, ClassifierError, IntentClassifier, IntentClassify};
pub use launcher::{Launcher, SystemLauncher};
pub use notify::{ConsoleNotifier, Notifier};
pub use reminders::{ReminderScheduler, SchedulerHandle};
pub use study::{StudyTimerConfig, StudyTimerHandle};
