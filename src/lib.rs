// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Infrastructure
pub mod database;

// Application layer
pub mod assistant;
pub mod commands;

pub use assistant::Assistant;
pub use core::{Config, Reply};
pub use database::Database;

pub use features::{
    // Classification
    Classification, ClassifierError, IntentClassifier, IntentClassify,
    // Launching
    Launcher, SystemLauncher,
    // Notifications
    ConsoleNotifier, Notifier,
    // Reminders
    ReminderScheduler, SchedulerHandle,
    // Study mode
    StudyTimerConfig, StudyTimerHandle,
};
