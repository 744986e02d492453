//! # Reminders Feature
//!
//! Time-of-day reminders parsed from natural language and delivered by a
//! polling scheduler.
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Scheduler owned through `SchedulerHandle`
//! - 1.0.0: Initial release

pub mod parser;
pub mod scheduler;

pub use parser::{parse_reminder, parse_time, ParsedReminder, TimeError};
pub use scheduler::{ReminderScheduler, SchedulerHandle};
