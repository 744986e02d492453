//! Background reminder delivery
//!
//! Polls on a fixed interval and fires reminders whose "HH:MM" equals the
//! current local minute. Each minute is scanned once; a reminder whose
//! minute passes while nothing is polling is skipped, not caught up.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Explicit start/stop handle
//! - 1.0.0: Initial release

use anyhow::Result;
use chrono::Local;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::database::{Database, Reminder};
use crate::features::notify::Notifier;

pub struct ReminderScheduler {
    database: Database,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    last_checked_minute: Option<String>,
}

impl ReminderScheduler {
    pub fn new(database: Database, notifier: Arc<dyn Notifier>, poll_interval: Duration) -> Self {
        Self {
            database,
            notifier,
            poll_interval,
            last_checked_minute: None,
        }
    }

    /// Check `current_minute` ("HH:MM") and fire what is due.
    ///
    /// A minute that was already checked is skipped. Returns the reminders
    /// fired by this call.
    pub async fn tick(&mut self, current_minute: &str) -> Result<Vec<Reminder>> {
        if self.last_checked_minute.as_deref() == Some(current_minute) {
            return Ok(Vec::new());
        }
        self.last_checked_minute = Some(current_minute.to_string());

        let pending = self.database.get_pending_reminders().await?;
        let mut fired = Vec::new();
        for reminder in pending
            .into_iter()
            .filter(|r| r.remind_at == current_minute)
        {
            // Claim before announcing so a reminder can never fire twice
            if self.database.mark_reminder_notified(reminder.id).await? {
                info!("Firing reminder #{} ({})", reminder.id, reminder.remind_at);
                self.notifier
                    .notify(&format!("⏰ Reminder: {}", reminder.message));
                fired.push(reminder);
            }
        }
        Ok(fired)
    }

    /// Spawn the polling loop
    pub fn start(mut self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let poll_interval = self.poll_interval;

        let task = tokio::spawn(async move {
            info!("Reminder scheduler started (polling every {poll_interval:?})");
            let mut interval = tokio::time::interval(poll_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let minute = Local::now().format("%H:%M").to_string();
                        match self.tick(&minute).await {
                            Ok(fired) if !fired.is_empty() => {
                                debug!("Fired {} reminder(s) at {minute}", fired.len());
                            }
                            Ok(_) => {}
                            Err(e) => error!("Reminder check for {minute} failed: {e}"),
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("Reminder scheduler stopped");
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owns the running scheduler task
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the loop and wait for it to exit
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("Reminder scheduler task ended abnormally: {e}");
        }
    }
}
