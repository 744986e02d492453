//! # Feature: Study Mode
//!
//! Pomodoro timer: a focus block with periodic progress announcements,
//! then a short break. Each session runs on its own task and reports
//! through the [`Notifier`].
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Sessions return a `StudyTimerHandle` so they can be stopped
//! - 1.0.0: Initial release with a fixed 25/5 minute cycle

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::features::notify::Notifier;

/// Saturates instead of overflowing on absurd settings
fn minutes(count: u64) -> Duration {
    Duration::from_secs(count.saturating_mul(60))
}

#[derive(Debug, Clone)]
pub struct StudyTimerConfig {
    pub work: Duration,
    pub short_break: Duration,
    pub progress_every: Duration,
}

impl StudyTimerConfig {
    pub fn from_minutes(work: u64, short_break: u64, progress_every: u64) -> Self {
        Self {
            work: minutes(work),
            short_break: minutes(short_break),
            progress_every: minutes(progress_every.max(1)),
        }
    }

    fn work_minutes(&self) -> u64 {
        self.work.as_secs() / 60
    }

    fn break_minutes(&self) -> u64 {
        self.short_break.as_secs() / 60
    }

    /// Reply given as soon as a session starts
    pub fn confirmation(&self) -> String {
        format!(
            "Starting your {}-minute Pomodoro session! I'll notify you when it's time for a break.",
            self.work_minutes()
        )
    }
}

impl Default for StudyTimerConfig {
    fn default() -> Self {
        Self::from_minutes(25, 5, 5)
    }
}

/// Owns one running session
pub struct StudyTimerHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl StudyTimerHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the session to run to completion
    pub async fn join(self) {
        let _ = self.task.await;
    }

    /// Cut the session short and wait for the task to exit
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.task.await;
    }
}

/// Start a session in the background
pub fn start_session(config: StudyTimerConfig, notifier: Arc<dyn Notifier>) -> StudyTimerHandle {
    let (cancel, mut cancelled) = watch::channel(false);
    let task = tokio::spawn(async move {
        run_session(&config, notifier.as_ref(), &mut cancelled).await;
    });
    StudyTimerHandle { cancel, task }
}

/// Sleep for `duration`; false when cancelled first.
/// A dropped handle leaves the session running to completion.
async fn pause(duration: Duration, cancelled: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            _ = &mut sleep => return true,
            changed = cancelled.changed() => match changed {
                Ok(()) if *cancelled.borrow() => return false,
                Ok(()) => {}
                Err(_) => {
                    (&mut sleep).await;
                    return true;
                }
            },
        }
    }
}

async fn run_session(
    config: &StudyTimerConfig,
    notifier: &dyn Notifier,
    cancelled: &mut watch::Receiver<bool>,
) {
    let work_minutes = config.work_minutes();
    let break_minutes = config.break_minutes();
    info!("Study session started ({work_minutes} min work, {break_minutes} min break)");

    notifier.notify(&format!(
        "Study mode activated! Starting a {work_minutes}-minute focus session. \
         Stay focused and avoid distractions. Good luck!"
    ));

    // Progress announcements at every full interval strictly inside the work block
    let mut elapsed = Duration::ZERO;
    while elapsed + config.progress_every < config.work {
        if !pause(config.progress_every, cancelled).await {
            debug!("Study session cancelled during work block");
            return;
        }
        elapsed += config.progress_every;
        let done = elapsed.as_secs() / 60;
        notifier.notify(&format!(
            "{done} minutes done. {} minutes remaining.",
            work_minutes.saturating_sub(done)
        ));
    }
    if !pause(config.work - elapsed, cancelled).await {
        debug!("Study session cancelled during work block");
        return;
    }

    notifier.notify(&format!(
        "Great work! Your {work_minutes}-minute session is complete. \
         Take a {break_minutes}-minute break. Stretch, hydrate, relax!"
    ));

    if !pause(config.short_break, cancelled).await {
        debug!("Study session cancelled during break");
        return;
    }

    notifier.notify("Break time is over! Ready for another Pomodoro? Just say 'start study mode'.");
    info!("Study session finished");
}
