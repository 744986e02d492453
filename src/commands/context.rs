//! Shared context for intent handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Holds the launcher, notifier and running study sessions
//! - 1.0.0: Initial implementation with core shared state

use log::debug;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::core::Config;
use crate::database::Database;
use crate::features::launcher::Launcher;
use crate::features::notify::Notifier;
use crate::features::study::{StudyTimerConfig, StudyTimerHandle};

/// Shared context for all intent handlers
///
/// Contains the services most handlers need:
/// - Database for persistence
/// - Notifier for messages produced off the request path
/// - Launcher for apps and browser searches
/// - The user's name, once known
pub struct AssistantContext {
    pub database: Database,
    pub notifier: Arc<dyn Notifier>,
    pub launcher: Arc<dyn Launcher>,
    pub study: StudyTimerConfig,
    pub currency: String,
    user_name: RwLock<Option<String>>,
    study_sessions: Mutex<Vec<StudyTimerHandle>>,
}

impl AssistantContext {
    pub fn new(
        database: Database,
        notifier: Arc<dyn Notifier>,
        launcher: Arc<dyn Launcher>,
        config: &Config,
    ) -> Self {
        Self {
            database,
            notifier,
            launcher,
            study: StudyTimerConfig::from_minutes(
                config.study_minutes,
                config.break_minutes,
                config.progress_minutes,
            ),
            currency: config.currency.clone(),
            user_name: RwLock::new(None),
            study_sessions: Mutex::new(Vec::new()),
        }
    }

    pub async fn user_name(&self) -> Option<String> {
        self.user_name.read().await.clone()
    }

    pub async fn set_user_name(&self, name: Option<String>) {
        *self.user_name.write().await = name;
    }

    /// Keep a running study session so it can be stopped at shutdown
    pub async fn track_study_session(&self, handle: StudyTimerHandle) {
        let mut sessions = self.study_sessions.lock().await;
        sessions.retain(|s| !s.is_finished());
        sessions.push(handle);
    }

    /// Number of sessions still running
    pub async fn active_study_sessions(&self) -> usize {
        let sessions = self.study_sessions.lock().await;
        sessions.iter().filter(|s| !s.is_finished()).count()
    }

    /// Stop every running study session and wait for them to exit
    pub async fn stop_study_sessions(&self) {
        let sessions: Vec<StudyTimerHandle> = self.study_sessions.lock().await.drain(..).collect();
        if !sessions.is_empty() {
            debug!("Stopping {} study session(s)", sessions.len());
        }
        for session in sessions {
            session.stop().await;
        }
    }
}
