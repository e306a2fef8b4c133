//! In-memory workspaces, one per browser session. Nothing here is persisted.
//!
//! The store lock is only held for synchronous state transitions, never across a
//! gateway call. Workspaces nobody has touched for the idle window are swept.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analyzer::analysis::ResumeAnalyzer;
use crate::errors::AppError;
use crate::interview::coach::InterviewCoach;
use crate::ranker::ranking::ResumeRanker;

/// The three screens' state for one session.
#[derive(Debug)]
pub struct Workspace {
    pub created_at: DateTime<Utc>,
    last_seen: Instant,
    pub interview: InterviewCoach,
    pub analyzer: ResumeAnalyzer,
    pub ranker: ResumeRanker,
}

impl Workspace {
    fn new(interview_duration_secs: u32) -> Self {
        Self {
            created_at: Utc::now(),
            last_seen: Instant::now(),
            interview: InterviewCoach::new(interview_duration_secs),
            analyzer: ResumeAnalyzer::default(),
            ranker: ResumeRanker::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Workspace>>>,
    interview_duration_secs: u32,
}

impl SessionStore {
    pub fn new(interview_duration_secs: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            interview_duration_secs,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Workspace>> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self) -> SessionCreated {
        let session_id = Uuid::new_v4();
        let workspace = Workspace::new(self.interview_duration_secs);
        let created_at = workspace.created_at;
        self.lock().insert(session_id, workspace);
        info!("Created session {session_id}");
        SessionCreated {
            session_id,
            created_at,
        }
    }

    pub fn remove(&self, session_id: Uuid) -> Result<(), AppError> {
        self.lock()
            .remove(&session_id)
            .map(|_| info!("Removed session {session_id}"))
            .ok_or_else(|| session_not_found(session_id))
    }

    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    /// Runs `f` against the session's workspace under the store lock and marks
    /// the session as seen.
    pub fn with<R>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut Workspace) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.lock();
        let workspace = sessions
            .get_mut(&session_id)
            .ok_or_else(|| session_not_found(session_id))?;
        workspace.last_seen = Instant::now();
        Ok(f(workspace))
    }

    /// Drops every workspace idle for longer than `max_idle`. Returns how many
    /// were dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, ws| now.duration_since(ws.last_seen) <= max_idle);
        before - sessions.len()
    }

    /// Spawns the background sweep that evicts idle sessions.
    pub fn spawn_idle_sweep(&self, max_idle: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let every = max_idle.min(Duration::from_secs(60));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(max_idle);
                if evicted > 0 {
                    info!("Evicted {evicted} idle sessions");
                } else {
                    debug!("Idle sweep found nothing to evict");
                }
            }
        })
    }
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}
