//! In-process session store at the persistence boundary.
//!
//! Each live session sits behind its own async mutex. Mutating operations hold
//! the guard for their whole duration, so concurrent submit/finish calls against
//! one session id are serialized while different sessions proceed in parallel.
//!
//! Completed sessions are also copied once into a per-user archive. History and
//! analytics read only from the archive and never wait on a live session.
//! Abandoned sessions are evicted from the live map after a retention period.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::InterviewSession;

pub const DEFAULT_ABANDONED_RETENTION: Duration = Duration::from_secs(60 * 60);

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<InterviewSession>>>>,
    /// Completed sessions keyed by user id, in completion order.
    completed: RwLock<HashMap<String, Vec<InterviewSession>>>,
    /// Abandoned session ids and when they were abandoned.
    abandoned: Mutex<Vec<(Uuid, Instant)>>,
    abandoned_retention: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_retention(DEFAULT_ABANDONED_RETENTION)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that drops abandoned sessions once `abandoned_retention` has passed.
    pub fn with_retention(abandoned_retention: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            completed: RwLock::new(HashMap::new()),
            abandoned: Mutex::new(Vec::new()),
            abandoned_retention,
        }
    }

    pub async fn insert(&self, session: InterviewSession) {
        self.evict_abandoned().await;
        let id = session.id;
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
    }

    /// Exclusive access to one session until the guard is dropped.
    pub async fn lock(&self, id: Uuid) -> Result<OwnedMutexGuard<InterviewSession>, AppError> {
        let entry = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
        Ok(entry.lock_owned().await)
    }

    /// A snapshot of one session.
    pub async fn get(&self, id: Uuid) -> Result<InterviewSession, AppError> {
        let guard = self.lock(id).await?;
        Ok(guard.clone())
    }

    /// Records a completed session in its owner's archive.
    pub async fn archive(&self, session: InterviewSession) {
        self.completed
            .write()
            .await
            .entry(session.user_id.clone())
            .or_default()
            .push(session);
    }

    /// Archived completed sessions of `user_id`, oldest first.
    pub async fn completed_for_user(&self, user_id: &str) -> Vec<InterviewSession> {
        self.completed
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Every archived completed session across all users.
    pub async fn all_completed(&self) -> Vec<InterviewSession> {
        self.completed
            .read()
            .await
            .values()
            .flatten()
            .cloned()
            .collect()
    }

    /// Schedules an abandoned session for eviction.
    pub async fn mark_abandoned(&self, id: Uuid) {
        self.abandoned.lock().await.push((id, Instant::now()));
    }

    /// Removes abandoned sessions older than the retention period from the
    /// live map. Returns how many were removed.
    pub async fn evict_abandoned(&self) -> usize {
        let expired: Vec<Uuid> = {
            let mut abandoned = self.abandoned.lock().await;
            let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut *abandoned)
                .into_iter()
                .partition(|(_, at)| at.elapsed() >= self.abandoned_retention);
            *abandoned = kept;
            expired.into_iter().map(|(id, _)| id).collect()
        };
        if expired.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        for id in &expired {
            sessions.remove(id);
        }
        debug!("Evicted {} abandoned sessions", expired.len());
        expired.len()
    }

    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
