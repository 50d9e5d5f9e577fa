//! Transport-agnostic application state.
//!
//! `CoreState` is shared behind an `Arc` by every request handler. It owns
//! the read-only catalog reference and the registry of live intakes. Each
//! intake owns its flow exclusively; the registry lock is held for one
//! command at a time and never across an `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::intake::IntakeFlow;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    catalog: &'static Catalog,
    config: ServerConfig,
    intakes: IntakeRegistry,
    started_at: DateTime<Utc>,
}

impl CoreState {
    /// State over the built-in catalog.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_catalog(Catalog::builtin(), config)
    }

    pub fn with_catalog(catalog: &'static Catalog, config: ServerConfig) -> Self {
        let intakes = IntakeRegistry::new(config.session_idle_timeout, config.max_sessions);
        Self {
            catalog,
            config,
            intakes,
            started_at: Utc::now(),
        }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    // ── Intake sessions ─────────────────────────────────────

    /// Start a fresh intake in the Search step.
    pub fn create_intake(&self) -> Result<Uuid, CoreError> {
        self.intakes.create(self.catalog)
    }

    /// Run `f` against one intake, refreshing its idle timer.
    pub fn with_intake<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut IntakeSession) -> R,
    ) -> Result<R, CoreError> {
        self.intakes.with(id, f)
    }

    /// Like `with_intake`, but a `None` from `f` closes the intake before
    /// the lock is released.
    pub fn with_intake_or_close<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut IntakeSession) -> Option<R>,
    ) -> Result<Option<R>, CoreError> {
        self.intakes.with_or_close(id, f)
    }

    /// Drop an intake. Returns whether it existed.
    pub fn remove_intake(&self, id: Uuid) -> Result<bool, CoreError> {
        self.intakes.remove(id)
    }

    /// Drop every intake idle past the timeout. Returns how many were dropped.
    pub fn purge_idle(&self) -> Result<usize, CoreError> {
        self.intakes.purge_idle()
    }

    pub fn intake_count(&self) -> Result<usize, CoreError> {
        self.intakes.len()
    }
}

// ═══════════════════════════════════════════════════════════
// Intake registry
// ═══════════════════════════════════════════════════════════

/// One user's in-progress intake.
pub struct IntakeSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    last_access: Instant,
    pub flow: IntakeFlow<'static>,
}

impl IntakeSession {
    fn new(catalog: &'static Catalog) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            last_access: Instant::now(),
            flow: IntakeFlow::new(catalog),
        }
    }

    pub fn idle_for(&self) -> Duration {
        self.last_access.elapsed()
    }
}

/// Bounded map of live intakes with idle expiry.
pub struct IntakeRegistry {
    sessions: Mutex<HashMap<Uuid, IntakeSession>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl IntakeRegistry {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            max_sessions,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, IntakeSession>>, CoreError> {
        self.sessions.lock().map_err(|_| CoreError::LockPoisoned)
    }

    fn create(&self, catalog: &'static Catalog) -> Result<Uuid, CoreError> {
        let mut sessions = self.lock()?;
        self.evict_idle(&mut sessions);
        if sessions.len() >= self.max_sessions {
            tracing::warn!(max = self.max_sessions, "Intake capacity reached");
            return Err(CoreError::CapacityReached {
                max: self.max_sessions,
            });
        }
        let session = IntakeSession::new(catalog);
        let id = session.id;
        sessions.insert(id, session);
        tracing::info!(intake_id = %id, active = sessions.len(), "Intake started");
        Ok(id)
    }

    fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut IntakeSession) -> R) -> Result<R, CoreError> {
        let mut sessions = self.lock()?;
        self.evict_idle(&mut sessions);
        let session = sessions.get_mut(&id).ok_or(CoreError::IntakeNotFound(id))?;
        session.last_access = Instant::now();
        Ok(f(session))
    }

    fn with_or_close<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut IntakeSession) -> Option<R>,
    ) -> Result<Option<R>, CoreError> {
        let mut sessions = self.lock()?;
        self.evict_idle(&mut sessions);
        let session = sessions.get_mut(&id).ok_or(CoreError::IntakeNotFound(id))?;
        session.last_access = Instant::now();
        let result = f(session);
        if result.is_none() {
            sessions.remove(&id);
            tracing::info!(intake_id = %id, "Intake closed");
        }
        Ok(result)
    }

    fn remove(&self, id: Uuid) -> Result<bool, CoreError> {
        let removed = self.lock()?.remove(&id).is_some();
        if removed {
            tracing::info!(intake_id = %id, "Intake closed");
        }
        Ok(removed)
    }

    fn purge_idle(&self) -> Result<usize, CoreError> {
        let mut sessions = self.lock()?;
        Ok(self.evict_idle(&mut sessions))
    }

    fn len(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.len())
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, IntakeSession>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| s.idle_for() < self.idle_timeout);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::info!(purged, "Expired idle intakes");
        }
        purged
    }
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Intake not found: {0}")]
    IntakeNotFound(Uuid),
    #[error("Too many active intakes (max {max})")]
    CapacityReached { max: usize },
    #[error("Internal lock error")]
    LockPoisoned,
}
