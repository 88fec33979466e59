//! Cook session state

use std::time::Duration;

use tokio::{task::JoinHandle, time::Instant};

use super::CookPlan;

/// Observable phase of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookPhase {
    /// No session armed
    Idle,
    /// Session armed, cooking stage not reached yet
    Pending,
    /// Cooking stage reached, waiting for the ready stage
    Cooking,
}

/// Snapshot of the current session for logging and inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub phase: CookPhase,
    pub minutes: Option<u64>,
    pub ready_in_seconds: Option<u64>,
}

impl SessionStatus {
    pub fn idle() -> Self {
        Self {
            phase: CookPhase::Idle,
            minutes: None,
            ready_in_seconds: None,
        }
    }
}

/// The armed cook run and its two timers
#[derive(Debug)]
pub(crate) struct CookSession {
    /// Timer callbacks only act while the live session carries their generation
    pub generation: u64,
    pub plan: CookPlan,
    pub phase: CookPhase,
    pub started_at: Instant,
    pub cooking_timer: JoinHandle<()>,
    pub ready_timer: JoinHandle<()>,
}

impl CookSession {
    /// Abort both timers; aborting a finished timer is a no-op
    pub fn cancel(self) {
        self.cooking_timer.abort();
        self.ready_timer.abort();
    }

    /// Time left until the ready stage, `None` when the deadline is unrepresentable
    pub fn ready_in(&self) -> Option<Duration> {
        self.started_at
            .checked_add(self.plan.total)
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            phase: self.phase,
            minutes: Some(self.plan.minutes),
            ready_in_seconds: self.ready_in().map(|d| d.as_secs()),
        }
    }
}
