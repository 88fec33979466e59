//! Command-driven cook scheduler

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::Local;
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{sleep, Instant},
};
use tracing::{debug, info, warn};

use crate::indicator::{Indicator, IndicatorDriver};
use super::{session::CookSession, Command, CookPhase, CookPlan, SessionStatus};

/// Which delayed transition a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Cooking,
    Ready,
}

/// Session slot guarded by the scheduler lock
#[derive(Debug, Default)]
struct SessionSlot {
    /// Bumped every time a session is armed
    generation: u64,
    session: Option<CookSession>,
}

#[derive(Debug)]
struct Inner {
    driver: Arc<IndicatorDriver>,
    runtime: Handle,
    slot: Mutex<SessionSlot>,
}

/// Owns the cook session and drives the indicators through it.
///
/// Cloning is cheap and every clone shares the same session. Command
/// handling and both timer callbacks take the same lock for their whole
/// transition, so a cancelled or superseded session can never write to the
/// indicators.
#[derive(Debug, Clone)]
pub struct CookScheduler {
    inner: Arc<Inner>,
}

impl CookScheduler {
    /// Create an idle scheduler whose timers run on `runtime`
    pub fn new(driver: Arc<IndicatorDriver>, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                driver,
                runtime,
                slot: Mutex::new(SessionSlot::default()),
            }),
        }
    }

    pub fn driver(&self) -> &Arc<IndicatorDriver> {
        &self.inner.driver
    }

    /// Handle one raw command line. Never fails; errors are logged.
    pub fn handle(&self, raw: &str) {
        info!("Command received: '{}'", raw.trim());

        match Command::parse(raw) {
            Command::Start(argument) => self.start(argument),
            Command::Stop => self.stop(),
            Command::Unrecognized(command) => {
                warn!("Unrecognized command '{}', ignoring", command);
            }
        }
    }

    /// Current phase of the session
    pub fn phase(&self) -> CookPhase {
        self.status().phase
    }

    pub fn status(&self) -> SessionStatus {
        self.lock_slot()
            .session
            .as_ref()
            .map_or_else(SessionStatus::idle, CookSession::status)
    }

    /// Cancel any armed timers without touching the indicators
    pub fn shutdown(&self) {
        let mut slot = self.lock_slot();
        if slot.session.is_some() {
            info!("Cancelling armed session on shutdown");
        }
        Self::cancel_session(&mut slot);
    }

    fn start(&self, argument: &str) {
        let mut slot = self.lock_slot();

        // The previous session is cancelled even if the new argument is malformed
        Self::cancel_session(&mut slot);

        let plan = match CookPlan::parse(argument) {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Error processing START command: {}. Format must be 'START <minutes>'", e);
                return;
            }
        };

        info!("START recognized. Total time: {} min", plan.minutes);
        info!(
            "Cooking LED in {} s, ready LED in {} s",
            plan.cooking_offset.as_secs(),
            plan.total.as_secs()
        );
        if let Some(ready_at) = chrono::Duration::from_std(plan.total)
            .ok()
            .and_then(|total| Local::now().checked_add_signed(total))
        {
            info!("Breakfast expected at {}", ready_at.format("%H:%M:%S"));
        }

        let driver = &self.inner.driver;
        driver.set(Indicator::Pending, true);
        driver.set(Indicator::Ready, false);

        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;
        let cooking_timer = self.arm(Stage::Cooking, generation, plan.cooking_offset);
        let ready_timer = self.arm(Stage::Ready, generation, plan.total);

        slot.session = Some(CookSession {
            generation,
            plan,
            phase: CookPhase::Pending,
            started_at: Instant::now(),
            cooking_timer,
            ready_timer,
        });
        debug!("Session {} armed", generation);
    }

    fn stop(&self) {
        let mut slot = self.lock_slot();
        info!("STOP recognized, cancelling everything");

        Self::cancel_session(&mut slot);
        for indicator in Indicator::ALL {
            self.inner.driver.set(indicator, false);
        }
    }

    /// Spawn a timer that fires `stage` after `delay`
    fn arm(&self, stage: Stage, generation: u64, delay: Duration) -> JoinHandle<()> {
        let scheduler = self.clone();
        self.inner.runtime.spawn(async move {
            sleep(delay).await;
            scheduler.fire(stage, generation);
        })
    }

    fn fire(&self, stage: Stage, generation: u64) {
        let mut slot = self.lock_slot();

        let live = matches!(&slot.session, Some(session) if session.generation == generation);
        if !live {
            debug!("Discarding stale {:?} timer from session {}", stage, generation);
            return;
        }

        match stage {
            Stage::Cooking => self.start_cooking(&mut slot),
            Stage::Ready => self.finish_breakfast(&mut slot),
        }
    }

    fn start_cooking(&self, slot: &mut SessionSlot) {
        if let Some(session) = slot.session.as_mut() {
            session.phase = CookPhase::Cooking;
        }

        info!("TIMER: cooking stage reached, turning on cooking LED");
        self.inner.driver.set(Indicator::Cooking, true);
    }

    fn finish_breakfast(&self, slot: &mut SessionSlot) {
        // Session consumed; a same-deadline cooking timer must not fire after this
        if let Some(session) = slot.session.take() {
            session.cooking_timer.abort();
        }

        info!("TIMER: breakfast ready, turning on ready LED");
        let driver = &self.inner.driver;
        driver.set(Indicator::Pending, false);
        driver.set(Indicator::Cooking, false);
        driver.set(Indicator::Ready, true);
    }

    fn cancel_session(slot: &mut SessionSlot) {
        if let Some(session) = slot.session.take() {
            debug!("Cancelling timers of session {}", session.generation);
            session.cancel();
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, SessionSlot> {
        self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
