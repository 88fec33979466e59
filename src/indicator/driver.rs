//! Fail-safe driver for the pending / cooking / ready LEDs

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{gpio::Outputs, Indicator, IndicatorState};

/// Why the physical outputs could not be acquired
#[derive(Debug, Error)]
pub enum DriverError {
    #[cfg(target_os = "linux")]
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("GPIO is not supported on this platform")]
    Unsupported,
}

/// BCM pin assignment of the three indicators, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pub pending: u8,
    pub cooking: u8,
    pub ready: u8,
}

impl PinMap {
    pub fn pin_for(&self, indicator: Indicator) -> u8 {
        match indicator {
            Indicator::Pending => self.pending,
            Indicator::Cooking => self.cooking,
            Indicator::Ready => self.ready,
        }
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            pending: 23,
            cooking: 24,
            ready: 25,
        }
    }
}

/// Whether LED writes reach real hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverMode {
    Hardware,
    Simulation,
}

/// Indicator driver owning the three outputs
///
/// Every `set` updates the logical [`IndicatorState`] in both modes, so the
/// state can be observed through [`snapshot`](Self::snapshot) and
/// [`subscribe`](Self::subscribe) even when running without hardware.
#[derive(Debug)]
pub struct IndicatorDriver {
    pins: PinMap,
    mode: DriverMode,
    /// `None` in simulation mode and after teardown
    outputs: Mutex<Option<Outputs>>,
    state_tx: watch::Sender<IndicatorState>,
}

impl IndicatorDriver {
    /// Acquire the GPIO lines, falling back to simulation mode on any failure
    pub fn initialize(pins: PinMap) -> Self {
        match Outputs::acquire(&pins) {
            Ok(outputs) => {
                info!(
                    "GPIO ready for 3 LEDs (pending={}, cooking={}, ready={})",
                    pins.pending, pins.cooking, pins.ready
                );
                Self::with_outputs(pins, Some(outputs))
            }
            Err(e) => {
                warn!("Failed to initialize GPIO: {}. Running in simulation mode", e);
                Self::with_outputs(pins, None)
            }
        }
    }

    /// Create a driver that never touches GPIO
    pub fn simulated(pins: PinMap) -> Self {
        info!("Simulation mode requested, GPIO will not be touched");
        Self::with_outputs(pins, None)
    }

    fn with_outputs(pins: PinMap, outputs: Option<Outputs>) -> Self {
        let mode = if outputs.is_some() {
            DriverMode::Hardware
        } else {
            DriverMode::Simulation
        };
        let (state_tx, _) = watch::channel(IndicatorState::new());

        Self {
            pins,
            mode,
            outputs: Mutex::new(outputs),
            state_tx,
        }
    }

    pub fn is_hardware_ready(&self) -> bool {
        self.mode == DriverMode::Hardware
    }

    /// Drive one indicator on or off. Idempotent and infallible.
    pub fn set(&self, indicator: Indicator, on: bool) {
        let mut outputs = self.lock_outputs();

        match (outputs.as_mut(), self.mode) {
            (Some(outputs), _) => {
                debug!(
                    "Setting {} LED (pin {}) {}",
                    indicator,
                    self.pins.pin_for(indicator),
                    if on { "high" } else { "low" }
                );
                outputs.write(indicator, on);
            }
            (None, DriverMode::Simulation) => {
                info!("SIM: {} LED {}", indicator, if on { "ON" } else { "OFF" });
            }
            (None, DriverMode::Hardware) => {
                debug!("GPIO already released, dropping {} LED write", indicator);
                return;
            }
        }

        // Published while the outputs lock is held so observers see writes in order
        self.state_tx.send_if_modified(|state| state.set(indicator, on));
    }

    /// Release the GPIO lines. Only the first call has an effect.
    pub fn teardown(&self) {
        let outputs = self.lock_outputs().take();

        match outputs {
            Some(outputs) => {
                outputs.release();
                self.state_tx.send_replace(IndicatorState::new());
                info!("GPIO cleaned up");
            }
            None => debug!("Nothing to release on teardown"),
        }
    }

    /// Current logical LED state
    pub fn snapshot(&self) -> IndicatorState {
        *self.state_tx.borrow()
    }

    /// Subscribe to LED state changes
    pub fn subscribe(&self) -> watch::Receiver<IndicatorState> {
        self.state_tx.subscribe()
    }

    fn lock_outputs(&self) -> MutexGuard<'_, Option<Outputs>> {
        self.outputs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
