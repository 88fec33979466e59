//! Indicator driver module
//! 
//! This module wraps the three indicator LEDs behind a fail-safe interface
//! that falls back to simulation mode when GPIO is unavailable.

pub mod driver;
pub mod state;

mod gpio;

// Re-export main types
pub use driver::{DriverError, IndicatorDriver, PinMap};
pub use state::{Indicator, IndicatorState};
