//! Breakfast Signal - A command-driven breakfast timer
//! 
//! This library receives short text commands (`START <minutes>`, `STOP`) and
//! drives three indicator LEDs (pending, cooking, ready) through two
//! scheduled transitions.

pub mod config;
pub mod indicator;
pub mod scheduler;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use indicator::{Indicator, IndicatorDriver, IndicatorState};
pub use scheduler::CookScheduler;
pub use transport::{run_transport, serve_lines, CommandSource};
pub use utils::signals::shutdown_signal;
