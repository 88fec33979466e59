//! Cook scheduler module
//! 
//! This module parses text commands and runs the two delayed LED
//! transitions of a cook session.

pub mod command;
pub mod cook_scheduler;
pub mod session;

// Re-export main types
pub use command::{Command, CommandError, CookPlan};
pub use cook_scheduler::CookScheduler;
pub use session::{CookPhase, SessionStatus};
