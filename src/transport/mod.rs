//! Inbound command transport
//! 
//! This module feeds line-terminated text commands from a device, a TCP
//! connection or stdin into the cook scheduler. Nothing is written back.

pub mod lines;
pub mod source;

// Re-export main functions
pub use lines::serve_lines;
pub use source::{run_transport, CommandSource};
