//! Line-oriented text protocol: parsing and command processing.
//!
//! This module defines the wire command and reply types and the processor
//! that interprets commands against the player registry.

pub mod processor;
pub mod types;

pub use processor::{process_command, process_line, Disposition, Outcome};
pub use types::{Command, ProtocolError, Reply};
