// rfidscan/src/lib.rs

//! rfidscan
//!
//! Card-session firmware core for an RFID reader/writer appliance: a
//! session state machine over a contactless reader, a block access driver
//! for MIFARE-style cards, mode handlers (read, write, format, backup) and
//! the configuration and control plane around them.

pub mod card;
pub mod config;
pub mod console;
pub mod constants;
pub mod control;
pub mod delivery;
pub mod error;
pub mod platform;
pub mod prelude;
pub mod report;
pub mod scanner;
pub mod session;
pub mod signal;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the newtypes in `types` are available everywhere.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
