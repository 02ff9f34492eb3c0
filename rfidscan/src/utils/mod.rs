//! Utilities for rfidscan: small, reusable helpers used across the crate.
//!
//! Hex/ASCII rendering for dumps and the monotonic clock abstraction the
//! orchestrator uses for scan throttling.

pub mod clock;
pub mod hex;

pub use clock::*;
pub use hex::*;
