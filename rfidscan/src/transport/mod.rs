// rfidscan/src/transport/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{Call, MockCard, MockTransport};
pub use traits::{Transport, probe};
