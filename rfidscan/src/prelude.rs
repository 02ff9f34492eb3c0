// rfidscan/src/prelude.rs

pub use crate::card::{BlockAccess, BlockFailure, CardFamily, CardSession, MemoryModel, classify};
pub use crate::config::{EepromStore, OperatingMode, ScanConfig, SharedState, Store};
pub use crate::control::{Method, Request, RequestContext, Response};
pub use crate::delivery::{Delivery, DeliveryAttempt, OfflineDelivery};
pub use crate::platform::{HostPlatform, Platform};
pub use crate::scanner::Scanner;
pub use crate::session::{Collaborators, Orchestrator, SessionReport, SessionState, TickOutcome};
pub use crate::signal::{BeepPattern, Signal, SilentSignal};
pub use crate::transport::Transport;
pub use crate::{
    AuthKey, BlockAddress, BlockData, Error, PageData, Result, SelectedCard, StatusCode, Uid,
};

// Small utilities
pub use crate::utils::{Clock, SystemClock, bytes_to_hex, bytes_to_hex_spaced};
