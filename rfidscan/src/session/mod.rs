// rfidscan/src/session/mod.rs
//! Card session state machine.
//!
//! One `tick` is one pass of the scan loop: throttle check, presence,
//! select, classify, dispatch to the mode handler, release. Every session
//! that got past select ends with the card halted, whatever happened in
//! between.

use derive_more::Display;
use log::{debug, info, trace, warn};

use crate::card::operations::{self, Cadence};
use crate::card::{BlockAccess, CardFamily, CardSession};
use crate::config::{OperatingMode, SharedState};
use crate::constants::YIELD_EVERY_BLOCKS;
use crate::delivery::{Courier, Delivery, DeliveryAttempt};
use crate::signal::Signal;
use crate::transport::{Transport, probe};
use crate::types::{AuthKey, Uid};
use crate::utils::Clock;
use crate::{Error, Result};

/// States a session moves through. Only forward transitions are taken;
/// `Released` always leads back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    Idle,
    Detected,
    Classified,
    Dispatched,
    Released,
}

/// Summary of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub uid: Uid,
    pub family: CardFamily,
    pub mode: OperatingMode,
    pub blocks_visited: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub text: String,
    pub delivery: Option<DeliveryAttempt>,
    pub started_ms: u64,
    pub released_ms: u64,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Scanning is disabled.
    Stopped,
    /// Too soon after the last session.
    Throttled,
    NoCard,
    /// A card was present but did not answer select; no session started.
    SelectFailed,
    /// The reader itself failed before a session started.
    Aborted(Error),
    Completed(Box<SessionReport>),
}

/// External collaborators a tick needs.
pub struct Collaborators<'a> {
    pub clock: &'a dyn Clock,
    pub delivery: &'a mut dyn Delivery,
    pub signal: &'a mut dyn Signal,
}

/// Drives card sessions on one reader.
pub struct Orchestrator {
    transport: Box<dyn Transport>,
    key: AuthKey,
    state: SessionState,
    trail: Vec<SessionState>,
    last_release_ms: Option<u64>,
}

impl Orchestrator {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_key(transport, AuthKey::DEFAULT)
    }

    pub fn with_key(transport: Box<dyn Transport>, key: AuthKey) -> Self {
        Self {
            transport,
            key,
            state: SessionState::Idle,
            trail: vec![SessionState::Idle],
            last_release_ms: None,
        }
    }

    /// Probe the reader's version register.
    pub fn check_reader(&mut self) -> Result<u8> {
        let version = probe(self.transport.as_mut())?;
        info!("reader version {:#04x}", version);
        Ok(version)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// States visited during the last tick, in order.
    pub fn last_trail(&self) -> &[SessionState] {
        &self.trail
    }

    pub fn last_release_ms(&self) -> Option<u64> {
        self.last_release_ms
    }

    fn enter(&mut self, next: SessionState) {
        trace!("session: {} -> {}", self.state, next);
        self.state = next;
        self.trail.push(next);
    }

    /// Run one pass of the scan loop.
    ///
    /// `yield_point` is handed the shared state every few blocks during
    /// long traversals and may change it; the running session keeps the
    /// mode and options it started with.
    pub fn tick(
        &mut self,
        shared: &mut SharedState,
        io: &mut Collaborators<'_>,
        yield_point: &mut dyn FnMut(&mut SharedState),
    ) -> TickOutcome {
        self.trail.clear();
        self.state = SessionState::Idle;
        self.trail.push(SessionState::Idle);

        if !shared.is_scanning() {
            return TickOutcome::Stopped;
        }

        let now = io.clock.now_ms();
        let interval = shared.config().scan_interval_ms;
        if self
            .last_release_ms
            .is_some_and(|last| now.saturating_sub(last) < interval)
        {
            return TickOutcome::Throttled;
        }

        match self.transport.card_present() {
            Ok(true) => {}
            Ok(false) => return TickOutcome::NoCard,
            Err(e) => {
                warn!("presence check failed: {}", e);
                return TickOutcome::Aborted(e);
            }
        }

        let selection = match self.transport.select() {
            Ok(Some(selection)) => selection,
            Ok(None) => {
                debug!("card present but select failed");
                return TickOutcome::SelectFailed;
            }
            Err(e) => {
                warn!("select failed: {}", e);
                return TickOutcome::Aborted(e);
            }
        };
        self.enter(SessionState::Detected);

        let mut session = CardSession::open(selection);
        self.enter(SessionState::Classified);
        debug!(
            "card {} atqa {:#06x} sak {:#04x}: {}",
            session.uid(),
            selection.atqa,
            selection.sak,
            session.family()
        );

        // Fixed for the whole session.
        let mode = shared.mode().clone();
        let read_memory = shared.config().read_memory_enabled;
        let api_url = shared.config().api_url.clone();

        self.enter(SessionState::Dispatched);
        let report = {
            let mut yield_now = || yield_point(&mut *shared);
            let mut cadence = Cadence::new(&mut yield_now, YIELD_EVERY_BLOCKS);
            let uid = *session.uid();
            let mut access = BlockAccess::new(self.transport.as_mut(), &self.key, uid);
            let mut courier = Courier::new(&mut *io.delivery, &mut *io.signal, &api_url);
            operations::run(
                &mode,
                &mut session,
                &mut access,
                &mut cadence,
                read_memory,
                &mut courier,
            )
        };

        let summary = session.release(self.transport.as_mut());
        let released_ms = io.clock.now_ms();
        self.last_release_ms = Some(released_ms);
        self.enter(SessionState::Released);

        shared.sink_mut().record(report.text.clone());
        if let Some(attempt) = &report.delivery {
            shared.sink_mut().record_delivery(released_ms / 1000, attempt);
        }

        info!(
            "{} session on {} ({}): {} ok, {} failed",
            mode, summary.uid, summary.family, report.succeeded, report.failed
        );
        self.enter(SessionState::Idle);

        TickOutcome::Completed(Box::new(SessionReport {
            uid: summary.uid,
            family: summary.family,
            mode,
            blocks_visited: summary.blocks_visited(),
            succeeded: report.succeeded,
            failed: report.failed,
            text: report.text,
            delivery: report.delivery,
            started_ms: now,
            released_ms,
        }))
    }
}
