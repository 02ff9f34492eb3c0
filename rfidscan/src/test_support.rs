//! Test support helpers intended for use by unit and integration tests.
//!
//! Collaborator doubles that record what the scan loop did with them, and
//! a shareable mock transport so a test can inspect the reader after the
//! orchestrator took ownership of it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{EepromStore, SharedState};
use crate::delivery::Delivery;
use crate::session::Orchestrator;
use crate::signal::{BeepPattern, Signal};
use crate::transport::mock::MockTransport;
use crate::transport::traits::Transport;
use crate::types::{AuthKey, BlockAddress, BlockData, SelectedCard, Uid};
use crate::utils::Clock;
use crate::Result;

/// Clock that only moves when told to. Clones share the same time.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub fn at(ms: u64) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Delivery double: records (url, uid) pairs and answers with a settable
/// status. Clones share the record.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct RecordingDelivery {
    pub sent: Rc<RefCell<Vec<(String, String)>>>,
    status: Rc<Cell<i32>>,
}

impl RecordingDelivery {
    pub fn answering(status: i32) -> Self {
        Self {
            sent: Rc::new(RefCell::new(Vec::new())),
            status: Rc::new(Cell::new(status)),
        }
    }

    pub fn set_status(&self, status: i32) {
        self.status.set(status);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.borrow().clone()
    }
}

impl Delivery for RecordingDelivery {
    fn send_uid(&mut self, api_url: &str, uid: &str) -> i32 {
        self.sent
            .borrow_mut()
            .push((api_url.to_string(), uid.to_string()));
        self.status.get()
    }
}

/// Signal double recording every pattern played.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct RecordingSignal {
    pub played: Rc<RefCell<Vec<BeepPattern>>>,
}

impl RecordingSignal {
    pub fn played(&self) -> Vec<BeepPattern> {
        self.played.borrow().clone()
    }
}

impl Signal for RecordingSignal {
    fn play(&mut self, pattern: BeepPattern) {
        self.played.borrow_mut().push(pattern);
    }
}

/// A `MockTransport` the test keeps a handle on after boxing it.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct SharedTransport(pub Rc<RefCell<MockTransport>>);

impl SharedTransport {
    pub fn new(mock: MockTransport) -> Self {
        Self(Rc::new(RefCell::new(mock)))
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

impl Transport for SharedTransport {
    fn version(&mut self) -> Result<u8> {
        self.0.borrow_mut().version()
    }

    fn card_present(&mut self) -> Result<bool> {
        self.0.borrow_mut().card_present()
    }

    fn select(&mut self) -> Result<Option<SelectedCard>> {
        self.0.borrow_mut().select()
    }

    fn authenticate(&mut self, block: BlockAddress, key: &AuthKey, uid: &Uid) -> Result<()> {
        self.0.borrow_mut().authenticate(block, key, uid)
    }

    fn read_block(&mut self, block: BlockAddress) -> Result<BlockData> {
        self.0.borrow_mut().read_block(block)
    }

    fn write_block(&mut self, block: BlockAddress, data: &BlockData) -> Result<()> {
        self.0.borrow_mut().write_block(block, data)
    }

    fn halt_and_release(&mut self) -> Result<()> {
        self.0.borrow_mut().halt_and_release()
    }
}

/// Shared state over a freshly erased store (all defaults).
#[doc(hidden)]
pub fn default_shared() -> SharedState {
    // An erased in-memory store always loads.
    match SharedState::load(Box::new(EepromStore::new())) {
        Ok(shared) => shared,
        Err(e) => panic!("erased store failed to load: {}", e),
    }
}

/// Orchestrator over a shared mock, returning the handle for inspection.
#[doc(hidden)]
pub fn orchestrator_with(mock: MockTransport) -> (Orchestrator, SharedTransport) {
    let handle = SharedTransport::new(mock);
    (Orchestrator::new(handle.boxed()), handle)
}

/// 4-byte UID from a literal.
#[doc(hidden)]
pub fn uid4(bytes: [u8; 4]) -> Uid {
    match Uid::try_from(&bytes[..]) {
        Ok(uid) => uid,
        Err(e) => panic!("4 bytes is a valid uid length: {}", e),
    }
}
