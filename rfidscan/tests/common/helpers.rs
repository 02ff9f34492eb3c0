// helpers.rs: a fully wired scan loop over mock collaborators

use rfidscan::config::SharedState;
use rfidscan::delivery::Delivery;
use rfidscan::session::{Collaborators, Orchestrator, TickOutcome};
use rfidscan::test_support::{
    ManualClock, RecordingDelivery, RecordingSignal, SharedTransport, default_shared,
    orchestrator_with,
};
use rfidscan::transport::mock::{MockCard, MockTransport};

pub const API_URL: &str = "http://192.168.1.20/api/scan";

/// Orchestrator, shared state and recording collaborators in one place.
pub struct Rig {
    pub orchestrator: Orchestrator,
    pub reader: SharedTransport,
    pub shared: SharedState,
    pub clock: ManualClock,
    pub delivery: RecordingDelivery,
    pub signal: RecordingSignal,
}

impl Rig {
    pub fn new(mock: MockTransport) -> Self {
        let (orchestrator, reader) = orchestrator_with(mock);
        let mut shared = default_shared();
        shared.set_api_url(API_URL).unwrap();
        Self {
            orchestrator,
            reader,
            shared,
            clock: ManualClock::at(10_000),
            delivery: RecordingDelivery::answering(200),
            signal: RecordingSignal::default(),
        }
    }

    pub fn with_card(card: MockCard) -> Self {
        Self::new(MockTransport::with_card(card))
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.tick_with(&mut |_| {})
    }

    pub fn tick_with(&mut self, yield_point: &mut dyn FnMut(&mut SharedState)) -> TickOutcome {
        let mut delivery = self.delivery.clone();
        let mut signal = self.signal.clone();
        let mut io = Collaborators {
            clock: &self.clock,
            delivery: &mut delivery as &mut dyn Delivery,
            signal: &mut signal,
        };
        self.orchestrator.tick(&mut self.shared, &mut io, yield_point)
    }

    /// Take the halted card out of the field and put it back.
    pub fn represent(&self) {
        self.reader.0.borrow_mut().represent();
    }

    pub fn mock<R>(&self, f: impl FnOnce(&MockTransport) -> R) -> R {
        f(&self.reader.0.borrow())
    }
}
