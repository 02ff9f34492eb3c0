// rfidscan/src/card/mod.rs

use log::warn;

use crate::transport::Transport;
use crate::types::{BlockAddress, BlockData, PageData, SelectedCard, Uid};

pub mod access;
pub mod family;
pub mod operations;

pub use access::{AccessResult, BlockAccess, BlockFailure};
pub use family::{CardFamily, MemoryModel, classify};

/// What happened to one block (or page) during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    Read(BlockData),
    Page(PageData),
    Written,
    Failed(BlockFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub address: BlockAddress,
    pub event: BlockEvent,
}

impl BlockOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.event, BlockEvent::Failed(_))
    }
}

/// A selected card for the lifetime of one session.
///
/// `release` consumes the session, so a halted card can never be used
/// again; the next card needs a fresh select.
#[derive(Debug)]
pub struct CardSession {
    selection: SelectedCard,
    family: CardFamily,
    outcomes: Vec<BlockOutcome>,
}

impl CardSession {
    /// Open a session for a freshly selected card and classify it.
    pub fn open(selection: SelectedCard) -> Self {
        Self {
            family: classify(selection.atqa, selection.sak),
            selection,
            outcomes: Vec::new(),
        }
    }

    pub fn uid(&self) -> &Uid {
        &self.selection.uid
    }

    pub fn family(&self) -> CardFamily {
        self.family
    }

    pub fn selection(&self) -> &SelectedCard {
        &self.selection
    }

    pub fn record(&mut self, address: BlockAddress, event: BlockEvent) {
        self.outcomes.push(BlockOutcome { address, event });
    }

    pub fn outcomes(&self) -> &[BlockOutcome] {
        &self.outcomes
    }

    pub fn blocks_visited(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Halt the card and close the crypto session. A failing halt is only
    /// logged: the card is gone either way.
    pub fn release(self, transport: &mut dyn Transport) -> CardSummary {
        if let Err(e) = transport.halt_and_release() {
            warn!("halt failed for {}: {}", self.selection.uid, e);
        }
        CardSummary {
            uid: self.selection.uid,
            family: self.family,
            outcomes: self.outcomes,
        }
    }
}

/// What is left of a session after the card was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub uid: Uid,
    pub family: CardFamily,
    pub outcomes: Vec<BlockOutcome>,
}

impl CardSummary {
    pub fn blocks_visited(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}
