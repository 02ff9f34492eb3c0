// rfidscan/src/card/operations/mod.rs
//! Mode handlers. Each handler walks a fixed target set through the block
//! access driver, records per-block outcomes on the session and renders a
//! text report for the result sink.

pub mod backup;
pub mod format;
pub mod read;
pub mod write;

use crate::card::{BlockAccess, CardSession, MemoryModel};
use crate::config::OperatingMode;
use crate::constants::{
    BLOCKS_PER_SECTOR, PAGE_COUNT, SECTOR_COUNT, TRAILER_BLOCK, WRITE_BLOCK_IN_SECTOR,
    WRITE_SECTOR,
};
use crate::delivery::{Courier, DeliveryAttempt};
use crate::types::BlockAddress;

pub use backup::backup;
pub use format::format;
pub use read::read_dump;
pub use write::write_one;

/// Block targeted by the single-block write: first data block of sector 1.
pub const WRITE_TARGET: BlockAddress = BlockAddress::new(WRITE_SECTOR, WRITE_BLOCK_IN_SECTOR);

/// Appended when the read-dump text hits its bound.
pub const TRUNCATION_MARKER: &str = "\n[truncated]\n";

/// Data blocks of sectors 1..16: the manufacturer sector and every trailer
/// are excluded.
pub fn data_blocks() -> impl Iterator<Item = BlockAddress> {
    (1..SECTOR_COUNT).flat_map(|s| (0..TRAILER_BLOCK).map(move |b| BlockAddress::new(s, b)))
}

/// Every block of sectors 0..16, trailers included.
pub fn all_blocks() -> impl Iterator<Item = BlockAddress> {
    (0..SECTOR_COUNT)
        .flat_map(|s| (0..BLOCKS_PER_SECTOR).map(move |b| BlockAddress::new(s, b)))
}

pub fn pages() -> std::ops::Range<u8> {
    0..PAGE_COUNT
}

/// Calls the yield point after every `every` completed blocks.
pub struct Cadence<'y> {
    yield_point: &'y mut dyn FnMut(),
    every: usize,
    since_yield: usize,
    yields: usize,
}

impl<'y> Cadence<'y> {
    pub fn new(yield_point: &'y mut dyn FnMut(), every: usize) -> Self {
        Self {
            yield_point,
            every: every.max(1),
            since_yield: 0,
            yields: 0,
        }
    }

    /// Count one finished block, successful or not.
    pub fn block_done(&mut self) {
        self.since_yield += 1;
        if self.since_yield == self.every {
            self.since_yield = 0;
            self.yields += 1;
            (self.yield_point)();
        }
    }

    pub fn yields(&self) -> usize {
        self.yields
    }
}

/// What a handler produced for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerReport {
    pub text: String,
    pub succeeded: usize,
    pub failed: usize,
    /// Set only by the read-dump handler.
    pub delivery: Option<DeliveryAttempt>,
}

impl HandlerReport {
    pub fn new(text: String, succeeded: usize, failed: usize) -> Self {
        Self {
            text,
            succeeded,
            failed,
            delivery: None,
        }
    }
}

/// Run the handler for `mode` against the selected card.
pub fn run(
    mode: &OperatingMode,
    session: &mut CardSession,
    access: &mut BlockAccess<'_>,
    cadence: &mut Cadence<'_>,
    read_memory: bool,
    courier: &mut Courier<'_>,
) -> HandlerReport {
    match mode {
        OperatingMode::Read => read_dump(session, access, cadence, read_memory, courier),
        OperatingMode::Write(payload) => write_one(session, access, &payload.to_block()),
        OperatingMode::Format => format(session, access, cadence),
        OperatingMode::Backup => backup(session, access, cadence),
    }
}

fn header(session: &CardSession) -> String {
    format!(
        "UID: {}\nType: {}\n",
        session.uid().to_hex_spaced(),
        session.family()
    )
}

/// Note for families whose memory is not walked at all.
fn skip_note(model: MemoryModel) -> Option<&'static str> {
    match model {
        MemoryModel::NoBlockAccess => Some("No block memory access for this card family\n"),
        MemoryModel::Unsupported => Some("Card family unsupported, memory not accessed\n"),
        MemoryModel::Sectored | MemoryModel::Paged => None,
    }
}

/// Cut `text` so it fits in `max` bytes including the truncation marker.
pub fn bound_text(mut text: String, max: usize) -> String {
    if text.len() <= max {
        return text;
    }
    let mut cut = max.saturating_sub(TRUNCATION_MARKER.len());
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text.push_str(TRUNCATION_MARKER);
    text
}
