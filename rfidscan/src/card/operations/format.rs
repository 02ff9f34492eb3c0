// rfidscan/src/card/operations/format.rs

use log::info;

use super::{Cadence, HandlerReport, data_blocks, header};
use crate::card::{BlockAccess, BlockEvent, CardSession, MemoryModel};
use crate::types::BlockData;

/// FORMAT mode: zero every data block of sectors 1..16. Trailers and the
/// manufacturer sector are never written.
pub fn format(
    session: &mut CardSession,
    access: &mut BlockAccess<'_>,
    cadence: &mut Cadence<'_>,
) -> HandlerReport {
    let mut text = header(session);
    if session.family().memory_model() != MemoryModel::Sectored {
        text += &format!("{} unsupported for FORMAT\n", session.family());
        return HandlerReport::new(text, 0, 0);
    }

    let total = data_blocks().count();
    let mut formatted = 0;
    for block in data_blocks() {
        match access.write(block, &BlockData::ZERO) {
            Ok(()) => {
                session.record(block, BlockEvent::Written);
                formatted += 1;
            }
            Err(failure) => {
                text += &format!("Block {}: {}\n", block, failure);
                session.record(block, BlockEvent::Failed(failure));
            }
        }
        cadence.block_done();
    }

    info!("formatted {}/{} blocks on {}", formatted, total, session.uid());
    text += &format!("Format complete: {}/{} blocks formatted\n", formatted, total);
    HandlerReport::new(text, formatted, total - formatted)
}
