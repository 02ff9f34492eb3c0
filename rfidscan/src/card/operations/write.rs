// rfidscan/src/card/operations/write.rs

use log::{info, warn};

use super::{HandlerReport, WRITE_TARGET, header};
use crate::card::{BlockAccess, BlockEvent, CardSession, MemoryModel};
use crate::types::BlockData;

/// WRITE mode: authenticate and write one block, the first data block of
/// sector 1. Never touches any other block.
pub fn write_one(
    session: &mut CardSession,
    access: &mut BlockAccess<'_>,
    data: &BlockData,
) -> HandlerReport {
    let mut text = header(session);
    if session.family().memory_model() != MemoryModel::Sectored {
        text += &format!("{} unsupported for WRITE\n", session.family());
        return HandlerReport::new(text, 0, 0);
    }

    match access.write(WRITE_TARGET, data) {
        Ok(()) => {
            info!("wrote block {} on {}", WRITE_TARGET, session.uid());
            text += &format!(
                "Block {} written: {} | {}\n",
                WRITE_TARGET,
                data.to_hex(),
                data.to_ascii_safe()
            );
            session.record(WRITE_TARGET, BlockEvent::Written);
            HandlerReport::new(text, 1, 0)
        }
        Err(failure) => {
            warn!("write to block {} failed: {}", WRITE_TARGET, failure);
            text += &format!("Write failed on block {}: {}\n", WRITE_TARGET, failure);
            session.record(WRITE_TARGET, BlockEvent::Failed(failure));
            HandlerReport::new(text, 0, 1)
        }
    }
}
