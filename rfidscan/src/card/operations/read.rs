// rfidscan/src/card/operations/read.rs

use log::info;

use super::{Cadence, HandlerReport, bound_text, data_blocks, header, pages, skip_note};
use crate::card::{BlockAccess, BlockEvent, CardSession, MemoryModel};
use crate::constants::READ_DUMP_MAX_LEN;
use crate::delivery::Courier;
use crate::types::BlockAddress;

/// READ mode: dump readable memory (when enabled), then deliver the UID.
///
/// Sectored cards are read over sectors 1..16 skipping trailers, paged
/// cards over pages 0..16. A block that fails is reported and the traversal
/// moves on. The dump text is bounded; the UID is delivered exactly once
/// whatever the dump looked like.
pub fn read_dump(
    session: &mut CardSession,
    access: &mut BlockAccess<'_>,
    cadence: &mut Cadence<'_>,
    read_memory: bool,
    courier: &mut Courier<'_>,
) -> HandlerReport {
    let mut text = header(session);
    let mut succeeded = 0;
    let mut failed = 0;

    let model = session.family().memory_model();
    if !read_memory {
        text.push_str("Memory read disabled\n");
    } else if let Some(note) = skip_note(model) {
        text.push_str(note);
    } else if model == MemoryModel::Sectored {
        for block in data_blocks() {
            match access.read(block) {
                Ok(data) => {
                    text += &format!(
                        "Block {}: {} | {}\n",
                        block,
                        data.to_hex(),
                        data.to_ascii_safe()
                    );
                    session.record(block, BlockEvent::Read(data));
                    succeeded += 1;
                }
                Err(failure) => {
                    text += &format!("Block {}: {}\n", block, failure);
                    session.record(block, BlockEvent::Failed(failure));
                    failed += 1;
                }
            }
            cadence.block_done();
        }
    } else {
        for page in pages() {
            let address = BlockAddress::from_linear(page);
            match access.read_page(page) {
                Ok(data) => {
                    text += &format!(
                        "Page {}: {} | {}\n",
                        page,
                        data.to_hex(),
                        data.to_ascii_safe()
                    );
                    session.record(address, BlockEvent::Page(data));
                    succeeded += 1;
                }
                Err(failure) => {
                    text += &format!("Page {}: {}\n", page, failure);
                    session.record(address, BlockEvent::Failed(failure));
                    failed += 1;
                }
            }
            cadence.block_done();
        }
    }

    if read_memory {
        info!(
            "read {}: {} ok, {} failed",
            session.uid(),
            succeeded,
            failed
        );
    }

    let attempt = courier.deliver(session.uid());
    HandlerReport {
        text: bound_text(text, READ_DUMP_MAX_LEN),
        succeeded,
        failed,
        delivery: Some(attempt),
    }
}
