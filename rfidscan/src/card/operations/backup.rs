// rfidscan/src/card/operations/backup.rs

use log::info;

use super::{Cadence, HandlerReport, all_blocks, header, pages, skip_note};
use crate::card::{BlockAccess, BlockEvent, CardSession, MemoryModel};
use crate::types::BlockAddress;

/// BACKUP mode: dump every block of sectors 0..16, trailers included, or
/// pages 0..16 on paged cards. Read-only, and the text is not bounded.
pub fn backup(
    session: &mut CardSession,
    access: &mut BlockAccess<'_>,
    cadence: &mut Cadence<'_>,
) -> HandlerReport {
    let mut text = header(session);
    let model = session.family().memory_model();
    if let Some(note) = skip_note(model) {
        text.push_str(note);
        return HandlerReport::new(text, 0, 0);
    }

    let mut succeeded = 0;
    let mut failed = 0;
    if model == MemoryModel::Sectored {
        for block in all_blocks() {
            if block.block_in_sector() == 0 {
                text += &format!("Sector {}:\n", block.sector());
            }
            match access.read(block) {
                Ok(data) => {
                    text += &format!(
                        "  Block {}: {} | {}\n",
                        block,
                        data.to_hex(),
                        data.to_ascii_safe()
                    );
                    session.record(block, BlockEvent::Read(data));
                    succeeded += 1;
                }
                Err(failure) => {
                    text += &format!("  Block {}: {}\n", block, failure);
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
                    text += &format!("Page {}: {} | {}\n", page, data.to_hex(), data.to_ascii_safe());
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

    info!("backup of {}: {} ok, {} failed", session.uid(), succeeded, failed);
    text += &format!(
        "Backup complete: {}/{} read\n",
        succeeded,
        succeeded + failed
    );
    HandlerReport::new(text, succeeded, failed)
}
