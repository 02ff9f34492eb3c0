#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use common::helpers::Rig;
use rfidscan::card::operations::{WRITE_TARGET, all_blocks, data_blocks};
use rfidscan::config::OperatingMode;
use rfidscan::session::TickOutcome;
use rfidscan::types::BlockData;

fn next_card(rig: &mut Rig) {
    rig.represent();
    rig.clock.advance(1_000);
}

#[test]
fn write_then_read_returns_written_bytes() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared
        .set_mode(OperatingMode::parse("WRITE", Some("Hello RFID")).unwrap());
    assert!(matches!(rig.tick(), TickOutcome::Completed(_)));

    next_card(&mut rig);
    rig.shared.set_mode(OperatingMode::Read);
    rig.tick();

    let expected = BlockData::from_payload(b"Hello RFID");
    let line = format!("Block 4: {} | {}", expected.to_hex(), expected.to_ascii_safe());
    assert!(rig.shared.last_result().contains(&line));
    let stored = rig.mock(|m| m.card.as_ref().unwrap().block(WRITE_TARGET));
    assert_eq!(stored, Some(expected));
}

#[test]
fn long_payload_is_cut_to_fifteen_bytes() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared.set_mode(
        OperatingMode::parse("WRITE", Some("ABCDEFGHIJKLMNOPQRSTUVWXYZ")).unwrap(),
    );
    rig.tick();
    let stored = rig
        .mock(|m| m.card.as_ref().unwrap().block(WRITE_TARGET))
        .unwrap();
    assert_eq!(&stored.as_bytes()[..15], b"ABCDEFGHIJKLMNO");
    assert_eq!(stored.as_bytes()[15], 0);
}

#[test]
fn format_is_idempotent() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared.set_mode(OperatingMode::Format);
    rig.tick();
    let first = rig.mock(|m| m.card.as_ref().unwrap().memory.clone());

    next_card(&mut rig);
    rig.tick();
    let second = rig.mock(|m| m.card.as_ref().unwrap().memory.clone());
    assert_eq!(first, second);

    let card = rig.mock(|m| m.card.clone().unwrap());
    for block in data_blocks() {
        assert!(card.block(block).unwrap().is_zero(), "block {} not zero", block);
    }
}

#[test]
fn format_leaves_trailers_intact() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    let before = rig.mock(|m| m.card.clone().unwrap());
    rig.shared.set_mode(OperatingMode::Format);
    rig.tick();
    let after = rig.mock(|m| m.card.clone().unwrap());
    for block in all_blocks().filter(|b| b.is_trailer() || b.is_manufacturer_sector()) {
        assert_eq!(before.block(block), after.block(block), "block {}", block);
    }
}

#[test]
fn backup_text_is_not_bounded() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared.set_mode(OperatingMode::Backup);
    match rig.tick() {
        TickOutcome::Completed(report) => {
            assert!(report.text.len() > 4096);
            assert!(!report.text.contains("[truncated]"));
            assert!(report.text.ends_with("Backup complete: 64/64 read\n"));
        }
        other => panic!("unexpected {:?}", other),
    }
}
