#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use common::helpers::Rig;
use rfidscan::card::operations::{WRITE_TARGET, all_blocks, data_blocks};
use rfidscan::config::OperatingMode;
use rfidscan::transport::mock::{Call, MockCard};

fn classic_families() -> Vec<MockCard> {
    let uid = fixtures::sample_uid();
    vec![
        MockCard::sectored(uid, 0x0004, 0x09),
        MockCard::sectored(uid, 0x0004, 0x08),
        MockCard::sectored(uid, 0x0002, 0x18),
    ]
}

#[test]
fn format_never_touches_sector_zero_or_trailers() {
    for card in classic_families() {
        let mut rig = Rig::with_card(card);
        rig.shared.set_mode(OperatingMode::Format);
        rig.tick();
        let touched = rig.mock(|m| m.touched());
        assert_eq!(touched.len(), 45);
        for address in touched {
            assert!(address >= 4, "sector 0 block {}", address);
            assert_ne!(address % 4, 3, "trailer {}", address);
        }
    }
}

#[test]
fn read_dump_skips_sector_zero_and_trailers() {
    for card in classic_families() {
        let mut rig = Rig::with_card(card);
        rig.tick();
        let touched = rig.mock(|m| m.touched());
        let expected: Vec<u8> = data_blocks().map(|b| b.as_u8()).collect();
        assert_eq!(touched, expected);
    }
}

#[test]
fn backup_includes_sector_zero_and_trailers() {
    for card in classic_families() {
        let mut rig = Rig::with_card(card);
        rig.shared.set_mode(OperatingMode::Backup);
        rig.tick();
        let touched = rig.mock(|m| m.touched());
        let expected: Vec<u8> = all_blocks().map(|b| b.as_u8()).collect();
        assert_eq!(touched, expected);
        assert!(touched.contains(&0));
        assert!(touched.contains(&3));
        assert!(touched.contains(&63));
        assert_eq!(rig.mock(|m| m.write_calls()), 0);
    }
}

#[test]
fn write_touches_only_its_target() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared
        .set_mode(OperatingMode::parse("WRITE", Some("badge")).unwrap());
    rig.tick();
    assert_eq!(rig.mock(|m| m.touched()), vec![WRITE_TARGET.as_u8()]);
}

#[test]
fn every_block_access_is_authenticated_first() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared.set_mode(OperatingMode::Backup);
    rig.tick();
    let calls = rig.mock(|m| m.calls.clone());
    for (i, call) in calls.iter().enumerate() {
        if let Call::Read(a) | Call::Write(a, _) = call {
            assert_eq!(calls[i - 1], Call::Authenticate(*a), "call {}", i);
        }
    }
}

#[test]
fn ultralight_pages_are_read_without_auth() {
    let mut rig = Rig::with_card(fixtures::ultralight_card());
    rig.tick();
    assert_eq!(rig.mock(|m| m.auth_calls()), 0);
    assert_eq!(rig.mock(|m| m.read_calls()), 16);
    assert!(rig.shared.last_result().contains("Page 4: 4E 44 45 46 | NDEF"));
}
