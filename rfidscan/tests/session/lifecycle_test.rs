#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use common::helpers::Rig;
use rfidscan::config::OperatingMode;
use rfidscan::session::{SessionState, TickOutcome};
use rfidscan::transport::mock::{Call, MockTransport};
use rfidscan::types::{BlockAddress, StatusCode};
use rfidscan::Error;

fn completed(outcome: TickOutcome) -> Box<rfidscan::session::SessionReport> {
    match outcome {
        TickOutcome::Completed(report) => report,
        other => panic!("expected a completed session, got {:?}", other),
    }
}

#[test]
fn every_mode_halts_exactly_once() {
    let modes = [
        OperatingMode::Read,
        OperatingMode::parse("WRITE", Some("hi")).unwrap(),
        OperatingMode::Format,
        OperatingMode::Backup,
    ];
    for mode in modes {
        let mut rig = Rig::with_card(fixtures::classic_card());
        rig.shared.set_mode(mode.clone());
        completed(rig.tick());
        assert_eq!(rig.mock(|m| m.halt_calls()), 1, "mode {}", mode);
        assert_eq!(rig.orchestrator.state(), SessionState::Idle);
        assert_eq!(
            rig.orchestrator.last_trail()[4],
            SessionState::Released,
            "mode {}",
            mode
        );
    }
}

#[test]
fn halt_after_total_failure() {
    let mut card = fixtures::classic_card();
    for block in 0..64 {
        card = card.fail_auth(BlockAddress::from_linear(block));
    }
    let mut rig = Rig::with_card(card);
    let report = completed(rig.tick());
    assert_eq!(report.failed, 45);
    assert_eq!(report.succeeded, 0);
    assert_eq!(rig.mock(|m| m.halt_calls()), 1);
    assert_eq!(rig.mock(|m| m.calls.last().cloned()), Some(Call::Halt));
}

#[test]
fn halt_for_unsupported_and_opaque_families() {
    for card in [fixtures::unknown_card(), fixtures::desfire_card()] {
        let mut rig = Rig::with_card(card);
        let report = completed(rig.tick());
        assert_eq!(report.blocks_visited, 0);
        assert_eq!(rig.mock(|m| m.block_ops()), 0);
        assert_eq!(rig.mock(|m| m.halt_calls()), 1);
    }
}

#[test]
fn unsupported_family_in_read_mode() {
    let mut rig = Rig::with_card(fixtures::unknown_card());
    let report = completed(rig.tick());
    assert!(report.text.contains("A1 B2 C3 D4"));
    assert!(report.text.to_lowercase().contains("unsupported"));
    assert_eq!(rig.delivery.sent().len(), 1);
}

#[test]
fn write_with_failed_auth_still_releases() {
    let card = fixtures::classic_card().fail_auth(BlockAddress::new(1, 0));
    let mut rig = Rig::with_card(card);
    rig.shared
        .set_mode(OperatingMode::parse("WRITE", Some("NEW")).unwrap());
    let report = completed(rig.tick());
    assert_eq!(report.failed, 1);
    assert!(report.text.contains("Write failed"));
    assert_eq!(rig.mock(|m| m.write_calls()), 0);
    assert!(rig
        .orchestrator
        .last_trail()
        .contains(&SessionState::Released));
}

#[test]
fn no_card_and_select_failure_start_no_session() {
    let mut rig = Rig::new(MockTransport::new());
    assert_eq!(rig.tick(), TickOutcome::NoCard);

    let mut mock = MockTransport::with_card(fixtures::classic_card());
    mock.select_failures = 1;
    let mut rig = Rig::new(mock);
    assert_eq!(rig.tick(), TickOutcome::SelectFailed);
    assert_eq!(rig.mock(|m| m.halt_calls()), 0);
    assert_eq!(rig.orchestrator.last_trail(), &[SessionState::Idle]);
    // Retried on the next poll
    assert!(matches!(rig.tick(), TickOutcome::Completed(_)));
}

#[test]
fn reader_fault_aborts_the_tick() {
    let mut mock = MockTransport::with_card(fixtures::classic_card());
    mock.presence_error = Some(Error::Status(StatusCode::Timeout));
    let mut rig = Rig::new(mock);
    assert_eq!(
        rig.tick(),
        TickOutcome::Aborted(Error::Status(StatusCode::Timeout))
    );
    assert_eq!(rig.mock(|m| m.halt_calls()), 0);
}

#[test]
fn halted_card_is_not_read_twice() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    completed(rig.tick());
    rig.clock.advance(5_000);
    // Still in the field but halted
    assert_eq!(rig.tick(), TickOutcome::NoCard);
    rig.represent();
    completed(rig.tick());
    assert_eq!(rig.mock(|m| m.halt_calls()), 2);
}

#[test]
fn last_result_tracks_latest_session() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    assert_eq!(rig.shared.last_result(), "No card");
    let report = completed(rig.tick());
    assert_eq!(rig.shared.last_result(), report.text);
    assert_eq!(rig.shared.sink().sessions(), 1);
}
