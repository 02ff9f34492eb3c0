#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use common::helpers::Rig;
use rfidscan::config::OperatingMode;
use rfidscan::session::TickOutcome;

#[test]
fn yield_point_runs_every_three_blocks() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    let mut yields = 0;
    let outcome = rig.tick_with(&mut |_| yields += 1);
    assert!(matches!(outcome, TickOutcome::Completed(_)));
    assert_eq!(yields, 15);

    rig.represent();
    rig.clock.advance(2_000);
    rig.shared.set_mode(OperatingMode::Backup);
    let mut yields = 0;
    rig.tick_with(&mut |_| yields += 1);
    assert_eq!(yields, 21);
}

#[test]
fn write_has_no_yield_points() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared
        .set_mode(OperatingMode::parse("WRITE", Some("x")).unwrap());
    let mut yields = 0;
    rig.tick_with(&mut |_| yields += 1);
    assert_eq!(yields, 0);
}

#[test]
fn mode_change_at_yield_applies_to_next_session() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    rig.shared.set_mode(OperatingMode::Backup);

    let outcome = rig.tick_with(&mut |shared| shared.set_mode(OperatingMode::Format));
    match outcome {
        TickOutcome::Completed(report) => {
            assert_eq!(report.mode, OperatingMode::Backup);
            assert_eq!(report.blocks_visited, 64);
        }
        other => panic!("unexpected {:?}", other),
    }
    // The backup wrote nothing
    assert_eq!(rig.mock(|m| m.write_calls()), 0);
    assert_eq!(rig.shared.mode(), &OperatingMode::Format);

    rig.represent();
    rig.clock.advance(2_000);
    match rig.tick() {
        TickOutcome::Completed(report) => assert_eq!(report.mode, OperatingMode::Format),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(rig.mock(|m| m.write_calls()), 45);
}

#[test]
fn config_change_at_yield_does_not_leak_into_session() {
    let mut rig = Rig::with_card(fixtures::classic_card());
    let outcome = rig.tick_with(&mut |shared| {
        shared.set_read_memory_enabled(false).unwrap();
        shared.set_api_url("").unwrap();
    });
    match outcome {
        TickOutcome::Completed(report) => {
            assert_eq!(report.succeeded, 45);
            let attempt = report.delivery.unwrap();
            assert_eq!(attempt.url, common::helpers::API_URL);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(!rig.shared.config().read_memory_enabled);
}
