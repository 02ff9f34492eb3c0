//! Run the scan loop against a simulated reader and print what it does.
//!
//! Usage:
//!   cargo run -p rfidscan --example simulated_scanner
//!
//! Set RUST_LOG=debug to see per-block traces.

use anyhow::Context;
use rfidscan::config::{EepromStore, SharedState};
use rfidscan::control::Request;
use rfidscan::delivery::OfflineDelivery;
use rfidscan::platform::HostPlatform;
use rfidscan::scanner::Scanner;
use rfidscan::session::{Orchestrator, TickOutcome};
use rfidscan::signal::SilentSignal;
use rfidscan::test_support::{ManualClock, SharedTransport};
use rfidscan::transport::mock::{MockCard, MockTransport};
use rfidscan::types::{BlockAddress, BlockData, Uid};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let uid = Uid::try_from(&[0xDE, 0xAD, 0xBE, 0xEF][..])?;
    let card = MockCard::classic_1k(uid)
        .with_block(BlockAddress::new(1, 1), BlockData::from_payload(b"simulated"));
    let reader = SharedTransport::new(MockTransport::with_card(card));

    let shared = SharedState::load(Box::new(EepromStore::new())).context("loading config")?;
    let clock = ManualClock::at(0);
    let mut scanner = Scanner::new(
        Orchestrator::new(reader.boxed()),
        shared,
        Box::new(clock.clone()),
        Box::new(OfflineDelivery),
        Box::new(SilentSignal),
        Box::new(HostPlatform::new()),
    );
    let version = scanner.boot().context("reader self-test")?;
    println!("reader version {:#04x}", version);

    let script = ["READ", "BACKUP", "WRITE hello", "FORMAT"];
    for cmd in script {
        println!("> {}", cmd);
        println!("{}", scanner.console(cmd));
        match scanner.poll(&mut |_| {}) {
            TickOutcome::Completed(report) => println!("{}", report.text),
            other => println!("tick: {:?}", other),
        }
        reader.0.borrow_mut().represent();
        clock.advance(1_500);
    }

    let resp = scanner.handle(&Request::get("/api/apilog"));
    println!("api log: {}", resp.body);
    println!("{}", scanner.console("INFO"));
    let resp = scanner.handle(&Request::get("/api/status").param("code", "1234"));
    println!("status: {}", resp.body);
    Ok(())
}
