// rfidscan/src/scanner.rs
//! The scan loop: owns the orchestrator, the shared state, the board
//! platform and the collaborators, and lends the shared state to the
//! control plane between and during sessions.

use log::{error, info};

use crate::config::SharedState;
use crate::console::{SystemInfo, handle_line};
use crate::control::{Request, RequestContext, Response};
use crate::delivery::Delivery;
use crate::platform::Platform;
use crate::session::{Collaborators, Orchestrator, TickOutcome};
use crate::signal::Signal;
use crate::utils::Clock;
use crate::Result;

pub struct Scanner {
    orchestrator: Orchestrator,
    shared: SharedState,
    clock: Box<dyn Clock>,
    delivery: Box<dyn Delivery>,
    signal: Box<dyn Signal>,
    platform: Box<dyn Platform>,
    reader_version: Option<u8>,
}

impl Scanner {
    pub fn new(
        orchestrator: Orchestrator,
        shared: SharedState,
        clock: Box<dyn Clock>,
        delivery: Box<dyn Delivery>,
        signal: Box<dyn Signal>,
        platform: Box<dyn Platform>,
    ) -> Self {
        Self {
            orchestrator,
            shared,
            clock,
            delivery,
            signal,
            platform,
            reader_version: None,
        }
    }

    /// Probe the reader. A missing reader is reported but not fatal: the
    /// control plane stays reachable and INFO shows the fault.
    pub fn boot(&mut self) -> Result<u8> {
        match self.orchestrator.check_reader() {
            Ok(version) => {
                self.reader_version = Some(version);
                Ok(version)
            }
            Err(e) => {
                error!("reader self-test failed: {}", e);
                self.reader_version = None;
                Err(e)
            }
        }
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    pub fn shared_mut(&mut self) -> &mut SharedState {
        &mut self.shared
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo {
            uptime_s: self.clock.uptime_secs(),
            reader_version: self.reader_version,
            free_heap: self.platform.free_heap(),
        }
    }

    /// One loop iteration: serve the control plane, run one tick (which
    /// serves it again at every yield point), then play any beep the
    /// control plane asked for.
    pub fn poll(&mut self, control: &mut dyn FnMut(&mut SharedState)) -> TickOutcome {
        control(&mut self.shared);

        let mut io = Collaborators {
            clock: self.clock.as_ref(),
            delivery: self.delivery.as_mut(),
            signal: self.signal.as_mut(),
        };
        let outcome = self.orchestrator.tick(&mut self.shared, &mut io, control);

        if let Some(pattern) = self.shared.take_pending_beep() {
            self.signal.play(pattern);
        }
        if let TickOutcome::Completed(report) = &outcome {
            info!("{} done: {}/{} blocks ok", report.mode, report.succeeded, report.blocks_visited);
        }
        outcome
    }

    /// Handle one serial console line.
    pub fn console(&mut self, line: &str) -> String {
        let info = self.system_info();
        handle_line(line, &mut self.shared, &info)
    }

    /// Serve one control-plane request between ticks.
    pub fn handle(&mut self, req: &Request) -> Response {
        let info = self.system_info();
        RequestContext::new(&mut self.shared, self.platform.as_mut(), info).handle(req)
    }
}
