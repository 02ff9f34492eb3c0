// rfidscan/src/console.rs
//! Line-oriented serial console. The same command words are accepted by
//! the control plane's command route.

use std::str::FromStr;

use crate::config::{OperatingMode, SharedState, WritePayload};
use crate::{Error, Result};

pub const HELP: &str = "Commands: READ, WRITE <data>, SCAN, STOP, INFO, FORMAT, BACKUP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Read,
    Write(String),
    Scan,
    Stop,
    Info,
    Format,
    Backup,
}

impl FromStr for ConsoleCommand {
    type Err = Error;

    /// The command word is case-insensitive; a WRITE payload is kept as
    /// typed.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word.to_ascii_uppercase().as_str() {
            "READ" => Ok(ConsoleCommand::Read),
            "WRITE" if rest.is_empty() => Err(Error::MissingPayload),
            "WRITE" => Ok(ConsoleCommand::Write(rest.to_string())),
            "SCAN" => Ok(ConsoleCommand::Scan),
            "STOP" => Ok(ConsoleCommand::Stop),
            "INFO" => Ok(ConsoleCommand::Info),
            "FORMAT" => Ok(ConsoleCommand::Format),
            "BACKUP" => Ok(ConsoleCommand::Backup),
            _ => Err(Error::UnknownCommand(word.to_string())),
        }
    }
}

/// Facts about the running device shown by INFO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub uptime_s: u64,
    pub reader_version: Option<u8>,
    pub free_heap: u32,
}

pub fn system_info(shared: &SharedState, info: &SystemInfo) -> String {
    let config = shared.config();
    let reader = match info.reader_version {
        Some(v) => format!("{:#04X}", v),
        None => "not responding".to_string(),
    };
    let api_url = if config.api_url.is_empty() {
        "(not set)"
    } else {
        config.api_url.as_str()
    };
    format!(
        "Mode: {}\nScanning: {}\nReader: {}\nUptime: {} s\nFree heap: {} bytes\n\
         Scan interval: {} ms\nRead memory: {}\nAPI URL: {}\nSessions: {}\n",
        shared.mode(),
        if shared.is_scanning() { "on" } else { "off" },
        reader,
        info.uptime_s,
        info.free_heap,
        config.scan_interval_ms,
        if config.read_memory_enabled { "on" } else { "off" },
        api_url,
        shared.sink().sessions()
    )
}

impl ConsoleCommand {
    /// Apply the command and return the reply line(s).
    pub fn apply(&self, shared: &mut SharedState, info: &SystemInfo) -> String {
        match self {
            ConsoleCommand::Read => {
                shared.set_mode(OperatingMode::Read);
                "Mode: READ".to_string()
            }
            ConsoleCommand::Write(data) => {
                let payload = WritePayload::new(data);
                let text = payload.to_text();
                shared.set_mode(OperatingMode::Write(payload));
                format!("Mode: WRITE, data: {}", text)
            }
            ConsoleCommand::Scan => {
                shared.set_scanning(true);
                "Scanning started".to_string()
            }
            ConsoleCommand::Stop => {
                shared.set_scanning(false);
                "Scanning stopped".to_string()
            }
            ConsoleCommand::Info => system_info(shared, info),
            ConsoleCommand::Format => {
                shared.set_mode(OperatingMode::Format);
                "Mode: FORMAT".to_string()
            }
            ConsoleCommand::Backup => {
                shared.set_mode(OperatingMode::Backup);
                "Mode: BACKUP".to_string()
            }
        }
    }
}

/// Parse and apply one console line. Errors become the reply text.
pub fn handle_line(line: &str, shared: &mut SharedState, info: &SystemInfo) -> String {
    match line.parse::<ConsoleCommand>() {
        Ok(cmd) => cmd.apply(shared, info),
        Err(e) => format!("{}\n{}", e, HELP),
    }
}
