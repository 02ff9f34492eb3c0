// rfidscan/src/config/mode.rs

use std::fmt;
use std::str::FromStr;

use crate::constants::WRITE_PAYLOAD_MAX;
use crate::types::BlockData;
use crate::{Error, Result};

/// Payload of the WRITE mode, at most 15 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePayload(Vec<u8>);

impl WritePayload {
    /// Keep the first 15 bytes of `data`.
    pub fn new(data: &str) -> Self {
        let bytes = data.as_bytes();
        let n = bytes.len().min(WRITE_PAYLOAD_MAX);
        Self(bytes[..n].to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Stored payload as text. A cut through a multi-byte character shows
    /// up as a replacement character.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }

    pub fn to_block(&self) -> BlockData {
        BlockData::from_payload(&self.0)
    }
}

/// What the next card session will do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperatingMode {
    #[default]
    Read,
    Write(WritePayload),
    Format,
    Backup,
}

impl OperatingMode {
    /// Build a mode from its name and optional payload. Unknown names are
    /// rejected; WRITE needs a non-empty payload.
    pub fn parse(name: &str, payload: Option<&str>) -> Result<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "READ" => Ok(OperatingMode::Read),
            "FORMAT" => Ok(OperatingMode::Format),
            "BACKUP" => Ok(OperatingMode::Backup),
            "WRITE" => match payload {
                Some(p) if !p.is_empty() => Ok(OperatingMode::Write(WritePayload::new(p))),
                _ => Err(Error::MissingPayload),
            },
            _ => Err(Error::UnknownMode(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperatingMode::Read => "READ",
            OperatingMode::Write(_) => "WRITE",
            OperatingMode::Format => "FORMAT",
            OperatingMode::Backup => "BACKUP",
        }
    }
}

impl FromStr for OperatingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OperatingMode::parse(s, None)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
