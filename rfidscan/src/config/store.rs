// rfidscan/src/config/store.rs
//! Fixed-layout persistent configuration store.
//!
//! Each field owns a fixed byte region. Text fields are NUL-terminated
//! inside their region. Erased flash reads as all ones: a text region
//! starting with 0xFF, or a numeric region of nothing but 0xFF, has never
//! been written.

use derive_more::Display;
use log::trace;

use crate::{Error, Result};

/// Total size of the store image.
pub const STORE_SIZE: usize = 512;

const ERASED: u8 = 0xFF;

/// Persisted configuration fields and their region in the store image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "api url")]
    ApiUrl,
    #[display(fmt = "wifi ssid")]
    WifiSsid,
    #[display(fmt = "wifi password")]
    WifiPass,
    #[display(fmt = "scan interval")]
    ScanInterval,
    #[display(fmt = "read memory")]
    ReadMemory,
    #[display(fmt = "web code")]
    WebCode,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::ApiUrl,
        Field::WifiSsid,
        Field::WifiPass,
        Field::ScanInterval,
        Field::ReadMemory,
        Field::WebCode,
    ];

    pub fn offset(&self) -> usize {
        match self {
            Field::ApiUrl => 0,
            Field::WifiSsid => 200,
            Field::WifiPass => 232,
            Field::ScanInterval => 296,
            Field::ReadMemory => 300,
            Field::WebCode => 301,
        }
    }

    pub fn region_len(&self) -> usize {
        match self {
            Field::ApiUrl => 200,
            Field::WifiSsid => 32,
            Field::WifiPass => 64,
            Field::ScanInterval => 4,
            Field::ReadMemory => 1,
            Field::WebCode => 17,
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, Field::ScanInterval | Field::ReadMemory)
    }

    /// Longest value accepted. Text fields keep one byte for the terminator.
    pub fn max_len(&self) -> usize {
        if self.is_text() {
            self.region_len() - 1
        } else {
            self.region_len()
        }
    }

    fn range(&self) -> std::ops::Range<usize> {
        self.offset()..self.offset() + self.region_len()
    }
}

/// Persistent key/value storage keyed by `Field`.
pub trait Store {
    /// Raw field value, or `None` when the field was never written. Text
    /// values come back without their terminator.
    fn get_field(&self, field: Field) -> Result<Option<Vec<u8>>>;

    /// Rewrite the whole region of `field`. Returns once the value is
    /// durable.
    fn set_field(&mut self, field: Field, value: &[u8]) -> Result<()>;
}

/// EEPROM-style store over a fixed 512-byte image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EepromStore {
    image: Vec<u8>,
    commits: usize,
}

impl EepromStore {
    /// A freshly erased store.
    pub fn new() -> Self {
        Self {
            image: vec![ERASED; STORE_SIZE],
            commits: 0,
        }
    }

    pub fn from_image(image: Vec<u8>) -> Result<Self> {
        if image.len() != STORE_SIZE {
            return Err(Error::Storage(format!(
                "image is {} bytes, expected {}",
                image.len(),
                STORE_SIZE
            )));
        }
        Ok(Self { image, commits: 0 })
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Number of committed region writes.
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Default for EepromStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for EepromStore {
    fn get_field(&self, field: Field) -> Result<Option<Vec<u8>>> {
        let region = &self.image[field.range()];
        let erased = if field.is_text() {
            region[0] == ERASED
        } else {
            region.iter().all(|&b| b == ERASED)
        };
        if erased {
            return Ok(None);
        }
        if field.is_text() {
            let end = region.iter().position(|&b| b == 0).ok_or_else(|| {
                Error::Storage(format!("{} is not terminated", field))
            })?;
            Ok(Some(region[..end].to_vec()))
        } else {
            Ok(Some(region.to_vec()))
        }
    }

    fn set_field(&mut self, field: Field, value: &[u8]) -> Result<()> {
        if value.len() > field.max_len() {
            return Err(Error::FieldTooLong {
                field,
                max: field.max_len(),
                actual: value.len(),
            });
        }
        if !field.is_text() && value.len() != field.region_len() {
            return Err(Error::InvalidLength {
                expected: field.region_len(),
                actual: value.len(),
            });
        }
        // The whole region is rewritten; text tails are zero-filled so no
        // stale bytes survive a shorter value.
        let region = &mut self.image[field.range()];
        region.fill(0);
        region[..value.len()].copy_from_slice(value);
        self.commits += 1;
        trace!("store: committed {} ({} bytes)", field, value.len());
        Ok(())
    }
}
