// rfidscan/src/config/mod.rs
//! Persisted configuration and the state shared between the scan loop and
//! the control plane.

pub mod mode;
pub mod shared;
pub mod store;

pub use mode::{OperatingMode, WritePayload};
pub use shared::SharedState;
pub use store::{EepromStore, Field, STORE_SIZE, Store};

use log::warn;
use serde::Serialize;

use crate::{Error, Result};
use crate::constants::{SCAN_INTERVAL_DEFAULT_MS, SCAN_INTERVAL_FLOOR_MS, WEB_CODE_DEFAULT};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub pass: String,
}

/// Live configuration, loaded once at boot and kept in sync with the store
/// by the `SharedState` setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub scan_interval_ms: u64,
    pub read_memory_enabled: bool,
    pub web_access_code: String,
    pub api_url: String,
    pub wifi: WifiCredentials,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: SCAN_INTERVAL_DEFAULT_MS,
            read_memory_enabled: true,
            web_access_code: WEB_CODE_DEFAULT.to_string(),
            api_url: String::new(),
            wifi: WifiCredentials::default(),
        }
    }
}

impl ScanConfig {
    /// Load every field. Unset or malformed values fall back to their
    /// default and the default is written back, so the store is fully
    /// populated after the first boot.
    pub fn load(store: &mut dyn Store) -> Result<Self> {
        let defaults = ScanConfig::default();

        let api_url = load_text(store, Field::ApiUrl, &defaults.api_url, false)?;
        let ssid = load_text(store, Field::WifiSsid, "", false)?;
        let pass = load_text(store, Field::WifiPass, "", false)?;
        let web_access_code =
            load_text(store, Field::WebCode, &defaults.web_access_code, true)?;

        let stored_interval = store
            .get_field(Field::ScanInterval)?
            .and_then(|raw| <[u8; 4]>::try_from(raw.as_slice()).ok())
            .map(|le| u32::from_le_bytes(le) as u64);
        let scan_interval_ms = match stored_interval {
            Some(ms) if ms >= SCAN_INTERVAL_FLOOR_MS => ms,
            Some(ms) => {
                warn!("config: scan interval {} ms below floor, repaired", ms);
                store_interval(store, SCAN_INTERVAL_FLOOR_MS)?;
                SCAN_INTERVAL_FLOOR_MS
            }
            None => {
                store_interval(store, defaults.scan_interval_ms)?;
                defaults.scan_interval_ms
            }
        };

        let read_memory_enabled = match store.get_field(Field::ReadMemory)? {
            Some(raw) if raw == [0] || raw == [1] => raw[0] == 1,
            other => {
                if other.is_some() {
                    warn!("config: read memory flag malformed, repaired");
                }
                store.set_field(Field::ReadMemory, &[defaults.read_memory_enabled as u8])?;
                defaults.read_memory_enabled
            }
        };

        Ok(Self {
            scan_interval_ms,
            read_memory_enabled,
            web_access_code,
            api_url,
            wifi: WifiCredentials { ssid, pass },
        })
    }
}

pub(crate) fn store_interval(store: &mut dyn Store, ms: u64) -> Result<()> {
    let value = u32::try_from(ms).unwrap_or(u32::MAX);
    store.set_field(Field::ScanInterval, &value.to_le_bytes())
}

fn load_text(
    store: &mut dyn Store,
    field: Field,
    default: &str,
    non_empty: bool,
) -> Result<String> {
    match store.get_field(field) {
        Ok(Some(raw)) => match String::from_utf8(raw) {
            Ok(s) if !(non_empty && s.is_empty()) => return Ok(s),
            _ => warn!("config: {} malformed, repaired", field),
        },
        Ok(None) => {}
        // A region holding garbage is repaired like any other bad value.
        Err(Error::Storage(reason)) => warn!("config: {}, repaired", reason),
        Err(e) => return Err(e),
    }
    store.set_field(field, default.as_bytes())?;
    Ok(default.to_string())
}
