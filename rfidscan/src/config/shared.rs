// rfidscan/src/config/shared.rs

use log::{info, warn};

use super::mode::OperatingMode;
use super::store::{Field, Store};
use super::{ScanConfig, WifiCredentials, store_interval};
use crate::constants::SCAN_INTERVAL_FLOOR_MS;
use crate::delivery::endpoint_is_well_formed;
use crate::report::ResultSink;
use crate::signal::BeepPattern;
use crate::{Error, Result};

/// State shared by the scan loop and the control plane.
///
/// Only one side holds it at a time: the scan loop owns it and lends it to
/// the control plane at each yield point. Every setter persists first and
/// updates the live value only once the store accepted it.
pub struct SharedState {
    store: Box<dyn Store>,
    config: ScanConfig,
    mode: OperatingMode,
    scanning: bool,
    sink: ResultSink,
    pending_beep: Option<BeepPattern>,
}

impl SharedState {
    /// Load configuration from `store`, repairing it where needed. Scanning
    /// starts enabled in READ mode.
    pub fn load(mut store: Box<dyn Store>) -> Result<Self> {
        let config = ScanConfig::load(store.as_mut())?;
        info!(
            "config loaded: interval {} ms, read memory {}",
            config.scan_interval_ms, config.read_memory_enabled
        );
        Ok(Self {
            store,
            config,
            mode: OperatingMode::Read,
            scanning: true,
            sink: ResultSink::new(),
            pending_beep: None,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn mode(&self) -> &OperatingMode {
        &self.mode
    }

    /// Switch mode. Selecting a mode also (re)starts scanning.
    pub fn set_mode(&mut self, mode: OperatingMode) {
        info!("mode -> {}", mode);
        self.mode = mode;
        self.scanning = true;
    }

    pub fn select_mode(&mut self, name: &str, payload: Option<&str>) -> Result<&OperatingMode> {
        let mode = OperatingMode::parse(name, payload)?;
        self.set_mode(mode);
        Ok(&self.mode)
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn set_scanning(&mut self, scanning: bool) {
        info!("scanning {}", if scanning { "started" } else { "stopped" });
        self.scanning = scanning;
    }

    /// Set the scan interval, clamped to the floor. Returns the value now
    /// in effect.
    pub fn set_scan_interval_ms(&mut self, ms: u64) -> Result<u64> {
        let ms = ms.max(SCAN_INTERVAL_FLOOR_MS);
        store_interval(self.store.as_mut(), ms)?;
        self.config.scan_interval_ms = ms;
        Ok(ms)
    }

    pub fn set_read_memory_enabled(&mut self, enabled: bool) -> Result<()> {
        self.store.set_field(Field::ReadMemory, &[enabled as u8])?;
        self.config.read_memory_enabled = enabled;
        Ok(())
    }

    pub fn set_web_access_code(&mut self, code: &str) -> Result<()> {
        if code.is_empty() {
            return Err(Error::InvalidValue {
                field: Field::WebCode,
                reason: "must not be empty".into(),
            });
        }
        self.store.set_field(Field::WebCode, code.as_bytes())?;
        self.config.web_access_code = code.to_string();
        Ok(())
    }

    /// Set the API URL. Empty clears it; anything else must be an
    /// http(s) URL.
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        if !url.is_empty() && !endpoint_is_well_formed(url) {
            return Err(Error::InvalidValue {
                field: Field::ApiUrl,
                reason: format!("'{}' is not an http(s) url", url),
            });
        }
        self.store.set_field(Field::ApiUrl, url.as_bytes())?;
        self.config.api_url = url.to_string();
        Ok(())
    }

    /// Both values are checked before either is written. If the password
    /// write fails the stored SSID is put back, so the store never holds a
    /// mismatched pair.
    pub fn set_wifi_credentials(&mut self, ssid: &str, pass: &str) -> Result<()> {
        for (field, value) in [(Field::WifiSsid, ssid), (Field::WifiPass, pass)] {
            if value.len() > field.max_len() {
                return Err(Error::FieldTooLong {
                    field,
                    max: field.max_len(),
                    actual: value.len(),
                });
            }
        }
        self.store.set_field(Field::WifiSsid, ssid.as_bytes())?;
        if let Err(e) = self.store.set_field(Field::WifiPass, pass.as_bytes()) {
            let previous = self.config.wifi.ssid.as_bytes();
            if let Err(rollback) = self.store.set_field(Field::WifiSsid, previous) {
                warn!("config: wifi ssid rollback failed: {}", rollback);
            }
            return Err(e);
        }
        self.config.wifi = WifiCredentials {
            ssid: ssid.to_string(),
            pass: pass.to_string(),
        };
        Ok(())
    }

    pub fn check_access_code(&self, code: &str) -> bool {
        !code.is_empty() && code == self.config.web_access_code
    }

    pub fn sink(&self) -> &ResultSink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut ResultSink {
        &mut self.sink
    }

    pub fn last_result(&self) -> &str {
        self.sink.last_result()
    }

    /// Ask the scan loop to play `pattern` once the current tick is over.
    pub fn request_beep(&mut self, pattern: BeepPattern) {
        self.pending_beep = Some(pattern);
    }

    pub fn take_pending_beep(&mut self) -> Option<BeepPattern> {
        self.pending_beep.take()
    }
}

impl std::fmt::Debug for SharedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedState")
            .field("mode", &self.mode)
            .field("scanning", &self.scanning)
            .field("scan_interval_ms", &self.config.scan_interval_ms)
            .finish_non_exhaustive()
    }
}
