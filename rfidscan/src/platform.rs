// rfidscan/src/platform.rs
//! Board services the control plane needs: restart, firmware update and
//! heap statistics.

use log::{info, warn};

use crate::{Error, Result};

pub trait Platform {
    /// Free heap in bytes, as reported on the status page.
    fn free_heap(&self) -> u32;

    /// Schedule a restart once the current request has been answered.
    fn request_restart(&mut self);

    /// Write and verify a firmware image. On success the device restarts
    /// into the new image.
    fn apply_update(&mut self, image: &[u8]) -> Result<()>;
}

/// Platform for hosted runs and tests: nothing restarts, updates are only
/// recorded.
#[derive(Debug, Default, Clone)]
pub struct HostPlatform {
    pub restart_requested: bool,
    pub installed_image_len: Option<usize>,
    pub free_heap: u32,
}

impl HostPlatform {
    pub fn new() -> Self {
        Self {
            free_heap: 200 * 1024,
            ..Self::default()
        }
    }
}

impl Platform for HostPlatform {
    fn free_heap(&self) -> u32 {
        self.free_heap
    }

    fn request_restart(&mut self) {
        info!("restart requested");
        self.restart_requested = true;
    }

    fn apply_update(&mut self, image: &[u8]) -> Result<()> {
        if image.is_empty() {
            warn!("update rejected: empty image");
            return Err(Error::Update("empty image".into()));
        }
        info!("update of {} bytes accepted", image.len());
        self.installed_image_len = Some(image.len());
        self.restart_requested = true;
        Ok(())
    }
}
