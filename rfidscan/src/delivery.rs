// rfidscan/src/delivery.rs
//! Handing scanned UIDs to the remote API.

use log::{info, warn};

use crate::signal::{BeepPattern, Signal};
use crate::types::Uid;

/// The network link is down.
pub const NOT_CONNECTED: i32 = -1;
/// The configured API URL could not be parsed.
pub const MALFORMED_ENDPOINT: i32 = -2;
/// The connection could not be established.
pub const CONNECTION_FAILED: i32 = -3;

/// Delivery collaborator. Returns the HTTP status of the POST, or one of
/// the negative codes above when no answer was received.
pub trait Delivery {
    fn send_uid(&mut self, api_url: &str, uid: &str) -> i32;
}

pub fn is_success(status: i32) -> bool {
    (200..300).contains(&status)
}

/// Quick structural check of an API URL: `http://` or `https://` followed
/// by a non-empty host.
pub fn endpoint_is_well_formed(url: &str) -> bool {
    let rest = match url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    let host = rest.split(['/', '?']).next().unwrap_or("");
    let host = host.rsplit_once(':').map_or(host, |(h, port)| {
        if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) {
            h
        } else {
            ""
        }
    });
    !host.is_empty() && !url.chars().any(char::is_whitespace)
}

/// One delivery as it ends up in the API log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub uid: String,
    pub url: String,
    pub status: i32,
}

impl DeliveryAttempt {
    pub fn succeeded(&self) -> bool {
        is_success(self.status)
    }
}

/// Delivery plus feedback, as used by the read-dump handler.
pub struct Courier<'a> {
    pub delivery: &'a mut dyn Delivery,
    pub signal: &'a mut dyn Signal,
    pub api_url: &'a str,
}

impl<'a> Courier<'a> {
    pub fn new(delivery: &'a mut dyn Delivery, signal: &'a mut dyn Signal, api_url: &'a str) -> Self {
        Self {
            delivery,
            signal,
            api_url,
        }
    }

    /// Deliver the UID exactly once and play the matching beep pattern.
    pub fn deliver(&mut self, uid: &Uid) -> DeliveryAttempt {
        let uid = uid.to_hex();
        let status = self.delivery.send_uid(self.api_url, &uid);
        if is_success(status) {
            info!("uid {} delivered ({})", uid, status);
            self.signal.play(BeepPattern::SUCCESS);
        } else {
            warn!("uid {} not delivered to '{}': {}", uid, self.api_url, status);
            self.signal.play(BeepPattern::FAILURE);
        }
        DeliveryAttempt {
            uid,
            url: self.api_url.to_string(),
            status,
        }
    }
}

/// Delivery used when no network stack is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineDelivery;

impl Delivery for OfflineDelivery {
    fn send_uid(&mut self, _api_url: &str, _uid: &str) -> i32 {
        NOT_CONNECTED
    }
}

/// Rejects malformed endpoints before the inner delivery sees them.
#[derive(Debug, Default, Clone)]
pub struct CheckedDelivery<D> {
    inner: D,
}

impl<D: Delivery> CheckedDelivery<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Delivery> Delivery for CheckedDelivery<D> {
    fn send_uid(&mut self, api_url: &str, uid: &str) -> i32 {
        if !endpoint_is_well_formed(api_url) {
            return MALFORMED_ENDPOINT;
        }
        self.inner.send_uid(api_url, uid)
    }
}
