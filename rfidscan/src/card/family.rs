// rfidscan/src/card/family.rs
//! Card family classification from the select answer.

use derive_more::Display;
use serde::Serialize;

use crate::constants::DESFIRE_ATQA;

/// Family of a selected card, derived from its SAK (and ATQA where the SAK
/// alone is ambiguous).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum CardFamily {
    #[display(fmt = "MIFARE Mini, 320 bytes")]
    ClassicMini,
    #[display(fmt = "MIFARE 1KB")]
    Classic1K,
    #[display(fmt = "MIFARE 4KB")]
    Classic4K,
    #[display(fmt = "MIFARE Plus")]
    Plus,
    #[display(fmt = "MIFARE DESFire")]
    Desfire,
    #[display(fmt = "MIFARE Ultralight or Ultralight C")]
    Ultralight,
    #[display(fmt = "PICC compliant with ISO/IEC 14443-4")]
    Iso14443_4,
    #[display(fmt = "PICC compliant with ISO/IEC 18092 (NFC)")]
    Iso18092,
    #[display(fmt = "Unknown type")]
    Unsupported,
}

/// How a family's memory can be traversed by the block driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryModel {
    /// Sectors of four 16-byte blocks, key A authentication per block.
    Sectored,
    /// 4-byte pages, readable without authentication.
    Paged,
    /// Application-level cards (DESFire, ISO 14443-4, ISO 18092). They are
    /// recognised but have no block memory this driver can walk.
    NoBlockAccess,
    /// Unknown SAK; nothing is attempted.
    Unsupported,
}

impl CardFamily {
    pub fn memory_model(&self) -> MemoryModel {
        match self {
            CardFamily::ClassicMini
            | CardFamily::Classic1K
            | CardFamily::Classic4K
            | CardFamily::Plus => MemoryModel::Sectored,
            CardFamily::Ultralight => MemoryModel::Paged,
            CardFamily::Desfire | CardFamily::Iso14443_4 | CardFamily::Iso18092 => {
                MemoryModel::NoBlockAccess
            }
            CardFamily::Unsupported => MemoryModel::Unsupported,
        }
    }

    /// MIFARE Classic proper (Mini, 1K, 4K).
    pub fn is_classic(&self) -> bool {
        matches!(
            self,
            CardFamily::ClassicMini | CardFamily::Classic1K | CardFamily::Classic4K
        )
    }
}

/// Classify a card. Pure function of the select answer.
///
/// Bit 7 of the SAK is reserved for future use and ignored.
pub fn classify(atqa: u16, sak: u8) -> CardFamily {
    match sak & 0x7F {
        0x09 => CardFamily::ClassicMini,
        0x08 => CardFamily::Classic1K,
        0x18 => CardFamily::Classic4K,
        0x00 => CardFamily::Ultralight,
        0x10 | 0x11 => CardFamily::Plus,
        0x20 if atqa == DESFIRE_ATQA => CardFamily::Desfire,
        0x20 => CardFamily::Iso14443_4,
        0x40 => CardFamily::Iso18092,
        _ => CardFamily::Unsupported,
    }
}
