// rfidscan/src/types.rs

use crate::Error;
use crate::constants::{BLOCKS_PER_SECTOR, BLOCK_SIZE, PAGE_SIZE, TRAILER_BLOCK};
use derive_more::Display;
use std::convert::TryFrom;
use std::fmt;

/// Card UID - Newtype Pattern (4, 7 or 10 bytes on the wire; any length in
/// 4..=10 is accepted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid {
    bytes: [u8; Uid::MAX_LEN],
    len: u8,
}

impl Uid {
    pub const MIN_LEN: usize = 4;
    pub const MAX_LEN: usize = 10;

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Compact uppercase hex, the form handed to the delivery collaborator.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    pub fn to_hex_spaced(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&bytes.len()) {
            return Err(Error::InvalidUidLength(bytes.len()));
        }
        let mut arr = [0u8; Self::MAX_LEN];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len() as u8,
        })
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// BlockData (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    pub const ZERO: Self = Self([0u8; BLOCK_SIZE]);

    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a block from a text payload: at most 15 bytes are kept so the
    /// block always ends with a NUL terminator, and the rest is zero-filled.
    pub fn from_payload(payload: &[u8]) -> Self {
        let mut arr = [0u8; BLOCK_SIZE];
        let n = payload.len().min(BLOCK_SIZE - 1);
        arr[..n].copy_from_slice(&payload[..n]);
        Self(arr)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// First page of the block. A READ on a page-oriented card returns four
    /// consecutive pages; only the addressed one is kept.
    pub fn first_page(&self) -> PageData {
        let mut arr = [0u8; PAGE_SIZE];
        arr.copy_from_slice(&self.0[..PAGE_SIZE]);
        PageData(arr)
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    pub fn to_ascii_safe(&self) -> String {
        crate::utils::ascii_safe(self.as_bytes())
    }
}

/// PageData (4 bytes), the unit of page-oriented cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageData([u8; PAGE_SIZE]);

impl PageData {
    pub fn from_bytes(bytes: [u8; PAGE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PAGE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    pub fn to_ascii_safe(&self) -> String {
        crate::utils::ascii_safe(self.as_bytes())
    }
}

/// Linear block (or page) address on the card.
///
/// For sectored cards `address = sector * 4 + block_in_sector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct BlockAddress(u8);

impl BlockAddress {
    pub const fn new(sector: u8, block_in_sector: u8) -> Self {
        debug_assert!(block_in_sector < BLOCKS_PER_SECTOR);
        Self(sector * BLOCKS_PER_SECTOR + block_in_sector)
    }

    pub const fn from_linear(address: u8) -> Self {
        Self(address)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn sector(&self) -> u8 {
        self.0 / BLOCKS_PER_SECTOR
    }

    pub fn block_in_sector(&self) -> u8 {
        self.0 % BLOCKS_PER_SECTOR
    }

    /// Last block of a sector, holding keys and access bits.
    pub fn is_trailer(&self) -> bool {
        self.block_in_sector() == TRAILER_BLOCK
    }

    /// Sector 0 carries the manufacturer block.
    pub fn is_manufacturer_sector(&self) -> bool {
        self.sector() == 0
    }
}

/// 6-byte MIFARE key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AuthKey([u8; 6]);

impl AuthKey {
    /// Factory default key A.
    pub const DEFAULT: Self = Self([0xFF; 6]);

    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl Default for AuthKey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Keys never end up in logs.
impl fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthKey(..)")
    }
}

/// Non-OK status codes reported by the reader peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StatusCode {
    #[display(fmt = "error in communication")]
    Error,
    #[display(fmt = "collision detected")]
    Collision,
    #[display(fmt = "timeout in communication")]
    Timeout,
    #[display(fmt = "buffer too small")]
    NoRoom,
    #[display(fmt = "internal error")]
    InternalError,
    #[display(fmt = "invalid argument")]
    Invalid,
    #[display(fmt = "crc mismatch")]
    CrcWrong,
    #[display(fmt = "card answered NAK")]
    MifareNack,
}

/// What the reader learns from a successful anticollision/select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedCard {
    pub uid: Uid,
    pub atqa: u16,
    pub sak: u8,
}

impl SelectedCard {
    pub fn new(uid: Uid, atqa: u16, sak: u8) -> Self {
        Self { uid, atqa, sak }
    }
}
