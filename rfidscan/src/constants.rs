// rfidscan/src/constants.rs
//! Card geometry, scheduling and configuration constants shared across the
//! crate.

/// Bytes per block on sectored (MIFARE Classic style) cards.
pub const BLOCK_SIZE: usize = 16;

/// Bytes per page on page-oriented (Ultralight style) cards.
pub const PAGE_SIZE: usize = 4;

/// Blocks per sector in the small-sector layout used for every traversal.
pub const BLOCKS_PER_SECTOR: u8 = 4;

/// Index of the trailer (keys + access bits) inside a sector.
pub const TRAILER_BLOCK: u8 = 3;

/// Sectors visited by the traversals (0..16).
pub const SECTOR_COUNT: u8 = 16;

/// Pages read from page-oriented cards (0..16).
pub const PAGE_COUNT: u8 = 16;

/// First data block of sector 1, target of the single-block write.
pub const WRITE_SECTOR: u8 = 1;
pub const WRITE_BLOCK_IN_SECTOR: u8 = 0;

/// Long traversals hand control to the yield point after this many blocks.
pub const YIELD_EVERY_BLOCKS: usize = 3;

/// Maximum bytes kept from a WRITE payload; the 16th byte is the terminator.
pub const WRITE_PAYLOAD_MAX: usize = BLOCK_SIZE - 1;

/// Read-dump text is served by the status page and is bounded.
pub const READ_DUMP_MAX_LEN: usize = 4096;

/// Delivery log ring capacity.
pub const API_LOG_CAPACITY: usize = 32;

/// Scan cadence floor and default, in milliseconds.
pub const SCAN_INTERVAL_FLOOR_MS: u64 = 500;
pub const SCAN_INTERVAL_DEFAULT_MS: u64 = 1000;

/// Default web access code used when the stored one is unset.
pub const WEB_CODE_DEFAULT: &str = "1234";

/// Reader version register values meaning "nobody on the bus".
pub const VERSION_SENTINELS: [u8; 2] = [0x00, 0xFF];

/// ATQA reported by DESFire cards, used to split them from generic
/// ISO 14443-4 cards sharing SAK 0x20.
pub const DESFIRE_ATQA: u16 = 0x0344;
