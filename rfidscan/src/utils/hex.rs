//! Hexadecimal and printable-ASCII rendering used for card dumps.
//!
//! Bytes are rendered uppercase and zero-padded so a dump line lines up
//! column by column regardless of content.

use std::fmt::Write;

/// Convert a byte slice to an uppercase hex string without separators.
///
/// Example: `&[0xde, 0x0a]` -> `"DE0A"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Convert a byte slice to an uppercase hex string with a single space
/// between each byte.
///
/// Example: `&[0xde, 0x0a]` -> `"DE 0A"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Render printable ASCII (0x20..=0x7E) as-is and everything else as `.`.
pub fn ascii_safe(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if (0x20..=0x7e).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
