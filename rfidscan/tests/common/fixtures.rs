// fixtures.rs: commonly used cards and UIDs

use rfidscan::transport::mock::MockCard;
use rfidscan::types::{BlockAddress, BlockData, Uid};

pub fn sample_uid_bytes() -> [u8; 4] {
    [0xA1, 0xB2, 0xC3, 0xD4]
}

pub fn sample_uid() -> Uid {
    Uid::try_from(&sample_uid_bytes()[..]).unwrap()
}

pub fn uid_from_hex(s: &str) -> Uid {
    Uid::try_from(hex::decode(s).unwrap().as_slice()).unwrap()
}

pub fn seven_byte_uid() -> Uid {
    uid_from_hex("046F219A556080")
}

pub fn sample_blockdata(fill: u8) -> BlockData {
    BlockData::from_bytes([fill; 16])
}

/// 1K card with recognisable content in a few data blocks.
pub fn classic_card() -> MockCard {
    MockCard::classic_1k(sample_uid())
        .with_block(BlockAddress::new(1, 0), BlockData::from_payload(b"member 0042"))
        .with_block(BlockAddress::new(4, 2), sample_blockdata(0x5A))
}

pub fn ultralight_card() -> MockCard {
    let mut card = MockCard::ultralight(seven_byte_uid());
    card.memory[16..20].copy_from_slice(b"NDEF");
    card
}

pub fn desfire_card() -> MockCard {
    MockCard::sectored(seven_byte_uid(), 0x0344, 0x20)
}

pub fn unknown_card() -> MockCard {
    MockCard::sectored(sample_uid(), 0x0004, 0x01)
}
