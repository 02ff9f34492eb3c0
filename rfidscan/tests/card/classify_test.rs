use proptest::prelude::*;
use rfidscan::card::{CardFamily, MemoryModel, classify};

#[test]
fn known_cards() {
    let table = [
        (0x0004, 0x08, CardFamily::Classic1K),
        (0x0002, 0x18, CardFamily::Classic4K),
        (0x0004, 0x09, CardFamily::ClassicMini),
        (0x0044, 0x00, CardFamily::Ultralight),
        (0x0344, 0x20, CardFamily::Desfire),
        (0x0004, 0x20, CardFamily::Iso14443_4),
        (0x0004, 0x40, CardFamily::Iso18092),
        (0x0042, 0x11, CardFamily::Plus),
    ];
    for (atqa, sak, family) in table {
        assert_eq!(classify(atqa, sak), family, "atqa {:04x} sak {:02x}", atqa, sak);
    }
}

proptest! {
    #[test]
    fn classic_saks_are_sectored(atqa in any::<u16>(), sak in prop::sample::select(vec![0x08u8, 0x09, 0x18, 0x88])) {
        let family = classify(atqa, sak);
        prop_assert!(family.is_classic());
        prop_assert_eq!(family.memory_model(), MemoryModel::Sectored);
    }

    #[test]
    fn atqa_only_matters_for_sak_0x20(atqa_a in any::<u16>(), atqa_b in any::<u16>(), sak in any::<u8>()) {
        prop_assume!(sak & 0x7F != 0x20);
        prop_assert_eq!(classify(atqa_a, sak), classify(atqa_b, sak));
    }
}
