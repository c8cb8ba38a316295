use proptest::prelude::*;

use lumen_types::{
    lumens_to_microlumens, microlumens_to_lumens, Address, GroupId, TxId, MAX_MICROLUMENS,
};

proptest! {
    /// TxId roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn tx_id_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = TxId::new(bytes);
        prop_assert_eq!(id.as_bytes(), &bytes);
        prop_assert_eq!(id.is_zero(), bytes == [0u8; 32]);
    }

    /// GroupId roundtrip and zero detection.
    #[test]
    fn group_id_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let gid = GroupId::new(bytes);
        prop_assert_eq!(gid.as_bytes(), &bytes);
        prop_assert_eq!(gid.is_zero(), bytes == [0u8; 32]);
    }

    /// Address zero detection matches the raw bytes.
    #[test]
    fn address_zero_detection(bytes in prop::array::uniform32(0u8..)) {
        prop_assert_eq!(Address::new(bytes).is_zero(), bytes == [0u8; 32]);
    }

    /// Unit conversion round-trips exactly for amounts well inside the
    /// 53-bit precision window.
    #[test]
    fn amount_conversion_roundtrips(micro in 0i64..=(1i64 << 32)) {
        let lumens = microlumens_to_lumens(micro).unwrap();
        let back = lumens_to_microlumens(lumens).unwrap();
        prop_assert_eq!(back, micro as u64);
    }

    /// Negative microlumen amounts are always rejected.
    #[test]
    fn negative_amounts_rejected(micro in i64::MIN..0) {
        prop_assert!(microlumens_to_lumens(micro).is_err());
    }

    /// Amounts beyond the safe-integer bound are always rejected.
    #[test]
    fn oversized_amounts_rejected(excess in 1i64..=(1i64 << 10)) {
        prop_assert!(microlumens_to_lumens(MAX_MICROLUMENS as i64 + excess).is_err());
    }
}
