//! Property-based tests for the BER and KLV codecs.
//!
//! These tests verify that the codecs round-trip exactly and never panic on
//! arbitrary input.

use asdcp_core::{ber, klv, KlvPacket, Ul};
use proptest::prelude::*;

proptest! {
    /// BER decoder should never panic on arbitrary byte sequences.
    #[test]
    fn ber_decode_no_panic(data in prop::collection::vec(any::<u8>(), 0..32)) {
        let _ = ber::decode_ber(&data);
    }

    /// Every representable (value, width) pair round-trips exactly.
    #[test]
    fn ber_round_trip(value in any::<u64>(), pick in 0usize..3) {
        let width = [4usize, 8, 9][pick];
        let fits = match width {
            4 => value < 0x0100_0000,
            8 => value < 0x0100_0000_0000_0000,
            _ => true,
        };
        prop_assume!(fits);

        let mut buf = Vec::new();
        ber::encode_ber(&mut buf, value, width).unwrap();
        prop_assert_eq!(buf.len(), width);
        prop_assert_eq!(ber::decode_ber(&buf).unwrap(), (value, width));
    }

    /// KLV parser should never panic on arbitrary byte sequences.
    #[test]
    fn klv_parse_no_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = KlvPacket::read_from(&data);
    }

    /// Any accepted KLV buffer re-serializes byte-for-byte.
    #[test]
    fn klv_round_trip(
        tail in prop::collection::vec(any::<u8>(), 12),
        body in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let mut key_bytes = [0u8; 16];
        key_bytes[..4].copy_from_slice(&klv::SMPTE_UL_START);
        key_bytes[4..].copy_from_slice(&tail);
        let key = Ul::new(key_bytes);

        let mut buf = Vec::new();
        klv::write_kl(&mut buf, &key, body.len() as u64, klv::MXF_BER_LENGTH).unwrap();
        buf.extend_from_slice(&body);

        let parsed = KlvPacket::read_from(&buf).unwrap();
        prop_assert_eq!(parsed.key, key);
        prop_assert_eq!(parsed.value_length, body.len() as u64);

        let mut rebuilt = Vec::new();
        klv::write_kl(&mut rebuilt, &parsed.key, parsed.value_length, klv::MXF_BER_LENGTH)
            .unwrap();
        rebuilt.extend_from_slice(&buf[parsed.value_range()]);
        prop_assert_eq!(rebuilt, buf);
    }

    /// Stream-insensitive UL comparison matches exactly on the first 15
    /// octets.
    #[test]
    fn ul_ignore_stream(a in prop::array::uniform16(any::<u8>()), b in prop::array::uniform16(any::<u8>())) {
        let ua = Ul::new(a);
        let ub = Ul::new(b);
        prop_assert_eq!(ua.matches_ignore_stream(&ub), a[..15] == b[..15]);
    }
}
