//! Property-based tests for the structural codecs and the frame crypto.

use asdcp_core::ValueRng;
use asdcp_dict::{composite, smpte, Mdd};
use asdcp_mxf::crypto::{
    decrypt_frame_buffer, encrypt_frame_buffer, AesDecContext, AesEncContext, ESV_CHECK_VALUE,
};
use asdcp_mxf::frame::FrameBuffer;
use asdcp_mxf::index::{IndexAccessor, IndexEntry, IndexTableSegment};
use asdcp_mxf::metadata::HeaderMetadata;
use asdcp_mxf::primer::Primer;
use asdcp_mxf::types::{Rational, EDIT_RATE_24};
use proptest::prelude::*;

proptest! {
    /// Encryption round-trips for any payload and any legal plaintext
    /// offset, and the check value always decrypts to the constant.
    #[test]
    fn encryption_round_trip(
        payload in prop::collection::vec(any::<u8>(), 1..4096),
        key in prop::array::uniform16(any::<u8>()),
        pto_frac in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let pto = ((payload.len() as f64) * pto_frac) as usize;
        let mut frame = FrameBuffer::from_slice(&payload);
        frame.plaintext_offset = pto as u64;

        let mut enc = AesEncContext::new(&key, &mut ValueRng::seeded(seed));
        let esv = encrypt_frame_buffer(&frame, &mut enc).unwrap();

        let mut dec = AesDecContext::new(&key);
        let mut out = FrameBuffer::new();
        decrypt_frame_buffer(&esv, payload.len(), pto, &mut dec, &mut out).unwrap();
        prop_assert_eq!(out.as_slice(), &payload[..]);

        // the decrypted check block equals the constant by construction;
        // spot-check by re-decrypting through the public API with a
        // corrupted check region, which must fail
        let mut bad = esv.clone();
        bad[16] ^= 0x80;
        let mut dec = AesDecContext::new(&key);
        prop_assert!(decrypt_frame_buffer(&bad, payload.len(), pto, &mut dec, &mut out).is_err());
    }

    /// Every frame written resolves through the index, and nothing past
    /// the end does.
    #[test]
    fn index_lookup_total(frames in 1u32..400, frame_size in 1u64..10_000) {
        let mut rng = ValueRng::seeded(7);
        let mut acc = IndexAccessor::new();
        acc.set_params_vbr(EDIT_RATE_24);
        for n in 0..frames {
            acc.push_entry(
                IndexEntry { stream_offset: u64::from(n) * frame_size, ..Default::default() },
                1,
                &mut rng,
            );
        }
        acc.finish(i64::from(frames));

        for n in 0..frames {
            prop_assert_eq!(acc.lookup(n).unwrap().stream_offset, u64::from(n) * frame_size);
        }
        prop_assert!(acc.lookup(frames).is_err());
    }

    /// Index segments re-serialize to an equivalent segment.
    #[test]
    fn index_segment_round_trip(
        entries in prop::collection::vec((any::<i8>(), any::<u8>(), any::<u64>()), 0..64),
        start in 0i64..1_000_000,
        rate_num in 1i32..120,
    ) {
        let mut primer = Primer::new();
        let dict = smpte();

        let segment = IndexTableSegment {
            index_edit_rate: Rational::new(rate_num, 1),
            index_start_position: start,
            index_duration: entries.len() as i64,
            index_sid: 129,
            body_sid: 1,
            index_entries: entries
                .iter()
                .map(|&(t, f, o)| IndexEntry {
                    temporal_offset: t,
                    key_frame_offset: 0,
                    flags: f,
                    stream_offset: o,
                })
                .collect(),
            ..Default::default()
        };

        let mut buf = Vec::new();
        segment.write_packet(&mut buf, &mut primer, dict).unwrap();

        let (reread, consumed) = IndexTableSegment::read_packet(&buf, &primer, dict).unwrap();
        prop_assert_eq!(consumed, buf.len() as u64);
        prop_assert_eq!(reread.index_start_position, start);
        prop_assert_eq!(reread.index_entries.len(), entries.len());
        for (a, b) in reread.index_entries.iter().zip(segment.index_entries.iter()) {
            prop_assert_eq!(a.stream_offset, b.stream_offset);
            prop_assert_eq!(a.temporal_offset, b.temporal_offset);
            prop_assert_eq!(a.flags, b.flags);
        }
    }

    /// The header-metadata parser never panics on arbitrary bytes.
    #[test]
    fn metadata_parser_no_panic(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let _ = HeaderMetadata::read_from(&data, composite());
    }
}

#[test]
fn check_value_constant_is_chuk() {
    assert_eq!(&ESV_CHECK_VALUE, b"CHUKCHUKCHUKCHUK");
    assert_eq!(composite().ul(Mdd::CryptEssence).as_bytes()[13], 0x7e);
}
