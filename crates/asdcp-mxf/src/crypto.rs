//! ST 429-6 frame encryption: AES-128-CBC essence encryption with a
//! check-value block, counter padding and an HMAC-SHA1 integrity pack.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;
use asdcp_core::{klv, Error, MemWriter, Result, ValueRng, UUID_LENGTH};
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};
use uuid::Uuid;

use crate::frame::FrameBuffer;
use crate::info::LabelSet;

/// AES-CBC block size.
pub const CBC_BLOCK_SIZE: usize = 16;
/// AES-128 key length.
pub const KEY_LENGTH: usize = 16;
/// HMAC-SHA1 digest length.
pub const HMAC_SIZE: usize = 20;

/// The plaintext check value encrypted as the first block after the IV.
pub const ESV_CHECK_VALUE: [u8; CBC_BLOCK_SIZE] = *b"CHUKCHUKCHUKCHUK";

/// Fixed-width BER overhead of EKLV items 1-5 up to the ESV payload.
pub const KLV_CRYPTINFO_SIZE: usize = klv::MXF_BER_LENGTH
    + UUID_LENGTH            // ContextID
    + klv::MXF_BER_LENGTH
    + 8                      // PlaintextOffset
    + klv::MXF_BER_LENGTH
    + asdcp_core::UL_LENGTH  // SourceKey
    + klv::MXF_BER_LENGTH
    + 8                      // SourceLength
    + klv::MXF_BER_LENGTH;   // ESV length

/// Size of the integrity pack (items 6-8 with their BER heads).
pub const KLV_INTPACK_SIZE: usize = klv::MXF_BER_LENGTH
    + UUID_LENGTH            // TrackFileID
    + klv::MXF_BER_LENGTH
    + 8                      // SequenceNumber
    + klv::MXF_BER_LENGTH
    + HMAC_SIZE;

/// Length of the encrypted source value for a frame of `source_length`
/// bytes with `plaintext_offset` bytes left in the clear: IV, check value,
/// plaintext prefix, whole blocks, and one padded final block.
pub fn calc_esv_length(source_length: usize, plaintext_offset: usize) -> usize {
    let ct_size = source_length - plaintext_offset;
    let block_size = ct_size - (ct_size % CBC_BLOCK_SIZE);
    plaintext_offset + block_size + CBC_BLOCK_SIZE * 3
}

fn cbc_encrypt(cipher: &Aes128, ivec: &mut [u8; CBC_BLOCK_SIZE], src: &[u8], dst: &mut [u8]) {
    debug_assert_eq!(src.len() % CBC_BLOCK_SIZE, 0);
    for (s, d) in src.chunks_exact(CBC_BLOCK_SIZE).zip(dst.chunks_exact_mut(CBC_BLOCK_SIZE)) {
        let mut block = [0u8; CBC_BLOCK_SIZE];
        for i in 0..CBC_BLOCK_SIZE {
            block[i] = s[i] ^ ivec[i];
        }
        let ga = GenericArray::from_mut_slice(&mut block);
        cipher.encrypt_block(ga);
        d.copy_from_slice(&block);
        ivec.copy_from_slice(&block);
    }
}

fn cbc_decrypt(cipher: &Aes128, ivec: &mut [u8; CBC_BLOCK_SIZE], src: &[u8], dst: &mut [u8]) {
    debug_assert_eq!(src.len() % CBC_BLOCK_SIZE, 0);
    for (s, d) in src.chunks_exact(CBC_BLOCK_SIZE).zip(dst.chunks_exact_mut(CBC_BLOCK_SIZE)) {
        let mut block = [0u8; CBC_BLOCK_SIZE];
        block.copy_from_slice(s);
        let ga = GenericArray::from_mut_slice(&mut block);
        cipher.decrypt_block(ga);
        for i in 0..CBC_BLOCK_SIZE {
            d[i] = block[i] ^ ivec[i];
        }
        ivec.copy_from_slice(s);
    }
}

/// Encryption context. The chaining value persists across frames, so each
/// frame's IV is the final ciphertext block of the previous one unless the
/// caller overrides it.
pub struct AesEncContext {
    cipher: Aes128,
    ivec: [u8; CBC_BLOCK_SIZE],
}

impl AesEncContext {
    /// New context with a random starting IV.
    pub fn new(key: &[u8; KEY_LENGTH], rng: &mut ValueRng) -> Self {
        let mut ivec = [0u8; CBC_BLOCK_SIZE];
        rng.fill(&mut ivec);
        Self { cipher: Aes128::new(GenericArray::from_slice(key)), ivec }
    }

    /// Override the chaining value for the next frame.
    pub fn set_ivec(&mut self, ivec: &[u8; CBC_BLOCK_SIZE]) {
        self.ivec = *ivec;
    }

    pub fn ivec(&self) -> [u8; CBC_BLOCK_SIZE] {
        self.ivec
    }
}

/// Decryption context.
pub struct AesDecContext {
    cipher: Aes128,
    ivec: [u8; CBC_BLOCK_SIZE],
}

impl AesDecContext {
    pub fn new(key: &[u8; KEY_LENGTH]) -> Self {
        Self { cipher: Aes128::new(GenericArray::from_slice(key)), ivec: [0; CBC_BLOCK_SIZE] }
    }
}

/// HMAC-SHA1 context keyed per the label set: the SMPTE flavor derives the
/// MIC key from the AES key, the Interop flavor uses the AES key directly.
pub struct HmacContext {
    key: [u8; KEY_LENGTH],
}

impl HmacContext {
    pub fn new(key: &[u8; KEY_LENGTH], label_set: LabelSet) -> Self {
        let key = match label_set {
            LabelSet::Interop => *key,
            LabelSet::Smpte => {
                let digest = Sha1::digest(key);
                let mut derived = [0u8; KEY_LENGTH];
                derived.copy_from_slice(&digest[..KEY_LENGTH]);
                derived
            }
        };
        Self { key }
    }

    fn compute(&self, parts: &[&[u8]]) -> [u8; HMAC_SIZE] {
        let mut mac = <Hmac<Sha1> as Mac>::new_from_slice(&self.key)
            .expect("HMAC accepts any key length");
        for part in parts {
            mac.update(part);
        }
        let mut out = [0u8; HMAC_SIZE];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }
}

/// Encrypt a frame into its encrypted-source-value layout:
/// IV, encrypted check value, plaintext prefix, whole CBC blocks, and a
/// final block padded with ascending counter bytes.
pub fn encrypt_frame_buffer(
    frame: &FrameBuffer,
    ctx: &mut AesEncContext,
) -> Result<Vec<u8>> {
    let source_length = frame.len();
    let plaintext_offset = frame.plaintext_offset as usize;

    if frame.plaintext_offset > source_length as u64 {
        return Err(Error::LargePto {
            offset: frame.plaintext_offset,
            size: source_length as u64,
        });
    }

    let mut out = vec![0u8; calc_esv_length(source_length, plaintext_offset)];
    let mut pos = 0usize;

    // the IV for this frame
    out[..CBC_BLOCK_SIZE].copy_from_slice(&ctx.ivec);
    pos += CBC_BLOCK_SIZE;

    // encrypted check value
    let mut ivec = ctx.ivec;
    cbc_encrypt(&ctx.cipher, &mut ivec, &ESV_CHECK_VALUE, &mut out[pos..pos + CBC_BLOCK_SIZE]);
    pos += CBC_BLOCK_SIZE;

    // plaintext region
    out[pos..pos + plaintext_offset].copy_from_slice(&frame.as_slice()[..plaintext_offset]);
    pos += plaintext_offset;

    let ct_size = source_length - plaintext_offset;
    let diff = ct_size % CBC_BLOCK_SIZE;
    let block_size = ct_size - diff;

    // whole blocks
    cbc_encrypt(
        &ctx.cipher,
        &mut ivec,
        &frame.as_slice()[plaintext_offset..plaintext_offset + block_size],
        &mut out[pos..pos + block_size],
    );
    pos += block_size;

    // final block: remainder bytes then an ascending counter
    let mut last = [0u8; CBC_BLOCK_SIZE];
    last[..diff].copy_from_slice(&frame.as_slice()[plaintext_offset + block_size..]);
    for (i, b) in last[diff..].iter_mut().enumerate() {
        *b = i as u8;
    }
    cbc_encrypt(&ctx.cipher, &mut ivec, &last, &mut out[pos..pos + CBC_BLOCK_SIZE]);

    // forward the chain to the next frame
    ctx.ivec = ivec;
    Ok(out)
}

/// Decrypt an encrypted source value back into `frame`. `source_length`
/// and `plaintext_offset` come from the EKLV items.
pub fn decrypt_frame_buffer(
    esv: &[u8],
    source_length: usize,
    plaintext_offset: usize,
    ctx: &mut AesDecContext,
    frame: &mut FrameBuffer,
) -> Result<()> {
    if plaintext_offset > source_length {
        return Err(Error::LargePto { offset: plaintext_offset as u64, size: source_length as u64 });
    }
    if esv.len() < calc_esv_length(source_length, plaintext_offset) {
        return Err(Error::Format("encrypted source value shorter than declared".into()));
    }

    let ct_size = source_length - plaintext_offset;
    let diff = ct_size % CBC_BLOCK_SIZE;
    let block_size = ct_size - diff;

    let mut pos = 0usize;
    ctx.ivec.copy_from_slice(&esv[..CBC_BLOCK_SIZE]);
    pos += CBC_BLOCK_SIZE;

    // check value
    let mut check = [0u8; CBC_BLOCK_SIZE];
    let mut ivec = ctx.ivec;
    cbc_decrypt(&ctx.cipher, &mut ivec, &esv[pos..pos + CBC_BLOCK_SIZE], &mut check);
    pos += CBC_BLOCK_SIZE;

    if check != ESV_CHECK_VALUE {
        return Err(Error::CheckFail);
    }

    let out = frame.writable(source_length)?;

    // plaintext region
    out[..plaintext_offset].copy_from_slice(&esv[pos..pos + plaintext_offset]);
    pos += plaintext_offset;

    // whole blocks
    cbc_decrypt(
        &ctx.cipher,
        &mut ivec,
        &esv[pos..pos + block_size],
        &mut out[plaintext_offset..plaintext_offset + block_size],
    );
    pos += block_size;

    // final block: counter padding starts with zero right after the data
    let mut last = [0u8; CBC_BLOCK_SIZE];
    cbc_decrypt(&ctx.cipher, &mut ivec, &esv[pos..pos + CBC_BLOCK_SIZE], &mut last);

    if last[diff] != 0 {
        return Err(Error::Format("unexpected non-zero padding value".into()));
    }
    out[plaintext_offset + block_size..].copy_from_slice(&last[..diff]);

    frame.plaintext_offset = plaintext_offset as u64;
    frame.source_length = source_length as u64;
    frame.ciphertext = false;
    Ok(())
}

/// The trailing integrity pack of an EKLV triplet: the length-prefixed
/// track-file ID, sequence number and HMAC value.
pub struct IntegrityPack {
    pub data: [u8; KLV_INTPACK_SIZE],
}

/// A 4-octet BER item head for a small known length.
fn ber4(length: u8) -> [u8; 4] {
    [0x83, 0, 0, length]
}

impl IntegrityPack {
    /// Compute the pack for a frame. The HMAC covers the encrypted essence
    /// region followed by the pack's own header fields.
    pub fn calc(esv: &[u8], asset_id: &Uuid, sequence: u64, hmac: &HmacContext) -> Self {
        let mut header = MemWriter::with_capacity(KLV_INTPACK_SIZE);
        header.write_raw(&ber4(UUID_LENGTH as u8));
        header.write_raw(asset_id.as_bytes());
        header.write_raw(&ber4(8));
        header.write_u64_be(sequence);
        header.write_raw(&ber4(HMAC_SIZE as u8));

        let mic = hmac.compute(&[esv, header.as_slice()]);

        let mut data = [0u8; KLV_INTPACK_SIZE];
        data[..KLV_INTPACK_SIZE - HMAC_SIZE].copy_from_slice(header.as_slice());
        data[KLV_INTPACK_SIZE - HMAC_SIZE..].copy_from_slice(&mic);
        Self { data }
    }

    /// Verify a received pack against the essence region and expected
    /// identifiers.
    pub fn test(
        esv: &[u8],
        asset_id: &Uuid,
        sequence: u64,
        stored_asset_id: &Uuid,
        stored_sequence: u64,
        stored_mic: &[u8],
        hmac: &HmacContext,
    ) -> Result<()> {
        if stored_asset_id != asset_id {
            return Err(Error::HmacFail("track file ID mismatch"));
        }
        if stored_sequence != sequence {
            return Err(Error::HmacFail("sequence number mismatch"));
        }

        let expected = Self::calc(esv, asset_id, sequence, hmac);
        if stored_mic != &expected.data[KLV_INTPACK_SIZE - HMAC_SIZE..] {
            return Err(Error::HmacFail("HMAC value mismatch"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const KEY: [u8; KEY_LENGTH] = hex!("00112233445566778899AABBCCDDEEFF");

    fn enc_ctx() -> AesEncContext {
        AesEncContext::new(&KEY, &mut ValueRng::seeded(5))
    }

    #[test]
    fn esv_length_math() {
        // 12000 plaintext, no prefix: 750 whole blocks + IV + check + pad
        assert_eq!(calc_esv_length(12_000, 0), 12_000 + 48);
        // 100 bytes: 96 whole, 4 in the padded block
        assert_eq!(calc_esv_length(100, 0), 96 + 48);
        // prefix bytes pass through unencrypted
        assert_eq!(calc_esv_length(100, 30), 30 + 64 + 48);
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let payload: Vec<u8> = (0..200u32).map(|i| i as u8).collect();
        for pto in [0usize, 1, 16, 100, 200] {
            let mut frame = FrameBuffer::from_slice(&payload);
            frame.plaintext_offset = pto as u64;

            let mut enc = enc_ctx();
            let esv = encrypt_frame_buffer(&frame, &mut enc).unwrap();
            assert_eq!(esv.len(), calc_esv_length(200, pto));
            // plaintext prefix is in the clear
            assert_eq!(&esv[32..32 + pto], &payload[..pto]);

            let mut out = FrameBuffer::new();
            let mut dec = AesDecContext::new(&KEY);
            decrypt_frame_buffer(&esv, 200, pto, &mut dec, &mut out).unwrap();
            assert_eq!(out.as_slice(), &payload[..]);
        }
    }

    #[test]
    fn pto_larger_than_frame_rejected() {
        let mut frame = FrameBuffer::from_slice(b"short");
        frame.plaintext_offset = 6;
        assert!(matches!(
            encrypt_frame_buffer(&frame, &mut enc_ctx()),
            Err(Error::LargePto { .. })
        ));
    }

    #[test]
    fn wrong_key_fails_check_value() {
        let frame = FrameBuffer::from_slice(&[7u8; 64]);
        let mut enc = enc_ctx();
        let esv = encrypt_frame_buffer(&frame, &mut enc).unwrap();

        let wrong = hex!("FFEEDDCCBBAA99887766554433221100");
        let mut dec = AesDecContext::new(&wrong);
        let mut out = FrameBuffer::new();
        assert!(matches!(
            decrypt_frame_buffer(&esv, 64, 0, &mut dec, &mut out),
            Err(Error::CheckFail)
        ));
    }

    #[test]
    fn iv_chains_across_frames() {
        let frame = FrameBuffer::from_slice(&[1u8; 48]);
        let mut enc = enc_ctx();
        let first = encrypt_frame_buffer(&frame, &mut enc).unwrap();
        let second = encrypt_frame_buffer(&frame, &mut enc).unwrap();

        // the second frame's IV is the last cipher block of the first
        assert_eq!(&second[..CBC_BLOCK_SIZE], &first[first.len() - CBC_BLOCK_SIZE..]);
        // both frames decrypt independently
        let mut dec = AesDecContext::new(&KEY);
        let mut out = FrameBuffer::new();
        decrypt_frame_buffer(&second, 48, 0, &mut dec, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[1u8; 48]);
    }

    #[test]
    fn integrity_pack_detects_tamper() {
        let hmac = HmacContext::new(&KEY, LabelSet::Smpte);
        let asset = Uuid::new_v4();
        let esv = vec![0x42u8; 96];
        let pack = IntegrityPack::calc(&esv, &asset, 7, &hmac);
        let mic = &pack.data[KLV_INTPACK_SIZE - HMAC_SIZE..];

        assert!(IntegrityPack::test(&esv, &asset, 7, &asset, 7, mic, &hmac).is_ok());

        let mut flipped = esv.clone();
        flipped[10] ^= 0x01;
        assert!(matches!(
            IntegrityPack::test(&flipped, &asset, 7, &asset, 7, mic, &hmac),
            Err(Error::HmacFail(_))
        ));
        assert!(matches!(
            IntegrityPack::test(&esv, &asset, 7, &asset, 8, mic, &hmac),
            Err(Error::HmacFail(_))
        ));
    }

    #[test]
    fn label_sets_derive_different_mic_keys() {
        let smpte = HmacContext::new(&KEY, LabelSet::Smpte);
        let interop = HmacContext::new(&KEY, LabelSet::Interop);
        assert_ne!(smpte.compute(&[b"x"]), interop.compute(&[b"x"]));
    }
}
