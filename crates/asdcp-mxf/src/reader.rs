//! The track-file reader: RIP location, header-metadata parse, index
//! load, and per-frame reads with optional decryption and HMAC checks.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use asdcp_core::{klv, Error, KlReader, KlvPacket, MemReader, Result, Ul};
use asdcp_dict::{Dictionary, Mdd};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::crypto::{AesDecContext, HmacContext, IntegrityPack, HMAC_SIZE, KEY_LENGTH};
use crate::frame::FrameBuffer;
use crate::index::{IndexAccessor, IndexEntry, IndexTableSegment};
use crate::info::{LabelSet, WriterInfo};
use crate::metadata::{HeaderMetadata, MetadataObject};
use crate::partition::{seek_to_rip, Partition, Rip};

pub struct TrackFileReader {
    dict: &'static Dictionary,
    file: File,
    pub rip: Rip,
    pub header_partition: Partition,
    pub metadata: HeaderMetadata,
    pub index: IndexAccessor,
    pub info: WriterInfo,
    /// Absolute file offset of the essence container start.
    body_offset: u64,
    /// Cache used to elide seeks on sequential reads.
    last_position: u64,
    dec: Option<AesDecContext>,
    hmac: Option<HmacContext>,
}

impl TrackFileReader {
    /// Open a track file: locate the RIP, parse the header partition and
    /// its metadata, recover the writer info, and load the index table.
    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let dict = asdcp_dict::composite();

        let rip = match seek_to_rip(&mut file).and_then(|()| Rip::read_from(&mut file, dict)) {
            Ok(rip) if rip.entries.is_empty() => {
                warn!("RIP contains no pairs");
                Rip::default()
            }
            Ok(rip) => rip,
            Err(err) => {
                warn!(%err, "file contains no RIP");
                Rip::default()
            }
        };

        if let Some(first) = rip.entries.first() {
            if first.byte_offset != 0 {
                return Err(Error::Format("first partition in RIP is not at offset 0".into()));
            }
        }

        file.seek(SeekFrom::Start(0))?;
        let (header_partition, _key) = Partition::read_from(&mut file)?;

        let op = header_partition.operational_pattern;
        let known_op = op == dict.ul(Mdd::OpAtom)
            || op == dict.ul(Mdd::InteropOpAtom)
            || op == dict.ul(Mdd::Op1a);
        if !known_op {
            warn!(%op, "operational pattern is not OP-Atom or OP1a");
        }

        if header_partition.header_byte_count < 1024 {
            warn!(count = header_partition.header_byte_count, "improbably small HeaderByteCount");
        }
        if header_partition.header_byte_count > klv::MAX_KLV_PACKET_LENGTH {
            return Err(Error::PacketTooLarge(header_partition.header_byte_count));
        }
        let mut region = vec![0u8; header_partition.header_byte_count as usize];
        file.read_exact(&mut region)?;
        let metadata = HeaderMetadata::read_from(&region, dict)?;

        // the essence container of a 2-part file begins right here
        let after_header = file.stream_position()?;

        let mut reader = Self {
            dict,
            file,
            rip,
            header_partition,
            metadata,
            index: IndexAccessor::new(),
            info: WriterInfo::default(),
            body_offset: after_header,
            last_position: 0,
            dec: None,
            hmac: None,
        };

        reader.init_info()?;
        reader.locate_body()?;
        reader.load_index()?;
        Ok(reader)
    }

    /// Install the AES key for decryption and HMAC verification. A no-op
    /// for plaintext files.
    pub fn load_key(&mut self, key: &[u8; KEY_LENGTH]) {
        self.dec = Some(AesDecContext::new(key));
        if self.info.uses_hmac {
            self.hmac = Some(HmacContext::new(key, self.info.label_set));
        }
    }

    pub fn frames(&self) -> i64 {
        self.metadata
            .objects()
            .iter()
            .find_map(|o| match o {
                MetadataObject::Mpeg2VideoDescriptor(d) => d.file.container_duration,
                MetadataObject::Jpeg2000PictureDescriptor(d) => d.file.container_duration,
                MetadataObject::WaveAudioDescriptor(d) => d.file.container_duration,
                MetadataObject::GenericDataEssenceDescriptor(d) => d.file.container_duration,
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Fill `WriterInfo` from the Identification, the SourcePackage UMID,
    /// and (when present) the CryptographicContext.
    fn init_info(&mut self) -> Result<()> {
        let mut info = WriterInfo::default();

        match self.metadata.find_first(Mdd::Identification) {
            Some(MetadataObject::Identification(ident)) => {
                if !ident.product_name.is_empty() {
                    info.product_name = ident.product_name.clone();
                }
                if !ident.company_name.is_empty() {
                    info.company_name = ident.company_name.clone();
                }
                if !ident.version_string.is_empty() {
                    info.product_version = ident.version_string.clone();
                }
                info.product_uuid = ident.product_uid;
            }
            _ => return Err(Error::NotFound("Identification")),
        }

        match self.metadata.find_first(Mdd::SourcePackage) {
            Some(MetadataObject::SourcePackage(sp)) => {
                info.asset_uuid = sp.package.package_uid.material_number();
            }
            _ => return Err(Error::NotFound("SourcePackage")),
        }

        let op = self.header_partition.operational_pattern;
        if op == self.dict.ul(Mdd::InteropOpAtom) {
            info.label_set = LabelSet::Interop;
        }

        if let Some(MetadataObject::CryptographicContext(ctx)) =
            self.metadata.find_first(Mdd::CryptographicContext)
        {
            info.encrypted_essence = true;
            info.context_id = ctx.context_id;
            info.cryptographic_key_id = ctx.cryptographic_key_id;

            if ctx.mic_algorithm == self.dict.ul(Mdd::MicAlgorithmHmacSha1) {
                info.uses_hmac = true;
            } else if ctx.mic_algorithm == self.dict.ul(Mdd::MicAlgorithmNone) {
                info.uses_hmac = false;
            } else {
                return Err(Error::Format("unexpected MICAlgorithm UL".into()));
            }
        } else {
            info.encrypted_essence = false;
            info.uses_hmac = false;
        }

        self.info = info;
        Ok(())
    }

    /// Resolve the essence-container start from the RIP's body entry.
    fn locate_body(&mut self) -> Result<()> {
        let Some(entry) = self.rip.entries.iter().find(|p| p.body_sid != 0) else {
            // no RIP: assume a 2-part layout with essence after the header
            return Ok(());
        };

        if entry.byte_offset == 0 {
            // 2-part file: the header partition is the body partition
            return Ok(());
        }

        self.file.seek(SeekFrom::Start(entry.byte_offset))?;
        let (_body, _key) = Partition::read_from(&mut self.file)?;
        self.body_offset = self.file.stream_position()?;
        Ok(())
    }

    /// Load all index segments from the footer partition.
    fn load_index(&mut self) -> Result<()> {
        let footer_offset = if self.header_partition.footer_partition != 0 {
            self.header_partition.footer_partition
        } else {
            match self.rip.entries.last() {
                Some(entry) => entry.byte_offset,
                None => return Err(Error::NotFound("footer partition")),
            }
        };

        self.file.seek(SeekFrom::Start(footer_offset))?;
        let (footer, _key) = Partition::read_from(&mut self.file)?;

        if footer.index_byte_count > klv::MAX_KLV_PACKET_LENGTH {
            return Err(Error::PacketTooLarge(footer.index_byte_count));
        }
        let mut region = vec![0u8; footer.index_byte_count as usize];
        self.file.read_exact(&mut region)?;

        let mut pos = 0usize;
        while pos < region.len() {
            let packet = KlvPacket::read_from(&region[pos..])?;
            if packet.key == self.dict.ul(Mdd::KlvFill) {
                pos += packet.packet_length() as usize;
                continue;
            }
            let (segment, consumed) =
                IndexTableSegment::read_packet(&region[pos..], &self.metadata.primer, self.dict)?;
            self.index.segments.push(segment);
            pos += consumed as usize;
        }

        Ok(())
    }

    /// Stream offset, temporal offset and key-frame offset for a frame,
    /// without reading its payload.
    pub fn locate_frame(&self, frame_num: u32) -> Result<(u64, i8, i8)> {
        let entry = self.index.lookup(frame_num)?;
        Ok((self.body_offset + entry.stream_offset, entry.temporal_offset, entry.key_frame_offset))
    }

    /// The index entry recorded for a frame.
    pub fn frame_entry(&self, frame_num: u32) -> Result<IndexEntry> {
        self.index.lookup(frame_num)
    }

    /// Size of the KLV value at the frame's position, for buffer sizing.
    pub fn frame_buffer_size(&mut self, frame_num: u32) -> Result<u64> {
        let entry = self.index.lookup(frame_num)?;
        self.file.seek(SeekFrom::Start(self.body_offset + entry.stream_offset))?;
        self.last_position = 0;
        let kl = KlReader::read_from(&mut self.file)?;
        Ok(kl.value_length)
    }

    /// Read frame `frame_num` into `frame`. Plaintext frames are returned
    /// as written. Encrypted frames are verified against the integrity
    /// pack (when an HMAC context is loaded) and decrypted (when a cipher
    /// context is loaded); without a key the encrypted source value is
    /// returned with the ciphertext flag set.
    pub fn read_frame(
        &mut self,
        frame_num: u32,
        essence_ul: &Ul,
        frame: &mut FrameBuffer,
    ) -> Result<()> {
        let entry = self.index.lookup(frame_num)?;
        let position = self.body_offset + entry.stream_offset;

        if position != self.last_position {
            self.file.seek(SeekFrom::Start(position))?;
        }

        let consumed = self.read_essence_packet(frame_num, frame_num + 1, essence_ul, frame)?;
        self.last_position = position + consumed;
        Ok(())
    }

    /// Read one essence packet at the current position. Returns the bytes
    /// consumed.
    fn read_essence_packet(
        &mut self,
        frame_num: u32,
        sequence: u32,
        essence_ul: &Ul,
        frame: &mut FrameBuffer,
    ) -> Result<u64> {
        let kl = KlReader::read_from(&mut self.file)?;
        let length = kl.value_length as usize;

        if kl.key.matches_ignore_stream(essence_ul) {
            let out = frame.writable(length)?;
            self.file.read_exact(out)?;
            frame.plaintext_offset = 0;
            frame.source_length = length as u64;
            frame.ciphertext = false;
            return Ok(kl.kl_length as u64 + kl.value_length);
        }

        let crypt_smpte = self.dict.ul(Mdd::CryptEssence);
        let crypt_interop = self.dict.ul(Mdd::InteropCryptEssence);
        if !(kl.key.matches_ignore_stream(&crypt_smpte)
            || kl.key.matches_ignore_stream(&crypt_interop))
        {
            return Err(Error::Format(format!("unexpected essence key {}", kl.key)));
        }

        if kl.value_length > klv::MAX_KLV_PACKET_LENGTH {
            return Err(Error::PacketTooLarge(kl.value_length));
        }
        let mut value = vec![0u8; length];
        self.file.read_exact(&mut value)?;

        self.unwrap_eklv(&value, frame_num, sequence, essence_ul, frame)?;
        Ok(kl.kl_length as u64 + kl.value_length)
    }

    /// Parse and (optionally) verify and decrypt one encrypted triplet.
    fn unwrap_eklv(
        &mut self,
        value: &[u8],
        _frame_num: u32,
        sequence: u32,
        essence_ul: &Ul,
        frame: &mut FrameBuffer,
    ) -> Result<()> {
        let mut r = MemReader::new(value);

        r.read_expected_ber(asdcp_core::UUID_LENGTH as u64)?;
        let context_id = Uuid::from_bytes(r.read_array()?);
        if self.info.encrypted_essence && context_id != self.info.context_id {
            if self.hmac.is_some() {
                return Err(Error::HmacFail("frame ContextID differs from header context"));
            }
            warn!(%context_id, "frame ContextID differs from header context");
        }

        r.read_expected_ber(8)?;
        let plaintext_offset = r.read_u64_be()?;

        r.read_expected_ber(asdcp_core::UL_LENGTH as u64)?;
        let source_key = Ul::new(r.read_array()?);
        if !source_key.matches_ignore_stream(essence_ul) {
            return Err(Error::Format(format!("unexpected source key {source_key}")));
        }

        r.read_expected_ber(8)?;
        let source_length = r.read_u64_be()?;
        if plaintext_offset > source_length {
            return Err(Error::LargePto { offset: plaintext_offset, size: source_length });
        }

        let esv_len = r.read_ber()? as usize;
        let esv = r.read_raw(esv_len)?;

        // a tampered source length no longer matches the stored region
        if self.hmac.is_some()
            && esv_len
                != crate::crypto::calc_esv_length(source_length as usize, plaintext_offset as usize)
        {
            return Err(Error::HmacFail("source length inconsistent with essence region"));
        }

        // trailing integrity pack: either full or three empty items
        let mut stored = None;
        if r.remainder() > 0 {
            let id_len = r.read_ber()?;
            if id_len == asdcp_core::UUID_LENGTH as u64 {
                let asset = Uuid::from_bytes(r.read_array()?);
                r.read_expected_ber(8)?;
                let seq = r.read_u64_be()?;
                r.read_expected_ber(HMAC_SIZE as u64)?;
                let mic = r.read_raw(HMAC_SIZE)?;
                stored = Some((asset, seq, mic));
            } else if id_len == 0 {
                r.read_expected_ber(0)?;
                r.read_expected_ber(0)?;
            } else {
                return Err(Error::HmacFail("malformed integrity pack"));
            }
        }

        if let Some(hmac) = &self.hmac {
            let Some((asset, seq, mic)) = stored else {
                return Err(Error::HmacFail("integrity pack absent"));
            };
            IntegrityPack::test(
                esv,
                &self.info.asset_uuid,
                u64::from(sequence),
                &asset,
                seq,
                mic,
                hmac,
            )?;
        }

        match &mut self.dec {
            Some(dec) => crate::crypto::decrypt_frame_buffer(
                esv,
                source_length as usize,
                plaintext_offset as usize,
                dec,
                frame,
            ),
            None => {
                debug!("no cipher context loaded, returning ciphertext");
                frame.set_data(esv)?;
                frame.ciphertext = true;
                frame.plaintext_offset = plaintext_offset;
                frame.source_length = source_length;
                Ok(())
            }
        }
    }

    /// Read the payload of the generic stream partition with the given
    /// BodySID by walking the RIP.
    pub fn read_stream_payload(&mut self, sid: u32, frame: &mut FrameBuffer) -> Result<()> {
        // count essence-bearing entries up to the match; the payload's
        // sequence number continues the frame numbering
        let mut sequence = 0u32;
        let mut offset = None;
        for entry in &self.rip.entries {
            if entry.body_sid == sid && entry.byte_offset != 0 {
                offset = Some(entry.byte_offset);
                break;
            }
            if entry.body_sid > 0 {
                sequence += 1;
            }
        }
        let offset = offset.ok_or(Error::NotFound("BodySID"))?;

        self.file.seek(SeekFrom::Start(offset))?;
        let (part, _key) = Partition::read_from(&mut self.file)?;
        if part.body_sid != sid {
            return Err(Error::Format(format!(
                "generic stream partition BodySID {} differs from {sid}",
                part.body_sid
            )));
        }

        let element = self.dict.ul(Mdd::GenericStreamDataElement);
        let frames = self.frames() as u32;
        self.read_essence_packet(frames, frames + sequence, &element, frame)?;
        self.last_position = 0;
        Ok(())
    }
}

/// Identify the essence kind of a track file from its descriptor, the way
/// front-ends decide which reader to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EssenceType {
    Mpeg2Ves,
    Jpeg2000,
    Jpeg2000Stereo,
    Pcm24bit48k,
    Pcm24bit96k,
    DcData,
    Unknown,
}

/// Probe a file's essence type by parsing its header metadata only.
pub fn essence_type<P: AsRef<Path>>(path: P) -> Result<EssenceType> {
    let reader = TrackFileReader::open_read(path)?;
    let meta = &reader.metadata;

    let kind = if meta.find_first(Mdd::Mpeg2VideoDescriptor).is_some() {
        EssenceType::Mpeg2Ves
    } else if meta.find_first(Mdd::Jpeg2000PictureSubDescriptor).is_some() {
        if meta.find_first(Mdd::StereoscopicPictureSubDescriptor).is_some() {
            EssenceType::Jpeg2000Stereo
        } else {
            EssenceType::Jpeg2000
        }
    } else if let Some(MetadataObject::WaveAudioDescriptor(wave)) =
        meta.find_first(Mdd::WaveAudioDescriptor)
    {
        if wave.audio_sampling_rate == crate::types::SAMPLE_RATE_96K {
            EssenceType::Pcm24bit96k
        } else {
            EssenceType::Pcm24bit48k
        }
    } else if meta.find_first(Mdd::GenericDataEssenceDescriptor).is_some() {
        EssenceType::DcData
    } else {
        EssenceType::Unknown
    };

    Ok(kind)
}
