//! The track-file writer: composes partitions, header metadata, essence
//! KLV packets, the index table and the RIP into a legal OP-Atom file.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use asdcp_core::{klv, Error, MemWriter, Result, Ul, Umid, ValueRng};
use asdcp_dict::{Dictionary, Mdd};
use uuid::Uuid;

use crate::crypto::{
    self, AesEncContext, HmacContext, IntegrityPack, KEY_LENGTH, KLV_CRYPTINFO_SIZE,
    KLV_INTPACK_SIZE,
};
use crate::frame::{FrameBuffer, FrameType};
use crate::index::{IndexAccessor, IndexEntry, FLAG_CLOSED_GOP, FLAG_GOP_START};
use crate::info::{LabelSet, WriterInfo};
use crate::metadata::{
    ContentStorage, CryptographicContext, CryptographicFramework, DmSegment,
    EssenceContainerData, HeaderMetadata, Identification, MaterialPackage, MetadataObject,
    PackageCommon, Sequence, SourceClip, SourcePackage, StaticTrack, TimecodeComponent, Track,
};
use crate::partition::{Partition, Rip, RipEntry};
use crate::types::{Rational, Timestamp, VersionType};

/// Default reserved size of the header partition, fill included.
pub const DEFAULT_HEADER_SIZE: u32 = 16_384;

/// Writer lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Init,
    Ready,
    Running,
    Final,
}

/// Everything `set_source_stream` needs to build the header.
pub struct SourceStreamConfig {
    pub package_label: String,
    pub track_name: String,
    /// Plaintext essence-container label.
    pub wrapping_ul: Ul,
    /// Essence element key, stream octet included.
    pub essence_ul: Ul,
    pub data_definition: Mdd,
    pub edit_rate: Rational,
    pub tc_frame_rate: u32,
    /// Non-zero selects CBR indexing at that per-frame byte count.
    pub bytes_per_edit_unit: u32,
    pub descriptor: MetadataObject,
    pub sub_descriptors: Vec<MetadataObject>,
    /// AES key; required when the `WriterInfo` requests encryption.
    pub cipher_key: Option<[u8; KEY_LENGTH]>,
}

/// Timecode rate for an edit rate: the nearest integer frame count.
pub fn derive_timecode_rate(edit_rate: Rational) -> u32 {
    (edit_rate.quotient() + 0.5).floor() as u32
}

pub struct TrackFileWriter {
    dict: &'static Dictionary,
    file: File,
    rng: ValueRng,
    pub info: WriterInfo,
    state: WriterState,
    header_size: u32,
    header_partition: Partition,
    metadata: HeaderMetadata,
    rip: Rip,
    index: IndexAccessor,
    /// Components whose duration is stamped with the frame count at
    /// finalize; the descriptor's container duration is tracked apart.
    duration_components: Vec<Uuid>,
    descriptor_uid: Uuid,
    essence_ul: Ul,
    frames_written: u32,
    stream_offset: u64,
    min_ber_length: usize,
    enc: Option<AesEncContext>,
    hmac: Option<HmacContext>,
}

impl TrackFileWriter {
    /// Create the output file. The file must be writable; any existing
    /// content is truncated.
    pub fn open_write<P: AsRef<Path>>(path: P, info: WriterInfo, header_size: u32) -> Result<Self> {
        Self::open_write_with_rng(path, info, header_size, ValueRng::default())
    }

    /// As [`open_write`], with a caller-supplied RNG so tests can produce
    /// reproducible files.
    ///
    /// [`open_write`]: Self::open_write
    pub fn open_write_with_rng<P: AsRef<Path>>(
        path: P,
        info: WriterInfo,
        header_size: u32,
        rng: ValueRng,
    ) -> Result<Self> {
        let dict = match info.label_set {
            LabelSet::Smpte => asdcp_dict::smpte(),
            LabelSet::Interop => asdcp_dict::interop(),
        };
        let file = File::create(path)?;

        Ok(Self {
            dict,
            file,
            rng,
            info,
            state: WriterState::Init,
            header_size,
            header_partition: Partition::default(),
            metadata: HeaderMetadata::new(dict),
            rip: Rip::default(),
            index: IndexAccessor::new(),
            duration_components: Vec::new(),
            descriptor_uid: Uuid::nil(),
            essence_ul: Ul::default(),
            frames_written: 0,
            stream_offset: 0,
            min_ber_length: klv::MXF_BER_LENGTH,
            enc: None,
            hmac: None,
        })
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    pub fn rip(&self) -> &Rip {
        &self.rip
    }

    /// Build the header metadata and write the header (and, for SMPTE
    /// files, the body) partition.
    pub fn set_source_stream(&mut self, config: SourceStreamConfig) -> Result<()> {
        if self.state != WriterState::Init {
            return Err(Error::State);
        }

        if self.info.encrypted_essence {
            let key = config.cipher_key.as_ref().ok_or(Error::CryptoCtx)?;
            self.enc = Some(AesEncContext::new(key, &mut self.rng));
            if self.info.uses_hmac {
                self.hmac = Some(HmacContext::new(key, self.info.label_set));
            }
            if self.info.context_id.is_nil() {
                self.info.context_id = self.rng.uuid();
            }
        }

        self.essence_ul = config.essence_ul;
        self.init_header();
        self.add_source_clip(&config);
        self.add_essence_descriptor(&config);

        // first RIP entry: 3-part files have no essence in the header
        match self.info.label_set {
            LabelSet::Smpte => self.rip.entries.push(RipEntry::new(0, 0)),
            LabelSet::Interop => self.rip.entries.push(RipEntry::new(1, 0)),
        }

        // the OP label says OP1a until the index and RIP exist
        self.header_partition.operational_pattern = self.dict.ul(Mdd::Op1a);
        if self.info.label_set == LabelSet::Interop {
            self.header_partition.body_sid = 1;
        }
        self.write_header_partition()?;

        // body partition and index parameters
        if self.info.label_set == LabelSet::Smpte {
            let mut body = Partition {
                this_partition: self.file.stream_position()?,
                body_sid: 1,
                operational_pattern: self.dict.ul(Mdd::OpAtom),
                essence_containers: self.header_partition.essence_containers.clone(),
                ..Partition::default()
            };
            body.footer_partition = 0;
            self.rip.entries.push(RipEntry::new(1, body.this_partition));
            body.write_to(&mut self.file, &self.dict.ul(Mdd::ClosedCompleteBodyPartition))?;
        }

        if config.bytes_per_edit_unit == 0 {
            self.index.set_params_vbr(config.edit_rate);
        } else {
            self.index.set_params_cbr(config.bytes_per_edit_unit, config.edit_rate, 1, &mut self.rng);
        }

        self.state = WriterState::Ready;
        Ok(())
    }

    fn init_header(&mut self) {
        self.metadata.preface.version = 258;
        self.metadata.preface.object_model_version = 1;
        self.metadata.preface.last_modified_date = Timestamp::now();
        self.metadata.preface.operational_pattern = self.dict.ul(Mdd::Op1a);

        let ident = Identification {
            this_generation_uid: self.rng.uuid(),
            company_name: self.info.company_name.clone(),
            product_name: self.info.product_name.clone(),
            version_string: self.info.product_version.clone(),
            product_uid: self.info.product_uuid,
            modification_date: Timestamp::now(),
            toolkit_version: Some(VersionType::from_dotted(env!("CARGO_PKG_VERSION"), 0x6a68)),
            platform: Some(format!("asdcp-rs-{}", std::env::consts::OS)),
            ..Identification::default()
        };
        let ident_uid = self.metadata.add(MetadataObject::Identification(ident), &mut self.rng);
        self.metadata.preface.identifications.push(ident_uid);
    }

    /// A timeline track, its sequence, and one structural component.
    fn add_track(
        &mut self,
        track_id: u32,
        track_number: u32,
        track_name: &str,
        edit_rate: Rational,
        data_definition: Ul,
        component: MetadataObject,
    ) -> (Uuid, Uuid) {
        let component_uid = self.metadata.add(component, &mut self.rng);
        self.duration_components.push(component_uid);

        let sequence_uid = self.metadata.add(
            MetadataObject::Sequence(Sequence {
                data_definition,
                duration: Some(0),
                structural_components: vec![component_uid],
                ..Sequence::default()
            }),
            &mut self.rng,
        );
        self.duration_components.push(sequence_uid);

        let track_uid = self.metadata.add(
            MetadataObject::Track(Track {
                track_id,
                track_number,
                track_name: Some(track_name.into()),
                sequence: sequence_uid,
                edit_rate,
                origin: 0,
                ..Track::default()
            }),
            &mut self.rng,
        );
        (track_uid, component_uid)
    }

    fn timecode_component(&self, tc_frame_rate: u32) -> MetadataObject {
        MetadataObject::TimecodeComponent(TimecodeComponent {
            data_definition: self.dict.ul(Mdd::TimecodeDataDef),
            duration: Some(0),
            rounded_timecode_base: tc_frame_rate as u16,
            start_timecode: 0,
            drop_frame: 0,
            ..TimecodeComponent::default()
        })
    }

    fn add_source_clip(&mut self, config: &SourceStreamConfig) {
        if self.info.asset_uuid.is_nil() {
            self.info.asset_uuid = self.rng.uuid();
        }
        let source_package_umid = Umid::make(0x0f, self.info.asset_uuid);
        let material_package_umid = Umid::make(0x0f, self.rng.uuid());
        let data_definition = self.dict.ul(config.data_definition);
        let now = Timestamp::now();

        let ecd_uid = self.metadata.add(
            MetadataObject::EssenceContainerData(EssenceContainerData {
                linked_package_uid: source_package_umid,
                index_sid: 129,
                body_sid: 1,
                ..EssenceContainerData::default()
            }),
            &mut self.rng,
        );

        // Material Package: timecode track then essence track with a
        // source clip pointing at the file package
        let (mp_tc_track, _) = self.add_track(
            1,
            0,
            "Timecode Track",
            config.edit_rate,
            self.dict.ul(Mdd::TimecodeDataDef),
            self.timecode_component(config.tc_frame_rate),
        );
        let (mp_track, _) = self.add_track(
            2,
            0,
            &config.track_name,
            config.edit_rate,
            data_definition,
            MetadataObject::SourceClip(SourceClip {
                data_definition,
                duration: Some(0),
                start_position: 0,
                source_package_id: source_package_umid,
                source_track_id: 2,
                ..SourceClip::default()
            }),
        );
        let material_uid = self.metadata.add(
            MetadataObject::MaterialPackage(MaterialPackage {
                package: PackageCommon {
                    package_uid: material_package_umid,
                    name: Some("Material Package".into()),
                    package_creation_date: now,
                    package_modified_date: now,
                    tracks: vec![mp_tc_track, mp_track],
                },
                ..MaterialPackage::default()
            }),
            &mut self.rng,
        );

        // File (Source) Package: the track number carries the essence
        // element type per ST 379 element-to-track numbering
        let track_number = u32::from_be_bytes(self.essence_ul.element_bytes());
        let (fp_tc_track, _) = self.add_track(
            1,
            0,
            "Timecode Track",
            config.edit_rate,
            self.dict.ul(Mdd::TimecodeDataDef),
            self.timecode_component(config.tc_frame_rate),
        );
        let (fp_track, _) = self.add_track(
            2,
            track_number,
            &config.track_name,
            config.edit_rate,
            data_definition,
            MetadataObject::SourceClip(SourceClip {
                data_definition,
                duration: Some(0),
                start_position: 0,
                source_package_id: asdcp_core::NIL_UMID,
                source_track_id: 0,
                ..SourceClip::default()
            }),
        );
        let file_package_uid = self.metadata.add(
            MetadataObject::SourcePackage(SourcePackage {
                package: PackageCommon {
                    package_uid: source_package_umid,
                    name: Some(config.package_label.clone()),
                    package_creation_date: now,
                    package_modified_date: now,
                    tracks: vec![fp_tc_track, fp_track],
                },
                ..SourcePackage::default()
            }),
            &mut self.rng,
        );

        let storage_uid = self.metadata.add(
            MetadataObject::ContentStorage(ContentStorage {
                packages: vec![material_uid, file_package_uid],
                essence_container_data: vec![ecd_uid],
                ..ContentStorage::default()
            }),
            &mut self.rng,
        );
        self.metadata.preface.content_storage = storage_uid;
        self.metadata.preface.primary_package = Some(file_package_uid);
    }

    fn add_essence_descriptor(&mut self, config: &SourceStreamConfig) {
        let mut descriptor = config.descriptor.clone();

        let mut sub_uids = Vec::new();
        for sub in &config.sub_descriptors {
            sub_uids.push(self.metadata.add(sub.clone(), &mut self.rng));
        }

        // file-descriptor fields the writer owns
        if let Some(file) = descriptor_file_mut(&mut descriptor) {
            file.essence_container = config.wrapping_ul;
            file.linked_track_id = 2;
        }
        set_sub_descriptors(&mut descriptor, sub_uids);

        self.header_partition.essence_containers.push(self.dict.ul(Mdd::GcMulti));

        if self.info.encrypted_essence {
            self.header_partition
                .essence_containers
                .push(self.dict.ul(Mdd::EncryptedContainerLabel));
            self.metadata.preface.dm_schemes.push(self.dict.ul(Mdd::CryptographicFrameworkLabel));
            self.add_dms_crypt(config.wrapping_ul);
        } else {
            self.header_partition.essence_containers.push(config.wrapping_ul);
        }

        self.metadata.preface.essence_containers = self.header_partition.essence_containers.clone();

        self.descriptor_uid = self.metadata.add(descriptor, &mut self.rng);

        let descriptor_uid = self.descriptor_uid;
        if let Some(MetadataObject::SourcePackage(sp)) =
            self.metadata.find_first_mut(Mdd::SourcePackage)
        {
            sp.descriptor = descriptor_uid;
        }
    }

    /// The Crypto DM chain: a static track on the File Package carrying a
    /// DMSegment whose framework links the CryptographicContext. The
    /// context records what the plaintext wrapping would have been.
    fn add_dms_crypt(&mut self, wrapping_ul: Ul) {
        let context_uid = self.metadata.add(
            MetadataObject::CryptographicContext(CryptographicContext {
                context_id: self.info.context_id,
                source_essence_container: wrapping_ul,
                cipher_algorithm: self.dict.ul(Mdd::CipherAlgorithmAes),
                mic_algorithm: if self.info.uses_hmac {
                    self.dict.ul(Mdd::MicAlgorithmHmacSha1)
                } else {
                    self.dict.ul(Mdd::MicAlgorithmNone)
                },
                cryptographic_key_id: self.info.cryptographic_key_id,
                ..CryptographicContext::default()
            }),
            &mut self.rng,
        );

        let framework_uid = self.metadata.add(
            MetadataObject::CryptographicFramework(CryptographicFramework {
                context_sr: context_uid,
                ..CryptographicFramework::default()
            }),
            &mut self.rng,
        );

        let dm_def = self.dict.ul(Mdd::DescriptiveMetaDataDef);
        let segment_uid = self.metadata.add(
            MetadataObject::DmSegment(DmSegment {
                data_definition: dm_def,
                duration: Some(0),
                event_comment: Some("AS-DCP KLV Encryption".into()),
                dm_framework: framework_uid,
                ..DmSegment::default()
            }),
            &mut self.rng,
        );
        self.duration_components.push(segment_uid);

        let sequence_uid = self.metadata.add(
            MetadataObject::Sequence(Sequence {
                data_definition: dm_def,
                duration: Some(0),
                structural_components: vec![segment_uid],
                ..Sequence::default()
            }),
            &mut self.rng,
        );
        self.duration_components.push(sequence_uid);

        let track_uid = self.metadata.add(
            MetadataObject::StaticTrack(StaticTrack {
                track_id: 3,
                track_name: Some("Descriptive Track".into()),
                sequence: sequence_uid,
                ..StaticTrack::default()
            }),
            &mut self.rng,
        );

        if let Some(MetadataObject::SourcePackage(sp)) =
            self.metadata.find_first_mut(Mdd::SourcePackage)
        {
            sp.package.tracks.push(track_uid);
        }
    }

    /// Write (or rewrite) the header partition at the current position.
    /// The region is padded with a KLV Fill packet so the total equals the
    /// reserved header size.
    fn write_header_partition(&mut self) -> Result<()> {
        let mut region = Vec::new();
        self.metadata.write_to(&mut region)?;

        let pack_size = self.header_partition.archive_size();
        let reserved = self.header_size as u64;
        if pack_size as u64 + region.len() as u64 + klv::KL_LENGTH as u64 > reserved {
            return Err(Error::Format(format!(
                "header metadata of {} bytes exceeds the {} byte reservation",
                region.len(),
                reserved
            )));
        }

        self.header_partition.this_partition = 0;
        self.header_partition.header_byte_count = reserved - pack_size as u64;

        let start = self.file.stream_position()?;
        self.header_partition
            .write_to(&mut self.file, &self.dict.ul(Mdd::ClosedCompleteHeader))?;
        self.file.write_all(&region)?;

        let written = self.file.stream_position()? - start;
        klv::write_fill(&mut self.file, &self.dict.ul(Mdd::KlvFill), reserved - written)?;
        Ok(())
    }

    /// Write one frame. The packet, its index entry and the frame counter
    /// move together: nothing is committed when any step fails.
    pub fn write_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        match self.state {
            WriterState::Ready | WriterState::Running => {}
            _ => return Err(Error::State),
        }
        if frame.is_empty() {
            return Err(Error::EmptyFrame);
        }

        let entry_offset = self.stream_offset;
        let essence_ul = self.essence_ul;
        let packet = self.build_essence_packet(frame, &essence_ul, self.frames_written as u64 + 1)?;
        self.file.write_all(&packet)?;
        self.stream_offset += packet.len() as u64;

        if !self.index.is_cbr() {
            self.index.push_entry(
                IndexEntry {
                    temporal_offset: frame.temporal_offset,
                    key_frame_offset: 0,
                    flags: frame_flags(frame),
                    stream_offset: entry_offset,
                },
                1,
                &mut self.rng,
            );
        }

        self.frames_written += 1;
        self.state = WriterState::Running;
        Ok(())
    }

    /// Serialize one plaintext or encrypted essence packet.
    fn build_essence_packet(
        &mut self,
        frame: &FrameBuffer,
        essence_ul: &Ul,
        sequence: u64,
    ) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(frame.len() + 128);

        if !self.info.encrypted_essence {
            let width = klv::required_ber_length(frame.len() as u64, self.min_ber_length)?;
            out.extend_from_slice(essence_ul.as_bytes());
            let mut w = MemWriter::new();
            w.write_ber(frame.len() as u64, width)?;
            out.extend_from_slice(w.as_slice());
            out.extend_from_slice(frame.as_slice());
            return Ok(out);
        }

        let enc = self.enc.as_mut().ok_or(Error::CryptoCtx)?;
        if self.info.uses_hmac && self.hmac.is_none() {
            return Err(Error::HmacCtx);
        }
        if frame.plaintext_offset > frame.len() as u64 {
            return Err(Error::LargePto { offset: frame.plaintext_offset, size: frame.len() as u64 });
        }

        let esv = crypto::encrypt_frame_buffer(frame, enc)?;

        let mut triplet_len = KLV_CRYPTINFO_SIZE + esv.len();
        triplet_len += if self.info.uses_hmac {
            KLV_INTPACK_SIZE
        } else {
            klv::MXF_BER_LENGTH * 3 // empty integrity pack
        };

        // escalate the outer and ESV lengths together when needed
        let mut element_ber = self.min_ber_length;
        if triplet_len > 0x00ff_ffff {
            element_ber = asdcp_core::ber::ber_length_for(triplet_len as u64);
            triplet_len += element_ber - klv::MXF_BER_LENGTH;
        }

        let mut w = MemWriter::with_capacity(triplet_len + 32);
        w.write_raw(self.dict.ul(Mdd::CryptEssence).as_bytes());
        w.write_ber(triplet_len as u64, element_ber)?;
        w.write_ber(asdcp_core::UUID_LENGTH as u64, klv::MXF_BER_LENGTH)?;
        w.write_raw(self.info.context_id.as_bytes());
        w.write_ber(8, klv::MXF_BER_LENGTH)?;
        w.write_u64_be(frame.plaintext_offset);
        w.write_ber(asdcp_core::UL_LENGTH as u64, klv::MXF_BER_LENGTH)?;
        w.write_raw(essence_ul.as_bytes());
        w.write_ber(8, klv::MXF_BER_LENGTH)?;
        w.write_u64_be(frame.len() as u64);
        w.write_ber(esv.len() as u64, element_ber)?;
        w.write_raw(&esv);

        match &self.hmac {
            Some(hmac) => {
                let pack = IntegrityPack::calc(&esv, &self.info.asset_uuid, sequence, hmac);
                w.write_raw(&pack.data);
            }
            None => {
                for _ in 0..3 {
                    w.write_ber(0, klv::MXF_BER_LENGTH)?;
                }
            }
        }

        out.extend_from_slice(w.as_slice());
        Ok(out)
    }

    /// Append a generic stream partition carrying an opaque payload under
    /// a fresh BodySID. Returns the SID assigned.
    pub fn write_stream_payload(&mut self, payload: &FrameBuffer) -> Result<u32> {
        if self.state != WriterState::Running {
            return Err(Error::State);
        }
        if payload.is_empty() {
            return Err(Error::EmptyFrame);
        }

        let previous = self.rip.entries.last().map_or(0, |p| p.byte_offset);
        let here = self.file.stream_position()?;
        let sid = self.rip.max_body_sid() + 1;
        self.rip.entries.push(RipEntry::new(sid, here));

        let part = Partition {
            major_version: self.header_partition.major_version,
            minor_version: self.header_partition.minor_version,
            this_partition: here,
            previous_partition: previous,
            operational_pattern: self.header_partition.operational_pattern,
            body_sid: sid,
            essence_containers: self.header_partition.essence_containers.clone(),
            ..Partition::default()
        };
        part.write_to(&mut self.file, &self.dict.ul(Mdd::GenericStreamPartition))?;

        let element = self.dict.ul(Mdd::GenericStreamDataElement);
        let sequence = u64::from(self.frames_written) + 1;
        let packet = self.build_essence_packet(payload, &element, sequence)?;
        self.file.write_all(&packet)?;
        Ok(sid)
    }

    /// Stamp durations, write the footer with the index table, write the
    /// RIP, and rewrite the header partition in place.
    pub fn finalize(&mut self) -> Result<()> {
        if self.state != WriterState::Running {
            return Err(Error::State);
        }

        let duration = i64::from(self.frames_written);
        self.index.finish(duration);

        for uid in std::mem::take(&mut self.duration_components) {
            if let Some(field) = self.metadata.get_mut(&uid).and_then(|o| o.duration_mut()) {
                *field = Some(duration);
            }
        }
        let descriptor_uid = self.descriptor_uid;
        if let Some(field) =
            self.metadata.get_mut(&descriptor_uid).and_then(|o| o.container_duration_mut())
        {
            *field = Some(duration);
        }

        let previous = self.rip.entries.last().map_or(0, |p| p.byte_offset);
        let here = self.file.stream_position()?;
        self.rip.entries.push(RipEntry::new(0, here));
        self.header_partition.footer_partition = here;

        // relabel as OP-Atom now the index and RIP are in place
        let op_atom = self.dict.ul(Mdd::OpAtom);
        self.header_partition.operational_pattern = op_atom;
        self.metadata.preface.operational_pattern = op_atom;

        let mut index_region = Vec::new();
        self.index.write_all(&mut index_region, &mut self.metadata.primer, self.dict)?;

        let footer = Partition {
            this_partition: here,
            previous_partition: previous,
            footer_partition: here,
            index_byte_count: index_region.len() as u64,
            index_sid: 129,
            operational_pattern: op_atom,
            essence_containers: self.header_partition.essence_containers.clone(),
            ..Partition::default()
        };
        footer.write_to(&mut self.file, &self.dict.ul(Mdd::CompleteFooter))?;
        self.file.write_all(&index_region)?;

        self.rip.write_to(&mut self.file, self.dict)?;

        self.file.seek(SeekFrom::Start(0))?;
        self.write_header_partition()?;
        self.file.flush()?;

        self.state = WriterState::Final;
        Ok(())
    }
}

/// Index entry flags for a frame: picture type plus GOP markers.
fn frame_flags(frame: &FrameBuffer) -> u8 {
    let mut flags = match frame.frame_type {
        FrameType::I | FrameType::Unknown => 0x00,
        FrameType::P => 0x22,
        FrameType::B => 0x33,
    };
    if frame.gop_start {
        flags |= FLAG_GOP_START;
    }
    if frame.closed_gop {
        flags |= FLAG_CLOSED_GOP;
    }
    flags
}

fn descriptor_file_mut(
    descriptor: &mut MetadataObject,
) -> Option<&mut crate::metadata::FileDescriptorCommon> {
    match descriptor {
        MetadataObject::Mpeg2VideoDescriptor(d) => Some(&mut d.file),
        MetadataObject::Jpeg2000PictureDescriptor(d) => Some(&mut d.file),
        MetadataObject::WaveAudioDescriptor(d) => Some(&mut d.file),
        MetadataObject::GenericDataEssenceDescriptor(d) => Some(&mut d.file),
        _ => None,
    }
}

fn set_sub_descriptors(descriptor: &mut MetadataObject, subs: Vec<Uuid>) {
    match descriptor {
        MetadataObject::Mpeg2VideoDescriptor(d) => d.sub_descriptors = subs,
        MetadataObject::Jpeg2000PictureDescriptor(d) => d.sub_descriptors = subs,
        MetadataObject::WaveAudioDescriptor(d) => d.sub_descriptors = subs,
        MetadataObject::GenericDataEssenceDescriptor(d) => d.sub_descriptors = subs,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timecode_rate_rounds_edit_rate() {
        assert_eq!(derive_timecode_rate(Rational::new(24, 1)), 24);
        assert_eq!(derive_timecode_rate(Rational::new(24_000, 1001)), 24);
        assert_eq!(derive_timecode_rate(Rational::new(48, 1)), 48);
    }

    #[test]
    fn frame_flags_encode_picture_type() {
        let mut frame = FrameBuffer::from_slice(b"x");
        frame.frame_type = FrameType::I;
        frame.gop_start = true;
        frame.closed_gop = true;
        assert_eq!(frame_flags(&frame), 0xc0);

        frame.frame_type = FrameType::P;
        frame.gop_start = false;
        frame.closed_gop = false;
        assert_eq!(frame_flags(&frame), 0x22);

        frame.frame_type = FrameType::B;
        assert_eq!(frame_flags(&frame), 0x33);
    }
}
