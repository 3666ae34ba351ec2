//! Header-metadata objects and the arena that owns them.
//!
//! Every object is an InterchangeObject: a 16-byte InstanceUID (the primary
//! key of the object graph), an optional GenerationUID and class-specific
//! fields, serialized as a TLV set wrapped in a KLV packet keyed by the
//! object-class UL. Cross-references are byte-equal InstanceUID values, so
//! the graph may contain cycles without ownership ambiguity.

use std::collections::HashMap;

use asdcp_core::{klv, Error, KlvPacket, Result, Ul, Umid, ValueRng, NIL_UMID};
use asdcp_dict::{Dictionary, Mdd};
use tracing::debug;
use uuid::Uuid;

use crate::primer::Primer;
use crate::tlv::{TlvReader, TlvWriter};
use crate::types::{Rational, Timestamp, VersionType};

/// Fields common to every InterchangeObject.
#[derive(Debug, Clone, Default)]
pub struct ObjectHeader {
    pub instance_uid: Uuid,
    pub generation_uid: Option<Uuid>,
}

impl ObjectHeader {
    fn read(set: &TlvReader<'_>) -> Result<Self> {
        Ok(Self {
            instance_uid: set.read_uuid(Mdd::InstanceUid)?.unwrap_or_default(),
            generation_uid: set.read_uuid(Mdd::GenerationUid)?,
        })
    }

    fn write(&self, set: &mut TlvWriter<'_>) -> Result<()> {
        set.write_archive(Mdd::InstanceUid, &self.instance_uid)?;
        set.write_opt_archive(Mdd::GenerationUid, self.generation_uid.as_ref())
    }
}

/// The Preface: root of the object graph, held apart from the arena the
/// way the header partition holds it apart from its packet list.
#[derive(Debug, Clone, Default)]
pub struct Preface {
    pub header: ObjectHeader,
    pub last_modified_date: Timestamp,
    pub version: u16,
    pub object_model_version: u32,
    pub primary_package: Option<Uuid>,
    pub identifications: Vec<Uuid>,
    pub content_storage: Uuid,
    pub operational_pattern: Ul,
    pub essence_containers: Vec<Ul>,
    pub dm_schemes: Vec<Ul>,
}

impl Preface {
    fn read_tlv(set: &TlvReader<'_>) -> Result<Self> {
        Ok(Self {
            header: ObjectHeader::read(set)?,
            last_modified_date: set.read_timestamp(Mdd::PrefaceLastModifiedDate)?.unwrap_or_default(),
            version: set.read_u16(Mdd::PrefaceVersion)?.unwrap_or(258),
            object_model_version: set.read_u32(Mdd::PrefaceObjectModelVersion)?.unwrap_or(0),
            primary_package: set.read_uuid(Mdd::PrefacePrimaryPackage)?,
            identifications: set.read_batch(Mdd::PrefaceIdentifications)?.unwrap_or_default(),
            content_storage: set.read_uuid(Mdd::PrefaceContentStorage)?.unwrap_or_default(),
            operational_pattern: set.read_ul(Mdd::PrefaceOperationalPattern)?.unwrap_or_default(),
            essence_containers: set.read_batch(Mdd::PrefaceEssenceContainers)?.unwrap_or_default(),
            dm_schemes: set.read_batch(Mdd::PrefaceDmSchemes)?.unwrap_or_default(),
        })
    }

    fn write_tlv(&self, set: &mut TlvWriter<'_>) -> Result<()> {
        self.header.write(set)?;
        set.write_archive(Mdd::PrefaceLastModifiedDate, &self.last_modified_date)?;
        set.write_u16(Mdd::PrefaceVersion, self.version)?;
        set.write_u32(Mdd::PrefaceObjectModelVersion, self.object_model_version)?;
        set.write_opt_archive(Mdd::PrefacePrimaryPackage, self.primary_package.as_ref())?;
        set.write_batch(Mdd::PrefaceIdentifications, &self.identifications)?;
        set.write_archive(Mdd::PrefaceContentStorage, &self.content_storage)?;
        set.write_archive(Mdd::PrefaceOperationalPattern, &self.operational_pattern)?;
        set.write_batch(Mdd::PrefaceEssenceContainers, &self.essence_containers)?;
        set.write_batch(Mdd::PrefaceDmSchemes, &self.dm_schemes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Identification {
    pub header: ObjectHeader,
    pub this_generation_uid: Uuid,
    pub company_name: String,
    pub product_name: String,
    pub product_version: Option<VersionType>,
    pub version_string: String,
    pub product_uid: Uuid,
    pub modification_date: Timestamp,
    pub toolkit_version: Option<VersionType>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContentStorage {
    pub header: ObjectHeader,
    pub packages: Vec<Uuid>,
    pub essence_container_data: Vec<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct EssenceContainerData {
    pub header: ObjectHeader,
    pub linked_package_uid: Umid,
    pub index_sid: u32,
    pub body_sid: u32,
}

/// Fields shared by Material and Source packages.
#[derive(Debug, Clone, Default)]
pub struct PackageCommon {
    pub package_uid: Umid,
    pub name: Option<String>,
    pub package_creation_date: Timestamp,
    pub package_modified_date: Timestamp,
    pub tracks: Vec<Uuid>,
}

impl PackageCommon {
    fn read(set: &TlvReader<'_>) -> Result<Self> {
        Ok(Self {
            package_uid: set.read_umid(Mdd::PackageUid)?.unwrap_or(NIL_UMID),
            name: set.read_string(Mdd::PackageName)?,
            package_creation_date: set.read_timestamp(Mdd::PackageCreationDate)?.unwrap_or_default(),
            package_modified_date: set.read_timestamp(Mdd::PackageModifiedDate)?.unwrap_or_default(),
            tracks: set.read_batch(Mdd::PackageTracks)?.unwrap_or_default(),
        })
    }

    fn write(&self, set: &mut TlvWriter<'_>) -> Result<()> {
        set.write_archive(Mdd::PackageUid, &self.package_uid)?;
        set.write_opt_string(Mdd::PackageName, self.name.as_deref())?;
        set.write_archive(Mdd::PackageCreationDate, &self.package_creation_date)?;
        set.write_archive(Mdd::PackageModifiedDate, &self.package_modified_date)?;
        set.write_batch(Mdd::PackageTracks, &self.tracks)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaterialPackage {
    pub header: ObjectHeader,
    pub package: PackageCommon,
}

#[derive(Debug, Clone, Default)]
pub struct SourcePackage {
    pub header: ObjectHeader,
    pub package: PackageCommon,
    pub descriptor: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct Track {
    pub header: ObjectHeader,
    pub track_id: u32,
    pub track_number: u32,
    pub track_name: Option<String>,
    pub sequence: Uuid,
    pub edit_rate: Rational,
    pub origin: i64,
}

#[derive(Debug, Clone, Default)]
pub struct StaticTrack {
    pub header: ObjectHeader,
    pub track_id: u32,
    pub track_number: u32,
    pub track_name: Option<String>,
    pub sequence: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct Sequence {
    pub header: ObjectHeader,
    pub data_definition: Ul,
    pub duration: Option<i64>,
    pub structural_components: Vec<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct SourceClip {
    pub header: ObjectHeader,
    pub data_definition: Ul,
    pub duration: Option<i64>,
    pub start_position: i64,
    pub source_package_id: Umid,
    pub source_track_id: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TimecodeComponent {
    pub header: ObjectHeader,
    pub data_definition: Ul,
    pub duration: Option<i64>,
    pub rounded_timecode_base: u16,
    pub start_timecode: i64,
    pub drop_frame: u8,
}

#[derive(Debug, Clone, Default)]
pub struct DmSegment {
    pub header: ObjectHeader,
    pub data_definition: Ul,
    pub duration: Option<i64>,
    pub event_start_position: i64,
    pub event_comment: Option<String>,
    pub dm_framework: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct CryptographicFramework {
    pub header: ObjectHeader,
    pub context_sr: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct CryptographicContext {
    pub header: ObjectHeader,
    pub context_id: Uuid,
    pub source_essence_container: Ul,
    pub cipher_algorithm: Ul,
    pub mic_algorithm: Ul,
    pub cryptographic_key_id: Uuid,
}

/// FileDescriptor fields shared by every essence descriptor.
#[derive(Debug, Clone, Default)]
pub struct FileDescriptorCommon {
    pub linked_track_id: u32,
    pub sample_rate: Rational,
    pub container_duration: Option<i64>,
    pub essence_container: Ul,
    pub codec: Option<Ul>,
}

impl FileDescriptorCommon {
    fn read(set: &TlvReader<'_>) -> Result<Self> {
        Ok(Self {
            linked_track_id: set.read_u32(Mdd::LinkedTrackId)?.unwrap_or(0),
            sample_rate: set.read_rational(Mdd::SampleRate)?.unwrap_or_default(),
            container_duration: set.read_i64(Mdd::ContainerDuration)?,
            essence_container: set.read_ul(Mdd::EssenceContainer)?.unwrap_or_default(),
            codec: set.read_ul(Mdd::Codec)?,
        })
    }

    fn write(&self, set: &mut TlvWriter<'_>) -> Result<()> {
        set.write_u32(Mdd::LinkedTrackId, self.linked_track_id)?;
        set.write_archive(Mdd::SampleRate, &self.sample_rate)?;
        set.write_opt_i64(Mdd::ContainerDuration, self.container_duration)?;
        set.write_archive(Mdd::EssenceContainer, &self.essence_container)?;
        set.write_opt_archive(Mdd::Codec, self.codec.as_ref())
    }
}

/// GenericPictureEssenceDescriptor fields.
#[derive(Debug, Clone, Default)]
pub struct PictureCommon {
    pub frame_layout: u8,
    pub stored_width: u32,
    pub stored_height: u32,
    pub display_width: Option<u32>,
    pub display_height: Option<u32>,
    pub aspect_ratio: Rational,
    pub picture_essence_coding: Option<Ul>,
}

impl PictureCommon {
    fn read(set: &TlvReader<'_>) -> Result<Self> {
        Ok(Self {
            frame_layout: set.read_u8(Mdd::FrameLayout)?.unwrap_or(0),
            stored_width: set.read_u32(Mdd::StoredWidth)?.unwrap_or(0),
            stored_height: set.read_u32(Mdd::StoredHeight)?.unwrap_or(0),
            display_width: set.read_u32(Mdd::DisplayWidth)?,
            display_height: set.read_u32(Mdd::DisplayHeight)?,
            aspect_ratio: set.read_rational(Mdd::AspectRatio)?.unwrap_or_default(),
            picture_essence_coding: set.read_ul(Mdd::PictureEssenceCoding)?,
        })
    }

    fn write(&self, set: &mut TlvWriter<'_>) -> Result<()> {
        set.write_u8(Mdd::FrameLayout, self.frame_layout)?;
        set.write_u32(Mdd::StoredWidth, self.stored_width)?;
        set.write_u32(Mdd::StoredHeight, self.stored_height)?;
        set.write_opt_u32(Mdd::DisplayWidth, self.display_width)?;
        set.write_opt_u32(Mdd::DisplayHeight, self.display_height)?;
        set.write_archive(Mdd::AspectRatio, &self.aspect_ratio)?;
        set.write_opt_archive(Mdd::PictureEssenceCoding, self.picture_essence_coding.as_ref())
    }
}

/// Descriptor for MPEG-2 video essence (CDCI-derived).
#[derive(Debug, Clone, Default)]
pub struct Mpeg2VideoDescriptor {
    pub header: ObjectHeader,
    pub file: FileDescriptorCommon,
    pub picture: PictureCommon,
    pub component_depth: u32,
    pub horizontal_subsampling: u32,
    pub vertical_subsampling: Option<u32>,
    pub color_siting: Option<u8>,
    pub single_sequence: Option<u8>,
    pub constant_b_frames: Option<u8>,
    pub coded_content_type: Option<u8>,
    pub low_delay: Option<u8>,
    pub closed_gop: Option<u8>,
    pub identical_gop: Option<u8>,
    pub max_gop: Option<u16>,
    pub b_picture_count: Option<u16>,
    pub bit_rate: Option<u32>,
    pub profile_and_level: Option<u8>,
    pub sub_descriptors: Vec<Uuid>,
}

/// Descriptor for JPEG 2000 picture essence.
#[derive(Debug, Clone, Default)]
pub struct Jpeg2000PictureDescriptor {
    pub header: ObjectHeader,
    pub file: FileDescriptorCommon,
    pub picture: PictureCommon,
    pub sub_descriptors: Vec<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct Jpeg2000PictureSubDescriptor {
    pub header: ObjectHeader,
    pub rsiz: u16,
    pub xsiz: u32,
    pub ysiz: u32,
    pub x_osiz: u32,
    pub y_osiz: u32,
    pub x_tsiz: u32,
    pub y_tsiz: u32,
    pub x_t_osiz: u32,
    pub y_t_osiz: u32,
    pub csiz: u16,
    pub picture_component_sizing: Vec<u8>,
    pub coding_style_default: Option<Vec<u8>>,
    pub quantization_default: Option<Vec<u8>>,
}

/// Marker sub-descriptor for stereoscopic JPEG 2000 files.
#[derive(Debug, Clone, Default)]
pub struct StereoscopicPictureSubDescriptor {
    pub header: ObjectHeader,
}

/// Descriptor for 24-bit PCM audio essence.
#[derive(Debug, Clone, Default)]
pub struct WaveAudioDescriptor {
    pub header: ObjectHeader,
    pub file: FileDescriptorCommon,
    pub audio_sampling_rate: Rational,
    pub locked: u8,
    pub audio_ref_level: Option<i8>,
    pub channel_count: u32,
    pub quantization_bits: u32,
    pub dial_norm: Option<i8>,
    pub sound_compression: Option<Ul>,
    pub block_align: u16,
    pub sequence_offset: Option<u8>,
    pub avg_bps: u32,
    pub channel_assignment: Option<Ul>,
    pub sub_descriptors: Vec<Uuid>,
}

/// Descriptor for opaque data essence.
#[derive(Debug, Clone, Default)]
pub struct GenericDataEssenceDescriptor {
    pub header: ObjectHeader,
    pub file: FileDescriptorCommon,
    pub data_essence_coding: Ul,
    pub sub_descriptors: Vec<Uuid>,
}

/// Tagged representation of every header-metadata object the codec
/// understands, apart from the Preface.
#[derive(Debug, Clone)]
pub enum MetadataObject {
    Identification(Identification),
    ContentStorage(ContentStorage),
    EssenceContainerData(EssenceContainerData),
    MaterialPackage(MaterialPackage),
    SourcePackage(SourcePackage),
    Track(Track),
    StaticTrack(StaticTrack),
    Sequence(Sequence),
    SourceClip(SourceClip),
    TimecodeComponent(TimecodeComponent),
    DmSegment(DmSegment),
    CryptographicFramework(CryptographicFramework),
    CryptographicContext(CryptographicContext),
    Mpeg2VideoDescriptor(Mpeg2VideoDescriptor),
    Jpeg2000PictureDescriptor(Jpeg2000PictureDescriptor),
    Jpeg2000PictureSubDescriptor(Jpeg2000PictureSubDescriptor),
    StereoscopicPictureSubDescriptor(StereoscopicPictureSubDescriptor),
    WaveAudioDescriptor(WaveAudioDescriptor),
    GenericDataEssenceDescriptor(GenericDataEssenceDescriptor),
}

impl MetadataObject {
    pub fn class_id(&self) -> Mdd {
        match self {
            Self::Identification(_) => Mdd::Identification,
            Self::ContentStorage(_) => Mdd::ContentStorage,
            Self::EssenceContainerData(_) => Mdd::EssenceContainerData,
            Self::MaterialPackage(_) => Mdd::MaterialPackage,
            Self::SourcePackage(_) => Mdd::SourcePackage,
            Self::Track(_) => Mdd::Track,
            Self::StaticTrack(_) => Mdd::StaticTrack,
            Self::Sequence(_) => Mdd::Sequence,
            Self::SourceClip(_) => Mdd::SourceClip,
            Self::TimecodeComponent(_) => Mdd::TimecodeComponent,
            Self::DmSegment(_) => Mdd::DmSegment,
            Self::CryptographicFramework(_) => Mdd::CryptographicFramework,
            Self::CryptographicContext(_) => Mdd::CryptographicContext,
            Self::Mpeg2VideoDescriptor(_) => Mdd::Mpeg2VideoDescriptor,
            Self::Jpeg2000PictureDescriptor(_) => Mdd::GenericPictureEssenceDescriptor,
            Self::Jpeg2000PictureSubDescriptor(_) => Mdd::Jpeg2000PictureSubDescriptor,
            Self::StereoscopicPictureSubDescriptor(_) => Mdd::StereoscopicPictureSubDescriptor,
            Self::WaveAudioDescriptor(_) => Mdd::WaveAudioDescriptor,
            Self::GenericDataEssenceDescriptor(_) => Mdd::GenericDataEssenceDescriptor,
        }
    }

    pub fn header(&self) -> &ObjectHeader {
        match self {
            Self::Identification(o) => &o.header,
            Self::ContentStorage(o) => &o.header,
            Self::EssenceContainerData(o) => &o.header,
            Self::MaterialPackage(o) => &o.header,
            Self::SourcePackage(o) => &o.header,
            Self::Track(o) => &o.header,
            Self::StaticTrack(o) => &o.header,
            Self::Sequence(o) => &o.header,
            Self::SourceClip(o) => &o.header,
            Self::TimecodeComponent(o) => &o.header,
            Self::DmSegment(o) => &o.header,
            Self::CryptographicFramework(o) => &o.header,
            Self::CryptographicContext(o) => &o.header,
            Self::Mpeg2VideoDescriptor(o) => &o.header,
            Self::Jpeg2000PictureDescriptor(o) => &o.header,
            Self::Jpeg2000PictureSubDescriptor(o) => &o.header,
            Self::StereoscopicPictureSubDescriptor(o) => &o.header,
            Self::WaveAudioDescriptor(o) => &o.header,
            Self::GenericDataEssenceDescriptor(o) => &o.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut ObjectHeader {
        match self {
            Self::Identification(o) => &mut o.header,
            Self::ContentStorage(o) => &mut o.header,
            Self::EssenceContainerData(o) => &mut o.header,
            Self::MaterialPackage(o) => &mut o.header,
            Self::SourcePackage(o) => &mut o.header,
            Self::Track(o) => &mut o.header,
            Self::StaticTrack(o) => &mut o.header,
            Self::Sequence(o) => &mut o.header,
            Self::SourceClip(o) => &mut o.header,
            Self::TimecodeComponent(o) => &mut o.header,
            Self::DmSegment(o) => &mut o.header,
            Self::CryptographicFramework(o) => &mut o.header,
            Self::CryptographicContext(o) => &mut o.header,
            Self::Mpeg2VideoDescriptor(o) => &mut o.header,
            Self::Jpeg2000PictureDescriptor(o) => &mut o.header,
            Self::Jpeg2000PictureSubDescriptor(o) => &mut o.header,
            Self::StereoscopicPictureSubDescriptor(o) => &mut o.header,
            Self::WaveAudioDescriptor(o) => &mut o.header,
            Self::GenericDataEssenceDescriptor(o) => &mut o.header,
        }
    }

    /// The structural-component duration field, where the class has one.
    pub fn duration_mut(&mut self) -> Option<&mut Option<i64>> {
        match self {
            Self::Sequence(o) => Some(&mut o.duration),
            Self::SourceClip(o) => Some(&mut o.duration),
            Self::TimecodeComponent(o) => Some(&mut o.duration),
            Self::DmSegment(o) => Some(&mut o.duration),
            _ => None,
        }
    }

    /// The essence-descriptor container duration, where the class has one.
    pub fn container_duration_mut(&mut self) -> Option<&mut Option<i64>> {
        match self {
            Self::Mpeg2VideoDescriptor(o) => Some(&mut o.file.container_duration),
            Self::Jpeg2000PictureDescriptor(o) => Some(&mut o.file.container_duration),
            Self::WaveAudioDescriptor(o) => Some(&mut o.file.container_duration),
            Self::GenericDataEssenceDescriptor(o) => Some(&mut o.file.container_duration),
            _ => None,
        }
    }

    fn read_tlv(id: Mdd, set: &TlvReader<'_>) -> Result<Option<Self>> {
        let header = ObjectHeader::read(set)?;
        let object = match id {
            Mdd::Identification => Self::Identification(Identification {
                header,
                this_generation_uid: set.read_uuid(Mdd::IdentificationThisGenerationUid)?.unwrap_or_default(),
                company_name: set.read_string(Mdd::IdentificationCompanyName)?.unwrap_or_default(),
                product_name: set.read_string(Mdd::IdentificationProductName)?.unwrap_or_default(),
                product_version: set.read_version(Mdd::IdentificationProductVersion)?,
                version_string: set.read_string(Mdd::IdentificationVersionString)?.unwrap_or_default(),
                product_uid: set.read_uuid(Mdd::IdentificationProductUid)?.unwrap_or_default(),
                modification_date: set.read_timestamp(Mdd::IdentificationModificationDate)?.unwrap_or_default(),
                toolkit_version: set.read_version(Mdd::IdentificationToolkitVersion)?,
                platform: set.read_string(Mdd::IdentificationPlatform)?,
            }),
            Mdd::ContentStorage => Self::ContentStorage(ContentStorage {
                header,
                packages: set.read_batch(Mdd::ContentStoragePackages)?.unwrap_or_default(),
                essence_container_data: set
                    .read_batch(Mdd::ContentStorageEssenceContainerData)?
                    .unwrap_or_default(),
            }),
            Mdd::EssenceContainerData => Self::EssenceContainerData(EssenceContainerData {
                header,
                linked_package_uid: set.read_umid(Mdd::EssenceContainerDataLinkedPackageUid)?.unwrap_or(NIL_UMID),
                index_sid: set.read_u32(Mdd::IndexSid)?.unwrap_or(0),
                body_sid: set.read_u32(Mdd::BodySid)?.unwrap_or(0),
            }),
            Mdd::MaterialPackage => {
                Self::MaterialPackage(MaterialPackage { header, package: PackageCommon::read(set)? })
            }
            Mdd::SourcePackage => Self::SourcePackage(SourcePackage {
                header,
                package: PackageCommon::read(set)?,
                descriptor: set.read_uuid(Mdd::SourcePackageDescriptor)?.unwrap_or_default(),
            }),
            Mdd::Track => Self::Track(Track {
                header,
                track_id: set.read_u32(Mdd::TrackId)?.unwrap_or(0),
                track_number: set.read_u32(Mdd::TrackNumber)?.unwrap_or(0),
                track_name: set.read_string(Mdd::TrackName)?,
                sequence: set.read_uuid(Mdd::TrackSequence)?.unwrap_or_default(),
                edit_rate: set.read_rational(Mdd::TrackEditRate)?.unwrap_or_default(),
                origin: set.read_i64(Mdd::TrackOrigin)?.unwrap_or(0),
            }),
            Mdd::StaticTrack => Self::StaticTrack(StaticTrack {
                header,
                track_id: set.read_u32(Mdd::TrackId)?.unwrap_or(0),
                track_number: set.read_u32(Mdd::TrackNumber)?.unwrap_or(0),
                track_name: set.read_string(Mdd::TrackName)?,
                sequence: set.read_uuid(Mdd::TrackSequence)?.unwrap_or_default(),
            }),
            Mdd::Sequence => Self::Sequence(Sequence {
                header,
                data_definition: set.read_ul(Mdd::DataDefinition)?.unwrap_or_default(),
                duration: set.read_i64(Mdd::ComponentDuration)?,
                structural_components: set
                    .read_batch(Mdd::SequenceStructuralComponents)?
                    .unwrap_or_default(),
            }),
            Mdd::SourceClip => Self::SourceClip(SourceClip {
                header,
                data_definition: set.read_ul(Mdd::DataDefinition)?.unwrap_or_default(),
                duration: set.read_i64(Mdd::ComponentDuration)?,
                start_position: set.read_i64(Mdd::SourceClipStartPosition)?.unwrap_or(0),
                source_package_id: set.read_umid(Mdd::SourceClipSourcePackageId)?.unwrap_or(NIL_UMID),
                source_track_id: set.read_u32(Mdd::SourceClipSourceTrackId)?.unwrap_or(0),
            }),
            Mdd::TimecodeComponent => Self::TimecodeComponent(TimecodeComponent {
                header,
                data_definition: set.read_ul(Mdd::DataDefinition)?.unwrap_or_default(),
                duration: set.read_i64(Mdd::ComponentDuration)?,
                rounded_timecode_base: set.read_u16(Mdd::RoundedTimecodeBase)?.unwrap_or(0),
                start_timecode: set.read_i64(Mdd::StartTimecode)?.unwrap_or(0),
                drop_frame: set.read_u8(Mdd::DropFrame)?.unwrap_or(0),
            }),
            Mdd::DmSegment => Self::DmSegment(DmSegment {
                header,
                data_definition: set.read_ul(Mdd::DataDefinition)?.unwrap_or_default(),
                duration: set.read_i64(Mdd::ComponentDuration)?,
                event_start_position: set.read_i64(Mdd::DmSegmentEventStartPosition)?.unwrap_or(0),
                event_comment: set.read_string(Mdd::DmSegmentEventComment)?,
                dm_framework: set.read_uuid(Mdd::DmSegmentDmFramework)?.unwrap_or_default(),
            }),
            Mdd::CryptographicFramework => Self::CryptographicFramework(CryptographicFramework {
                header,
                context_sr: set.read_uuid(Mdd::CryptographicFrameworkContextSr)?.unwrap_or_default(),
            }),
            Mdd::CryptographicContext => Self::CryptographicContext(CryptographicContext {
                header,
                context_id: set.read_uuid(Mdd::CryptographicContextId)?.unwrap_or_default(),
                source_essence_container: set.read_ul(Mdd::SourceEssenceContainer)?.unwrap_or_default(),
                cipher_algorithm: set.read_ul(Mdd::CipherAlgorithm)?.unwrap_or_default(),
                mic_algorithm: set.read_ul(Mdd::MicAlgorithm)?.unwrap_or_default(),
                cryptographic_key_id: set.read_uuid(Mdd::CryptographicKeyId)?.unwrap_or_default(),
            }),
            Mdd::Mpeg2VideoDescriptor => Self::Mpeg2VideoDescriptor(Mpeg2VideoDescriptor {
                header,
                file: FileDescriptorCommon::read(set)?,
                picture: PictureCommon::read(set)?,
                component_depth: set.read_u32(Mdd::ComponentDepth)?.unwrap_or(0),
                horizontal_subsampling: set.read_u32(Mdd::HorizontalSubsampling)?.unwrap_or(0),
                vertical_subsampling: set.read_u32(Mdd::VerticalSubsampling)?,
                color_siting: set.read_u8(Mdd::ColorSiting)?,
                single_sequence: set.read_u8(Mdd::Mpeg2SingleSequence)?,
                constant_b_frames: set.read_u8(Mdd::Mpeg2ConstantBFrames)?,
                coded_content_type: set.read_u8(Mdd::Mpeg2CodedContentType)?,
                low_delay: set.read_u8(Mdd::Mpeg2LowDelay)?,
                closed_gop: set.read_u8(Mdd::Mpeg2ClosedGop)?,
                identical_gop: set.read_u8(Mdd::Mpeg2IdenticalGop)?,
                max_gop: set.read_u16(Mdd::Mpeg2MaxGop)?,
                b_picture_count: set.read_u16(Mdd::Mpeg2BPictureCount)?,
                bit_rate: set.read_u32(Mdd::Mpeg2BitRate)?,
                profile_and_level: set.read_u8(Mdd::Mpeg2ProfileAndLevel)?,
                sub_descriptors: read_sub_descriptors(set)?,
            }),
            Mdd::GenericPictureEssenceDescriptor => {
                Self::Jpeg2000PictureDescriptor(Jpeg2000PictureDescriptor {
                    header,
                    file: FileDescriptorCommon::read(set)?,
                    picture: PictureCommon::read(set)?,
                    sub_descriptors: read_sub_descriptors(set)?,
                })
            }
            Mdd::Jpeg2000PictureSubDescriptor => {
                Self::Jpeg2000PictureSubDescriptor(Jpeg2000PictureSubDescriptor {
                    header,
                    rsiz: set.read_u16(Mdd::J2kRsiz)?.unwrap_or(0),
                    xsiz: set.read_u32(Mdd::J2kXsiz)?.unwrap_or(0),
                    ysiz: set.read_u32(Mdd::J2kYsiz)?.unwrap_or(0),
                    x_osiz: set.read_u32(Mdd::J2kXOsiz)?.unwrap_or(0),
                    y_osiz: set.read_u32(Mdd::J2kYOsiz)?.unwrap_or(0),
                    x_tsiz: set.read_u32(Mdd::J2kXTsiz)?.unwrap_or(0),
                    y_tsiz: set.read_u32(Mdd::J2kYTsiz)?.unwrap_or(0),
                    x_t_osiz: set.read_u32(Mdd::J2kXTOsiz)?.unwrap_or(0),
                    y_t_osiz: set.read_u32(Mdd::J2kYTOsiz)?.unwrap_or(0),
                    csiz: set.read_u16(Mdd::J2kCsiz)?.unwrap_or(0),
                    picture_component_sizing: set.read_raw(Mdd::J2kPictureComponentSizing)?.unwrap_or_default(),
                    coding_style_default: set.read_raw(Mdd::J2kCodingStyleDefault)?,
                    quantization_default: set.read_raw(Mdd::J2kQuantizationDefault)?,
                })
            }
            Mdd::StereoscopicPictureSubDescriptor => {
                Self::StereoscopicPictureSubDescriptor(StereoscopicPictureSubDescriptor { header })
            }
            Mdd::WaveAudioDescriptor => Self::WaveAudioDescriptor(WaveAudioDescriptor {
                header,
                file: FileDescriptorCommon::read(set)?,
                audio_sampling_rate: set.read_rational(Mdd::AudioSamplingRate)?.unwrap_or_default(),
                locked: set.read_u8(Mdd::Locked)?.unwrap_or(0),
                audio_ref_level: set.read_i8(Mdd::AudioRefLevel)?,
                channel_count: set.read_u32(Mdd::ChannelCount)?.unwrap_or(0),
                quantization_bits: set.read_u32(Mdd::QuantizationBits)?.unwrap_or(0),
                dial_norm: set.read_i8(Mdd::DialNorm)?,
                sound_compression: set.read_ul(Mdd::SoundEssenceCompression)?,
                block_align: set.read_u16(Mdd::BlockAlign)?.unwrap_or(0),
                sequence_offset: set.read_u8(Mdd::SequenceOffset)?,
                avg_bps: set.read_u32(Mdd::AvgBps)?.unwrap_or(0),
                channel_assignment: set.read_ul(Mdd::ChannelAssignment)?,
                sub_descriptors: read_sub_descriptors(set)?,
            }),
            Mdd::GenericDataEssenceDescriptor => {
                Self::GenericDataEssenceDescriptor(GenericDataEssenceDescriptor {
                    header,
                    file: FileDescriptorCommon::read(set)?,
                    data_essence_coding: set.read_ul(Mdd::DataEssenceCoding)?.unwrap_or_default(),
                    sub_descriptors: read_sub_descriptors(set)?,
                })
            }
            _ => return Ok(None),
        };
        Ok(Some(object))
    }

    fn write_tlv(&self, set: &mut TlvWriter<'_>) -> Result<()> {
        self.header().write(set)?;
        match self {
            Self::Identification(o) => {
                set.write_archive(Mdd::IdentificationThisGenerationUid, &o.this_generation_uid)?;
                set.write_string(Mdd::IdentificationCompanyName, &o.company_name)?;
                set.write_string(Mdd::IdentificationProductName, &o.product_name)?;
                set.write_opt_archive(Mdd::IdentificationProductVersion, o.product_version.as_ref())?;
                set.write_string(Mdd::IdentificationVersionString, &o.version_string)?;
                set.write_archive(Mdd::IdentificationProductUid, &o.product_uid)?;
                set.write_archive(Mdd::IdentificationModificationDate, &o.modification_date)?;
                set.write_opt_archive(Mdd::IdentificationToolkitVersion, o.toolkit_version.as_ref())?;
                set.write_opt_string(Mdd::IdentificationPlatform, o.platform.as_deref())
            }
            Self::ContentStorage(o) => {
                set.write_batch(Mdd::ContentStoragePackages, &o.packages)?;
                set.write_batch(Mdd::ContentStorageEssenceContainerData, &o.essence_container_data)
            }
            Self::EssenceContainerData(o) => {
                set.write_archive(Mdd::EssenceContainerDataLinkedPackageUid, &o.linked_package_uid)?;
                set.write_u32(Mdd::IndexSid, o.index_sid)?;
                set.write_u32(Mdd::BodySid, o.body_sid)
            }
            Self::MaterialPackage(o) => o.package.write(set),
            Self::SourcePackage(o) => {
                o.package.write(set)?;
                set.write_archive(Mdd::SourcePackageDescriptor, &o.descriptor)
            }
            Self::Track(o) => {
                set.write_u32(Mdd::TrackId, o.track_id)?;
                set.write_u32(Mdd::TrackNumber, o.track_number)?;
                set.write_opt_string(Mdd::TrackName, o.track_name.as_deref())?;
                set.write_archive(Mdd::TrackSequence, &o.sequence)?;
                set.write_archive(Mdd::TrackEditRate, &o.edit_rate)?;
                set.write_i64(Mdd::TrackOrigin, o.origin)
            }
            Self::StaticTrack(o) => {
                set.write_u32(Mdd::TrackId, o.track_id)?;
                set.write_u32(Mdd::TrackNumber, o.track_number)?;
                set.write_opt_string(Mdd::TrackName, o.track_name.as_deref())?;
                set.write_archive(Mdd::TrackSequence, &o.sequence)
            }
            Self::Sequence(o) => {
                set.write_archive(Mdd::DataDefinition, &o.data_definition)?;
                set.write_opt_i64(Mdd::ComponentDuration, o.duration)?;
                set.write_batch(Mdd::SequenceStructuralComponents, &o.structural_components)
            }
            Self::SourceClip(o) => {
                set.write_archive(Mdd::DataDefinition, &o.data_definition)?;
                set.write_opt_i64(Mdd::ComponentDuration, o.duration)?;
                set.write_i64(Mdd::SourceClipStartPosition, o.start_position)?;
                set.write_archive(Mdd::SourceClipSourcePackageId, &o.source_package_id)?;
                set.write_u32(Mdd::SourceClipSourceTrackId, o.source_track_id)
            }
            Self::TimecodeComponent(o) => {
                set.write_archive(Mdd::DataDefinition, &o.data_definition)?;
                set.write_opt_i64(Mdd::ComponentDuration, o.duration)?;
                set.write_u16(Mdd::RoundedTimecodeBase, o.rounded_timecode_base)?;
                set.write_i64(Mdd::StartTimecode, o.start_timecode)?;
                set.write_u8(Mdd::DropFrame, o.drop_frame)
            }
            Self::DmSegment(o) => {
                set.write_archive(Mdd::DataDefinition, &o.data_definition)?;
                set.write_opt_i64(Mdd::ComponentDuration, o.duration)?;
                set.write_i64(Mdd::DmSegmentEventStartPosition, o.event_start_position)?;
                set.write_opt_string(Mdd::DmSegmentEventComment, o.event_comment.as_deref())?;
                set.write_archive(Mdd::DmSegmentDmFramework, &o.dm_framework)
            }
            Self::CryptographicFramework(o) => {
                set.write_archive(Mdd::CryptographicFrameworkContextSr, &o.context_sr)
            }
            Self::CryptographicContext(o) => {
                set.write_archive(Mdd::CryptographicContextId, &o.context_id)?;
                set.write_archive(Mdd::SourceEssenceContainer, &o.source_essence_container)?;
                set.write_archive(Mdd::CipherAlgorithm, &o.cipher_algorithm)?;
                set.write_archive(Mdd::MicAlgorithm, &o.mic_algorithm)?;
                set.write_archive(Mdd::CryptographicKeyId, &o.cryptographic_key_id)
            }
            Self::Mpeg2VideoDescriptor(o) => {
                o.file.write(set)?;
                o.picture.write(set)?;
                set.write_u32(Mdd::ComponentDepth, o.component_depth)?;
                set.write_u32(Mdd::HorizontalSubsampling, o.horizontal_subsampling)?;
                set.write_opt_u32(Mdd::VerticalSubsampling, o.vertical_subsampling)?;
                set.write_opt_u8(Mdd::ColorSiting, o.color_siting)?;
                set.write_opt_u8(Mdd::Mpeg2SingleSequence, o.single_sequence)?;
                set.write_opt_u8(Mdd::Mpeg2ConstantBFrames, o.constant_b_frames)?;
                set.write_opt_u8(Mdd::Mpeg2CodedContentType, o.coded_content_type)?;
                set.write_opt_u8(Mdd::Mpeg2LowDelay, o.low_delay)?;
                set.write_opt_u8(Mdd::Mpeg2ClosedGop, o.closed_gop)?;
                set.write_opt_u8(Mdd::Mpeg2IdenticalGop, o.identical_gop)?;
                set.write_opt_u16(Mdd::Mpeg2MaxGop, o.max_gop)?;
                set.write_opt_u16(Mdd::Mpeg2BPictureCount, o.b_picture_count)?;
                set.write_opt_u32(Mdd::Mpeg2BitRate, o.bit_rate)?;
                set.write_opt_u8(Mdd::Mpeg2ProfileAndLevel, o.profile_and_level)?;
                write_sub_descriptors(set, &o.sub_descriptors)
            }
            Self::Jpeg2000PictureDescriptor(o) => {
                o.file.write(set)?;
                o.picture.write(set)?;
                write_sub_descriptors(set, &o.sub_descriptors)
            }
            Self::Jpeg2000PictureSubDescriptor(o) => {
                set.write_u16(Mdd::J2kRsiz, o.rsiz)?;
                set.write_u32(Mdd::J2kXsiz, o.xsiz)?;
                set.write_u32(Mdd::J2kYsiz, o.ysiz)?;
                set.write_u32(Mdd::J2kXOsiz, o.x_osiz)?;
                set.write_u32(Mdd::J2kYOsiz, o.y_osiz)?;
                set.write_u32(Mdd::J2kXTsiz, o.x_tsiz)?;
                set.write_u32(Mdd::J2kYTsiz, o.y_tsiz)?;
                set.write_u32(Mdd::J2kXTOsiz, o.x_t_osiz)?;
                set.write_u32(Mdd::J2kYTOsiz, o.y_t_osiz)?;
                set.write_u16(Mdd::J2kCsiz, o.csiz)?;
                set.write_raw(Mdd::J2kPictureComponentSizing, &o.picture_component_sizing)?;
                set.write_opt_raw(Mdd::J2kCodingStyleDefault, o.coding_style_default.as_deref())?;
                set.write_opt_raw(Mdd::J2kQuantizationDefault, o.quantization_default.as_deref())
            }
            Self::StereoscopicPictureSubDescriptor(_) => Ok(()),
            Self::WaveAudioDescriptor(o) => {
                o.file.write(set)?;
                set.write_archive(Mdd::AudioSamplingRate, &o.audio_sampling_rate)?;
                set.write_u8(Mdd::Locked, o.locked)?;
                set.write_opt_i8(Mdd::AudioRefLevel, o.audio_ref_level)?;
                set.write_u32(Mdd::ChannelCount, o.channel_count)?;
                set.write_u32(Mdd::QuantizationBits, o.quantization_bits)?;
                set.write_opt_i8(Mdd::DialNorm, o.dial_norm)?;
                set.write_opt_archive(Mdd::SoundEssenceCompression, o.sound_compression.as_ref())?;
                set.write_u16(Mdd::BlockAlign, o.block_align)?;
                set.write_opt_u8(Mdd::SequenceOffset, o.sequence_offset)?;
                set.write_u32(Mdd::AvgBps, o.avg_bps)?;
                set.write_opt_archive(Mdd::ChannelAssignment, o.channel_assignment.as_ref())?;
                write_sub_descriptors(set, &o.sub_descriptors)
            }
            Self::GenericDataEssenceDescriptor(o) => {
                o.file.write(set)?;
                set.write_archive(Mdd::DataEssenceCoding, &o.data_essence_coding)?;
                write_sub_descriptors(set, &o.sub_descriptors)
            }
        }
    }
}

fn write_sub_descriptors(set: &mut TlvWriter<'_>, subs: &[Uuid]) -> Result<()> {
    if subs.is_empty() {
        return Ok(());
    }
    set.write_batch(Mdd::SubDescriptors, subs)
}

/// Interop files carry the SubDescriptors item under the Interop alias
/// label; try both dictionary slots.
fn read_sub_descriptors(set: &TlvReader<'_>) -> Result<Vec<Uuid>> {
    if let Some(subs) = set.read_batch(Mdd::SubDescriptors)? {
        return Ok(subs);
    }
    Ok(set.read_batch(Mdd::InteropSubDescriptors)?.unwrap_or_default())
}

/// The Primer, Preface and object arena of one header (or footer)
/// partition's metadata region.
#[derive(Debug)]
pub struct HeaderMetadata {
    pub dict: &'static Dictionary,
    pub primer: Primer,
    pub preface: Preface,
    objects: Vec<MetadataObject>,
    by_uid: HashMap<Uuid, usize>,
}

impl HeaderMetadata {
    pub fn new(dict: &'static Dictionary) -> Self {
        Self {
            dict,
            primer: Primer::new(),
            preface: Preface::default(),
            objects: Vec::new(),
            by_uid: HashMap::new(),
        }
    }

    pub fn objects(&self) -> &[MetadataObject] {
        &self.objects
    }

    /// Add an object to the arena, assigning it a fresh random InstanceUID.
    /// Returns the assigned UID.
    pub fn add(&mut self, mut object: MetadataObject, rng: &mut ValueRng) -> Uuid {
        let uid = rng.uuid();
        object.header_mut().instance_uid = uid;
        self.by_uid.insert(uid, self.objects.len());
        self.objects.push(object);
        uid
    }

    pub fn get(&self, uid: &Uuid) -> Option<&MetadataObject> {
        self.by_uid.get(uid).map(|&i| &self.objects[i])
    }

    pub fn get_mut(&mut self, uid: &Uuid) -> Option<&mut MetadataObject> {
        let i = *self.by_uid.get(uid)?;
        Some(&mut self.objects[i])
    }

    /// First object of the given class, in arena order.
    pub fn find_first(&self, class: Mdd) -> Option<&MetadataObject> {
        self.objects.iter().find(|o| o.class_id() == class)
    }

    pub fn find_first_mut(&mut self, class: Mdd) -> Option<&mut MetadataObject> {
        self.objects.iter_mut().find(|o| o.class_id() == class)
    }

    pub fn iter_class(&self, class: Mdd) -> impl Iterator<Item = &MetadataObject> {
        self.objects.iter().filter(move |o| o.class_id() == class)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MetadataObject> {
        self.objects.iter_mut()
    }

    /// Serialize the Primer followed by the Preface and the arena.
    ///
    /// Objects are serialized first (registering their tags) so the
    /// Primer that precedes them in the file is complete; this is what
    /// keeps the Primer invariant.
    pub fn write_to(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let mut sets = Vec::new();

        let mut tlv = TlvWriter::new(&mut self.primer, self.dict);
        self.preface.write_tlv(&mut tlv)?;
        let body = tlv.into_bytes();
        klv::write_kl(&mut sets, &self.dict.ul(Mdd::Preface), body.len() as u64, klv::MXF_BER_LENGTH)?;
        sets.extend_from_slice(&body);

        for object in &self.objects {
            let mut tlv = TlvWriter::new(&mut self.primer, self.dict);
            object.write_tlv(&mut tlv)?;
            let body = tlv.into_bytes();
            klv::write_kl(
                &mut sets,
                &self.dict.ul(object.class_id()),
                body.len() as u64,
                klv::MXF_BER_LENGTH,
            )?;
            sets.extend_from_slice(&body);
        }

        self.primer.write_to(out, self.dict)?;
        out.extend_from_slice(&sets);
        Ok(())
    }

    /// Parse a header-metadata region: Primer first, then object sets.
    /// KLV Fill packets and unknown classes are skipped.
    pub fn read_from(buf: &[u8], dict: &'static Dictionary) -> Result<Self> {
        let mut meta = Self::new(dict);
        let mut preface_seen = false;
        let mut pos = 0usize;

        while pos < buf.len() {
            let packet = KlvPacket::read_from(&buf[pos..])?;
            let value = packet.value_slice(&buf[pos..])?;
            pos += packet.packet_length() as usize;

            if packet.key == dict.ul(Mdd::KlvFill) {
                continue;
            }
            if packet.key == dict.ul(Mdd::Primer) {
                meta.primer = Primer::read_from(value)?;
                continue;
            }

            let Some(entry) = dict.find_ul(&packet.key) else {
                debug!(key = %packet.key, "skipping unknown header packet");
                continue;
            };

            let set = TlvReader::new(value, &meta.primer, dict)?;
            set.log_unknown_items();

            if entry.id == Mdd::Preface {
                meta.preface = Preface::read_tlv(&set)?;
                preface_seen = true;
                continue;
            }

            match MetadataObject::read_tlv(entry.id, &set)? {
                Some(object) => {
                    let uid = object.header().instance_uid;
                    meta.by_uid.insert(uid, meta.objects.len());
                    meta.objects.push(object);
                }
                None => {
                    debug!(key = %packet.key, "skipping unhandled object class");
                }
            }
        }

        if !preface_seen {
            return Err(Error::Format("header metadata contains no Preface".into()));
        }
        Ok(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EDIT_RATE_24;

    fn sample_metadata() -> HeaderMetadata {
        let dict = asdcp_dict::smpte();
        let mut rng = ValueRng::seeded(11);
        let mut meta = HeaderMetadata::new(dict);

        let ident_uid = meta.add(
            MetadataObject::Identification(Identification {
                company_name: "Widgets Inc".into(),
                product_name: "asdcp-rs".into(),
                version_string: "0.1.0".into(),
                toolkit_version: Some(VersionType::from_dotted("0.1.0", 7)),
                ..Identification::default()
            }),
            &mut rng,
        );

        let seq_uid = meta.add(
            MetadataObject::Sequence(Sequence {
                data_definition: dict.ul(Mdd::PictureDataDef),
                duration: Some(0),
                ..Sequence::default()
            }),
            &mut rng,
        );

        let track_uid = meta.add(
            MetadataObject::Track(Track {
                track_id: 2,
                track_number: 0x1501_0500,
                track_name: Some("Picture Track".into()),
                sequence: seq_uid,
                edit_rate: EDIT_RATE_24,
                origin: 0,
                ..Track::default()
            }),
            &mut rng,
        );

        let package_uid = meta.add(
            MetadataObject::SourcePackage(SourcePackage {
                package: PackageCommon {
                    package_uid: Umid::make(0x0f, rng.uuid()),
                    name: Some("File Package".into()),
                    tracks: vec![track_uid],
                    ..PackageCommon::default()
                },
                ..SourcePackage::default()
            }),
            &mut rng,
        );

        meta.preface.identifications = vec![ident_uid];
        meta.preface.operational_pattern = dict.ul(Mdd::Op1a);
        meta.preface.primary_package = Some(package_uid);
        meta
    }

    #[test]
    fn graph_round_trip() {
        let mut meta = sample_metadata();
        let mut buf = Vec::new();
        meta.write_to(&mut buf).unwrap();

        let reread = HeaderMetadata::read_from(&buf, asdcp_dict::composite()).unwrap();
        assert_eq!(reread.objects().len(), meta.objects().len());
        assert_eq!(reread.preface.identifications, meta.preface.identifications);

        let MetadataObject::Identification(ident) =
            reread.find_first(Mdd::Identification).unwrap()
        else {
            panic!("expected Identification");
        };
        assert_eq!(ident.product_name, "asdcp-rs");
        assert_eq!(ident.toolkit_version.unwrap().build, 7);

        // cross-links survive and resolve through the uid map
        let MetadataObject::SourcePackage(sp) = reread.find_first(Mdd::SourcePackage).unwrap()
        else {
            panic!("expected SourcePackage");
        };
        let MetadataObject::Track(track) = reread.get(&sp.package.tracks[0]).unwrap() else {
            panic!("expected Track");
        };
        assert!(reread.get(&track.sequence).is_some());
    }

    #[test]
    fn primer_precedes_sets_and_covers_all_tags() {
        let mut meta = sample_metadata();
        let mut buf = Vec::new();
        meta.write_to(&mut buf).unwrap();

        // first packet must be the Primer
        let first = KlvPacket::read_from(&buf).unwrap();
        assert_eq!(first.key, meta.dict.ul(Mdd::Primer));

        // every tag used by any following set appears in the Primer
        let primer = Primer::read_from(&buf[first.value_range()]).unwrap();
        let mut pos = first.packet_length() as usize;
        while pos < buf.len() {
            let packet = KlvPacket::read_from(&buf[pos..]).unwrap();
            let value = &buf[pos + packet.kl_length..pos + packet.value_range().end];
            let mut i = 0usize;
            while i < value.len() {
                let tag = [value[i], value[i + 1]];
                let len = u16::from_be_bytes([value[i + 2], value[i + 3]]) as usize;
                assert!(
                    primer.ul_for_tag(tag).is_some(),
                    "tag {:02x}.{:02x} missing from primer",
                    tag[0],
                    tag[1]
                );
                i += 4 + len;
            }
            pos += packet.packet_length() as usize;
        }
    }

    #[test]
    fn fill_packets_are_skipped() {
        let mut meta = sample_metadata();
        let mut buf = Vec::new();
        meta.write_to(&mut buf).unwrap();
        asdcp_core::klv::write_fill(&mut buf, &meta.dict.ul(Mdd::KlvFill), 256).unwrap();

        let reread = HeaderMetadata::read_from(&buf, asdcp_dict::composite()).unwrap();
        assert_eq!(reread.objects().len(), meta.objects().len());
    }

    #[test]
    fn missing_preface_is_an_error() {
        let buf = Vec::new();
        assert!(HeaderMetadata::read_from(&buf, asdcp_dict::composite()).is_err());
    }
}
