//! The metadata dictionary entry table.
//!
//! Label values mirror the SMPTE RP 210 / ST 377 / ST 429 registries.
//! Entries whose tag is `[0, 0]` have no static local tag and are assigned
//! dynamically through the Primer.

use asdcp_core::Ul;

use crate::mdd::{Mdd, MDD_COUNT};

/// One dictionary entry.
#[derive(Debug, Clone, Copy)]
pub struct MddEntry {
    pub id: Mdd,
    pub ul: Ul,
    pub tag: [u8; 2],
    pub optional: bool,
    pub name: &'static str,
}

impl MddEntry {
    pub fn has_static_tag(&self) -> bool {
        self.tag != [0, 0]
    }
}

const fn e(id: Mdd, ul: [u8; 16], tag: [u8; 2], optional: bool, name: &'static str) -> MddEntry {
    MddEntry { id, ul: Ul::new(ul), tag, optional, name }
}

#[rustfmt::skip]
pub(crate) const TABLE: [MddEntry; MDD_COUNT] = [
    // packet and set keys
    e(Mdd::ClosedCompleteHeader,
      [0x06,0x0e,0x2b,0x34,0x02,0x05,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x02,0x04,0x00],
      [0,0], false, "ClosedCompleteHeader"),
    e(Mdd::ClosedCompleteBodyPartition,
      [0x06,0x0e,0x2b,0x34,0x02,0x05,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x03,0x04,0x00],
      [0,0], false, "ClosedCompleteBodyPartition"),
    e(Mdd::CompleteFooter,
      [0x06,0x0e,0x2b,0x34,0x02,0x05,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x04,0x04,0x00],
      [0,0], false, "CompleteFooter"),
    e(Mdd::GenericStreamPartition,
      [0x06,0x0e,0x2b,0x34,0x02,0x05,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x03,0x11,0x00],
      [0,0], false, "GenericStreamPartition"),
    e(Mdd::Primer,
      [0x06,0x0e,0x2b,0x34,0x02,0x05,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x05,0x01,0x00],
      [0,0], false, "Primer"),
    e(Mdd::RandomIndexMetadata,
      [0x06,0x0e,0x2b,0x34,0x02,0x05,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x11,0x01,0x00],
      [0,0], false, "RandomIndexMetadata"),
    e(Mdd::KlvFill,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x03,0x01,0x02,0x10,0x01,0x00,0x00,0x00],
      [0,0], false, "KLVFill"),
    e(Mdd::IndexTableSegment,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x10,0x01,0x00],
      [0,0], false, "IndexTableSegment"),
    e(Mdd::Preface,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x2f,0x00],
      [0,0], false, "Preface"),
    e(Mdd::Identification,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x30,0x00],
      [0,0], false, "Identification"),
    e(Mdd::ContentStorage,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x18,0x00],
      [0,0], false, "ContentStorage"),
    e(Mdd::EssenceContainerData,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x23,0x00],
      [0,0], false, "EssenceContainerData"),
    e(Mdd::MaterialPackage,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x36,0x00],
      [0,0], false, "MaterialPackage"),
    e(Mdd::SourcePackage,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x37,0x00],
      [0,0], false, "SourcePackage"),
    e(Mdd::Track,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x3b,0x00],
      [0,0], false, "Track"),
    e(Mdd::StaticTrack,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x3a,0x00],
      [0,0], false, "StaticTrack"),
    e(Mdd::Sequence,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x0f,0x00],
      [0,0], false, "Sequence"),
    e(Mdd::SourceClip,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x11,0x00],
      [0,0], false, "SourceClip"),
    e(Mdd::TimecodeComponent,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x14,0x00],
      [0,0], false, "TimecodeComponent"),
    e(Mdd::DmSegment,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x41,0x00],
      [0,0], false, "DMSegment"),
    e(Mdd::CryptographicFramework,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x04,0x01,0x02,0x01,0x00,0x00],
      [0,0], false, "CryptographicFramework"),
    e(Mdd::CryptographicContext,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x04,0x01,0x02,0x02,0x00,0x00],
      [0,0], false, "CryptographicContext"),
    e(Mdd::FileDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x25,0x00],
      [0,0], false, "FileDescriptor"),
    e(Mdd::GenericPictureEssenceDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x27,0x00],
      [0,0], false, "GenericPictureEssenceDescriptor"),
    e(Mdd::CdciEssenceDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x28,0x00],
      [0,0], false, "CDCIEssenceDescriptor"),
    e(Mdd::Mpeg2VideoDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x51,0x00],
      [0,0], false, "MPEG2VideoDescriptor"),
    e(Mdd::GenericSoundEssenceDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x42,0x00],
      [0,0], false, "GenericSoundEssenceDescriptor"),
    e(Mdd::WaveAudioDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x48,0x00],
      [0,0], false, "WaveAudioDescriptor"),
    e(Mdd::GenericDataEssenceDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x43,0x00],
      [0,0], false, "GenericDataEssenceDescriptor"),
    e(Mdd::Jpeg2000PictureSubDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x5a,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor"),
    e(Mdd::StereoscopicPictureSubDescriptor,
      [0x06,0x0e,0x2b,0x34,0x02,0x53,0x01,0x01,0x0d,0x01,0x01,0x01,0x01,0x01,0x63,0x00],
      [0,0], false, "StereoscopicPictureSubDescriptor"),

    // operational patterns and container labels
    e(Mdd::OpAtom,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x02,0x0d,0x01,0x02,0x01,0x10,0x00,0x00,0x00],
      [0,0], false, "OPAtom"),
    e(Mdd::InteropOpAtom,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x01,0x0d,0x01,0x02,0x01,0x10,0x00,0x00,0x00],
      [0,0], false, "MXFInterop-OPAtom"),
    e(Mdd::Op1a,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x01,0x0d,0x01,0x02,0x01,0x01,0x01,0x09,0x00],
      [0,0], false, "OP1a"),
    e(Mdd::GcMulti,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x03,0x0d,0x01,0x03,0x01,0x02,0x7f,0x01,0x00],
      [0,0], false, "MXFGCGenericEssenceMultipleMappings"),
    e(Mdd::PictureDataDef,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x01,0x01,0x03,0x02,0x02,0x01,0x00,0x00,0x00],
      [0,0], false, "PictureDataDef"),
    e(Mdd::SoundDataDef,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x01,0x01,0x03,0x02,0x02,0x02,0x00,0x00,0x00],
      [0,0], false, "SoundDataDef"),
    e(Mdd::TimecodeDataDef,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x01,0x01,0x03,0x02,0x01,0x01,0x00,0x00,0x00],
      [0,0], false, "TimecodeDataDef"),
    e(Mdd::DescriptiveMetaDataDef,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x01,0x01,0x03,0x02,0x02,0x10,0x00,0x00,0x00],
      [0,0], false, "DescriptiveMetaDataDef"),
    e(Mdd::WavWrapping,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x01,0x0d,0x01,0x03,0x01,0x02,0x06,0x01,0x00],
      [0,0], false, "WAVWrapping"),
    e(Mdd::Mpeg2VesWrapping,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x02,0x0d,0x01,0x03,0x01,0x02,0x04,0x60,0x01],
      [0,0], false, "MPEG2-VESWrapping"),
    e(Mdd::Jpeg2000Wrapping,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x07,0x0d,0x01,0x03,0x01,0x02,0x0c,0x01,0x00],
      [0,0], false, "JPEG-2000Wrapping"),
    e(Mdd::EncryptedContainerLabel,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x07,0x0d,0x01,0x03,0x01,0x02,0x0b,0x01,0x00],
      [0,0], false, "EncryptedContainerLabel"),
    e(Mdd::CryptographicFrameworkLabel,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x07,0x0d,0x01,0x04,0x01,0x02,0x01,0x01,0x00],
      [0,0], false, "CryptographicFrameworkLabel"),
    e(Mdd::CipherAlgorithmAes,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x07,0x02,0x09,0x02,0x01,0x01,0x00,0x00,0x00],
      [0,0], false, "CipherAlgorithm-AES"),
    e(Mdd::MicAlgorithmHmacSha1,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x07,0x02,0x09,0x02,0x02,0x01,0x00,0x00,0x00],
      [0,0], false, "MICAlgorithm-HMAC-SHA1"),
    e(Mdd::MicAlgorithmNone,
      [0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00],
      [0,0], false, "MICAlgorithm-NONE"),
    e(Mdd::Jp2kEssenceCompression2k,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x09,0x04,0x01,0x02,0x02,0x03,0x01,0x01,0x03],
      [0,0], false, "JP2KEssenceCompression-2K"),
    e(Mdd::Jp2kEssenceCompression4k,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x09,0x04,0x01,0x02,0x02,0x03,0x01,0x01,0x04],
      [0,0], false, "JP2KEssenceCompression-4K"),
    e(Mdd::Mpeg2EssenceCompression,
      [0x06,0x0e,0x2b,0x34,0x04,0x01,0x01,0x03,0x04,0x01,0x02,0x02,0x01,0x04,0x03,0x00],
      [0,0], false, "MPEG2EssenceCompression"),

    // essence element keys
    e(Mdd::Mpeg2Essence,
      [0x06,0x0e,0x2b,0x34,0x01,0x02,0x01,0x01,0x0d,0x01,0x03,0x01,0x15,0x01,0x05,0x00],
      [0,0], false, "MPEG2Essence"),
    e(Mdd::Jpeg2000Essence,
      [0x06,0x0e,0x2b,0x34,0x01,0x02,0x01,0x01,0x0d,0x01,0x03,0x01,0x15,0x01,0x08,0x00],
      [0,0], false, "JPEG2000Essence"),
    e(Mdd::WavEssence,
      [0x06,0x0e,0x2b,0x34,0x01,0x02,0x01,0x01,0x0d,0x01,0x03,0x01,0x16,0x01,0x01,0x00],
      [0,0], false, "WAVEssence"),
    e(Mdd::CryptEssence,
      [0x06,0x0e,0x2b,0x34,0x02,0x04,0x01,0x07,0x0d,0x01,0x03,0x01,0x02,0x7e,0x01,0x00],
      [0,0], false, "CryptEssence"),
    e(Mdd::InteropCryptEssence,
      [0x06,0x0e,0x2b,0x34,0x02,0x04,0x01,0x01,0x0d,0x01,0x03,0x01,0x02,0x7e,0x01,0x00],
      [0,0], false, "MXFInterop-CryptEssence"),
    e(Mdd::GenericStreamDataElement,
      [0x06,0x0e,0x2b,0x34,0x01,0x02,0x01,0x01,0x0d,0x01,0x05,0x09,0x01,0x00,0x00,0x00],
      [0,0], false, "GenericStream-DataElement"),

    // common object items
    e(Mdd::InstanceUid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x01,0x01,0x15,0x02,0x00,0x00,0x00,0x00],
      [0x3c,0x0a], false, "InstanceUID"),
    e(Mdd::GenerationUid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x08,0x00,0x00,0x00],
      [0x01,0x02], true, "GenerationUID"),

    // Preface items
    e(Mdd::PrefaceLastModifiedDate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x10,0x02,0x04,0x00,0x00],
      [0x3b,0x02], false, "Preface-LastModifiedDate"),
    e(Mdd::PrefaceVersion,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x03,0x01,0x02,0x01,0x05,0x00,0x00,0x00],
      [0x3b,0x05], false, "Preface-Version"),
    e(Mdd::PrefaceObjectModelVersion,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x03,0x01,0x02,0x01,0x04,0x00,0x00,0x00],
      [0x3b,0x07], true, "Preface-ObjectModelVersion"),
    e(Mdd::PrefacePrimaryPackage,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x06,0x01,0x01,0x04,0x01,0x08,0x00,0x00],
      [0x3b,0x08], true, "Preface-PrimaryPackage"),
    e(Mdd::PrefaceIdentifications,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x06,0x04,0x00,0x00],
      [0x3b,0x06], false, "Preface-Identifications"),
    e(Mdd::PrefaceContentStorage,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x02,0x01,0x00,0x00],
      [0x3b,0x03], false, "Preface-ContentStorage"),
    e(Mdd::PrefaceOperationalPattern,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x01,0x02,0x02,0x03,0x00,0x00,0x00,0x00],
      [0x3b,0x09], false, "Preface-OperationalPattern"),
    e(Mdd::PrefaceEssenceContainers,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x01,0x02,0x02,0x10,0x02,0x01,0x00,0x00],
      [0x3b,0x0a], false, "Preface-EssenceContainers"),
    e(Mdd::PrefaceDmSchemes,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x01,0x02,0x02,0x10,0x02,0x02,0x00,0x00],
      [0x3b,0x0b], false, "Preface-DMSchemes"),

    // Identification items
    e(Mdd::IdentificationThisGenerationUid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x01,0x00,0x00,0x00],
      [0x3c,0x09], false, "Identification-ThisGenerationUID"),
    e(Mdd::IdentificationCompanyName,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x02,0x01,0x00,0x00],
      [0x3c,0x01], false, "Identification-CompanyName"),
    e(Mdd::IdentificationProductName,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x03,0x01,0x00,0x00],
      [0x3c,0x02], false, "Identification-ProductName"),
    e(Mdd::IdentificationProductVersion,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x04,0x00,0x00,0x00],
      [0x3c,0x03], true, "Identification-ProductVersion"),
    e(Mdd::IdentificationVersionString,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x05,0x01,0x00,0x00],
      [0x3c,0x04], false, "Identification-VersionString"),
    e(Mdd::IdentificationProductUid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x07,0x00,0x00,0x00],
      [0x3c,0x05], false, "Identification-ProductUID"),
    e(Mdd::IdentificationModificationDate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x10,0x02,0x03,0x00,0x00],
      [0x3c,0x06], false, "Identification-ModificationDate"),
    e(Mdd::IdentificationToolkitVersion,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x0a,0x00,0x00,0x00],
      [0x3c,0x07], true, "Identification-ToolkitVersion"),
    e(Mdd::IdentificationPlatform,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x20,0x07,0x01,0x06,0x01,0x00,0x00],
      [0x3c,0x08], true, "Identification-Platform"),

    // ContentStorage / EssenceContainerData items
    e(Mdd::ContentStoragePackages,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x05,0x01,0x00,0x00],
      [0x19,0x01], false, "ContentStorage-Packages"),
    e(Mdd::ContentStorageEssenceContainerData,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x05,0x02,0x00,0x00],
      [0x19,0x02], false, "ContentStorage-EssenceContainerData"),
    e(Mdd::EssenceContainerDataLinkedPackageUid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x06,0x01,0x00,0x00,0x00],
      [0x27,0x01], false, "EssenceContainerData-LinkedPackageUID"),
    e(Mdd::IndexSid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x01,0x03,0x04,0x05,0x00,0x00,0x00,0x00],
      [0x3f,0x06], false, "IndexSID"),
    e(Mdd::BodySid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x01,0x03,0x04,0x04,0x00,0x00,0x00,0x00],
      [0x3f,0x07], false, "BodySID"),

    // package and track items
    e(Mdd::PackageUid,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x01,0x01,0x15,0x10,0x00,0x00,0x00,0x00],
      [0x44,0x01], false, "GenericPackage-PackageUID"),
    e(Mdd::PackageName,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x01,0x03,0x03,0x02,0x01,0x00,0x00,0x00],
      [0x44,0x02], true, "GenericPackage-Name"),
    e(Mdd::PackageCreationDate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x10,0x01,0x03,0x00,0x00],
      [0x44,0x05], false, "GenericPackage-PackageCreationDate"),
    e(Mdd::PackageModifiedDate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x10,0x02,0x01,0x00,0x00],
      [0x44,0x04], false, "GenericPackage-PackageModifiedDate"),
    e(Mdd::PackageTracks,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x06,0x05,0x00,0x00],
      [0x44,0x03], false, "GenericPackage-Tracks"),
    e(Mdd::TrackId,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x01,0x07,0x01,0x01,0x00,0x00,0x00,0x00],
      [0x48,0x01], false, "GenericTrack-TrackID"),
    e(Mdd::TrackNumber,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x01,0x04,0x01,0x03,0x00,0x00,0x00,0x00],
      [0x48,0x04], false, "GenericTrack-TrackNumber"),
    e(Mdd::TrackName,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x01,0x07,0x01,0x02,0x01,0x00,0x00,0x00],
      [0x48,0x02], true, "GenericTrack-TrackName"),
    e(Mdd::TrackSequence,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x02,0x04,0x00,0x00],
      [0x48,0x03], false, "GenericTrack-Sequence"),
    e(Mdd::TrackEditRate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x30,0x04,0x05,0x00,0x00,0x00,0x00],
      [0x4b,0x01], false, "Track-EditRate"),
    e(Mdd::TrackOrigin,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x03,0x01,0x03,0x00,0x00],
      [0x4b,0x02], false, "Track-Origin"),

    // structural component items
    e(Mdd::DataDefinition,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x07,0x01,0x00,0x00,0x00,0x00,0x00],
      [0x02,0x01], false, "StructuralComponent-DataDefinition"),
    e(Mdd::ComponentDuration,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x02,0x01,0x01,0x03,0x00,0x00],
      [0x02,0x02], true, "StructuralComponent-Duration"),
    e(Mdd::SequenceStructuralComponents,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x06,0x09,0x00,0x00],
      [0x10,0x01], false, "Sequence-StructuralComponents"),
    e(Mdd::RoundedTimecodeBase,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x04,0x01,0x01,0x02,0x06,0x00,0x00],
      [0x15,0x02], false, "TimecodeComponent-RoundedTimecodeBase"),
    e(Mdd::StartTimecode,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x03,0x01,0x05,0x00,0x00],
      [0x15,0x01], false, "TimecodeComponent-StartTimecode"),
    e(Mdd::DropFrame,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x04,0x01,0x01,0x05,0x00,0x00,0x00],
      [0x15,0x03], false, "TimecodeComponent-DropFrame"),
    e(Mdd::SourceClipStartPosition,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x03,0x01,0x04,0x00,0x00],
      [0x12,0x01], false, "SourceClip-StartPosition"),
    e(Mdd::SourceClipSourcePackageId,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x03,0x01,0x00,0x00,0x00],
      [0x11,0x01], false, "SourceClip-SourcePackageID"),
    e(Mdd::SourceClipSourceTrackId,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x03,0x02,0x00,0x00,0x00],
      [0x11,0x02], false, "SourceClip-SourceTrackID"),
    e(Mdd::DmSegmentEventStartPosition,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x07,0x02,0x01,0x03,0x03,0x03,0x00,0x00],
      [0x06,0x01], false, "DMSegment-EventStartPosition"),
    e(Mdd::DmSegmentEventComment,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x05,0x30,0x04,0x04,0x01,0x00,0x00,0x00],
      [0x06,0x02], true, "DMSegment-EventComment"),
    e(Mdd::DmSegmentTrackIds,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x01,0x07,0x01,0x05,0x00,0x00,0x00,0x00],
      [0x61,0x02], true, "DMSegment-TrackIDs"),
    e(Mdd::DmSegmentDmFramework,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x06,0x01,0x01,0x04,0x02,0x0c,0x00,0x00],
      [0x61,0x01], false, "DMSegment-DMFramework"),
    e(Mdd::SourcePackageDescriptor,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x02,0x03,0x00,0x00],
      [0x47,0x01], false, "SourcePackage-Descriptor"),

    // descriptor items
    e(Mdd::SubDescriptors,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x09,0x06,0x01,0x01,0x04,0x06,0x10,0x00,0x00],
      [0,0], true, "GenericDescriptor-SubDescriptors"),
    e(Mdd::InteropSubDescriptors,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x06,0x10,0x00,0x00],
      [0,0], true, "MXFInterop-GenericDescriptor-SubDescriptors"),
    e(Mdd::LinkedTrackId,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x06,0x01,0x01,0x03,0x05,0x00,0x00,0x00],
      [0x30,0x06], false, "FileDescriptor-LinkedTrackID"),
    e(Mdd::SampleRate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x06,0x01,0x01,0x00,0x00,0x00,0x00],
      [0x30,0x01], false, "FileDescriptor-SampleRate"),
    e(Mdd::ContainerDuration,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x06,0x01,0x02,0x00,0x00,0x00,0x00],
      [0x30,0x02], true, "FileDescriptor-ContainerDuration"),
    e(Mdd::EssenceContainer,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x01,0x02,0x00,0x00],
      [0x30,0x04], false, "FileDescriptor-EssenceContainer"),
    e(Mdd::Codec,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x06,0x01,0x01,0x04,0x01,0x03,0x00,0x00],
      [0x30,0x05], true, "FileDescriptor-Codec"),
    e(Mdd::FrameLayout,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x03,0x01,0x04,0x00,0x00,0x00],
      [0x32,0x0c], false, "GenericPictureEssenceDescriptor-FrameLayout"),
    e(Mdd::StoredWidth,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x05,0x02,0x02,0x00,0x00,0x00],
      [0x32,0x03], false, "GenericPictureEssenceDescriptor-StoredWidth"),
    e(Mdd::StoredHeight,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x05,0x02,0x01,0x00,0x00,0x00],
      [0x32,0x02], false, "GenericPictureEssenceDescriptor-StoredHeight"),
    e(Mdd::DisplayWidth,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x05,0x01,0x0c,0x00,0x00,0x00],
      [0x32,0x09], true, "GenericPictureEssenceDescriptor-DisplayWidth"),
    e(Mdd::DisplayHeight,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x05,0x01,0x0b,0x00,0x00,0x00],
      [0x32,0x08], true, "GenericPictureEssenceDescriptor-DisplayHeight"),
    e(Mdd::AspectRatio,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x01,0x01,0x01,0x00,0x00,0x00],
      [0x32,0x0e], false, "GenericPictureEssenceDescriptor-AspectRatio"),
    e(Mdd::VideoLineMap,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x01,0x03,0x02,0x05,0x00,0x00,0x00],
      [0x32,0x0d], true, "GenericPictureEssenceDescriptor-VideoLineMap"),
    e(Mdd::PictureEssenceCoding,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x01,0x06,0x01,0x00,0x00,0x00,0x00],
      [0x32,0x01], true, "GenericPictureEssenceDescriptor-PictureEssenceCoding"),
    e(Mdd::ComponentDepth,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x01,0x05,0x03,0x0a,0x00,0x00,0x00],
      [0x33,0x01], false, "CDCIEssenceDescriptor-ComponentDepth"),
    e(Mdd::HorizontalSubsampling,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x05,0x01,0x05,0x00,0x00,0x00],
      [0x33,0x02], false, "CDCIEssenceDescriptor-HorizontalSubsampling"),
    e(Mdd::VerticalSubsampling,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x01,0x05,0x01,0x10,0x00,0x00,0x00],
      [0x33,0x08], true, "CDCIEssenceDescriptor-VerticalSubsampling"),
    e(Mdd::ColorSiting,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x01,0x05,0x01,0x06,0x00,0x00,0x00],
      [0x33,0x03], true, "CDCIEssenceDescriptor-ColorSiting"),
    e(Mdd::Mpeg2SingleSequence,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x02,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-SingleSequence"),
    e(Mdd::Mpeg2ConstantBFrames,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x03,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-ConstantBFrames"),
    e(Mdd::Mpeg2CodedContentType,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x04,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-CodedContentType"),
    e(Mdd::Mpeg2LowDelay,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x05,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-LowDelay"),
    e(Mdd::Mpeg2ClosedGop,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x06,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-ClosedGOP"),
    e(Mdd::Mpeg2IdenticalGop,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x07,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-IdenticalGOP"),
    e(Mdd::Mpeg2MaxGop,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x08,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-MaxGOP"),
    e(Mdd::Mpeg2BPictureCount,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x09,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-BPictureCount"),
    e(Mdd::Mpeg2BitRate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x0b,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-BitRate"),
    e(Mdd::Mpeg2ProfileAndLevel,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x01,0x06,0x02,0x01,0x0a,0x00,0x00],
      [0,0], true, "MPEG2VideoDescriptor-ProfileAndLevel"),
    e(Mdd::AudioSamplingRate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x02,0x03,0x01,0x01,0x01,0x00,0x00],
      [0x3d,0x03], false, "GenericSoundEssenceDescriptor-AudioSamplingRate"),
    e(Mdd::Locked,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x04,0x02,0x03,0x01,0x04,0x00,0x00,0x00],
      [0x3d,0x02], false, "GenericSoundEssenceDescriptor-Locked"),
    e(Mdd::AudioRefLevel,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x01,0x04,0x02,0x01,0x01,0x03,0x00,0x00,0x00],
      [0x3d,0x04], true, "GenericSoundEssenceDescriptor-AudioRefLevel"),
    e(Mdd::ChannelCount,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x02,0x01,0x01,0x04,0x00,0x00,0x00],
      [0x3d,0x07], false, "GenericSoundEssenceDescriptor-ChannelCount"),
    e(Mdd::QuantizationBits,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x04,0x02,0x03,0x03,0x04,0x00,0x00,0x00],
      [0x3d,0x01], false, "GenericSoundEssenceDescriptor-QuantizationBits"),
    e(Mdd::DialNorm,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x02,0x07,0x01,0x00,0x00,0x00,0x00],
      [0x3d,0x0c], true, "GenericSoundEssenceDescriptor-DialNorm"),
    e(Mdd::SoundEssenceCompression,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x02,0x04,0x02,0x04,0x02,0x00,0x00,0x00,0x00],
      [0x3d,0x06], true, "GenericSoundEssenceDescriptor-SoundEssenceCompression"),
    e(Mdd::BlockAlign,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x02,0x03,0x02,0x01,0x00,0x00,0x00],
      [0x3d,0x0a], false, "WaveAudioDescriptor-BlockAlign"),
    e(Mdd::SequenceOffset,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x02,0x03,0x02,0x02,0x00,0x00,0x00],
      [0x3d,0x0b], true, "WaveAudioDescriptor-SequenceOffset"),
    e(Mdd::AvgBps,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x02,0x03,0x03,0x05,0x00,0x00,0x00],
      [0x3d,0x09], false, "WaveAudioDescriptor-AvgBps"),
    e(Mdd::ChannelAssignment,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x07,0x04,0x02,0x01,0x01,0x05,0x00,0x00,0x00],
      [0x3d,0x32], true, "WaveAudioDescriptor-ChannelAssignment"),
    e(Mdd::DataEssenceCoding,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x03,0x03,0x02,0x00,0x00,0x00,0x00],
      [0x3e,0x01], false, "GenericDataEssenceDescriptor-DataEssenceCoding"),
    e(Mdd::J2kRsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x01,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-Rsiz"),
    e(Mdd::J2kXsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x02,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-Xsiz"),
    e(Mdd::J2kYsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x03,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-Ysiz"),
    e(Mdd::J2kXOsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x04,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-XOsiz"),
    e(Mdd::J2kYOsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x05,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-YOsiz"),
    e(Mdd::J2kXTsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x06,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-XTsiz"),
    e(Mdd::J2kYTsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x07,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-YTsiz"),
    e(Mdd::J2kXTOsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x08,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-XTOsiz"),
    e(Mdd::J2kYTOsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x09,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-YTOsiz"),
    e(Mdd::J2kCsiz,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x0a,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-Csiz"),
    e(Mdd::J2kPictureComponentSizing,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x0b,0x00,0x00,0x00],
      [0,0], false, "JPEG2000PictureSubDescriptor-PictureComponentSizing"),
    e(Mdd::J2kCodingStyleDefault,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x0c,0x00,0x00,0x00],
      [0,0], true, "JPEG2000PictureSubDescriptor-CodingStyleDefault"),
    e(Mdd::J2kQuantizationDefault,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x0a,0x04,0x01,0x06,0x03,0x0d,0x00,0x00,0x00],
      [0,0], true, "JPEG2000PictureSubDescriptor-QuantizationDefault"),

    // index table items
    e(Mdd::IndexEditRate,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x05,0x30,0x04,0x06,0x00,0x00,0x00,0x00],
      [0x3f,0x0b], false, "IndexTableSegment-IndexEditRate"),
    e(Mdd::IndexStartPosition,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x07,0x02,0x01,0x03,0x01,0x0a,0x00,0x00],
      [0x3f,0x0c], false, "IndexTableSegment-IndexStartPosition"),
    e(Mdd::IndexDuration,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x07,0x02,0x02,0x01,0x01,0x02,0x00,0x00],
      [0x3f,0x0d], false, "IndexTableSegment-IndexDuration"),
    e(Mdd::EditUnitByteCount,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x04,0x06,0x02,0x01,0x00,0x00,0x00,0x00],
      [0x3f,0x05], true, "IndexTableSegment-EditUnitByteCount"),
    e(Mdd::SliceCount,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x04,0x04,0x04,0x04,0x01,0x01,0x00,0x00,0x00],
      [0x3f,0x08], false, "IndexTableSegment-SliceCount"),
    e(Mdd::PosTableCount,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x04,0x04,0x01,0x07,0x00,0x00,0x00],
      [0x3f,0x0e], true, "IndexTableSegment-PosTableCount"),
    e(Mdd::DeltaEntryArray,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x04,0x04,0x01,0x06,0x00,0x00,0x00],
      [0x3f,0x09], true, "IndexTableSegment-DeltaEntryArray"),
    e(Mdd::IndexEntryArray,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x05,0x04,0x04,0x04,0x02,0x05,0x00,0x00,0x00],
      [0x3f,0x0a], true, "IndexTableSegment-IndexEntryArray"),

    // crypto DM items
    e(Mdd::CryptographicFrameworkContextSr,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x09,0x06,0x01,0x01,0x04,0x02,0x0d,0x00,0x00],
      [0,0], false, "CryptographicFramework-ContextSR"),
    e(Mdd::CryptographicContextId,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x09,0x01,0x01,0x15,0x11,0x00,0x00,0x00,0x00],
      [0,0], false, "CryptographicContext-ContextID"),
    e(Mdd::SourceEssenceContainer,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x09,0x06,0x01,0x01,0x04,0x02,0x02,0x00,0x00],
      [0,0], false, "CryptographicContext-SourceEssenceContainer"),
    e(Mdd::CipherAlgorithm,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x09,0x02,0x09,0x02,0x01,0x00,0x00,0x00,0x00],
      [0,0], false, "CryptographicContext-CipherAlgorithm"),
    e(Mdd::MicAlgorithm,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x09,0x02,0x09,0x02,0x03,0x00,0x00,0x00,0x00],
      [0,0], false, "CryptographicContext-MICAlgorithm"),
    e(Mdd::CryptographicKeyId,
      [0x06,0x0e,0x2b,0x34,0x01,0x01,0x01,0x09,0x02,0x09,0x01,0x02,0x01,0x00,0x00,0x00],
      [0,0], false, "CryptographicContext-CryptographicKeyID"),
];
