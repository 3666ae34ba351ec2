//! Metadata dictionary identifiers.
//!
//! Every Universal Label the codec reads or writes is catalogued here by a
//! symbolic id. The entry table carries the UL, the static local tag (zero
//! when the tag is assigned dynamically through the Primer) and the
//! optional flag used by the TLV codec.

/// Symbolic index into the metadata dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Mdd {
    // packet and set keys
    ClosedCompleteHeader,
    ClosedCompleteBodyPartition,
    CompleteFooter,
    GenericStreamPartition,
    Primer,
    RandomIndexMetadata,
    KlvFill,
    IndexTableSegment,
    Preface,
    Identification,
    ContentStorage,
    EssenceContainerData,
    MaterialPackage,
    SourcePackage,
    Track,
    StaticTrack,
    Sequence,
    SourceClip,
    TimecodeComponent,
    DmSegment,
    CryptographicFramework,
    CryptographicContext,
    FileDescriptor,
    GenericPictureEssenceDescriptor,
    CdciEssenceDescriptor,
    Mpeg2VideoDescriptor,
    GenericSoundEssenceDescriptor,
    WaveAudioDescriptor,
    GenericDataEssenceDescriptor,
    Jpeg2000PictureSubDescriptor,
    StereoscopicPictureSubDescriptor,

    // operational patterns and container labels
    OpAtom,
    InteropOpAtom,
    Op1a,
    GcMulti,
    PictureDataDef,
    SoundDataDef,
    TimecodeDataDef,
    DescriptiveMetaDataDef,
    WavWrapping,
    Mpeg2VesWrapping,
    Jpeg2000Wrapping,
    EncryptedContainerLabel,
    CryptographicFrameworkLabel,
    CipherAlgorithmAes,
    MicAlgorithmHmacSha1,
    MicAlgorithmNone,
    Jp2kEssenceCompression2k,
    Jp2kEssenceCompression4k,
    Mpeg2EssenceCompression,

    // essence element keys
    Mpeg2Essence,
    Jpeg2000Essence,
    WavEssence,
    CryptEssence,
    InteropCryptEssence,
    GenericStreamDataElement,

    // common object items
    InstanceUid,
    GenerationUid,

    // Preface items
    PrefaceLastModifiedDate,
    PrefaceVersion,
    PrefaceObjectModelVersion,
    PrefacePrimaryPackage,
    PrefaceIdentifications,
    PrefaceContentStorage,
    PrefaceOperationalPattern,
    PrefaceEssenceContainers,
    PrefaceDmSchemes,

    // Identification items
    IdentificationThisGenerationUid,
    IdentificationCompanyName,
    IdentificationProductName,
    IdentificationProductVersion,
    IdentificationVersionString,
    IdentificationProductUid,
    IdentificationModificationDate,
    IdentificationToolkitVersion,
    IdentificationPlatform,

    // ContentStorage / EssenceContainerData items
    ContentStoragePackages,
    ContentStorageEssenceContainerData,
    EssenceContainerDataLinkedPackageUid,
    IndexSid,
    BodySid,

    // package and track items
    PackageUid,
    PackageName,
    PackageCreationDate,
    PackageModifiedDate,
    PackageTracks,
    TrackId,
    TrackNumber,
    TrackName,
    TrackSequence,
    TrackEditRate,
    TrackOrigin,

    // structural component items
    DataDefinition,
    ComponentDuration,
    SequenceStructuralComponents,
    RoundedTimecodeBase,
    StartTimecode,
    DropFrame,
    SourceClipStartPosition,
    SourceClipSourcePackageId,
    SourceClipSourceTrackId,
    DmSegmentEventStartPosition,
    DmSegmentEventComment,
    DmSegmentTrackIds,
    DmSegmentDmFramework,
    SourcePackageDescriptor,

    // descriptor items
    SubDescriptors,
    InteropSubDescriptors,
    LinkedTrackId,
    SampleRate,
    ContainerDuration,
    EssenceContainer,
    Codec,
    FrameLayout,
    StoredWidth,
    StoredHeight,
    DisplayWidth,
    DisplayHeight,
    AspectRatio,
    VideoLineMap,
    PictureEssenceCoding,
    ComponentDepth,
    HorizontalSubsampling,
    VerticalSubsampling,
    ColorSiting,
    Mpeg2SingleSequence,
    Mpeg2ConstantBFrames,
    Mpeg2CodedContentType,
    Mpeg2LowDelay,
    Mpeg2ClosedGop,
    Mpeg2IdenticalGop,
    Mpeg2MaxGop,
    Mpeg2BPictureCount,
    Mpeg2BitRate,
    Mpeg2ProfileAndLevel,
    AudioSamplingRate,
    Locked,
    AudioRefLevel,
    ChannelCount,
    QuantizationBits,
    DialNorm,
    SoundEssenceCompression,
    BlockAlign,
    SequenceOffset,
    AvgBps,
    ChannelAssignment,
    DataEssenceCoding,
    J2kRsiz,
    J2kXsiz,
    J2kYsiz,
    J2kXOsiz,
    J2kYOsiz,
    J2kXTsiz,
    J2kYTsiz,
    J2kXTOsiz,
    J2kYTOsiz,
    J2kCsiz,
    J2kPictureComponentSizing,
    J2kCodingStyleDefault,
    J2kQuantizationDefault,

    // index table items
    IndexEditRate,
    IndexStartPosition,
    IndexDuration,
    EditUnitByteCount,
    SliceCount,
    PosTableCount,
    DeltaEntryArray,
    IndexEntryArray,

    // crypto DM items
    CryptographicFrameworkContextSr,
    CryptographicContextId,
    SourceEssenceContainer,
    CipherAlgorithm,
    MicAlgorithm,
    CryptographicKeyId,
}

/// Number of dictionary slots.
pub const MDD_COUNT: usize = Mdd::CryptographicKeyId as usize + 1;
