//! End-to-end write/read round trips over temp files.

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};

use asdcp_core::{Error, ValueRng};
use asdcp_dict::Mdd;
use asdcp_mxf::frame::{FrameBuffer, FrameType};
use asdcp_mxf::info::WriterInfo;
use asdcp_mxf::jp2k::{self, StereoscopicPhase};
use asdcp_mxf::metadata::{
    HeaderMetadata, Identification, MetadataObject, PackageCommon, SourcePackage,
};
use asdcp_mxf::partition::{Partition, Rip, RipEntry};
use asdcp_mxf::writer::DEFAULT_HEADER_SIZE;
use asdcp_mxf::{mpeg2, pcm, TrackFileReader};
use hex_literal::hex;

const KEY: [u8; 16] = hex!("00112233445566778899AABBCCDDEEFF");

fn tmp(name: &str) -> tempfile::TempPath {
    tempfile::Builder::new()
        .prefix(name)
        .suffix(".mxf")
        .tempfile()
        .expect("temp file")
        .into_temp_path()
}

/// One synthetic MPEG-2 I frame: a 3-partition file whose index entry
/// carries the GOP flags.
#[test]
fn mpeg2_single_frame() {
    let path = tmp("mpeg2");
    let payload: Vec<u8> = (0..200u32).map(|i| (i * 7) as u8).collect();

    let desc = mpeg2::VideoDescriptor::default();
    let mut writer = mpeg2::MxfWriter::open_write(
        &path,
        WriterInfo::for_this_toolkit(),
        &desc,
        DEFAULT_HEADER_SIZE,
        None,
    )
    .unwrap();

    let mut frame = FrameBuffer::from_slice(&payload);
    frame.frame_type = FrameType::I;
    frame.gop_start = true;
    frame.closed_gop = true;
    writer.write_frame(&frame).unwrap();
    writer.finalize().unwrap();

    let mut reader = mpeg2::MxfReader::open_read(&path).unwrap();
    assert_eq!(reader.frames(), 1);

    let mut out = FrameBuffer::new();
    reader.read_frame(0, &mut out).unwrap();
    assert_eq!(out.as_slice(), &payload[..]);
    assert_eq!(out.frame_type, FrameType::I);
    assert!(out.gop_start);
    assert!(out.closed_gop);

    let entry = reader.locate_frame(0).unwrap();
    assert_eq!(entry.1, 0, "temporal offset");
    assert_eq!(entry.2, 0, "key frame offset");

    assert!(matches!(reader.read_frame(1, &mut out), Err(Error::OutOfRange(1))));
}

/// Three J2C codestreams: VBR entries with strictly increasing offsets,
/// each frame returned byte-exact.
#[test]
fn jp2k_triplet() {
    let path = tmp("jp2k");
    let sizes = [10_000usize, 10_050, 9_900];
    let frames: Vec<Vec<u8>> = sizes
        .iter()
        .enumerate()
        .map(|(n, &len)| (0..len).map(|i| (i + n * 3) as u8).collect())
        .collect();

    let desc = jp2k::PictureDescriptor::default();
    let mut writer = jp2k::MxfWriter::open_write(
        &path,
        WriterInfo::for_this_toolkit(),
        &desc,
        DEFAULT_HEADER_SIZE,
        None,
    )
    .unwrap();
    for frame in &frames {
        writer.write_frame(&FrameBuffer::from_slice(frame)).unwrap();
    }
    writer.finalize().unwrap();

    let mut reader = jp2k::MxfReader::open_read(&path).unwrap();
    assert_eq!(reader.frames(), 3);

    let mut offsets = Vec::new();
    for (n, expect) in frames.iter().enumerate() {
        let mut out = FrameBuffer::new();
        reader.read_frame(n as u32, &mut out).unwrap();
        assert_eq!(out.as_slice(), &expect[..]);
        offsets.push(reader.locate_frame(n as u32).unwrap().0);
    }
    assert!(offsets[0] < offsets[1] && offsets[1] < offsets[2]);
}

fn write_encrypted_pcm(path: &std::path::Path) -> Vec<Vec<u8>> {
    let desc = pcm::AudioDescriptor::default();
    let info = WriterInfo {
        encrypted_essence: true,
        uses_hmac: true,
        ..WriterInfo::for_this_toolkit()
    };

    let mut writer =
        pcm::MxfWriter::open_write(path, info, &desc, DEFAULT_HEADER_SIZE, Some(KEY)).unwrap();
    assert_eq!(writer.frame_size(), 12_000);

    let frames: Vec<Vec<u8>> = (0..24u32)
        .map(|n| (0..12_000usize).map(|i| (i as u32 + n).to_le_bytes()[0]).collect())
        .collect();
    for frame in &frames {
        writer.write_frame(&FrameBuffer::from_slice(frame)).unwrap();
    }
    writer.finalize().unwrap();
    frames
}

/// One second of encrypted stereo PCM: 24 EKLV triplets, recovered with
/// the key, opaque without it.
#[test]
fn encrypted_pcm_second() {
    let path = tmp("pcm-enc");
    let frames = write_encrypted_pcm(&path);

    // with the key: plaintext recovered
    let mut reader = pcm::MxfReader::open_read(&path).unwrap();
    assert!(reader.info().encrypted_essence);
    assert!(reader.info().uses_hmac);
    reader.load_key(&KEY);
    assert_eq!(reader.frames(), 24);

    for (n, expect) in frames.iter().enumerate() {
        let mut out = FrameBuffer::new();
        reader.read_frame(n as u32, &mut out).unwrap();
        assert!(!out.ciphertext);
        assert_eq!(out.as_slice(), &expect[..]);
    }

    // without the key: the encrypted source value comes back opaque
    let mut blind = pcm::MxfReader::open_read(&path).unwrap();
    let mut out = FrameBuffer::new();
    blind.read_frame(0, &mut out).unwrap();
    assert!(out.ciphertext);
    assert_eq!(out.source_length, 12_000);
    assert_eq!(out.len(), 12_048); // IV + check value + payload + padding
    assert_ne!(&out.as_slice()[32..64], &frames[0][..32]);
}

/// Flipping one ciphertext byte of the last frame trips the integrity
/// check.
#[test]
fn tamper_detection() {
    let path = tmp("pcm-tamper");
    write_encrypted_pcm(&path);

    // find the footer start from the RIP, then flip a byte 100 bytes back,
    // inside the last frame's packet
    let reader = TrackFileReader::open_read(&path).unwrap();
    let footer_start = reader.rip.entries.last().unwrap().byte_offset;
    drop(reader);

    let mut file = fs::OpenOptions::new().read(true).write(true).open(&path).unwrap();
    file.seek(SeekFrom::Start(footer_start - 100)).unwrap();
    let mut b = [0u8; 1];
    file.read_exact(&mut b).unwrap();
    file.seek(SeekFrom::Start(footer_start - 100)).unwrap();
    file.write_all(&[b[0] ^ 0x01]).unwrap();
    drop(file);

    let mut reader = pcm::MxfReader::open_read(&path).unwrap();
    reader.load_key(&KEY);

    let mut out = FrameBuffer::new();
    assert!(matches!(reader.read_frame(23, &mut out), Err(Error::HmacFail(_))));
    // earlier frames are untouched
    reader.read_frame(0, &mut out).unwrap();
}

/// Stereoscopic JPEG 2000: strict Left/Right alternation, 2N frames
/// internally, N pairs externally.
#[test]
fn stereoscopic_ordering() {
    let path = tmp("jp2k-s");
    let pairs = 48usize;
    let desc = jp2k::PictureDescriptor::default();

    let mut writer = jp2k::MxfStereoWriter::open_write(
        &path,
        WriterInfo::for_this_toolkit(),
        &desc,
        DEFAULT_HEADER_SIZE,
        None,
    )
    .unwrap();

    // finalize before any pair is complete is illegal
    let left: Vec<u8> = (0..512u32).map(|i| i as u8).collect();
    writer.write_frame(&FrameBuffer::from_slice(&left), StereoscopicPhase::Left).unwrap();
    assert!(matches!(writer.finalize(), Err(Error::State)));

    // writing the same phase twice is illegal
    assert!(matches!(
        writer.write_frame(&FrameBuffer::from_slice(&left), StereoscopicPhase::Left),
        Err(Error::State)
    ));

    let right: Vec<u8> = left.iter().map(|b| b ^ 0x80).collect();
    writer.write_frame(&FrameBuffer::from_slice(&right), StereoscopicPhase::Right).unwrap();
    for n in 1..pairs {
        for (phase, tag) in [(StereoscopicPhase::Left, 0u8), (StereoscopicPhase::Right, 1u8)] {
            let payload = vec![(n as u8) ^ (tag << 7); 64 + n];
            writer.write_frame(&FrameBuffer::from_slice(&payload), phase).unwrap();
        }
    }
    writer.finalize().unwrap();

    let mut reader = jp2k::MxfStereoReader::open_read(&path).unwrap();
    assert_eq!(reader.frame_pairs(), pairs as i64);

    let mut out = FrameBuffer::new();
    reader.read_frame(0, StereoscopicPhase::Left, &mut out).unwrap();
    assert_eq!(out.as_slice(), &left[..]);
    for n in 1..pairs as u32 {
        for (phase, tag) in [(StereoscopicPhase::Left, 0u8), (StereoscopicPhase::Right, 1u8)] {
            reader.read_frame(n, phase, &mut out).unwrap();
            assert_eq!(out.len(), 64 + n as usize);
            assert_eq!(out.as_slice()[0], (n as u8) ^ (tag << 7));
        }
    }
}

/// Duration coherence: every structural component and the descriptor
/// carry the frame count after finalize.
#[test]
fn duration_coherence() {
    let path = tmp("durations");
    let desc = jp2k::PictureDescriptor::default();
    let mut writer = jp2k::MxfWriter::open_write(
        &path,
        WriterInfo::for_this_toolkit(),
        &desc,
        DEFAULT_HEADER_SIZE,
        None,
    )
    .unwrap();
    for n in 0..5u8 {
        writer.write_frame(&FrameBuffer::from_slice(&vec![n; 100])).unwrap();
    }
    writer.finalize().unwrap();

    let reader = TrackFileReader::open_read(&path).unwrap();
    let mut components = 0usize;
    for object in reader.metadata.objects() {
        let duration = match object {
            MetadataObject::Sequence(o) => o.duration,
            MetadataObject::SourceClip(o) => o.duration,
            MetadataObject::TimecodeComponent(o) => o.duration,
            MetadataObject::Jpeg2000PictureDescriptor(o) => o.file.container_duration,
            _ => continue,
        };
        components += 1;
        assert_eq!(duration, Some(5), "duration mismatch in {:?}", object.class_id());
    }
    // 2 packages x (timecode clip + sequence, source clip + sequence) + descriptor
    assert_eq!(components, 9);
}

/// RIP coherence: entry zero at offset zero, final entry at the footer,
/// and every entry pointing at a partition pack.
#[test]
fn rip_coherence() {
    let path = tmp("rip");
    let desc = mpeg2::VideoDescriptor::default();
    let mut writer = mpeg2::MxfWriter::open_write(
        &path,
        WriterInfo::for_this_toolkit(),
        &desc,
        DEFAULT_HEADER_SIZE,
        None,
    )
    .unwrap();
    writer.write_frame(&FrameBuffer::from_slice(&[1u8; 64])).unwrap();
    writer.finalize().unwrap();

    let reader = TrackFileReader::open_read(&path).unwrap();
    let entries = reader.rip.entries.clone();
    assert_eq!(entries.len(), 3, "3-part SMPTE layout");
    assert_eq!(entries[0], RipEntry::new(0, 0));
    assert_eq!(entries[2].byte_offset, reader.header_partition.footer_partition);
    drop(reader);

    let mut file = fs::File::open(&path).unwrap();
    for entry in &entries {
        file.seek(SeekFrom::Start(entry.byte_offset)).unwrap();
        let (partition, _key) = Partition::read_from(&mut file).unwrap();
        assert_eq!(partition.this_partition, entry.byte_offset);
    }
}

/// A header+footer file with no essence: the reader locates the RIP,
/// reports zero frames and surfaces the identification metadata.
#[test]
fn headers_only_round_trip() {
    let path = tmp("headers-only");
    let dict = asdcp_dict::smpte();
    let mut rng = ValueRng::seeded(99);

    let mut meta = HeaderMetadata::new(dict);
    let ident_uid = meta.add(
        MetadataObject::Identification(Identification {
            company_name: "Widgets Inc".into(),
            product_name: "wexford".into(),
            version_string: "2.4.0".into(),
            ..Identification::default()
        }),
        &mut rng,
    );
    meta.add(
        MetadataObject::SourcePackage(SourcePackage {
            package: PackageCommon {
                package_uid: asdcp_core::Umid::make(0x0f, rng.uuid()),
                name: Some("File Package".into()),
                ..PackageCommon::default()
            },
            ..SourcePackage::default()
        }),
        &mut rng,
    );
    meta.preface.identifications = vec![ident_uid];
    meta.preface.operational_pattern = dict.ul(Mdd::OpAtom);

    let mut region = Vec::new();
    meta.write_to(&mut region).unwrap();

    let mut header = Partition {
        operational_pattern: dict.ul(Mdd::OpAtom),
        ..Partition::default()
    };
    let reserved = 8192u64;
    header.header_byte_count = reserved - header.archive_size() as u64;

    let mut file = fs::File::create(&path).unwrap();
    header.write_to(&mut file, &dict.ul(Mdd::ClosedCompleteHeader)).unwrap();
    file.write_all(&region).unwrap();
    let written = file.stream_position().unwrap();
    asdcp_core::klv::write_fill(&mut file, &dict.ul(Mdd::KlvFill), reserved - written).unwrap();

    let footer_start = file.stream_position().unwrap();
    let footer = Partition {
        this_partition: footer_start,
        footer_partition: footer_start,
        operational_pattern: dict.ul(Mdd::OpAtom),
        ..Partition::default()
    };
    footer.write_to(&mut file, &dict.ul(Mdd::CompleteFooter)).unwrap();

    let rip = Rip { entries: vec![RipEntry::new(0, 0), RipEntry::new(0, footer_start)] };
    rip.write_to(&mut file, dict).unwrap();
    drop(file);

    let reader = TrackFileReader::open_read(&path).unwrap();
    assert_eq!(reader.frames(), 0);
    assert_eq!(reader.info.product_name, "wexford");
    assert_eq!(reader.info.company_name, "Widgets Inc");
    assert!(!reader.info.encrypted_essence);
    assert!(matches!(reader.index.lookup(0), Err(Error::OutOfRange(0))));
}

/// The Interop label set produces a 2-part file that still round-trips.
#[test]
fn interop_two_part_layout() {
    let path = tmp("interop");
    let desc = jp2k::PictureDescriptor::default();
    let info = WriterInfo {
        label_set: asdcp_mxf::LabelSet::Interop,
        ..WriterInfo::for_this_toolkit()
    };

    let mut writer =
        jp2k::MxfWriter::open_write(&path, info, &desc, DEFAULT_HEADER_SIZE, None).unwrap();
    for n in 0..3u8 {
        writer.write_frame(&FrameBuffer::from_slice(&vec![n; 777])).unwrap();
    }
    writer.finalize().unwrap();

    let mut reader = jp2k::MxfReader::open_read(&path).unwrap();
    assert_eq!(reader.frames(), 3);
    // 2-part layout: body SID 1 at offset zero, footer entry last
    let entries = &reader.reader().rip.entries;
    assert_eq!(entries[0], RipEntry::new(1, 0));
    assert_eq!(entries.len(), 2);

    let mut out = FrameBuffer::new();
    reader.read_frame(2, &mut out).unwrap();
    assert_eq!(out.as_slice(), &vec![2u8; 777][..]);
}

/// A generic stream partition payload appended after the essence is
/// recoverable by BodySID.
#[test]
fn generic_stream_payload() {
    use asdcp_mxf::writer::{SourceStreamConfig, TrackFileWriter};

    let path = tmp("gsp");
    let dict = asdcp_dict::smpte();
    let desc_md = MetadataObject::GenericDataEssenceDescriptor(Default::default());

    let mut writer =
        TrackFileWriter::open_write(&path, WriterInfo::for_this_toolkit(), DEFAULT_HEADER_SIZE)
            .unwrap();
    writer
        .set_source_stream(SourceStreamConfig {
            package_label: "File Package: data essence".into(),
            track_name: "Data Track".into(),
            wrapping_ul: dict.ul(Mdd::GcMulti),
            essence_ul: dict.ul(Mdd::WavEssence).with_stream(0x7f),
            data_definition: Mdd::SoundDataDef,
            edit_rate: asdcp_mxf::types::EDIT_RATE_24,
            tc_frame_rate: 24,
            bytes_per_edit_unit: 0,
            descriptor: desc_md,
            sub_descriptors: Vec::new(),
            cipher_key: None,
        })
        .unwrap();

    writer.write_frame(&FrameBuffer::from_slice(b"frame zero")).unwrap();
    let sid = writer.write_stream_payload(&FrameBuffer::from_slice(b"<dcst>hello</dcst>")).unwrap();
    assert_eq!(sid, 2);
    writer.finalize().unwrap();

    let mut reader = TrackFileReader::open_read(&path).unwrap();
    let mut out = FrameBuffer::new();
    reader.read_stream_payload(sid, &mut out).unwrap();
    assert_eq!(out.as_slice(), b"<dcst>hello</dcst>");

    assert!(matches!(
        reader.read_stream_payload(9, &mut FrameBuffer::new()),
        Err(Error::NotFound(_))
    ));
}
