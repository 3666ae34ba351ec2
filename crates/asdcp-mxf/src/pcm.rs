//! 24-bit PCM track files: CBR index, fixed frame size per edit unit.

use std::path::Path;

use asdcp_core::{klv, Result, Ul};
use asdcp_dict::Mdd;

use crate::crypto::{self, KEY_LENGTH, KLV_CRYPTINFO_SIZE, KLV_INTPACK_SIZE};
use crate::frame::FrameBuffer;
use crate::info::WriterInfo;
use crate::metadata::{MetadataObject, WaveAudioDescriptor};
use crate::reader::TrackFileReader;
use crate::types::Rational;
use crate::writer::{derive_timecode_rate, SourceStreamConfig, TrackFileWriter};

const PACKAGE_LABEL: &str = "File Package: SMPTE 382M frame wrapping of wave audio";
const TRACK_NAME: &str = "Sound Track";

/// Parameters of the audio stream, as reported by a WAV parser.
#[derive(Debug, Clone)]
pub struct AudioDescriptor {
    /// Picture rate the audio is muxed against; one audio frame spans one
    /// picture frame.
    pub edit_rate: Rational,
    pub audio_sampling_rate: Rational,
    pub locked: u8,
    pub channel_count: u32,
    pub quantization_bits: u32,
    pub block_align: u16,
    pub avg_bps: u32,
    pub container_duration: u32,
}

impl Default for AudioDescriptor {
    fn default() -> Self {
        Self {
            edit_rate: crate::types::EDIT_RATE_24,
            audio_sampling_rate: crate::types::SAMPLE_RATE_48K,
            locked: 0,
            channel_count: 2,
            quantization_bits: 24,
            block_align: 6,
            avg_bps: 288_000,
            container_duration: 0,
        }
    }
}

/// Bytes of PCM data in one edit unit: samples-per-frame times the sample
/// block size.
pub fn calc_frame_buffer_size(desc: &AudioDescriptor) -> u32 {
    let samples_per_frame = desc.audio_sampling_rate.quotient() / desc.edit_rate.quotient();
    (samples_per_frame.ceil() as u32) * u32::from(desc.block_align)
}

/// On-disk bytes of one frame's KLV (or EKLV) packet; this is the CBR
/// edit-unit byte count recorded in the index.
pub fn calc_cbr_frame_size(info: &WriterInfo, desc: &AudioDescriptor) -> u32 {
    let payload = calc_frame_buffer_size(desc) as usize;

    let size = if info.encrypted_essence {
        asdcp_core::UL_LENGTH
            + klv::MXF_BER_LENGTH
            + KLV_CRYPTINFO_SIZE
            + crypto::calc_esv_length(payload, 0)
            + if info.uses_hmac { KLV_INTPACK_SIZE } else { klv::MXF_BER_LENGTH * 3 }
    } else {
        payload + asdcp_core::UL_LENGTH + klv::MXF_BER_LENGTH
    };
    size as u32
}

fn descriptor_to_md(desc: &AudioDescriptor) -> MetadataObject {
    MetadataObject::WaveAudioDescriptor(WaveAudioDescriptor {
        file: crate::metadata::FileDescriptorCommon {
            sample_rate: desc.edit_rate,
            ..Default::default()
        },
        audio_sampling_rate: desc.audio_sampling_rate,
        locked: desc.locked,
        channel_count: desc.channel_count,
        quantization_bits: desc.quantization_bits,
        block_align: desc.block_align,
        avg_bps: desc.avg_bps,
        ..WaveAudioDescriptor::default()
    })
}

fn descriptor_from_md(md: &WaveAudioDescriptor) -> AudioDescriptor {
    AudioDescriptor {
        edit_rate: md.file.sample_rate,
        audio_sampling_rate: md.audio_sampling_rate,
        locked: md.locked,
        channel_count: md.channel_count,
        quantization_bits: md.quantization_bits,
        block_align: md.block_align,
        avg_bps: md.avg_bps,
        container_duration: md.file.container_duration.unwrap_or(0) as u32,
    }
}

/// PCM track-file writer. Frames must arrive at exactly the CBR frame
/// payload size.
pub struct MxfWriter {
    inner: TrackFileWriter,
    frame_size: u32,
}

impl MxfWriter {
    pub fn open_write<P: AsRef<Path>>(
        path: P,
        info: WriterInfo,
        desc: &AudioDescriptor,
        header_size: u32,
        cipher_key: Option<[u8; KEY_LENGTH]>,
    ) -> Result<Self> {
        let mut inner = TrackFileWriter::open_write(path, info, header_size)?;
        let dict = match inner.info.label_set {
            crate::info::LabelSet::Smpte => asdcp_dict::smpte(),
            crate::info::LabelSet::Interop => asdcp_dict::interop(),
        };

        let frame_size = calc_frame_buffer_size(desc);
        let cbr_size = calc_cbr_frame_size(&inner.info, desc);

        inner.set_source_stream(SourceStreamConfig {
            package_label: PACKAGE_LABEL.into(),
            track_name: TRACK_NAME.into(),
            wrapping_ul: dict.ul(Mdd::WavWrapping),
            essence_ul: dict.ul(Mdd::WavEssence).with_stream(0x01),
            data_definition: Mdd::SoundDataDef,
            edit_rate: desc.edit_rate,
            tc_frame_rate: derive_timecode_rate(desc.edit_rate),
            bytes_per_edit_unit: cbr_size,
            descriptor: descriptor_to_md(desc),
            sub_descriptors: Vec::new(),
            cipher_key,
        })?;

        Ok(Self { inner, frame_size })
    }

    /// The exact payload size each frame must carry.
    pub fn frame_size(&self) -> u32 {
        self.frame_size
    }

    pub fn write_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        if frame.len() != self.frame_size as usize {
            return Err(asdcp_core::Error::Format(format!(
                "PCM frame of {} bytes, expected {}",
                frame.len(),
                self.frame_size
            )));
        }
        self.inner.write_frame(frame)
    }

    pub fn frames_written(&self) -> u32 {
        self.inner.frames_written()
    }

    pub fn finalize(&mut self) -> Result<()> {
        self.inner.finalize()
    }
}

/// PCM track-file reader.
pub struct MxfReader {
    inner: TrackFileReader,
    essence_ul: Ul,
}

impl MxfReader {
    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = TrackFileReader::open_read(path)?;
        let essence_ul = asdcp_dict::composite().ul(Mdd::WavEssence).with_stream(0x01);
        Ok(Self { inner, essence_ul })
    }

    pub fn load_key(&mut self, key: &[u8; KEY_LENGTH]) {
        self.inner.load_key(key);
    }

    pub fn info(&self) -> &WriterInfo {
        &self.inner.info
    }

    pub fn frames(&self) -> i64 {
        self.inner.frames()
    }

    pub fn audio_descriptor(&self) -> Result<AudioDescriptor> {
        match self.inner.metadata.find_first(Mdd::WaveAudioDescriptor) {
            Some(MetadataObject::WaveAudioDescriptor(md)) => Ok(descriptor_from_md(md)),
            _ => Err(asdcp_core::Error::NotFound("WaveAudioDescriptor")),
        }
    }

    pub fn read_frame(&mut self, frame_num: u32, frame: &mut FrameBuffer) -> Result<()> {
        let essence_ul = self.essence_ul;
        self.inner.read_frame(frame_num, &essence_ul, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_for_48k_stereo_at_24fps() {
        let desc = AudioDescriptor::default();
        // 48000 / 24 = 2000 samples, 6 bytes each
        assert_eq!(calc_frame_buffer_size(&desc), 12_000);
    }

    #[test]
    fn cbr_size_includes_packet_overhead() {
        let desc = AudioDescriptor::default();
        let mut info = WriterInfo::default();

        info.encrypted_essence = false;
        assert_eq!(calc_cbr_frame_size(&info, &desc), 12_000 + 20);

        info.encrypted_essence = true;
        info.uses_hmac = true;
        // 12000 is block-aligned: ESV gains IV + check + one padding block
        let expected = 16 + 4 + KLV_CRYPTINFO_SIZE as u32 + 12_048 + KLV_INTPACK_SIZE as u32;
        assert_eq!(calc_cbr_frame_size(&info, &desc), expected);
    }

    #[test]
    fn descriptor_maps_both_ways() {
        let desc = AudioDescriptor { channel_count: 6, block_align: 18, ..Default::default() };
        let MetadataObject::WaveAudioDescriptor(md) = descriptor_to_md(&desc) else {
            panic!("wrong class");
        };
        let back = descriptor_from_md(&md);
        assert_eq!(back.channel_count, 6);
        assert_eq!(back.block_align, 18);
    }
}
