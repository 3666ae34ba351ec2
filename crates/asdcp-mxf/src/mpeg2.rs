//! MPEG-2 VES track files: VBR index with picture-type flags.

use std::path::Path;

use asdcp_core::{Result, Ul};
use asdcp_dict::Mdd;

use crate::crypto::KEY_LENGTH;
use crate::frame::{FrameBuffer, FrameType};
use crate::index::{FLAG_CLOSED_GOP, FLAG_GOP_START};
use crate::info::WriterInfo;
use crate::metadata::{MetadataObject, Mpeg2VideoDescriptor};
use crate::reader::TrackFileReader;
use crate::types::Rational;
use crate::writer::{SourceStreamConfig, TrackFileWriter, derive_timecode_rate};

const PACKAGE_LABEL: &str = "File Package: SMPTE 381M frame wrapping of MPEG2 video elementary stream";
const TRACK_NAME: &str = "Picture Track";

/// Parameters of the video stream, as reported by an MPEG-2 parser.
#[derive(Debug, Clone)]
pub struct VideoDescriptor {
    pub edit_rate: Rational,
    pub frame_rate: u32,
    pub stored_width: u32,
    pub stored_height: u32,
    pub aspect_ratio: Rational,
    pub component_depth: u32,
    pub horizontal_subsampling: u32,
    pub vertical_subsampling: u32,
    pub color_siting: u8,
    pub coded_content_type: u8,
    pub low_delay: bool,
    pub bit_rate: u32,
    pub profile_and_level: u8,
    pub container_duration: u32,
}

impl Default for VideoDescriptor {
    fn default() -> Self {
        Self {
            edit_rate: crate::types::EDIT_RATE_24,
            frame_rate: 24,
            stored_width: 1920,
            stored_height: 1080,
            aspect_ratio: Rational::new(16, 9),
            component_depth: 8,
            horizontal_subsampling: 2,
            vertical_subsampling: 1,
            color_siting: 0,
            coded_content_type: 1,
            low_delay: false,
            bit_rate: 0,
            profile_and_level: 0,
            container_duration: 0,
        }
    }
}

fn descriptor_to_md(desc: &VideoDescriptor, dict: &asdcp_dict::Dictionary) -> MetadataObject {
    MetadataObject::Mpeg2VideoDescriptor(Mpeg2VideoDescriptor {
        file: crate::metadata::FileDescriptorCommon {
            sample_rate: desc.edit_rate,
            ..Default::default()
        },
        picture: crate::metadata::PictureCommon {
            frame_layout: 0,
            stored_width: desc.stored_width,
            stored_height: desc.stored_height,
            aspect_ratio: desc.aspect_ratio,
            picture_essence_coding: Some(dict.ul(Mdd::Mpeg2EssenceCompression)),
            ..Default::default()
        },
        component_depth: desc.component_depth,
        horizontal_subsampling: desc.horizontal_subsampling,
        vertical_subsampling: Some(desc.vertical_subsampling),
        color_siting: Some(desc.color_siting),
        coded_content_type: Some(desc.coded_content_type),
        low_delay: Some(u8::from(desc.low_delay)),
        bit_rate: Some(desc.bit_rate),
        profile_and_level: Some(desc.profile_and_level),
        ..Mpeg2VideoDescriptor::default()
    })
}

fn descriptor_from_md(md: &Mpeg2VideoDescriptor) -> VideoDescriptor {
    VideoDescriptor {
        edit_rate: md.file.sample_rate,
        frame_rate: derive_timecode_rate(md.file.sample_rate),
        stored_width: md.picture.stored_width,
        stored_height: md.picture.stored_height,
        aspect_ratio: md.picture.aspect_ratio,
        component_depth: md.component_depth,
        horizontal_subsampling: md.horizontal_subsampling,
        vertical_subsampling: md.vertical_subsampling.unwrap_or(0),
        color_siting: md.color_siting.unwrap_or(0),
        coded_content_type: md.coded_content_type.unwrap_or(0),
        low_delay: md.low_delay.unwrap_or(0) != 0,
        bit_rate: md.bit_rate.unwrap_or(0),
        profile_and_level: md.profile_and_level.unwrap_or(0),
        container_duration: md.file.container_duration.unwrap_or(0) as u32,
    }
}

/// MPEG-2 track-file writer.
pub struct MxfWriter {
    inner: TrackFileWriter,
}

impl MxfWriter {
    pub fn open_write<P: AsRef<Path>>(
        path: P,
        info: WriterInfo,
        desc: &VideoDescriptor,
        header_size: u32,
        cipher_key: Option<[u8; KEY_LENGTH]>,
    ) -> Result<Self> {
        let mut inner = TrackFileWriter::open_write(path, info, header_size)?;
        let dict = match inner.info.label_set {
            crate::info::LabelSet::Smpte => asdcp_dict::smpte(),
            crate::info::LabelSet::Interop => asdcp_dict::interop(),
        };

        inner.set_source_stream(SourceStreamConfig {
            package_label: PACKAGE_LABEL.into(),
            track_name: TRACK_NAME.into(),
            wrapping_ul: dict.ul(Mdd::Mpeg2VesWrapping),
            essence_ul: dict.ul(Mdd::Mpeg2Essence).with_stream(0x01),
            data_definition: Mdd::PictureDataDef,
            edit_rate: desc.edit_rate,
            tc_frame_rate: derive_timecode_rate(desc.edit_rate),
            bytes_per_edit_unit: 0,
            descriptor: descriptor_to_md(desc, dict),
            sub_descriptors: Vec::new(),
            cipher_key,
        })?;

        Ok(Self { inner })
    }

    /// Write one video frame; picture type and GOP flags come from the
    /// frame buffer metadata.
    pub fn write_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.inner.write_frame(frame)
    }

    pub fn frames_written(&self) -> u32 {
        self.inner.frames_written()
    }

    pub fn finalize(&mut self) -> Result<()> {
        self.inner.finalize()
    }
}

/// MPEG-2 track-file reader.
pub struct MxfReader {
    inner: TrackFileReader,
    essence_ul: Ul,
}

impl MxfReader {
    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = TrackFileReader::open_read(path)?;
        let essence_ul = asdcp_dict::composite().ul(Mdd::Mpeg2Essence).with_stream(0x01);
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

    pub fn video_descriptor(&self) -> Result<VideoDescriptor> {
        match self.inner.metadata.find_first(Mdd::Mpeg2VideoDescriptor) {
            Some(MetadataObject::Mpeg2VideoDescriptor(md)) => Ok(descriptor_from_md(md)),
            _ => Err(asdcp_core::Error::NotFound("MPEG2VideoDescriptor")),
        }
    }

    /// Read one frame. Picture type and GOP flags are recovered from the
    /// frame's index entry.
    pub fn read_frame(&mut self, frame_num: u32, frame: &mut FrameBuffer) -> Result<()> {
        let essence_ul = self.essence_ul;
        self.inner.read_frame(frame_num, &essence_ul, frame)?;

        let entry = self.inner.frame_entry(frame_num)?;
        frame.temporal_offset = entry.temporal_offset;
        frame.gop_start = entry.flags & FLAG_GOP_START != 0;
        frame.closed_gop = entry.flags & FLAG_CLOSED_GOP != 0;
        frame.frame_type = match entry.flags & 0x0f {
            0x02 => FrameType::P,
            0x03 => FrameType::B,
            _ => FrameType::I,
        };
        Ok(())
    }

    /// Read the GOP-start (I) frame for `frame_num`, per the key-frame
    /// offset recorded in the index.
    pub fn read_frame_gop_start(&mut self, frame_num: u32, frame: &mut FrameBuffer) -> Result<()> {
        let entry = self.inner.frame_entry(frame_num)?;
        let start = frame_num.saturating_sub(entry.key_frame_offset.max(0) as u32);
        self.read_frame(start, frame)
    }

    /// Frame position lookup without payload I/O.
    pub fn locate_frame(&self, frame_num: u32) -> Result<(u64, i8, i8)> {
        self.inner.locate_frame(frame_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_maps_both_ways() {
        let desc = VideoDescriptor { stored_width: 2048, stored_height: 858, ..Default::default() };
        let MetadataObject::Mpeg2VideoDescriptor(md) = descriptor_to_md(&desc, asdcp_dict::smpte())
        else {
            panic!("wrong descriptor class");
        };
        let back = descriptor_from_md(&md);
        assert_eq!(back.stored_width, 2048);
        assert_eq!(back.stored_height, 858);
        assert_eq!(back.edit_rate, desc.edit_rate);
    }
}
