//! JPEG 2000 track files, including the stereoscopic variant with its
//! strict Left/Right phase alternation.

use std::path::Path;

use asdcp_core::{Error, Result, Ul};
use asdcp_dict::Mdd;

use crate::crypto::KEY_LENGTH;
use crate::frame::FrameBuffer;
use crate::info::WriterInfo;
use crate::metadata::{
    Jpeg2000PictureDescriptor, Jpeg2000PictureSubDescriptor, MetadataObject,
    StereoscopicPictureSubDescriptor,
};
use crate::reader::TrackFileReader;
use crate::types::{Rational, EDIT_RATE_24, EDIT_RATE_48};
use crate::writer::{derive_timecode_rate, SourceStreamConfig, TrackFileWriter};

const PACKAGE_LABEL: &str = "File Package: SMPTE 429-4 frame wrapping of JPEG 2000 codestreams";
const S_PACKAGE_LABEL: &str =
    "File Package: SMPTE 429-10 frame wrapping of stereoscopic JPEG 2000 codestreams";
const TRACK_NAME: &str = "Picture Track";

/// Codestream parameters, as reported by a J2C parser.
#[derive(Debug, Clone)]
pub struct PictureDescriptor {
    pub edit_rate: Rational,
    pub sample_rate: Rational,
    pub stored_width: u32,
    pub stored_height: u32,
    pub aspect_ratio: Rational,
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
    pub container_duration: u32,
}

impl Default for PictureDescriptor {
    fn default() -> Self {
        Self {
            edit_rate: EDIT_RATE_24,
            sample_rate: EDIT_RATE_24,
            stored_width: 2048,
            stored_height: 1080,
            aspect_ratio: Rational::new(2048, 1080),
            rsiz: 3,
            xsiz: 2048,
            ysiz: 1080,
            x_osiz: 0,
            y_osiz: 0,
            x_tsiz: 2048,
            y_tsiz: 1080,
            x_t_osiz: 0,
            y_t_osiz: 0,
            csiz: 3,
            picture_component_sizing: vec![0x0b, 0x01, 0x01, 0x0b, 0x01, 0x01, 0x0b, 0x01, 0x01],
            container_duration: 0,
        }
    }
}

fn descriptor_to_md(desc: &PictureDescriptor, dict: &asdcp_dict::Dictionary) -> MetadataObject {
    let coding = if desc.xsiz > 2048 {
        dict.ul(Mdd::Jp2kEssenceCompression4k)
    } else {
        dict.ul(Mdd::Jp2kEssenceCompression2k)
    };

    MetadataObject::Jpeg2000PictureDescriptor(Jpeg2000PictureDescriptor {
        file: crate::metadata::FileDescriptorCommon {
            sample_rate: desc.edit_rate,
            ..Default::default()
        },
        picture: crate::metadata::PictureCommon {
            frame_layout: 0,
            stored_width: desc.stored_width,
            stored_height: desc.stored_height,
            aspect_ratio: desc.aspect_ratio,
            picture_essence_coding: Some(coding),
            ..Default::default()
        },
        ..Jpeg2000PictureDescriptor::default()
    })
}

fn sub_descriptor_to_md(desc: &PictureDescriptor) -> MetadataObject {
    MetadataObject::Jpeg2000PictureSubDescriptor(Jpeg2000PictureSubDescriptor {
        rsiz: desc.rsiz,
        xsiz: desc.xsiz,
        ysiz: desc.ysiz,
        x_osiz: desc.x_osiz,
        y_osiz: desc.y_osiz,
        x_tsiz: desc.x_tsiz,
        y_tsiz: desc.y_tsiz,
        x_t_osiz: desc.x_t_osiz,
        y_t_osiz: desc.y_t_osiz,
        csiz: desc.csiz,
        picture_component_sizing: desc.picture_component_sizing.clone(),
        ..Jpeg2000PictureSubDescriptor::default()
    })
}

fn open_common<P: AsRef<Path>>(
    path: P,
    info: WriterInfo,
    desc: &PictureDescriptor,
    header_size: u32,
    cipher_key: Option<[u8; KEY_LENGTH]>,
    stereo: bool,
) -> Result<TrackFileWriter> {
    let mut inner = TrackFileWriter::open_write(path, info, header_size)?;
    let dict = match inner.info.label_set {
        crate::info::LabelSet::Smpte => asdcp_dict::smpte(),
        crate::info::LabelSet::Interop => asdcp_dict::interop(),
    };

    let mut sub_descriptors = vec![sub_descriptor_to_md(desc)];
    if stereo {
        sub_descriptors.push(MetadataObject::StereoscopicPictureSubDescriptor(
            StereoscopicPictureSubDescriptor::default(),
        ));
    }

    // the stereoscopic file runs at twice the external sample rate
    let (edit_rate, tc_rate, label) = if stereo {
        (EDIT_RATE_48, derive_timecode_rate(desc.sample_rate), S_PACKAGE_LABEL)
    } else {
        (desc.edit_rate, derive_timecode_rate(desc.edit_rate), PACKAGE_LABEL)
    };

    inner.set_source_stream(SourceStreamConfig {
        package_label: label.into(),
        track_name: TRACK_NAME.into(),
        wrapping_ul: dict.ul(Mdd::Jpeg2000Wrapping),
        essence_ul: dict.ul(Mdd::Jpeg2000Essence).with_stream(0x01),
        data_definition: Mdd::PictureDataDef,
        edit_rate,
        tc_frame_rate: tc_rate,
        bytes_per_edit_unit: 0,
        descriptor: descriptor_to_md(desc, dict),
        sub_descriptors,
        cipher_key,
    })?;

    Ok(inner)
}

/// JPEG 2000 track-file writer.
pub struct MxfWriter {
    inner: TrackFileWriter,
}

impl MxfWriter {
    pub fn open_write<P: AsRef<Path>>(
        path: P,
        info: WriterInfo,
        desc: &PictureDescriptor,
        header_size: u32,
        cipher_key: Option<[u8; KEY_LENGTH]>,
    ) -> Result<Self> {
        Ok(Self { inner: open_common(path, info, desc, header_size, cipher_key, false)? })
    }

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

/// Which eye a stereoscopic frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StereoscopicPhase {
    Left,
    Right,
}

/// Stereoscopic JPEG 2000 writer: frames alternate Left, Right; the file
/// runs at 48 frames per second internally.
pub struct MxfStereoWriter {
    inner: TrackFileWriter,
    next_phase: StereoscopicPhase,
}

impl MxfStereoWriter {
    pub fn open_write<P: AsRef<Path>>(
        path: P,
        info: WriterInfo,
        desc: &PictureDescriptor,
        header_size: u32,
        cipher_key: Option<[u8; KEY_LENGTH]>,
    ) -> Result<Self> {
        if desc.sample_rate != EDIT_RATE_24 {
            return Err(Error::Format("stereoscopic wrapping requires 24 fps input streams".into()));
        }
        Ok(Self {
            inner: open_common(path, info, desc, header_size, cipher_key, true)?,
            next_phase: StereoscopicPhase::Left,
        })
    }

    /// Write one eye's frame. Phases must strictly alternate starting at
    /// Left.
    pub fn write_frame(&mut self, frame: &FrameBuffer, phase: StereoscopicPhase) -> Result<()> {
        if phase != self.next_phase {
            return Err(Error::State);
        }
        self.inner.write_frame(frame)?;
        self.next_phase = match phase {
            StereoscopicPhase::Left => StereoscopicPhase::Right,
            StereoscopicPhase::Right => StereoscopicPhase::Left,
        };
        Ok(())
    }

    /// Finalize; legal only when a full Left/Right pair has been written.
    pub fn finalize(&mut self) -> Result<()> {
        if self.next_phase != StereoscopicPhase::Left {
            return Err(Error::State);
        }
        self.inner.finalize()
    }
}

/// JPEG 2000 track-file reader.
pub struct MxfReader {
    inner: TrackFileReader,
    essence_ul: Ul,
}

impl MxfReader {
    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = TrackFileReader::open_read(path)?;
        let essence_ul = asdcp_dict::composite().ul(Mdd::Jpeg2000Essence).with_stream(0x01);
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

    pub fn reader(&self) -> &TrackFileReader {
        &self.inner
    }

    pub fn read_frame(&mut self, frame_num: u32, frame: &mut FrameBuffer) -> Result<()> {
        let essence_ul = self.essence_ul;
        self.inner.read_frame(frame_num, &essence_ul, frame)
    }

    pub fn locate_frame(&self, frame_num: u32) -> Result<(u64, i8, i8)> {
        self.inner.locate_frame(frame_num)
    }
}

/// Stereoscopic reader: frame numbering is external (24 fps), each frame
/// having a Left and a Right sub-frame.
pub struct MxfStereoReader {
    inner: MxfReader,
}

impl MxfStereoReader {
    pub fn open_read<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self { inner: MxfReader::open_read(path)? })
    }

    pub fn load_key(&mut self, key: &[u8; KEY_LENGTH]) {
        self.inner.load_key(key);
    }

    pub fn info(&self) -> &WriterInfo {
        self.inner.info()
    }

    /// Number of stereoscopic frame pairs.
    pub fn frame_pairs(&self) -> i64 {
        self.inner.frames() / 2
    }

    pub fn read_frame(
        &mut self,
        frame_num: u32,
        phase: StereoscopicPhase,
        frame: &mut FrameBuffer,
    ) -> Result<()> {
        let offset = match phase {
            StereoscopicPhase::Left => 0,
            StereoscopicPhase::Right => 1,
        };
        self.inner.read_frame(frame_num * 2 + offset, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_selects_compression_by_width() {
        let dict = asdcp_dict::smpte();
        let mut desc = PictureDescriptor::default();

        let MetadataObject::Jpeg2000PictureDescriptor(md) = descriptor_to_md(&desc, dict) else {
            panic!("wrong class");
        };
        assert_eq!(md.picture.picture_essence_coding, Some(dict.ul(Mdd::Jp2kEssenceCompression2k)));

        desc.xsiz = 4096;
        let MetadataObject::Jpeg2000PictureDescriptor(md) = descriptor_to_md(&desc, dict) else {
            panic!("wrong class");
        };
        assert_eq!(md.picture.picture_essence_coding, Some(dict.ul(Mdd::Jp2kEssenceCompression4k)));
    }
}
