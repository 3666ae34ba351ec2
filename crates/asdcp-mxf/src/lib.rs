//! AS-DCP / MXF track-file codec.
//!
//! This crate reads and writes the MXF container variant used by Digital
//! Cinema Packages: one essence kind per file, wrapped per the SMPTE
//! ST 377 / ST 429 families, optionally encrypted per ST 429-6.
//!
//! Layers, bottom up:
//!
//! - [`types`] / [`tlv`] / [`primer`] - the Primer-driven TLV set codec
//! - [`metadata`] - the header-metadata object graph
//! - [`partition`] / [`index`] - partitions, the RIP and the index table
//! - [`crypto`] - the ST 429-6 encrypted-triplet frame codec
//! - [`writer`] / [`reader`] - the track-file state machines
//! - [`mpeg2`] / [`jp2k`] / [`pcm`] - per-essence front ends
//!
//! # Example
//!
//! ```no_run
//! use asdcp_mxf::frame::FrameBuffer;
//! use asdcp_mxf::info::WriterInfo;
//! use asdcp_mxf::jp2k;
//! use asdcp_mxf::writer::DEFAULT_HEADER_SIZE;
//!
//! # fn demo(codestreams: Vec<Vec<u8>>) -> asdcp_core::Result<()> {
//! let desc = jp2k::PictureDescriptor::default();
//! let mut writer = jp2k::MxfWriter::open_write(
//!     "out.mxf",
//!     WriterInfo::for_this_toolkit(),
//!     &desc,
//!     DEFAULT_HEADER_SIZE,
//!     None,
//! )?;
//!
//! for codestream in &codestreams {
//!     writer.write_frame(&FrameBuffer::from_slice(codestream))?;
//! }
//! writer.finalize()?;
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod frame;
pub mod index;
pub mod info;
pub mod jp2k;
pub mod metadata;
pub mod mpeg2;
pub mod partition;
pub mod pcm;
pub mod primer;
pub mod reader;
pub mod tlv;
pub mod types;
pub mod writer;

pub use asdcp_core::{Error, Result};
pub use frame::{FrameBuffer, FrameType};
pub use info::{LabelSet, WriterInfo};
pub use reader::{essence_type, EssenceType, TrackFileReader};
pub use writer::{TrackFileWriter, DEFAULT_HEADER_SIZE};
