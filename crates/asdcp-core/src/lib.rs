//! Low-level primitives for AS-DCP/MXF track files:
//!
//! - [`MemReader`] / [`MemWriter`] - bounded big/little-endian cursors
//! - [`ber`] - BER length codec (4-9 octet long form)
//! - [`Ul`] / [`Umid`] - SMPTE identifiers
//! - [`KlvPacket`] / [`KlvFilePacket`] - KLV framing over memory and files
//! - [`Error`] - the error kinds shared by the track-file crates
//!
//! # Example
//!
//! ```
//! use asdcp_core::{klv, Ul};
//!
//! let key = Ul::new([
//!     0x06, 0x0e, 0x2b, 0x34, 0x01, 0x02, 0x01, 0x01,
//!     0x0d, 0x01, 0x03, 0x01, 0x15, 0x01, 0x05, 0x00,
//! ]);
//!
//! let mut packet = Vec::new();
//! klv::write_kl(&mut packet, &key, 3, klv::MXF_BER_LENGTH).unwrap();
//! packet.extend_from_slice(b"abc");
//!
//! let parsed = asdcp_core::KlvPacket::read_from(&packet).unwrap();
//! assert_eq!(parsed.key, key);
//! assert_eq!(&packet[parsed.value_range()], b"abc");
//! ```

pub mod ber;
mod bytes;
mod error;
pub mod hex;
mod identifier;
pub mod klv;
mod rng;

pub use bytes::{MemReader, MemWriter};
pub use error::{Error, Result};
pub use identifier::{Ul, Umid, NIL_UMID, UL_LENGTH, UMID_LENGTH, UUID_LENGTH};
pub use klv::{KlReader, KlvFilePacket, KlvPacket, ReadSeek};
pub use rng::ValueRng;
