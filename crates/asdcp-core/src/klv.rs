//! KLV packet framing.
//!
//! A KLV packet is a 16-octet Universal Label key, a BER-encoded length and
//! the value bytes. Keys begin with the fixed SMPTE preamble
//! `06 0e 2b 34`.

use std::io::{Read, Seek, SeekFrom, Write};

use tracing::warn;

use crate::ber;
use crate::identifier::{Ul, UL_LENGTH};
use crate::{Error, Result};

/// Combined trait for Read + Seek trait objects.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// First four octets of every SMPTE Universal Label.
pub const SMPTE_UL_START: [u8; 4] = [0x06, 0x0e, 0x2b, 0x34];

/// Default BER length width used by the writer.
pub const MXF_BER_LENGTH: usize = 4;

/// Width of a TLV local tag.
pub const MXF_TAG_LENGTH: usize = 2;

/// Key + default-width length.
pub const KL_LENGTH: usize = UL_LENGTH + MXF_BER_LENGTH;

/// Packets longer than this are refused as malformed.
pub const MAX_KLV_PACKET_LENGTH: u64 = 64 * 1024 * 1024;

/// Read size used to pick up K, L and the first TLV tags in one call.
const PREFETCH_SIZE: usize = 32;

/// Descriptor of a KLV packet located inside a memory buffer.
#[derive(Debug, Clone, Copy)]
pub struct KlvPacket {
    pub key: Ul,
    /// Bytes occupied by the key and the BER length.
    pub kl_length: usize,
    /// Length of the value region.
    pub value_length: u64,
}

impl KlvPacket {
    /// Parse the K and L at the head of `buf`. The value region is
    /// `buf[kl_length .. kl_length + value_length]` and is not touched.
    pub fn read_from(buf: &[u8]) -> Result<Self> {
        if buf.len() < UL_LENGTH + 1 {
            return Err(Error::UnexpectedEof { need: UL_LENGTH + 1, have: buf.len() });
        }
        if buf[..4] != SMPTE_UL_START {
            return Err(Error::BadPreamble(buf[0], buf[1], buf[2], buf[3]));
        }

        let key = Ul::from_slice(&buf[..UL_LENGTH]).expect("length checked");
        let (value_length, ber_len) = ber::decode_ber(&buf[UL_LENGTH..])?;

        if value_length > MAX_KLV_PACKET_LENGTH {
            return Err(Error::PacketTooLarge(value_length));
        }

        Ok(Self { key, kl_length: UL_LENGTH + ber_len, value_length })
    }

    /// Parse the K and L and require the key to equal `label`.
    pub fn read_expected(buf: &[u8], label: &Ul) -> Result<Self> {
        let packet = Self::read_from(buf)?;
        if packet.key != *label {
            return Err(Error::Format(format!("expected key {label}, found {}", packet.key)));
        }
        Ok(packet)
    }

    pub fn packet_length(&self) -> u64 {
        self.kl_length as u64 + self.value_length
    }

    /// The value region within the buffer this packet was parsed from.
    pub fn value_range(&self) -> std::ops::Range<usize> {
        self.kl_length..self.kl_length + self.value_length as usize
    }

    /// The value bytes within `buf`, verifying the declared length does
    /// not overrun the buffer.
    pub fn value_slice<'a>(&self, buf: &'a [u8]) -> Result<&'a [u8]> {
        let range = self.value_range();
        if range.end > buf.len() {
            return Err(Error::UnexpectedEof { need: range.end, have: buf.len() });
        }
        Ok(&buf[range])
    }
}

/// A KLV packet read whole from a file into an owned buffer.
#[derive(Debug)]
pub struct KlvFilePacket {
    pub key: Ul,
    pub kl_length: usize,
    pub value: Vec<u8>,
}

impl KlvFilePacket {
    /// Read one packet at the reader's current position, loading the entire
    /// value into memory. On return the reader is positioned at the first
    /// byte after the packet.
    pub fn read_from<R: ReadSeek + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut tmp = [0u8; PREFETCH_SIZE];
        let read_count = read_up_to(reader, &mut tmp)?;

        if read_count < UL_LENGTH + 1 {
            return Err(Error::UnexpectedEof { need: UL_LENGTH + 1, have: read_count });
        }

        let head = KlvPacket::read_from(&tmp[..read_count])?;
        let value_length = head.value_length as usize;
        let packet_length = head.kl_length + value_length;

        let mut value = vec![0u8; value_length];

        if packet_length <= read_count {
            // whole packet fits in the prefetch; back up over the excess
            value.copy_from_slice(&tmp[head.kl_length..packet_length]);
            let excess = (read_count - packet_length) as i64;
            if excess > 0 {
                reader.seek(SeekFrom::Current(-excess))?;
            }
        } else {
            let in_prefetch = read_count - head.kl_length;
            value[..in_prefetch].copy_from_slice(&tmp[head.kl_length..read_count]);
            reader.read_exact(&mut value[in_prefetch..])?;
        }

        Ok(Self { key: head.key, kl_length: head.kl_length, value })
    }

    /// As [`read_from`], requiring the key to equal `label`.
    ///
    /// [`read_from`]: Self::read_from
    pub fn read_expected<R: ReadSeek + ?Sized>(reader: &mut R, label: &Ul) -> Result<Self> {
        let packet = Self::read_from(reader)?;
        if packet.key != *label {
            return Err(Error::Format(format!("expected key {label}, found {}", packet.key)));
        }
        Ok(packet)
    }

    pub fn packet_length(&self) -> u64 {
        self.kl_length as u64 + self.value.len() as u64
    }
}

/// Key and length of a packet whose value stays on disk; used by readers
/// that want to size a frame buffer before committing to the read.
#[derive(Debug, Clone, Copy)]
pub struct KlReader {
    pub key: Ul,
    pub kl_length: usize,
    pub value_length: u64,
}

impl KlReader {
    /// Read K and L only, leaving the reader positioned at the value start.
    pub fn read_from<R: ReadSeek + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut tmp = [0u8; PREFETCH_SIZE];
        let read_count = read_up_to(reader, &mut tmp)?;

        if read_count < UL_LENGTH + 1 {
            return Err(Error::UnexpectedEof { need: UL_LENGTH + 1, have: read_count });
        }

        let head = KlvPacket::read_from(&tmp[..read_count])?;
        let excess = (read_count - head.kl_length) as i64;
        if excess > 0 {
            reader.seek(SeekFrom::Current(-excess))?;
        }

        Ok(Self { key: head.key, kl_length: head.kl_length, value_length: head.value_length })
    }
}

/// Append key + BER length to a buffer. `min_ber_length` is escalated
/// automatically when the value needs more room.
pub fn write_kl(out: &mut Vec<u8>, key: &Ul, length: u64, min_ber_length: usize) -> Result<()> {
    let width = required_ber_length(length, min_ber_length)?;
    out.extend_from_slice(key.as_bytes());
    ber::encode_ber(out, length, width)?;
    Ok(())
}

/// Write key + BER length straight to a file.
pub fn write_kl_to_file<W: Write>(
    writer: &mut W,
    key: &Ul,
    length: u64,
    min_ber_length: usize,
) -> Result<u64> {
    let mut buf = Vec::with_capacity(KL_LENGTH + 5);
    write_kl(&mut buf, key, length, min_ber_length)?;
    writer.write_all(&buf)?;
    Ok(buf.len() as u64)
}

/// The BER width the writer will use for `length` given its configured
/// minimum.
pub fn required_ber_length(length: u64, min_ber_length: usize) -> Result<usize> {
    if min_ber_length < 2 || min_ber_length > 9 {
        return Err(Error::KlvCoding("BER width out of range"));
    }
    let needed = ber::ber_length_for(length);
    Ok(needed.max(min_ber_length))
}

/// Fill the region between the current position and `end` with a KLV Fill
/// packet (zero-valued body).
pub fn write_fill<W: Write>(writer: &mut W, fill_key: &Ul, total_length: u64) -> Result<()> {
    if total_length < KL_LENGTH as u64 {
        return Err(Error::KlvCoding("fill region smaller than a KL header"));
    }
    let body = total_length - KL_LENGTH as u64;
    write_kl_to_file(writer, fill_key, body, MXF_BER_LENGTH)?;
    writer.write_all(&vec![0u8; body as usize])?;
    Ok(())
}

fn read_up_to<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    if filled < buf.len() {
        warn!(got = filled, "short read of KLV prefetch");
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const KEY: Ul = Ul::new([
        0x06, 0x0e, 0x2b, 0x34, 0x01, 0x02, 0x01, 0x01, 0x0d, 0x01, 0x03, 0x01, 0x15, 0x01, 0x05,
        0x00,
    ]);

    fn sample_packet(body: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_kl(&mut buf, &KEY, body.len() as u64, MXF_BER_LENGTH).unwrap();
        buf.extend_from_slice(body);
        buf
    }

    #[test]
    fn parse_from_slice() {
        let buf = sample_packet(b"payload");
        let packet = KlvPacket::read_from(&buf).unwrap();
        assert_eq!(packet.key, KEY);
        assert_eq!(packet.kl_length, 20);
        assert_eq!(packet.value_length, 7);
        assert_eq!(&buf[packet.value_range()], b"payload");
    }

    #[test]
    fn bad_preamble() {
        let mut buf = sample_packet(b"x");
        buf[0] = 0x07;
        assert!(matches!(KlvPacket::read_from(&buf), Err(Error::BadPreamble(..))));
    }

    #[test]
    fn oversize_packet_refused() {
        let mut buf = Vec::new();
        buf.extend_from_slice(KEY.as_bytes());
        ber::encode_ber(&mut buf, MAX_KLV_PACKET_LENGTH + 1, 8).unwrap();
        assert!(matches!(KlvPacket::read_from(&buf), Err(Error::PacketTooLarge(_))));
    }

    #[test]
    fn file_packet_short_body() {
        // packet smaller than the prefetch window, followed by another key
        let mut data = sample_packet(b"abc");
        let second = data.len();
        data.extend_from_slice(&sample_packet(b"defg"));

        let mut cur = Cursor::new(data);
        let packet = KlvFilePacket::read_from(&mut cur).unwrap();
        assert_eq!(packet.value, b"abc");
        assert_eq!(cur.position(), second as u64);

        let packet = KlvFilePacket::read_from(&mut cur).unwrap();
        assert_eq!(packet.value, b"defg");
    }

    #[test]
    fn file_packet_long_body() {
        let body: Vec<u8> = (0..1000u32).map(|i| i as u8).collect();
        let data = sample_packet(&body);
        let mut cur = Cursor::new(data);
        let packet = KlvFilePacket::read_from(&mut cur).unwrap();
        assert_eq!(packet.value, body);
    }

    #[test]
    fn kl_reader_positions_at_value() {
        let data = sample_packet(b"zzzz");
        let mut cur = Cursor::new(data);
        let kl = KlReader::read_from(&mut cur).unwrap();
        assert_eq!(kl.value_length, 4);
        assert_eq!(cur.position(), kl.kl_length as u64);
    }

    #[test]
    fn ber_width_escalates() {
        assert_eq!(required_ber_length(10, MXF_BER_LENGTH).unwrap(), 4);
        assert_eq!(required_ber_length(0x0100_0000, MXF_BER_LENGTH).unwrap(), 8);
    }

    #[test]
    fn write_fill_layout() {
        let mut out = Vec::new();
        write_fill(&mut out, &KEY, 64).unwrap();
        assert_eq!(out.len(), 64);
        let packet = KlvPacket::read_from(&out).unwrap();
        assert_eq!(packet.packet_length(), 64);
    }
}
