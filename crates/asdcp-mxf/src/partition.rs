//! Partition packs and the Random Index Pack.

use std::io::{Read, Seek, SeekFrom, Write};

use asdcp_core::{klv, Error, KlvFilePacket, MemReader, MemWriter, ReadSeek, Result, Ul};
use asdcp_dict::{Dictionary, Mdd};
use tracing::error;

use crate::types::{self, Archive};

/// The fixed-layout partition pack. The partition variant (Header / Body /
/// Footer, open/closed, complete/incomplete) is conveyed only by the KLV
/// key it is written under.
#[derive(Debug, Clone)]
pub struct Partition {
    pub major_version: u16,
    pub minor_version: u16,
    pub kag_size: u32,
    pub this_partition: u64,
    pub previous_partition: u64,
    pub footer_partition: u64,
    pub header_byte_count: u64,
    pub index_byte_count: u64,
    pub index_sid: u32,
    pub body_offset: u64,
    pub body_sid: u32,
    pub operational_pattern: Ul,
    pub essence_containers: Vec<Ul>,
}

impl Default for Partition {
    fn default() -> Self {
        Self {
            major_version: 1,
            minor_version: 2,
            kag_size: 1,
            this_partition: 0,
            previous_partition: 0,
            footer_partition: 0,
            header_byte_count: 0,
            index_byte_count: 0,
            index_sid: 0,
            body_offset: 0,
            body_sid: 0,
            operational_pattern: Ul::default(),
            essence_containers: Vec::new(),
        }
    }
}

impl Partition {
    /// Read one partition pack at the reader's current position, returning
    /// the pack and the key it was written under.
    pub fn read_from<R: ReadSeek + ?Sized>(reader: &mut R) -> Result<(Self, Ul)> {
        let packet = KlvFilePacket::read_from(reader)
            .inspect_err(|_| error!("failed to initialize Partition"))?;
        let partition = Self::read_value(&packet.value)?;
        Ok((partition, packet.key))
    }

    fn read_value(value: &[u8]) -> Result<Self> {
        let mut r = MemReader::new(value);
        Ok(Self {
            major_version: r.read_u16_be()?,
            minor_version: r.read_u16_be()?,
            kag_size: r.read_u32_be()?,
            this_partition: r.read_u64_be()?,
            previous_partition: r.read_u64_be()?,
            footer_partition: r.read_u64_be()?,
            header_byte_count: r.read_u64_be()?,
            index_byte_count: r.read_u64_be()?,
            index_sid: r.read_u32_be()?,
            body_offset: r.read_u64_be()?,
            body_sid: r.read_u32_be()?,
            operational_pattern: Ul::unarchive(&mut r)?,
            essence_containers: types::read_batch(&mut r)?,
        })
    }

    /// Write the partition pack under `key`. Returns the bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W, key: &Ul) -> Result<u64> {
        let mut body = MemWriter::with_capacity(self.archive_size());
        body.write_u16_be(self.major_version);
        body.write_u16_be(self.minor_version);
        body.write_u32_be(self.kag_size);
        body.write_u64_be(self.this_partition);
        body.write_u64_be(self.previous_partition);
        body.write_u64_be(self.footer_partition);
        body.write_u64_be(self.header_byte_count);
        body.write_u64_be(self.index_byte_count);
        body.write_u32_be(self.index_sid);
        body.write_u64_be(self.body_offset);
        body.write_u32_be(self.body_sid);
        self.operational_pattern.archive(&mut body);
        types::write_batch(&mut body, &self.essence_containers);

        let kl = klv::write_kl_to_file(writer, key, body.len() as u64, klv::MXF_BER_LENGTH)?;
        writer.write_all(body.as_slice())?;
        Ok(kl + body.len() as u64)
    }

    /// Total on-disk size of the pack, including its KL header.
    pub fn archive_size(&self) -> usize {
        klv::KL_LENGTH
            + 2 + 2            // versions
            + 4                // kag
            + 8 * 5            // partition offsets and byte counts
            + 4                // index sid
            + 8                // body offset
            + 4                // body sid
            + asdcp_core::UL_LENGTH
            + 4 + 4            // batch header
            + asdcp_core::UL_LENGTH * self.essence_containers.len()
    }
}

/// One `(BodySID, byte offset)` pair in the RIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RipEntry {
    pub body_sid: u32,
    pub byte_offset: u64,
}

impl RipEntry {
    pub const fn new(body_sid: u32, byte_offset: u64) -> Self {
        Self { body_sid, byte_offset }
    }
}

impl Archive for RipEntry {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Self { body_sid: reader.read_u32_be()?, byte_offset: reader.read_u64_be()? })
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_u32_be(self.body_sid);
        writer.write_u64_be(self.byte_offset);
    }

    fn archive_length() -> usize {
        12
    }
}

/// The Random Index Pack at the tail of the file.
#[derive(Debug, Default)]
pub struct Rip {
    pub entries: Vec<RipEntry>,
}

impl Rip {
    /// The first entry whose BodySID equals `sid`.
    pub fn entry_by_sid(&self, sid: u32) -> Option<&RipEntry> {
        self.entries.iter().find(|p| p.body_sid == sid)
    }

    /// Highest BodySID present in the pack.
    pub fn max_body_sid(&self) -> u32 {
        self.entries.iter().map(|p| p.body_sid).max().unwrap_or(0)
    }

    /// Read the RIP packet at the reader's current position (use
    /// [`seek_to_rip`] first).
    pub fn read_from<R: ReadSeek + ?Sized>(reader: &mut R, dict: &Dictionary) -> Result<Self> {
        let packet = KlvFilePacket::read_expected(reader, &dict.ul(Mdd::RandomIndexMetadata))
            .inspect_err(|_| error!("failed to initialize RIP"))?;

        if packet.value.len() < 4 {
            return Err(Error::Format("RIP value shorter than its length word".into()));
        }

        // value = pairs ++ trailing u32 total length
        let pair_region = &packet.value[..packet.value.len() - 4];
        let mut r = MemReader::new(pair_region);
        let mut entries = Vec::new();
        while r.remainder() >= RipEntry::archive_length() {
            entries.push(RipEntry::unarchive(&mut r)?);
        }

        Ok(Self { entries })
    }

    /// Write the RIP packet, with the trailing word equal to the total
    /// packet length so readers can locate the pack from the end of file.
    pub fn write_to<W: Write>(&self, writer: &mut W, dict: &Dictionary) -> Result<()> {
        let value_len = self.entries.len() * RipEntry::archive_length() + 4;

        let mut body = MemWriter::with_capacity(value_len);
        for entry in &self.entries {
            entry.archive(&mut body);
        }
        body.write_u32_be((value_len + klv::KL_LENGTH) as u32);

        klv::write_kl_to_file(writer, &dict.ul(Mdd::RandomIndexMetadata), value_len as u64, klv::MXF_BER_LENGTH)?;
        writer.write_all(body.as_slice())?;
        Ok(())
    }
}

/// Position `reader` at the first byte of the RIP KLV packet using the
/// end-of-file protocol: the last four bytes of the file hold the RIP's
/// total length.
pub fn seek_to_rip<R: ReadSeek + ?Sized>(reader: &mut R) -> Result<()> {
    let end_pos = reader.seek(SeekFrom::End(0))?;

    if end_pos < (klv::KL_LENGTH) as u64 {
        return Err(Error::Format("file is smaller than an empty packet".into()));
    }

    reader.seek(SeekFrom::End(-4))?;
    let mut word = [0u8; 4];
    reader.read_exact(&mut word)?;
    let rip_size = u64::from(u32::from_be_bytes(word));

    if rip_size > end_pos {
        return Err(Error::Format(format!("RIP length {rip_size} exceeds file size {end_pos}")));
    }

    reader.seek(SeekFrom::Start(end_pos - rip_size))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn dict() -> &'static Dictionary {
        asdcp_dict::smpte()
    }

    #[test]
    fn partition_round_trip() {
        let mut part = Partition::default();
        part.this_partition = 16_384;
        part.footer_partition = 99_000;
        part.header_byte_count = 16_000;
        part.body_sid = 1;
        part.operational_pattern = dict().ul(Mdd::OpAtom);
        part.essence_containers = vec![dict().ul(Mdd::Mpeg2VesWrapping)];

        let mut buf = Vec::new();
        let written = part.write_to(&mut buf, &dict().ul(Mdd::ClosedCompleteHeader)).unwrap();
        assert_eq!(written, buf.len() as u64);
        assert_eq!(buf.len(), part.archive_size());

        let mut cur = Cursor::new(buf);
        let (reread, key) = Partition::read_from(&mut cur).unwrap();
        assert_eq!(key, dict().ul(Mdd::ClosedCompleteHeader));
        assert_eq!(reread.this_partition, 16_384);
        assert_eq!(reread.footer_partition, 99_000);
        assert_eq!(reread.essence_containers, part.essence_containers);
    }

    #[test]
    fn rip_round_trip_via_eof_protocol() {
        let rip = Rip {
            entries: vec![
                RipEntry::new(0, 0),
                RipEntry::new(1, 16_384),
                RipEntry::new(0, 99_000),
            ],
        };

        // simulate some file content before the RIP
        let mut buf = vec![0u8; 100];
        {
            let mut cur = Cursor::new(&mut buf);
            cur.seek(SeekFrom::End(0)).unwrap();
            rip.write_to(&mut cur, dict()).unwrap();
        }

        let mut cur = Cursor::new(buf);
        seek_to_rip(&mut cur).unwrap();
        assert_eq!(cur.position(), 100);
        let reread = Rip::read_from(&mut cur, dict()).unwrap();
        assert_eq!(reread.entries, rip.entries);
        assert_eq!(reread.entry_by_sid(1).unwrap().byte_offset, 16_384);
        assert_eq!(reread.max_body_sid(), 1);
    }

    #[test]
    fn rip_bigger_than_file_rejected() {
        let mut buf = vec![0u8; 40];
        let len = buf.len();
        buf[len - 4..].copy_from_slice(&10_000u32.to_be_bytes());
        let mut cur = Cursor::new(buf);
        assert!(seek_to_rip(&mut cur).is_err());
    }
}
