//! Index Table Segments: per-frame stream offsets (VBR) or a single
//! edit-unit byte count (CBR).

use asdcp_core::{klv, Error, KlvPacket, MemReader, MemWriter, Result};
use asdcp_dict::{Dictionary, Mdd};
use tracing::{error, warn};
use uuid::Uuid;

use crate::primer::Primer;
use crate::tlv::{TlvReader, TlvWriter};
use crate::types::{Archive, Rational};

/// No single serialized segment may exceed this size.
pub const MAX_INDEX_SEGMENT_SIZE: usize = 65_536;

/// Entries per segment before the writer starts a new one; keeps segments
/// near 16 KiB.
const ENTRIES_PER_SEGMENT: usize = 1486;

/// Content-element layout entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaEntry {
    pub pos_table_index: i8,
    pub slice: u8,
    pub element_data: u32,
}

impl Default for DeltaEntry {
    fn default() -> Self {
        Self { pos_table_index: -1, slice: 0, element_data: 0 }
    }
}

impl Archive for DeltaEntry {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Self {
            pos_table_index: reader.read_u8()? as i8,
            slice: reader.read_u8()?,
            element_data: reader.read_u32_be()?,
        })
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_u8(self.pos_table_index as u8);
        writer.write_u8(self.slice);
        writer.write_u32_be(self.element_data);
    }

    fn archive_length() -> usize {
        6
    }
}

/// Flag bit marking a GOP start.
pub const FLAG_GOP_START: u8 = 0x40;
/// Flag bit marking a closed GOP.
pub const FLAG_CLOSED_GOP: u8 = 0x80;

/// One frame's index entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub temporal_offset: i8,
    /// Distance back to the last GOP start; derived from `flags` on load.
    pub key_frame_offset: i8,
    pub flags: u8,
    pub stream_offset: u64,
}

impl Archive for IndexEntry {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Self {
            temporal_offset: reader.read_u8()? as i8,
            key_frame_offset: reader.read_u8()? as i8,
            flags: reader.read_u8()?,
            stream_offset: reader.read_u64_be()?,
        })
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_u8(self.temporal_offset as u8);
        writer.write_u8(self.key_frame_offset as u8);
        writer.write_u8(self.flags);
        writer.write_u64_be(self.stream_offset);
    }

    fn archive_length() -> usize {
        11
    }
}

/// One Index Table Segment.
#[derive(Debug, Clone, Default)]
pub struct IndexTableSegment {
    pub instance_uid: Uuid,
    pub index_edit_rate: Rational,
    pub index_start_position: i64,
    pub index_duration: i64,
    /// Non-zero selects CBR mode; the entry arrays are then empty.
    pub edit_unit_byte_count: u32,
    pub index_sid: u32,
    pub body_sid: u32,
    pub slice_count: u8,
    pub pos_table_count: u8,
    pub delta_entries: Vec<DeltaEntry>,
    pub index_entries: Vec<IndexEntry>,
}

impl IndexTableSegment {
    /// Parse one segment from a full KLV packet in `buf`. Returns the
    /// segment and the packet length consumed.
    pub fn read_packet(buf: &[u8], primer: &Primer, dict: &Dictionary) -> Result<(Self, u64)> {
        let packet = KlvPacket::read_expected(buf, &dict.ul(Mdd::IndexTableSegment))?;
        let set = TlvReader::new(packet.value_slice(buf)?, primer, dict)?;

        let mut segment = Self {
            instance_uid: set.read_uuid(Mdd::InstanceUid)?.unwrap_or_default(),
            index_edit_rate: set.read_rational(Mdd::IndexEditRate)?.unwrap_or_default(),
            index_start_position: set.read_i64(Mdd::IndexStartPosition)?.unwrap_or(0),
            index_duration: set.read_i64(Mdd::IndexDuration)?.unwrap_or(0),
            edit_unit_byte_count: set.read_u32(Mdd::EditUnitByteCount)?.unwrap_or(0),
            index_sid: set.read_u32(Mdd::IndexSid)?.unwrap_or(0),
            body_sid: set.read_u32(Mdd::BodySid)?.unwrap_or(0),
            slice_count: set.read_u8(Mdd::SliceCount)?.unwrap_or(0),
            pos_table_count: set.read_u8(Mdd::PosTableCount)?.unwrap_or(0),
            delta_entries: set.read_batch(Mdd::DeltaEntryArray)?.unwrap_or_default(),
            index_entries: set.read_batch(Mdd::IndexEntryArray)?.unwrap_or_default(),
        };

        // derive key-frame offsets from the GOP-start flags
        let mut offset: i8 = 0;
        for entry in &mut segment.index_entries {
            if entry.flags & FLAG_GOP_START != 0 {
                offset = 0;
            }
            entry.key_frame_offset = offset;
            offset = offset.saturating_add(1);
        }

        Ok((segment, packet.packet_length()))
    }

    /// Serialize the segment as a KLV packet, registering tags in `primer`.
    pub fn write_packet(&self, out: &mut Vec<u8>, primer: &mut Primer, dict: &Dictionary) -> Result<()> {
        let mut set = TlvWriter::new(primer, dict);
        set.write_archive(Mdd::InstanceUid, &self.instance_uid)?;
        set.write_archive(Mdd::IndexEditRate, &self.index_edit_rate)?;
        set.write_i64(Mdd::IndexStartPosition, self.index_start_position)?;
        set.write_i64(Mdd::IndexDuration, self.index_duration)?;
        set.write_u32(Mdd::EditUnitByteCount, self.edit_unit_byte_count)?;
        set.write_u32(Mdd::IndexSid, self.index_sid)?;
        set.write_u32(Mdd::BodySid, self.body_sid)?;
        set.write_u8(Mdd::SliceCount, self.slice_count)?;
        set.write_u8(Mdd::PosTableCount, self.pos_table_count)?;
        set.write_batch(Mdd::DeltaEntryArray, &self.delta_entries)?;
        set.write_batch(Mdd::IndexEntryArray, &self.index_entries)?;
        let body = set.into_bytes();

        if klv::KL_LENGTH + body.len() > MAX_INDEX_SEGMENT_SIZE {
            return Err(Error::KlvCoding("index segment exceeds 64 KiB"));
        }

        klv::write_kl(out, &dict.ul(Mdd::IndexTableSegment), body.len() as u64, klv::MXF_BER_LENGTH)?;
        out.extend_from_slice(&body);
        Ok(())
    }
}

/// Writer-side accumulation and reader-side lookup over a set of index
/// segments.
#[derive(Debug, Default)]
pub struct IndexAccessor {
    pub segments: Vec<IndexTableSegment>,
    bytes_per_edit_unit: u32,
    edit_rate: Rational,
    current: Option<usize>,
}

impl IndexAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure CBR indexing: a single segment holding only the edit-unit
    /// byte count.
    pub fn set_params_cbr(&mut self, bytes_per_edit_unit: u32, edit_rate: Rational, body_sid: u32, rng: &mut asdcp_core::ValueRng) {
        self.bytes_per_edit_unit = bytes_per_edit_unit;
        self.edit_rate = edit_rate;

        self.segments.push(IndexTableSegment {
            instance_uid: rng.uuid(),
            index_edit_rate: edit_rate,
            edit_unit_byte_count: bytes_per_edit_unit,
            index_sid: 129,
            body_sid,
            ..IndexTableSegment::default()
        });
    }

    /// Configure VBR indexing; entries arrive through [`push_entry`].
    ///
    /// [`push_entry`]: Self::push_entry
    pub fn set_params_vbr(&mut self, edit_rate: Rational) {
        self.bytes_per_edit_unit = 0;
        self.edit_rate = edit_rate;
    }

    pub fn is_cbr(&self) -> bool {
        self.bytes_per_edit_unit != 0
    }

    /// Append one VBR entry, rolling to a new segment when the current one
    /// is full.
    pub fn push_entry(&mut self, entry: IndexEntry, body_sid: u32, rng: &mut asdcp_core::ValueRng) {
        if self.is_cbr() {
            error!("index entry pushed to a CBR index");
            return;
        }

        let roll = match self.current {
            None => true,
            Some(i) => self.segments[i].index_entries.len() >= ENTRIES_PER_SEGMENT,
        };

        if roll {
            let start = match self.current {
                Some(i) => {
                    let seg = &mut self.segments[i];
                    seg.index_duration = seg.index_entries.len() as i64;
                    seg.index_start_position + seg.index_duration
                }
                None => 0,
            };

            self.segments.push(IndexTableSegment {
                instance_uid: rng.uuid(),
                index_edit_rate: self.edit_rate,
                index_start_position: start,
                index_sid: 129,
                body_sid,
                delta_entries: vec![DeltaEntry::default()],
                ..IndexTableSegment::default()
            });
            self.current = Some(self.segments.len() - 1);
        }

        let i = self.current.expect("segment allocated above");
        self.segments[i].index_entries.push(entry);
    }

    /// Close out the current segment (VBR) or stamp the duration (CBR)
    /// before serialization.
    pub fn finish(&mut self, duration: i64) {
        if self.is_cbr() {
            if let Some(seg) = self.segments.first_mut() {
                seg.index_duration = duration;
            }
        } else if let Some(i) = self.current.take() {
            let seg = &mut self.segments[i];
            seg.index_duration = seg.index_entries.len() as i64;
        }
    }

    /// Byte offset lookup for frame `n`, per the segment walk: CBR
    /// segments answer `n * edit_unit_byte_count`; VBR segments answer
    /// when `n` falls inside their range.
    pub fn lookup(&self, frame_num: u32) -> Result<IndexEntry> {
        for (i, seg) in self.segments.iter().enumerate() {
            if seg.edit_unit_byte_count > 0 {
                if self.segments.len() > 1 {
                    warn!("unexpected multiple index segments in CBR file");
                }
                if !seg.index_entries.is_empty() {
                    warn!("unexpected index entries in CBR segment");
                }
                return Ok(IndexEntry {
                    stream_offset: u64::from(frame_num) * u64::from(seg.edit_unit_byte_count),
                    ..IndexEntry::default()
                });
            }

            let start = seg.index_start_position;
            let n = i64::from(frame_num);
            if n >= start && n < start + seg.index_duration {
                return Ok(seg.index_entries[(n - start) as usize]);
            }

            // an open final segment has no duration stamped yet
            if Some(i) == self.current {
                let rel = n - start;
                if rel >= 0 && (rel as usize) < seg.index_entries.len() {
                    return Ok(seg.index_entries[rel as usize]);
                }
            }
        }

        Err(Error::OutOfRange(frame_num))
    }

    /// Serialize all segments back-to-back.
    pub fn write_all(&self, out: &mut Vec<u8>, primer: &mut Primer, dict: &Dictionary) -> Result<()> {
        for seg in &self.segments {
            seg.write_packet(out, primer, dict)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asdcp_core::ValueRng;

    fn dict() -> &'static Dictionary {
        asdcp_dict::smpte()
    }

    fn vbr_with(n: usize) -> IndexAccessor {
        let mut rng = ValueRng::seeded(1);
        let mut acc = IndexAccessor::new();
        acc.set_params_vbr(crate::types::EDIT_RATE_24);
        for i in 0..n {
            acc.push_entry(
                IndexEntry { stream_offset: (i * 100) as u64, ..IndexEntry::default() },
                1,
                &mut rng,
            );
        }
        acc
    }

    #[test]
    fn vbr_lookup() {
        let mut acc = vbr_with(10);
        acc.finish(10);
        assert_eq!(acc.lookup(0).unwrap().stream_offset, 0);
        assert_eq!(acc.lookup(9).unwrap().stream_offset, 900);
        assert!(matches!(acc.lookup(10), Err(Error::OutOfRange(10))));
    }

    #[test]
    fn vbr_segments_roll_at_limit() {
        let mut acc = vbr_with(ENTRIES_PER_SEGMENT + 10);
        acc.finish((ENTRIES_PER_SEGMENT + 10) as i64);
        assert_eq!(acc.segments.len(), 2);
        assert_eq!(acc.segments[0].index_duration, ENTRIES_PER_SEGMENT as i64);
        assert_eq!(acc.segments[1].index_start_position, ENTRIES_PER_SEGMENT as i64);
        // entries in the second segment still resolve
        let n = (ENTRIES_PER_SEGMENT + 5) as u32;
        assert_eq!(acc.lookup(n).unwrap().stream_offset, u64::from(n) * 100);
    }

    #[test]
    fn cbr_lookup_ignores_entries() {
        let mut rng = ValueRng::seeded(2);
        let mut acc = IndexAccessor::new();
        acc.set_params_cbr(12_024, crate::types::EDIT_RATE_24, 1, &mut rng);
        acc.finish(24);
        assert_eq!(acc.lookup(0).unwrap().stream_offset, 0);
        assert_eq!(acc.lookup(23).unwrap().stream_offset, 23 * 12_024);
        assert_eq!(acc.segments[0].index_duration, 24);
    }

    #[test]
    fn segment_round_trip_derives_key_frame_offset() {
        let mut rng = ValueRng::seeded(3);
        let mut acc = IndexAccessor::new();
        acc.set_params_vbr(crate::types::EDIT_RATE_24);

        // GOP of three: I (start of closed GOP), P, B
        let flags = [FLAG_GOP_START | FLAG_CLOSED_GOP, 0x22, 0x33];
        for (i, &f) in flags.iter().enumerate() {
            acc.push_entry(
                IndexEntry { flags: f, stream_offset: (i * 10) as u64, ..IndexEntry::default() },
                1,
                &mut rng,
            );
        }
        acc.finish(3);

        let mut primer = Primer::new();
        let mut buf = Vec::new();
        acc.write_all(&mut buf, &mut primer, dict()).unwrap();

        let (seg, consumed) = IndexTableSegment::read_packet(&buf, &primer, dict()).unwrap();
        assert_eq!(consumed, buf.len() as u64);
        assert_eq!(seg.index_duration, 3);
        assert_eq!(seg.index_entries.len(), 3);
        // closed GOP start still resets the offset counter
        assert_eq!(seg.index_entries[0].key_frame_offset, 0);
        assert_eq!(seg.index_entries[1].key_frame_offset, 1);
        assert_eq!(seg.index_entries[2].key_frame_offset, 2);
        assert_eq!(seg.index_entries[2].stream_offset, 20);
    }
}
