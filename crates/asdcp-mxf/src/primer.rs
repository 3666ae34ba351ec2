//! The Primer Pack: the file-scoped map from 2-byte local tags to ULs.
//!
//! Writers register every UL they emit as a TLV tag; entries whose
//! dictionary slot carries no static tag get dynamic tags assigned downward
//! from `ff ff`. Readers rebuild the inverse map on load.

use std::collections::HashMap;

use asdcp_core::{klv, Error, KlvPacket, MemReader, MemWriter, Result, Ul};
use asdcp_dict::{Dictionary, Mdd, MddEntry};
use tracing::error;

use crate::types::Archive;

/// One `tag -> UL` registration.
#[derive(Debug, Clone, Copy)]
pub struct LocalTagEntry {
    pub tag: [u8; 2],
    pub ul: Ul,
}

impl Archive for LocalTagEntry {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        let tag = reader.read_array::<2>()?;
        let ul = Ul::unarchive(reader)?;
        Ok(Self { tag, ul })
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_raw(&self.tag);
        self.ul.archive(writer);
    }

    fn archive_length() -> usize {
        2 + asdcp_core::UL_LENGTH
    }
}

/// The Primer pack.
#[derive(Debug)]
pub struct Primer {
    entries: Vec<LocalTagEntry>,
    by_ul: HashMap<Ul, [u8; 2]>,
    by_tag: HashMap<[u8; 2], Ul>,
    next_dynamic: u8,
}

impl Primer {
    pub fn new() -> Self {
        Self { entries: Vec::new(), by_ul: HashMap::new(), by_tag: HashMap::new(), next_dynamic: 0xff }
    }

    pub fn entries(&self) -> &[LocalTagEntry] {
        &self.entries
    }

    /// Register `entry`, returning its tag. Entries without a static tag
    /// are assigned `ff xx`, counting down.
    pub fn insert(&mut self, entry: &MddEntry) -> Result<[u8; 2]> {
        if let Some(&tag) = self.by_ul.get(&entry.ul) {
            return Ok(tag);
        }

        let tag = if entry.has_static_tag() {
            entry.tag
        } else {
            let tag = [0xff, self.next_dynamic];
            self.next_dynamic = self
                .next_dynamic
                .checked_sub(1)
                .ok_or(Error::KlvCoding("dynamic local tag space exhausted"))?;
            tag
        };

        self.entries.push(LocalTagEntry { tag, ul: entry.ul });
        self.by_ul.insert(entry.ul, tag);
        self.by_tag.insert(tag, entry.ul);
        Ok(tag)
    }

    /// Tag for a UL already present in the map.
    pub fn tag_for_ul(&self, ul: &Ul) -> Option<[u8; 2]> {
        self.by_ul.get(ul).copied()
    }

    /// UL registered for a local tag.
    pub fn ul_for_tag(&self, tag: [u8; 2]) -> Option<Ul> {
        self.by_tag.get(&tag).copied()
    }

    /// Resolve the tag used for a dictionary entry in this file: primer map
    /// first, static tag as fallback for files that omit standard items.
    pub fn resolve(&self, entry: &MddEntry) -> Option<[u8; 2]> {
        match self.tag_for_ul(&entry.ul) {
            Some(tag) => Some(tag),
            None if entry.has_static_tag() => Some(entry.tag),
            None => None,
        }
    }

    /// Parse the Primer from the value region of its KLV packet.
    pub fn read_from(value: &[u8]) -> Result<Self> {
        let mut reader = MemReader::new(value);
        let entries = crate::types::read_batch::<LocalTagEntry>(&mut reader)?;

        let mut primer = Self::new();
        for entry in entries {
            primer.by_ul.insert(entry.ul, entry.tag);
            primer.by_tag.insert(entry.tag, entry.ul);
            primer.entries.push(entry);
        }
        Ok(primer)
    }

    /// Parse a full Primer KLV packet from a buffer.
    pub fn read_packet(buf: &[u8], dict: &Dictionary) -> Result<(Self, u64)> {
        let packet = KlvPacket::read_expected(buf, &dict.ul(Mdd::Primer))
            .inspect_err(|_| error!("failed to initialize Primer"))?;
        let primer = Self::read_from(packet.value_slice(buf)?)?;
        Ok((primer, packet.packet_length()))
    }

    /// Serialize the whole Primer KLV packet.
    pub fn write_to(&self, out: &mut Vec<u8>, dict: &Dictionary) -> Result<()> {
        let mut body = MemWriter::new();
        crate::types::write_batch(&mut body, &self.entries);
        klv::write_kl(out, &dict.ul(Mdd::Primer), body.len() as u64, klv::MXF_BER_LENGTH)?;
        out.extend_from_slice(body.as_slice());
        Ok(())
    }
}

impl Default for Primer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_tags_pass_through() {
        let dict = asdcp_dict::smpte();
        let mut primer = Primer::new();
        let tag = primer.insert(dict.entry(Mdd::InstanceUid)).unwrap();
        assert_eq!(tag, [0x3c, 0x0a]);
        // repeated insert returns the same tag without growing the batch
        assert_eq!(primer.insert(dict.entry(Mdd::InstanceUid)).unwrap(), tag);
        assert_eq!(primer.entries().len(), 1);
    }

    #[test]
    fn dynamic_tags_count_down() {
        let dict = asdcp_dict::smpte();
        let mut primer = Primer::new();
        let a = primer.insert(dict.entry(Mdd::Mpeg2ClosedGop)).unwrap();
        let b = primer.insert(dict.entry(Mdd::Mpeg2MaxGop)).unwrap();
        assert_eq!(a, [0xff, 0xff]);
        assert_eq!(b, [0xff, 0xfe]);
    }

    #[test]
    fn packet_round_trip() {
        let dict = asdcp_dict::smpte();
        let mut primer = Primer::new();
        primer.insert(dict.entry(Mdd::InstanceUid)).unwrap();
        primer.insert(dict.entry(Mdd::Mpeg2BitRate)).unwrap();

        let mut buf = Vec::new();
        primer.write_to(&mut buf, dict).unwrap();

        let (reloaded, consumed) = Primer::read_packet(&buf, dict).unwrap();
        assert_eq!(consumed, buf.len() as u64);
        assert_eq!(reloaded.entries().len(), 2);
        assert_eq!(reloaded.ul_for_tag([0x3c, 0x0a]), Some(dict.ul(Mdd::InstanceUid)));
        assert_eq!(reloaded.tag_for_ul(&dict.ul(Mdd::Mpeg2BitRate)), Some([0xff, 0xff]));
    }
}
