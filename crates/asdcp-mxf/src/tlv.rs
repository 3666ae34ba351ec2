//! Primer-driven TLV set codec.
//!
//! The value region of a header-metadata KLV packet is a sequence of
//! `(tag, length, value)` items, where each 2-byte tag resolves through the
//! Primer to a UL and through the dictionary to a typed field. Item order
//! within a set is not significant on read; the writer emits items in the
//! order dictated by each object class.

use std::collections::HashMap;

use asdcp_core::{Error, MemReader, MemWriter, Result, Ul, Umid};
use asdcp_dict::{Dictionary, Mdd};
use tracing::{debug, error};
use uuid::Uuid;

use crate::primer::Primer;
use crate::types::{self, Archive, Rational, Timestamp, VersionType};

/// Reader over one TLV set.
pub struct TlvReader<'a> {
    buf: &'a [u8],
    items: HashMap<[u8; 2], (usize, usize)>,
    primer: &'a Primer,
    dict: &'a Dictionary,
}

impl<'a> TlvReader<'a> {
    /// Pre-scan the set, building the tag map. Fails with `KlvCoding` when
    /// an item overruns the region.
    pub fn new(buf: &'a [u8], primer: &'a Primer, dict: &'a Dictionary) -> Result<Self> {
        let mut items = HashMap::new();
        let mut pos = 0usize;

        while pos < buf.len() {
            if buf.len() - pos < 4 {
                error!("malformed set");
                return Err(Error::KlvCoding("truncated TLV item head"));
            }
            let tag = [buf[pos], buf[pos + 1]];
            let len = u16::from_be_bytes([buf[pos + 2], buf[pos + 3]]) as usize;
            pos += 4;

            if buf.len() - pos < len {
                error!("malformed set");
                return Err(Error::KlvCoding("TLV item overruns set"));
            }
            items.insert(tag, (pos, len));
            pos += len;
        }

        Ok(Self { buf, items, primer, dict })
    }

    /// The raw value of the item for a dictionary entry, if present.
    pub fn find(&self, id: Mdd) -> Option<&'a [u8]> {
        let entry = self.dict.entry(id);
        let tag = self.primer.resolve(entry)?;
        let &(offset, len) = self.items.get(&tag)?;
        if len == 0 {
            return None;
        }
        Some(&self.buf[offset..offset + len])
    }

    fn read_with<T>(
        &self,
        id: Mdd,
        f: impl FnOnce(&mut MemReader<'a>) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.find(id) {
            Some(value) => Ok(Some(f(&mut MemReader::new(value))?)),
            None => Ok(None),
        }
    }

    pub fn read_u8(&self, id: Mdd) -> Result<Option<u8>> {
        self.read_with(id, |r| r.read_u8())
    }

    pub fn read_u16(&self, id: Mdd) -> Result<Option<u16>> {
        self.read_with(id, |r| r.read_u16_be())
    }

    pub fn read_u32(&self, id: Mdd) -> Result<Option<u32>> {
        self.read_with(id, |r| r.read_u32_be())
    }

    pub fn read_u64(&self, id: Mdd) -> Result<Option<u64>> {
        self.read_with(id, |r| r.read_u64_be())
    }

    pub fn read_i8(&self, id: Mdd) -> Result<Option<i8>> {
        Ok(self.read_u8(id)?.map(|v| v as i8))
    }

    pub fn read_i64(&self, id: Mdd) -> Result<Option<i64>> {
        Ok(self.read_u64(id)?.map(|v| v as i64))
    }

    pub fn read_ul(&self, id: Mdd) -> Result<Option<Ul>> {
        self.read_with(id, Ul::unarchive)
    }

    pub fn read_uuid(&self, id: Mdd) -> Result<Option<Uuid>> {
        self.read_with(id, Uuid::unarchive)
    }

    pub fn read_umid(&self, id: Mdd) -> Result<Option<Umid>> {
        self.read_with(id, Umid::unarchive)
    }

    pub fn read_timestamp(&self, id: Mdd) -> Result<Option<Timestamp>> {
        self.read_with(id, Timestamp::unarchive)
    }

    pub fn read_rational(&self, id: Mdd) -> Result<Option<Rational>> {
        self.read_with(id, Rational::unarchive)
    }

    pub fn read_version(&self, id: Mdd) -> Result<Option<VersionType>> {
        self.read_with(id, VersionType::unarchive)
    }

    pub fn read_string(&self, id: Mdd) -> Result<Option<String>> {
        Ok(self.find(id).map(types::read_utf16))
    }

    pub fn read_batch<T: Archive>(&self, id: Mdd) -> Result<Option<Vec<T>>> {
        self.read_with(id, types::read_batch)
    }

    pub fn read_array<T: Archive>(&self, id: Mdd) -> Result<Option<Vec<T>>> {
        self.read_with(id, types::read_array)
    }

    pub fn read_raw(&self, id: Mdd) -> Result<Option<Vec<u8>>> {
        Ok(self.find(id).map(<[u8]>::to_vec))
    }

    /// Log tags present in the set that resolve to no dictionary entry;
    /// they are skipped for forward compatibility.
    pub fn log_unknown_items(&self) {
        for tag in self.items.keys() {
            let known = self
                .primer
                .ul_for_tag(*tag)
                .is_some_and(|ul| self.dict.find_ul(&ul).is_some());
            if !known {
                debug!(tag = %format_args!("{:02x}.{:02x}", tag[0], tag[1]), "skipping unknown item");
            }
        }
    }
}

/// Writer for one TLV set. Values go through [`MemWriter`]; the 2-byte
/// length of each item is patched after the value is written.
pub struct TlvWriter<'a> {
    out: MemWriter,
    primer: &'a mut Primer,
    dict: &'a Dictionary,
}

impl<'a> TlvWriter<'a> {
    pub fn new(primer: &'a mut Primer, dict: &'a Dictionary) -> Self {
        Self { out: MemWriter::new(), primer, dict }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out.into_vec()
    }

    fn write_item(&mut self, id: Mdd, f: impl FnOnce(&mut MemWriter)) -> Result<()> {
        let entry = self.dict.entry(id);
        let tag = self.primer.insert(entry)?;
        self.out.write_raw(&tag);

        let patch_at = self.out.len();
        self.out.write_u16_be(0);
        let before = self.out.len();
        f(&mut self.out);
        let len = self.out.len() - before;

        let len = u16::try_from(len).map_err(|_| Error::KlvCoding("TLV item exceeds 64 KiB"))?;
        self.out.patch_u16_be(patch_at, len)
    }

    pub fn write_u8(&mut self, id: Mdd, v: u8) -> Result<()> {
        self.write_item(id, |w| w.write_u8(v))
    }

    pub fn write_u16(&mut self, id: Mdd, v: u16) -> Result<()> {
        self.write_item(id, |w| w.write_u16_be(v))
    }

    pub fn write_u32(&mut self, id: Mdd, v: u32) -> Result<()> {
        self.write_item(id, |w| w.write_u32_be(v))
    }

    pub fn write_u64(&mut self, id: Mdd, v: u64) -> Result<()> {
        self.write_item(id, |w| w.write_u64_be(v))
    }

    pub fn write_i8(&mut self, id: Mdd, v: i8) -> Result<()> {
        self.write_u8(id, v as u8)
    }

    pub fn write_i64(&mut self, id: Mdd, v: i64) -> Result<()> {
        self.write_u64(id, v as u64)
    }

    pub fn write_archive<T: Archive>(&mut self, id: Mdd, v: &T) -> Result<()> {
        self.write_item(id, |w| v.archive(w))
    }

    pub fn write_string(&mut self, id: Mdd, v: &str) -> Result<()> {
        self.write_item(id, |w| types::write_utf16(w, v))
    }

    pub fn write_batch<T: Archive>(&mut self, id: Mdd, items: &[T]) -> Result<()> {
        self.write_item(id, |w| types::write_batch(w, items))
    }

    pub fn write_array<T: Archive>(&mut self, id: Mdd, items: &[T]) -> Result<()> {
        self.write_item(id, |w| types::write_array(w, items))
    }

    pub fn write_raw(&mut self, id: Mdd, data: &[u8]) -> Result<()> {
        self.write_item(id, |w| w.write_raw(data))
    }

    // optional-item variants: absent values are skipped entirely

    pub fn write_opt_u8(&mut self, id: Mdd, v: Option<u8>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_u8(id, v))
    }

    pub fn write_opt_u16(&mut self, id: Mdd, v: Option<u16>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_u16(id, v))
    }

    pub fn write_opt_u32(&mut self, id: Mdd, v: Option<u32>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_u32(id, v))
    }

    pub fn write_opt_i8(&mut self, id: Mdd, v: Option<i8>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_i8(id, v))
    }

    pub fn write_opt_i64(&mut self, id: Mdd, v: Option<i64>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_i64(id, v))
    }

    pub fn write_opt_archive<T: Archive>(&mut self, id: Mdd, v: Option<&T>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_archive(id, v))
    }

    pub fn write_opt_string(&mut self, id: Mdd, v: Option<&str>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_string(id, v))
    }

    pub fn write_opt_raw(&mut self, id: Mdd, v: Option<&[u8]>) -> Result<()> {
        v.map_or(Ok(()), |v| self.write_raw(id, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (&'static Dictionary, Primer) {
        (asdcp_dict::smpte(), Primer::new())
    }

    #[test]
    fn typed_round_trip() {
        let (dict, mut primer) = fixture();
        let uid = Uuid::new_v4();

        let mut w = TlvWriter::new(&mut primer, dict);
        w.write_archive(Mdd::InstanceUid, &uid).unwrap();
        w.write_u16(Mdd::PrefaceVersion, 258).unwrap();
        w.write_string(Mdd::IdentificationProductName, "asdcp-rs").unwrap();
        w.write_u16(Mdd::Mpeg2MaxGop, 12).unwrap(); // dynamic tag
        let buf = w.into_bytes();

        let r = TlvReader::new(&buf, &primer, dict).unwrap();
        assert_eq!(r.read_uuid(Mdd::InstanceUid).unwrap(), Some(uid));
        assert_eq!(r.read_u16(Mdd::PrefaceVersion).unwrap(), Some(258));
        assert_eq!(
            r.read_string(Mdd::IdentificationProductName).unwrap().as_deref(),
            Some("asdcp-rs")
        );
        assert_eq!(r.read_u16(Mdd::Mpeg2MaxGop).unwrap(), Some(12));
        assert_eq!(r.read_u32(Mdd::Mpeg2BitRate).unwrap(), None);
    }

    #[test]
    fn item_order_is_not_significant() {
        let (dict, mut primer) = fixture();
        let mut w = TlvWriter::new(&mut primer, dict);
        w.write_u16(Mdd::PrefaceVersion, 7).unwrap();
        w.write_u32(Mdd::TrackId, 2).unwrap();
        let mut buf = w.into_bytes();

        // swap the two items in place
        let first_len = 4 + 2;
        buf.rotate_left(first_len);

        let r = TlvReader::new(&buf, &primer, dict).unwrap();
        assert_eq!(r.read_u16(Mdd::PrefaceVersion).unwrap(), Some(7));
        assert_eq!(r.read_u32(Mdd::TrackId).unwrap(), Some(2));
    }

    #[test]
    fn truncated_item_rejected() {
        let (dict, primer) = fixture();
        let buf = [0x3c, 0x0a, 0x00, 0x10, 0xaa]; // claims 16, has 1
        assert!(TlvReader::new(&buf, &primer, dict).is_err());
    }

    #[test]
    fn dynamic_tag_resolves_through_primer() {
        let (dict, mut primer) = fixture();
        let mut w = TlvWriter::new(&mut primer, dict);
        w.write_u8(Mdd::Mpeg2ClosedGop, 1).unwrap();
        let buf = w.into_bytes();
        assert_eq!(buf[0], 0xff);

        let r = TlvReader::new(&buf, &primer, dict).unwrap();
        assert_eq!(r.read_u8(Mdd::Mpeg2ClosedGop).unwrap(), Some(1));
    }
}
