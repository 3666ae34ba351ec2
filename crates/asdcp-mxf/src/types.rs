//! Wire types shared by the header-metadata and index codecs.

use asdcp_core::{MemReader, MemWriter, Result, Ul, Umid};
use chrono::{Datelike, Timelike, Utc};
use uuid::Uuid;

/// A value with a fixed archival encoding inside TLV items and batches.
pub trait Archive: Sized {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self>;
    fn archive(&self, writer: &mut MemWriter);
    /// Encoded size in bytes; fixed per type so batch headers can carry it.
    fn archive_length() -> usize;
}

/// Numerator/denominator rate, e.g. an edit rate of 24/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rational {
    pub numerator: i32,
    pub denominator: i32,
}

impl Rational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self { numerator, denominator }
    }

    pub fn quotient(&self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            f64::from(self.numerator) / f64::from(self.denominator)
        }
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

pub const EDIT_RATE_24: Rational = Rational::new(24, 1);
pub const EDIT_RATE_48: Rational = Rational::new(48, 1);
pub const SAMPLE_RATE_48K: Rational = Rational::new(48_000, 1);
pub const SAMPLE_RATE_96K: Rational = Rational::new(96_000, 1);

impl Archive for Rational {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        let numerator = reader.read_u32_be()? as i32;
        let denominator = reader.read_u32_be()? as i32;
        Ok(Self { numerator, denominator })
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_u32_be(self.numerator as u32);
        writer.write_u32_be(self.denominator as u32);
    }

    fn archive_length() -> usize {
        8
    }
}

/// MXF timestamp: UTC with 1/250 s resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub tick: u8,
}

impl Timestamp {
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            year: now.year() as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
            tick: 0,
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            u16::from(self.tick) * 4
        )
    }
}

impl Archive for Timestamp {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Self {
            year: reader.read_u16_be()?,
            month: reader.read_u8()?,
            day: reader.read_u8()?,
            hour: reader.read_u8()?,
            minute: reader.read_u8()?,
            second: reader.read_u8()?,
            tick: reader.read_u8()?,
        })
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_u16_be(self.year);
        writer.write_u8(self.month);
        writer.write_u8(self.day);
        writer.write_u8(self.hour);
        writer.write_u8(self.minute);
        writer.write_u8(self.second);
        writer.write_u8(self.tick);
    }

    fn archive_length() -> usize {
        8
    }
}

/// Toolkit version carried in the Identification set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionType {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u16,
    pub release: u16,
}

/// Release kind values for [`VersionType::release`].
pub mod release {
    pub const UNKNOWN: u16 = 0;
    pub const RELEASE: u16 = 1;
    pub const DEBUG: u16 = 2;
    pub const PATCHED: u16 = 3;
    pub const BETA: u16 = 4;
    pub const PRIVATE_BUILD: u16 = 5;
}

impl VersionType {
    /// Parse a dotted "major.minor.patch" string, as produced by
    /// `CARGO_PKG_VERSION`.
    pub fn from_dotted(version: &str, build: u16) -> Self {
        let mut parts = version.split('.').map(|p| p.parse::<u16>().unwrap_or(0));
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
            build,
            release: release::RELEASE,
        }
    }
}

impl Archive for VersionType {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Self {
            major: reader.read_u16_be()?,
            minor: reader.read_u16_be()?,
            patch: reader.read_u16_be()?,
            build: reader.read_u16_be()?,
            release: reader.read_u16_be()?,
        })
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_u16_be(self.major);
        writer.write_u16_be(self.minor);
        writer.write_u16_be(self.patch);
        writer.write_u16_be(self.build);
        writer.write_u16_be(self.release);
    }

    fn archive_length() -> usize {
        10
    }
}

impl Archive for Ul {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Ul::new(reader.read_array()?))
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_raw(self.as_bytes());
    }

    fn archive_length() -> usize {
        asdcp_core::UL_LENGTH
    }
}

impl Archive for Uuid {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Uuid::from_bytes(reader.read_array()?))
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_raw(self.as_bytes());
    }

    fn archive_length() -> usize {
        asdcp_core::UUID_LENGTH
    }
}

impl Archive for Umid {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        Ok(Umid::new(reader.read_array()?))
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_raw(self.as_bytes());
    }

    fn archive_length() -> usize {
        asdcp_core::UMID_LENGTH
    }
}

impl Archive for u32 {
    fn unarchive(reader: &mut MemReader<'_>) -> Result<Self> {
        reader.read_u32_be()
    }

    fn archive(&self, writer: &mut MemWriter) {
        writer.write_u32_be(*self);
    }

    fn archive_length() -> usize {
        4
    }
}

/// Decode a batch: `(count: u32, element_size: u32, elements...)`.
///
/// Batches with an implausible shape are refused rather than allocated.
pub fn read_batch<T: Archive>(reader: &mut MemReader<'_>) -> Result<Vec<T>> {
    let count = reader.read_u32_be()?;
    let item_size = reader.read_u32_be()?;

    if count > 65_536 || item_size > 1024 {
        return Err(asdcp_core::Error::Format(format!(
            "implausible batch header: {count} x {item_size}"
        )));
    }

    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        items.push(T::unarchive(reader)?);
    }
    Ok(items)
}

/// Encode a batch with its `(count, element_size)` header.
pub fn write_batch<T: Archive>(writer: &mut MemWriter, items: &[T]) {
    writer.write_u32_be(items.len() as u32);
    writer.write_u32_be(T::archive_length() as u32);
    for item in items {
        item.archive(writer);
    }
}

/// Decode a raw sequence running to the end of the value region.
pub fn read_array<T: Archive>(reader: &mut MemReader<'_>) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while reader.remainder() >= T::archive_length() {
        items.push(T::unarchive(reader)?);
    }
    Ok(items)
}

/// Encode a raw sequence with no header.
pub fn write_array<T: Archive>(writer: &mut MemWriter, items: &[T]) {
    for item in items {
        item.archive(writer);
    }
}

/// Decode a UTF-16BE string item.
pub fn read_utf16(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

/// Encode a string as UTF-16BE with no terminator.
pub fn write_utf16(writer: &mut MemWriter, text: &str) {
    for unit in text.encode_utf16() {
        writer.write_u16_be(unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_round_trip() {
        let mut w = MemWriter::new();
        EDIT_RATE_24.archive(&mut w);
        let mut r = MemReader::new(w.as_slice());
        assert_eq!(Rational::unarchive(&mut r).unwrap(), EDIT_RATE_24);
    }

    #[test]
    fn timestamp_round_trip() {
        let ts = Timestamp { year: 2024, month: 5, day: 1, hour: 13, minute: 20, second: 0, tick: 0 };
        let mut w = MemWriter::new();
        ts.archive(&mut w);
        assert_eq!(w.len(), Timestamp::archive_length());
        let mut r = MemReader::new(w.as_slice());
        assert_eq!(Timestamp::unarchive(&mut r).unwrap(), ts);
        assert_eq!(ts.to_string(), "2024-05-01 13:20:00.000");
    }

    #[test]
    fn batch_round_trip() {
        let items = vec![1u32, 2, 3];
        let mut w = MemWriter::new();
        write_batch(&mut w, &items);
        assert_eq!(w.len(), 8 + 12);
        let mut r = MemReader::new(w.as_slice());
        assert_eq!(read_batch::<u32>(&mut r).unwrap(), items);
    }

    #[test]
    fn batch_refuses_implausible_header() {
        let mut w = MemWriter::new();
        w.write_u32_be(1_000_000);
        w.write_u32_be(4);
        let mut r = MemReader::new(w.as_slice());
        assert!(read_batch::<u32>(&mut r).is_err());
    }

    #[test]
    fn utf16_round_trip() {
        let mut w = MemWriter::new();
        write_utf16(&mut w, "Material Package");
        assert_eq!(read_utf16(w.as_slice()), "Material Package");
    }

    #[test]
    fn version_from_dotted() {
        let v = VersionType::from_dotted("1.2.3", 42);
        assert_eq!((v.major, v.minor, v.patch, v.build), (1, 2, 3, 42));
        assert_eq!(v.release, release::RELEASE);
    }
}
