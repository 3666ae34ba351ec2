//! SMPTE identifiers: Universal Labels and UMIDs.

use std::fmt;

use uuid::Uuid;

/// Length in octets of a SMPTE Universal Label.
pub const UL_LENGTH: usize = 16;
/// Length in octets of a SMPTE UMID.
pub const UMID_LENGTH: usize = 32;
/// Length in octets of a UUID.
pub const UUID_LENGTH: usize = 16;

/// A 16-octet SMPTE Universal Label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ul([u8; UL_LENGTH]);

impl Ul {
    pub const fn new(value: [u8; UL_LENGTH]) -> Self {
        Self(value)
    }

    pub fn from_slice(value: &[u8]) -> Option<Self> {
        let arr: [u8; UL_LENGTH] = value.try_into().ok()?;
        Some(Self(arr))
    }

    pub const fn as_bytes(&self) -> &[u8; UL_LENGTH] {
        &self.0
    }

    pub fn has_value(&self) -> bool {
        self.0.iter().any(|&b| b != 0)
    }

    /// Equality ignoring the version octet (byte 7). Registry lookups use
    /// this to match labels across dictionary revisions.
    pub fn matches_ignore_version(&self, other: &Ul) -> bool {
        self.0[..7] == other.0[..7] && self.0[8..] == other.0[8..]
    }

    /// Equality ignoring the final octet. Generic-container essence element
    /// keys carry a channel/stream index in their low byte.
    pub fn matches_ignore_stream(&self, other: &Ul) -> bool {
        self.0[..UL_LENGTH - 1] == other.0[..UL_LENGTH - 1]
    }

    /// The element portion (bytes 12-15), used to derive track numbers from
    /// generic-container element keys.
    pub fn element_bytes(&self) -> [u8; 4] {
        [self.0[12], self.0[13], self.0[14], self.0[15]]
    }

    /// Copy with the final octet replaced by `stream`, producing the keyed
    /// element label for one essence stream.
    pub fn with_stream(&self, stream: u8) -> Ul {
        let mut out = self.0;
        out[UL_LENGTH - 1] = stream;
        Ul(out)
    }
}

impl fmt::Display for Ul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                write!(f, ".")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// A 32-octet SMPTE UMID identifying an OP-Atom package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Umid([u8; UMID_LENGTH]);

/// The all-zero UMID, used for "original essence" source clip references.
pub const NIL_UMID: Umid = Umid([0; UMID_LENGTH]);

impl Umid {
    pub const fn new(value: [u8; UMID_LENGTH]) -> Self {
        Self(value)
    }

    pub fn from_slice(value: &[u8]) -> Option<Self> {
        let arr: [u8; UMID_LENGTH] = value.try_into().ok()?;
        Some(Self(arr))
    }

    pub const fn as_bytes(&self) -> &[u8; UMID_LENGTH] {
        &self.0
    }

    pub fn has_value(&self) -> bool {
        self.0.iter().any(|&b| b != 0)
    }

    /// Build a UMID of the given material type around `material_number`.
    pub fn make(material_type: u8, material_number: Uuid) -> Self {
        const UMID_BASE: [u8; 10] = [0x06, 0x0a, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01];

        let mut v = [0u8; UMID_LENGTH];
        v[..10].copy_from_slice(&UMID_BASE);
        v[10] = material_type;
        v[11] = 0x20; // UUID/UL method, number generation undefined
        v[12] = 0x13; // length of the remaining material pack

        // compatibility with mxflib for extended material types
        if material_type > 4 {
            v[7] = 5;
        }

        v[16..].copy_from_slice(material_number.as_bytes());
        Self(v)
    }

    /// Random UMID of the given material type.
    pub fn make_random(material_type: u8) -> Self {
        Self::make(material_type, Uuid::new_v4())
    }

    /// The trailing material number, which AS-DCP track files use as the
    /// asset UUID.
    pub fn material_number(&self) -> Uuid {
        let mut b = [0u8; UUID_LENGTH];
        b.copy_from_slice(&self.0[16..]);
        Uuid::from_bytes(b)
    }
}

impl Default for Umid {
    fn default() -> Self {
        NIL_UMID
    }
}

impl fmt::Display for Umid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02x}{:02x}{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}{:02x}{:02x}],{:02x},{:02x},{:02x},{:02x},{}",
            self.0[0], self.0[1], self.0[2], self.0[3],
            self.0[4], self.0[5], self.0[6], self.0[7],
            self.0[8], self.0[9], self.0[10], self.0[11],
            self.0[12], self.0[13], self.0[14], self.0[15],
            self.material_number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Ul = Ul::new([
        0x06, 0x0e, 0x2b, 0x34, 0x04, 0x01, 0x01, 0x02, 0x0d, 0x01, 0x02, 0x01, 0x10, 0x00, 0x00,
        0x00,
    ]);

    #[test]
    fn stream_insensitive_compare() {
        let b = A.with_stream(0x07);
        assert_ne!(A, b);
        assert!(A.matches_ignore_stream(&b));

        let mut c = *A.as_bytes();
        c[3] = 0x35;
        assert!(!A.matches_ignore_stream(&Ul::new(c)));
    }

    #[test]
    fn version_insensitive_compare() {
        let mut b = *A.as_bytes();
        b[7] = 0x05;
        assert!(A.matches_ignore_version(&Ul::new(b)));
    }

    #[test]
    fn display_dotted() {
        assert_eq!(A.to_string(), "060e2b34.04010102.0d010201.10000000");
    }

    #[test]
    fn umid_layout() {
        let id = Uuid::new_v4();
        let umid = Umid::make(0x0f, id);
        assert_eq!(&umid.as_bytes()[..4], &[0x06, 0x0a, 0x2b, 0x34]);
        assert_eq!(umid.as_bytes()[7], 5); // type 0x0f is extended
        assert_eq!(umid.as_bytes()[10], 0x0f);
        assert_eq!(umid.as_bytes()[12], 0x13);
        assert_eq!(umid.material_number(), id);
    }

    #[test]
    fn nil_umid_has_no_value() {
        assert!(!NIL_UMID.has_value());
        assert!(Umid::make_random(0x0f).has_value());
    }
}
