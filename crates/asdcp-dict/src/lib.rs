//! SMPTE metadata dictionary for AS-DCP/MXF track files.
//!
//! Maps symbolic ids ([`Mdd`]) to 16-octet Universal Labels, static local
//! tags and optional flags. Three process-wide flavors exist:
//!
//! - [`smpte`] - ST 429-family labels only
//! - [`interop`] - MXF Interop aliases overlaid on the OP-Atom and
//!   encrypted-triplet slots
//! - [`composite`] - the union, used by readers that must accept both
//!
//! Each flavor is initialized lazily and shared read-only afterwards.

mod mdd;
mod tables;

use std::collections::HashMap;
use std::sync::OnceLock;

use asdcp_core::Ul;
use tracing::debug;

pub use mdd::{Mdd, MDD_COUNT};
pub use tables::MddEntry;

/// One flavor of the metadata dictionary.
#[derive(Debug)]
pub struct Dictionary {
    entries: Vec<MddEntry>,
    by_ul: HashMap<Ul, usize>,
}

impl Dictionary {
    fn build() -> Self {
        let entries: Vec<MddEntry> = tables::TABLE.to_vec();
        let mut dict = Self { entries, by_ul: HashMap::new() };
        dict.reindex();
        dict
    }

    fn reindex(&mut self) {
        self.by_ul.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.ul.has_value() {
                self.by_ul.insert(entry.ul, i);
            }
        }
    }

    /// Replace the UL of `slot` with the UL of `alias`, as the Interop
    /// flavor does for its OP-Atom and encrypted-triplet keys.
    fn overlay(&mut self, slot: Mdd, alias: Mdd) {
        self.entries[slot as usize].ul = tables::TABLE[alias as usize].ul;
    }

    /// Remove `slot` from the dictionary.
    fn delete(&mut self, slot: Mdd) {
        self.entries[slot as usize].ul = Ul::default();
    }

    /// The entry for a symbolic id.
    pub fn entry(&self, id: Mdd) -> &MddEntry {
        &self.entries[id as usize]
    }

    /// The UL registered for a symbolic id.
    pub fn ul(&self, id: Mdd) -> Ul {
        self.entries[id as usize].ul
    }

    /// Look up an entry by UL: exact match first, then a retry with the
    /// version octet cleared so labels from newer registry revisions still
    /// resolve.
    pub fn find_ul(&self, ul: &Ul) -> Option<&MddEntry> {
        if let Some(&i) = self.by_ul.get(ul) {
            return Some(&self.entries[i]);
        }

        let mut relaxed = *ul.as_bytes();
        relaxed[asdcp_core::UL_LENGTH - 1] = 0;
        match self.by_ul.get(&Ul::new(relaxed)) {
            Some(&i) => Some(&self.entries[i]),
            None => {
                debug!(%ul, "unknown UL");
                None
            }
        }
    }
}

/// The SMPTE dictionary: Interop aliases removed.
pub fn smpte() -> &'static Dictionary {
    static DICT: OnceLock<Dictionary> = OnceLock::new();
    DICT.get_or_init(|| {
        let mut d = Dictionary::build();
        d.delete(Mdd::InteropOpAtom);
        d.delete(Mdd::InteropCryptEssence);
        d.delete(Mdd::InteropSubDescriptors);
        d.reindex();
        d
    })
}

/// The Interop dictionary: Interop ULs overlaid onto the SMPTE slots,
/// SMPTE-only features removed.
pub fn interop() -> &'static Dictionary {
    static DICT: OnceLock<Dictionary> = OnceLock::new();
    DICT.get_or_init(|| {
        let mut d = Dictionary::build();
        d.overlay(Mdd::OpAtom, Mdd::InteropOpAtom);
        d.overlay(Mdd::CryptEssence, Mdd::InteropCryptEssence);
        d.overlay(Mdd::SubDescriptors, Mdd::InteropSubDescriptors);
        d.delete(Mdd::GenericStreamPartition);
        d.delete(Mdd::GenericStreamDataElement);
        d.delete(Mdd::StereoscopicPictureSubDescriptor);
        d.reindex();
        d
    })
}

/// The composite dictionary: the full table, used by readers.
pub fn composite() -> &'static Dictionary {
    static DICT: OnceLock<Dictionary> = OnceLock::new();
    DICT.get_or_init(Dictionary::build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_covers_every_id() {
        for (i, entry) in tables::TABLE.iter().enumerate() {
            assert_eq!(entry.id as usize, i, "entry {} out of order", entry.name);
        }
    }

    #[test]
    fn uls_are_unique() {
        let mut seen = HashSet::new();
        for entry in tables::TABLE.iter() {
            if entry.ul.has_value() {
                assert!(seen.insert(entry.ul), "duplicate UL for {}", entry.name);
            }
        }
    }

    #[test]
    fn find_by_ul() {
        let d = composite();
        let ul = d.ul(Mdd::Preface);
        assert_eq!(d.find_ul(&ul).unwrap().id, Mdd::Preface);
        assert!(d.find_ul(&Ul::new([0xff; 16])).is_none());
    }

    #[test]
    fn find_ignores_version_octet() {
        let d = composite();
        // essence element key with a nonzero stream index in its low byte
        let keyed = d.ul(Mdd::Mpeg2Essence).with_stream(0x01);
        assert_eq!(d.find_ul(&keyed).unwrap().id, Mdd::Mpeg2Essence);
    }

    #[test]
    fn interop_overlays_op_atom() {
        assert_eq!(interop().ul(Mdd::OpAtom), composite().ul(Mdd::InteropOpAtom));
        assert_ne!(interop().ul(Mdd::OpAtom), smpte().ul(Mdd::OpAtom));
        // SMPTE-only slots are gone from the Interop flavor
        assert!(!interop().ul(Mdd::StereoscopicPictureSubDescriptor).has_value());
    }

    #[test]
    fn static_tags_match_st377() {
        let d = smpte();
        assert_eq!(d.entry(Mdd::InstanceUid).tag, [0x3c, 0x0a]);
        assert_eq!(d.entry(Mdd::ComponentDuration).tag, [0x02, 0x02]);
        assert!(d.entry(Mdd::Mpeg2ClosedGop).tag == [0, 0], "dynamic tag expected");
    }
}
