//! Writer identification and crypto context state threaded through both
//! the reader and the writer.

use uuid::Uuid;

/// Which label set the file is (being) written with.
///
/// SMPTE files use the ST 429-family labels and a 3-part layout; Interop
/// files use the MXF Interop aliases and a 2-part layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelSet {
    Interop,
    #[default]
    Smpte,
}

/// Product identification, asset identity and encryption state.
#[derive(Debug, Clone)]
pub struct WriterInfo {
    pub product_uuid: Uuid,
    pub asset_uuid: Uuid,
    pub product_version: String,
    pub company_name: String,
    pub product_name: String,
    pub label_set: LabelSet,
    pub encrypted_essence: bool,
    pub context_id: Uuid,
    pub cryptographic_key_id: Uuid,
    pub uses_hmac: bool,
}

impl Default for WriterInfo {
    fn default() -> Self {
        Self {
            product_uuid: Uuid::nil(),
            asset_uuid: Uuid::nil(),
            product_version: "Unknown Version".into(),
            company_name: "Unknown Company".into(),
            product_name: "Unknown Product".into(),
            label_set: LabelSet::Smpte,
            encrypted_essence: false,
            context_id: Uuid::nil(),
            cryptographic_key_id: Uuid::nil(),
            uses_hmac: true,
        }
    }
}

impl WriterInfo {
    /// Default identification for files produced by this toolkit.
    pub fn for_this_toolkit() -> Self {
        Self {
            product_version: env!("CARGO_PKG_VERSION").into(),
            company_name: "asdcp-rs project".into(),
            product_name: "asdcp-rs".into(),
            ..Self::default()
        }
    }
}
