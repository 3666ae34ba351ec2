//! Frame buffers exchanged with essence parsers and the reader/writer.

use asdcp_core::{Error, Result};

/// Default frame capacity (4 MiB).
pub const DEFAULT_FRAME_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Picture frame type recorded in MPEG-2 index entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameType {
    I,
    P,
    B,
    #[default]
    Unknown,
}

/// One essence frame plus the metadata the writer consumes. Fields
/// irrelevant to an essence type are ignored by its writer.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    data: Vec<u8>,
    capacity: usize,
    /// Bytes at the head of the frame left in the clear when encrypting.
    pub plaintext_offset: u64,
    /// Original frame size; set by the reader when it returns ciphertext.
    pub source_length: u64,
    pub frame_type: FrameType,
    pub gop_start: bool,
    pub closed_gop: bool,
    pub temporal_offset: i8,
    /// True when the buffer holds an undecrypted encrypted source value.
    pub ciphertext: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FRAME_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
            plaintext_offset: 0,
            source_length: 0,
            frame_type: FrameType::Unknown,
            gop_start: false,
            closed_gop: false,
            temporal_offset: 0,
            ciphertext: false,
        }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        let mut buf = Self::with_capacity(data.len().max(DEFAULT_FRAME_BUFFER_SIZE));
        buf.data = data.to_vec();
        buf
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Replace the contents. Fails when `data` exceeds the configured
    /// capacity, which bounds reader allocations against corrupt lengths.
    pub fn set_data(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > self.capacity {
            return Err(Error::Format(format!(
                "frame of {} bytes exceeds buffer capacity {}",
                data.len(),
                self.capacity
            )));
        }
        self.data.clear();
        self.data.extend_from_slice(data);
        self.ciphertext = false;
        Ok(())
    }

    /// Size the internal vector for a read of `len` bytes and hand it out.
    pub(crate) fn writable(&mut self, len: usize) -> Result<&mut [u8]> {
        if len > self.capacity {
            return Err(Error::Format(format!(
                "frame of {len} bytes exceeds buffer capacity {}",
                self.capacity
            )));
        }
        self.data.resize(len, 0);
        Ok(&mut self.data)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_enforced() {
        let mut buf = FrameBuffer::with_capacity(8);
        assert!(buf.set_data(&[0u8; 8]).is_ok());
        assert!(buf.set_data(&[0u8; 9]).is_err());
        assert!(buf.writable(9).is_err());
    }

    #[test]
    fn from_slice_round_trip() {
        let buf = FrameBuffer::from_slice(b"j2c data");
        assert_eq!(buf.as_slice(), b"j2c data");
        assert_eq!(buf.len(), 8);
    }
}
