//! Byte sinks the encoder writes into.

use sha2::{Digest, Sha256};

/// An append-only destination for canonical bytes.
pub trait Sink {
    fn put(&mut self, bytes: &[u8]);

    fn put_u8(&mut self, byte: u8) {
        self.put(&[byte]);
    }
}

impl Sink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// A sink that feeds SHA-256 directly, so the transaction never needs to be
/// buffered in full before hashing.
#[derive(Clone, Default)]
pub struct HashWriter {
    hasher: Sha256,
    written: usize,
}

impl HashWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes fed so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }
}

impl Sink for HashWriter {
    fn put(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
        self.written += bytes.len();
    }
}

impl std::fmt::Debug for HashWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashWriter")
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256;

    #[test]
    fn hash_writer_matches_one_shot_hash() {
        let mut writer = HashWriter::new();
        writer.put(b"Bit");
        writer.put_u8(b'S');
        writer.put(b"hares");
        assert_eq!(writer.bytes_written(), 9);
        assert_eq!(writer.finalize(), sha256(b"BitShares"));
    }

    #[test]
    fn vec_sink_appends() {
        let mut out = vec![1u8];
        out.put(&[2, 3]);
        out.put_u8(4);
        assert_eq!(out, vec![1, 2, 3, 4]);
    }
}
