//! Source-stream signatures for delta computation

pub mod file;
pub mod generate;

pub use file::{read_signature, read_signature_from_bytes, write_signature, write_signature_to_bytes};
pub use generate::{build_signature, signature_from_bytes};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Magic bytes for .rdsig files
pub const SIGNATURE_MAGIC: &[u8; 6] = b"RDSIG\x01";

/// Current signature format version
pub const SIGNATURE_VERSION: u8 = 1;

/// Strong (BLAKE3) digest of one block
pub type StrongDigest = [u8; 32];

/// A source-stream signature: per-block checksums indexed for matching.
///
/// Blocks are implicitly numbered 0..N-1 in source order; the index is never
/// stored, only positional. Built once from a single forward pass and held
/// read-only for any number of delta computations against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    /// Version of the signature format
    pub version: u8,

    /// Block/window length used for both construction and matching
    pub window_size: usize,

    /// Strong digest per block, index = block index
    pub strong_sigs: Vec<StrongDigest>,

    /// Weak checksum value -> block indices sharing it, in ascending
    /// insertion order. Collisions across distinct blocks are expected and
    /// resolved by strong-digest comparison.
    pub weak_to_blocks: HashMap<u32, Vec<usize>>,
}

impl Signature {
    /// Create a new empty signature
    pub fn new(window_size: usize) -> Self {
        Self {
            version: SIGNATURE_VERSION,
            window_size,
            strong_sigs: Vec::new(),
            weak_to_blocks: HashMap::new(),
        }
    }

    /// Number of source blocks covered by this signature
    pub fn block_count(&self) -> usize {
        self.strong_sigs.len()
    }

    /// Block indices whose weak checksum equals `weak`, in ascending order
    pub fn candidates(&self, weak: u32) -> Option<&[usize]> {
        self.weak_to_blocks.get(&weak).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signature() {
        let sig = Signature::new(16);
        assert_eq!(sig.block_count(), 0);
        assert!(sig.candidates(0x12345678).is_none());
    }
}
