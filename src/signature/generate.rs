//! Signature construction from a source stream

use super::Signature;
use crate::chunker::Chunker;
use crate::error::{Error, Result};
use crate::rolling::RollingChecksum;
use std::io::Read;

/// Build a signature by consuming a source stream block by block.
///
/// For each block (including a final short one) the rolling checksum is
/// seeded over the block's bytes and paired with a BLAKE3 strong digest;
/// the block's index joins the weak-checksum bucket in insertion order.
/// A single linear pass: clean end of stream terminates construction, any
/// other failure aborts it with no partial signature.
pub fn build_signature<R: Read>(mut chunker: Chunker<R>) -> Result<Signature> {
    let window_size = chunker.window_size();
    if window_size == 0 {
        return Err(Error::config("window size must be at least 1"));
    }

    let mut sig = Signature::new(window_size);
    let mut weak = RollingChecksum::new();

    loop {
        let block = match chunker.next_block() {
            Ok(block) => block,
            Err(Error::EndOfStream) => break,
            Err(e) => return Err(e),
        };

        weak.reset();
        weak.write(&block);
        let strong = blake3::hash(&block);

        let index = sig.strong_sigs.len();
        sig.weak_to_blocks.entry(weak.sum()).or_default().push(index);
        sig.strong_sigs.push(*strong.as_bytes());
    }

    tracing::debug!(
        blocks = sig.block_count(),
        window_size,
        buckets = sig.weak_to_blocks.len(),
        "Signature built"
    );

    Ok(sig)
}

/// Build a signature from an in-memory byte slice
pub fn signature_from_bytes(data: &[u8], window_size: usize) -> Result<Signature> {
    build_signature(Chunker::new(data, window_size))
}
