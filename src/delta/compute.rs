//! Delta scan: the two-mode matching state machine
//!
//! The target stream is scanned against a source signature in two
//! alternating modes. Aligned mode reads a whole block and tries to match
//! it; after a mismatch the scan drops into resynchronisation mode, sliding
//! the window one byte at a time (the evicted byte becomes a literal) until
//! a block match re-aligns it. Matches are forward-only with respect to the
//! source block order: a candidate qualifies only if its index is greater
//! than the last matched index, and the first qualifying candidate in
//! ascending bucket order wins.

use super::compose::compose_delta;
use super::Delta;
use crate::chunker::Chunker;
use crate::error::{Error, Result};
use crate::rolling::RollingChecksum;
use crate::signature::{Signature, StrongDigest};
use std::io::Read;

/// Scan mode for the next iteration
enum ScanMode {
    /// Read a full block and try to match it as-is
    Aligned,
    /// Slide the window one byte at a time hunting for the next anchor
    Resync,
}

/// One event of the raw scan trace, compacted later by `compose_delta`.
///
/// A literal's anchor position is not stored: it always equals the last
/// matched block index at the time the literal was recorded, which the
/// compaction pass tracks from the match events themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TraceEvent {
    /// A target byte not covered by any match
    Literal(u8),
    /// The window matched source block `index` (0-based)
    Match(usize),
}

/// Fixed-capacity ring buffer holding the current scan window.
///
/// Doubles as the rolling-hash window and the literal staging area;
/// push-and-evict is O(1).
struct RingWindow {
    buf: Vec<u8>,
    head: usize,
    len: usize,
}

impl RingWindow {
    fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            head: 0,
            len: 0,
        }
    }

    /// Replace the window contents with a freshly read block
    fn fill(&mut self, block: &[u8]) {
        self.buf[..block.len()].copy_from_slice(block);
        self.head = 0;
        self.len = block.len();
    }

    /// Oldest byte in the window. The scan only calls this once a block has
    /// been staged, so the window is never empty here.
    fn head_byte(&self) -> u8 {
        self.buf[self.head]
    }

    /// Append a byte at the tail, evicting the head when at capacity
    fn push(&mut self, byte: u8) {
        if self.len == self.buf.len() {
            self.buf[self.head] = byte;
            self.head = (self.head + 1) % self.buf.len();
        } else {
            let tail = (self.head + self.len) % self.buf.len();
            self.buf[tail] = byte;
            self.len += 1;
        }
    }

    /// Window contents in order as two contiguous slices
    fn as_slices(&self) -> (&[u8], &[u8]) {
        let first_len = self.len.min(self.buf.len() - self.head);
        (
            &self.buf[self.head..self.head + first_len],
            &self.buf[..self.len - first_len],
        )
    }

    /// Strong digest of the window contents
    fn strong_digest(&self) -> StrongDigest {
        let (first, second) = self.as_slices();
        let mut hasher = blake3::Hasher::new();
        hasher.update(first);
        hasher.update(second);
        *hasher.finalize().as_bytes()
    }

    /// Window contents in order
    fn to_vec(&self) -> Vec<u8> {
        let (first, second) = self.as_slices();
        let mut out = Vec::with_capacity(self.len);
        out.extend_from_slice(first);
        out.extend_from_slice(second);
        out
    }
}

/// Compute the delta between a signed source and a target stream.
///
/// Consumes the target exactly once, forward-only. Clean end of stream
/// terminates the scan; any other I/O failure aborts with no partial delta.
pub fn compute_delta<R: Read>(sig: &Signature, mut chunker: Chunker<R>) -> Result<Delta> {
    if sig.window_size == 0 {
        return Err(Error::config("window size must be at least 1"));
    }
    if chunker.window_size() != sig.window_size {
        return Err(Error::config(format!(
            "chunker window size {} does not match signature window size {}",
            chunker.window_size(),
            sig.window_size
        )));
    }

    let mut weak = RollingChecksum::new();
    let mut window = RingWindow::new(sig.window_size);
    let mut last_match: Option<usize> = None;
    let mut mode = ScanMode::Aligned;
    let mut trace: Vec<TraceEvent> = Vec::new();

    loop {
        match mode {
            ScanMode::Aligned => {
                let block = match chunker.next_block() {
                    Ok(block) => block,
                    Err(Error::EndOfStream) => break,
                    Err(e) => return Err(e),
                };
                weak.reset();
                weak.write(&block);
                window.fill(&block);
            }
            ScanMode::Resync => {
                let incoming = match chunker.next_byte() {
                    Ok(byte) => byte,
                    Err(Error::EndOfStream) => {
                        // Flush the trailing partial window as literals
                        for byte in window.to_vec() {
                            trace.push(TraceEvent::Literal(byte));
                        }
                        break;
                    }
                    Err(e) => return Err(e),
                };

                let evicted = window.head_byte();
                trace.push(TraceEvent::Literal(evicted));
                weak.roll(evicted, incoming);
                window.push(incoming);
            }
        }

        mode = ScanMode::Resync;
        if let Some(candidates) = sig.candidates(weak.sum()) {
            let digest = window.strong_digest();
            for &index in candidates {
                let forward = last_match.map_or(true, |pos| index > pos);
                if forward && sig.strong_sigs[index] == digest {
                    trace.push(TraceEvent::Match(index));
                    last_match = Some(index);
                    mode = ScanMode::Aligned;
                    break;
                }
            }
        }
    }

    let ops = compose_delta(&trace, sig);
    let delta = Delta {
        window_size: sig.window_size,
        ops,
    };

    tracing::debug!(
        ops = delta.operation_count(),
        reused_blocks = delta.reused_blocks(),
        literal_bytes = delta.literal_bytes(),
        "Delta computation complete"
    );

    Ok(delta)
}

/// Compute a delta from an in-memory target slice
pub fn compute_delta_from_bytes(sig: &Signature, target: &[u8]) -> Result<Delta> {
    compute_delta(sig, Chunker::new(target, sig.window_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaOp;
    use crate::signature::signature_from_bytes;

    fn diff(source: &[u8], target: &[u8], window: usize) -> Vec<DeltaOp> {
        let sig = signature_from_bytes(source, window).unwrap();
        compute_delta_from_bytes(&sig, target).unwrap().ops
    }

    #[test]
    fn test_ring_window_slide() {
        let mut window = RingWindow::new(3);
        window.fill(b"abc");
        assert_eq!(window.head_byte(), b'a');
        window.push(b'd');
        assert_eq!(window.to_vec(), b"bcd");
        window.push(b'e');
        window.push(b'f');
        window.push(b'g');
        assert_eq!(window.to_vec(), b"efg");
    }

    #[test]
    fn test_ring_window_partial() {
        let mut window = RingWindow::new(4);
        window.fill(b"xy");
        assert_eq!(window.to_vec(), b"xy");
        assert_eq!(window.strong_digest(), *blake3::hash(b"xy").as_bytes());
    }

    #[test]
    fn test_ring_window_digest_wraps() {
        let mut window = RingWindow::new(3);
        window.fill(b"abc");
        window.push(b'd');
        // Window is now "bcd" stored non-contiguously
        assert_eq!(window.strong_digest(), *blake3::hash(b"bcd").as_bytes());
    }

    #[test]
    fn test_identity_is_all_keeps() {
        let ops = diff(b"abcdefgh", b"abcdefgh", 3);
        assert_eq!(
            ops,
            vec![
                DeltaOp::Keep { block: 1 },
                DeltaOp::Keep { block: 2 },
                DeltaOp::Keep { block: 3 },
            ]
        );
    }

    #[test]
    fn test_update_scenario() {
        // Blocks: ab cd ef; target replaces the middle block
        let ops = diff(b"abcdef", b"abXYef", 2);
        assert_eq!(
            ops,
            vec![
                DeltaOp::Keep { block: 1 },
                DeltaOp::Update {
                    block: 2,
                    data: b"XY".to_vec()
                },
                DeltaOp::Keep { block: 3 },
            ]
        );
    }

    #[test]
    fn test_insertion_scenario() {
        let ops = diff(b"abcd", b"abZZcd", 2);
        assert_eq!(
            ops,
            vec![
                DeltaOp::Keep { block: 1 },
                DeltaOp::Add {
                    after: 1,
                    data: b"ZZ".to_vec()
                },
                DeltaOp::Keep { block: 2 },
            ]
        );
    }

    #[test]
    fn test_deletion_scenario() {
        let ops = diff(b"abcdef", b"abef", 2);
        assert_eq!(
            ops,
            vec![
                DeltaOp::Keep { block: 1 },
                DeltaOp::Remove { block: 2 },
                DeltaOp::Keep { block: 3 },
            ]
        );
    }

    #[test]
    fn test_forward_only_matching() {
        // Both source blocks are identical; the target must match them in
        // ascending order, never block 2 before block 1.
        let ops = diff(b"abcabc", b"abcabc", 3);
        assert_eq!(
            ops,
            vec![DeltaOp::Keep { block: 1 }, DeltaOp::Keep { block: 2 }]
        );
    }

    #[test]
    fn test_weak_collision_resolved_by_strong_digest() {
        // "acb" and "bac" share an Adler-32 weak sum (equal byte sum 294 and
        // equal weighted prefix sum 587) but differ in content. The target
        // equals the second block only; the first must not be matched despite
        // sharing the bucket.
        let sig = signature_from_bytes(b"acbbac", 3).unwrap();
        let weak_of = |data: &[u8]| {
            let mut hash = RollingChecksum::new();
            hash.write(data);
            hash.sum()
        };
        assert_eq!(weak_of(b"acb"), weak_of(b"bac"));
        assert_eq!(sig.candidates(weak_of(b"acb")).unwrap(), &[0, 1]);
        assert_ne!(sig.strong_sigs[0], sig.strong_sigs[1]);

        let ops = compute_delta_from_bytes(&sig, b"bac").unwrap().ops;
        assert_eq!(
            ops,
            vec![DeltaOp::Remove { block: 1 }, DeltaOp::Keep { block: 2 }]
        );
    }

    #[test]
    fn test_empty_target_removes_everything() {
        let ops = diff(b"abcdef", b"", 2);
        assert_eq!(
            ops,
            vec![
                DeltaOp::Remove { block: 1 },
                DeltaOp::Remove { block: 2 },
                DeltaOp::Remove { block: 3 },
            ]
        );
    }

    #[test]
    fn test_empty_source_adds_everything() {
        let ops = diff(b"", b"xyz", 2);
        assert_eq!(
            ops,
            vec![
                DeltaOp::Add {
                    after: 0,
                    data: b"xy".to_vec()
                },
                DeltaOp::Add {
                    after: 0,
                    data: b"z".to_vec()
                },
            ]
        );
    }

    #[test]
    fn test_trailing_literal_after_last_match() {
        let ops = diff(b"ab", b"abc", 2);
        assert_eq!(
            ops,
            vec![
                DeltaOp::Keep { block: 1 },
                DeltaOp::Add {
                    after: 1,
                    data: b"c".to_vec()
                },
            ]
        );
    }

    #[test]
    fn test_window_size_mismatch_rejected() {
        let sig = signature_from_bytes(b"abcdef", 2).unwrap();
        let err = compute_delta(&sig, Chunker::new(&b"abcdef"[..], 3)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
