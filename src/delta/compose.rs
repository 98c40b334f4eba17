//! Trace compaction: raw match/literal events into the final edit script
//!
//! Between two consecutive match anchors the original block positions in
//! the gap are walked in order: pending literal bytes fill them as
//! `Update` operations (at most one window each), positions left over once
//! the literals run out become `Remove`, and literals left over once the
//! positions run out are chunked into `Add` operations anchored on the
//! gap's closing block.

use super::compute::TraceEvent;
use super::DeltaOp;
use crate::signature::Signature;

/// Compact a scan trace into the emitted operation sequence. Single pass.
pub(super) fn compose_delta(trace: &[TraceEvent], sig: &Signature) -> Vec<DeltaOp> {
    let mut ops = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut prev_match: Option<usize> = None;

    for event in trace {
        match event {
            TraceEvent::Literal(byte) => pending.push(*byte),
            TraceEvent::Match(index) => {
                gap_ops(&mut ops, &pending, prev_match, *index, sig.window_size);
                ops.push(DeltaOp::Keep {
                    block: (*index + 1) as u32,
                });
                pending.clear();
                prev_match = Some(*index);
            }
        }
    }

    gap_ops(&mut ops, &pending, prev_match, sig.block_count(), sig.window_size);
    ops
}

/// Emit the operations covering the gap between two anchors: original
/// positions `prev+1 .. cur-1` (0-based, exclusive on both anchors), then
/// any literals still unconsumed.
fn gap_ops(
    ops: &mut Vec<DeltaOp>,
    pending: &[u8],
    prev: Option<usize>,
    cur: usize,
    window_size: usize,
) {
    let mut offset = 0;

    let start = prev.map_or(0, |p| p + 1);
    for position in start..cur {
        if offset >= pending.len() {
            ops.push(DeltaOp::Remove {
                block: (position + 1) as u32,
            });
        } else {
            let end = (offset + window_size).min(pending.len());
            ops.push(DeltaOp::Update {
                block: (position + 1) as u32,
                data: pending[offset..end].to_vec(),
            });
            offset = end;
        }
    }

    while offset < pending.len() {
        let end = (offset + window_size).min(pending.len());
        ops.push(DeltaOp::Add {
            after: cur as u32,
            data: pending[offset..end].to_vec(),
        });
        offset = end;
    }
}
