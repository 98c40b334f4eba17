//! Delta computation and types

pub mod compose;
pub mod compute;

pub use compute::{compute_delta, compute_delta_from_bytes};

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered edit script reconstructing a target stream from a source.
///
/// Produced once per (signature, target) pair and immutable afterwards.
/// A receiver applies it left to right: `Keep` copies a source block,
/// `Update` and `Add` emit their literal bytes, `Remove` emits nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delta {
    /// Block/window length the signature was built with
    pub window_size: usize,

    /// Operations in target order
    pub ops: Vec<DeltaOp>,
}

impl Delta {
    /// Create an empty delta for the given window size
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            ops: Vec::new(),
        }
    }

    /// Total number of operations
    pub fn operation_count(&self) -> usize {
        self.ops.len()
    }

    /// Number of source blocks reused verbatim
    pub fn reused_blocks(&self) -> usize {
        self.ops.iter().filter(|op| op.is_keep()).count()
    }

    /// Total literal bytes that would have to be transmitted
    pub fn literal_bytes(&self) -> u64 {
        self.ops
            .iter()
            .map(|op| match op {
                DeltaOp::Update { data, .. } | DeltaOp::Add { data, .. } => data.len() as u64,
                _ => 0,
            })
            .sum()
    }

    /// True when the target equals the source: nothing but `Keep` ops
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| op.is_keep())
    }
}

/// A single delta operation. Block positions are 1-based; `Add` anchors on
/// the 0-based index of the block it follows (0 = before everything).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaOp {
    /// Reuse source block `block` verbatim
    Keep { block: u32 },

    /// The content at original block position `block` changed; `data`
    /// (at most one window) replaces it
    Update { block: u32, data: Vec<u8> },

    /// The original block at this position is absent from the target
    Remove { block: u32 },

    /// Newly inserted content (at most one window) with no original
    /// counterpart, positioned after block number `after`
    Add { after: u32, data: Vec<u8> },
}

impl DeltaOp {
    /// Check if this is a keep operation
    pub fn is_keep(&self) -> bool {
        matches!(self, DeltaOp::Keep { .. })
    }

    /// Literal payload carried by this operation, if any
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            DeltaOp::Update { data, .. } | DeltaOp::Add { data, .. } => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for DeltaOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeltaOp::Keep { block } => write!(f, "keep   {}", block),
            DeltaOp::Update { block, data } => {
                write!(f, "update {} {}", block, preview(data))
            }
            DeltaOp::Remove { block } => write!(f, "remove {}", block),
            DeltaOp::Add { after, data } => {
                write!(f, "add    after {} {}", after, preview(data))
            }
        }
    }
}

/// Short hex preview of a literal payload
fn preview(data: &[u8]) -> String {
    const PREVIEW_LEN: usize = 16;
    if data.len() <= PREVIEW_LEN {
        format!("[{}]", hex::encode(data))
    } else {
        format!("[{}.. {} bytes]", hex::encode(&data[..PREVIEW_LEN]), data.len())
    }
}
