//! rdelta - Streaming rsync-style binary delta tool
//!
//! This library computes a compact edit script between a source stream and a
//! target stream: the source is summarized once into a block [`Signature`]
//! (weak rolling checksum plus strong BLAKE3 digest per block), and the
//! target is then scanned against it to produce an ordered list of
//! keep/update/remove/add operations sufficient to reconstruct the target
//! from the source plus the transmitted literal bytes.

pub mod chunker;
pub mod cli;
pub mod config;
pub mod delta;
pub mod error;
pub mod format;
pub mod rolling;
pub mod signature;

pub use chunker::Chunker;
pub use config::Config;
pub use delta::{compute_delta, compute_delta_from_bytes, Delta, DeltaOp};
pub use error::{Error, Result};
pub use rolling::RollingChecksum;
pub use signature::{build_signature, signature_from_bytes, Signature};
