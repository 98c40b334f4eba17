//! .rdsig sidecar file format

use super::{Signature, SIGNATURE_MAGIC, SIGNATURE_VERSION};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Write a signature to a file
pub fn write_signature(sig: &Signature, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io("creating signature file", e))?;
    let mut writer = BufWriter::new(file);

    let data = write_signature_to_bytes(sig)?;
    writer
        .write_all(&data)
        .map_err(|e| Error::io("writing signature", e))?;
    writer.flush().map_err(|e| Error::io("flushing signature", e))?;

    Ok(())
}

/// Read a signature from a file
pub fn read_signature(path: &Path) -> Result<Signature> {
    let file = File::open(path).map_err(|e| Error::io("opening signature file", e))?;
    let mut reader = BufReader::new(file);

    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| Error::io("reading signature file", e))?;

    read_signature_from_bytes(&data)
}

/// Serialize a signature: magic, version byte, little-endian length, JSON payload
pub fn write_signature_to_bytes(sig: &Signature) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(sig)
        .map_err(|e| Error::signature(format!("serializing signature: {}", e)))?;

    let len = json.len() as u64;
    let mut data = Vec::with_capacity(SIGNATURE_MAGIC.len() + 1 + 8 + json.len());
    data.extend_from_slice(SIGNATURE_MAGIC);
    data.push(SIGNATURE_VERSION);
    data.extend_from_slice(&len.to_le_bytes());
    data.extend_from_slice(&json);

    Ok(data)
}

/// Parse a signature from bytes
pub fn read_signature_from_bytes(data: &[u8]) -> Result<Signature> {
    // magic + version + length prefix
    if data.len() < 15 {
        return Err(Error::signature("signature data too short"));
    }

    if &data[0..6] != SIGNATURE_MAGIC {
        return Err(Error::signature("invalid signature (bad magic)"));
    }

    if data[6] != SIGNATURE_VERSION {
        return Err(Error::signature(format!(
            "unsupported signature version {} (expected {})",
            data[6], SIGNATURE_VERSION
        )));
    }

    let len = u64::from_le_bytes(
        data[7..15]
            .try_into()
            .map_err(|_| Error::signature("signature length prefix unreadable"))?,
    ) as usize;

    if data.len() < 15 + len {
        return Err(Error::signature("signature data truncated"));
    }

    let sig: Signature = serde_json::from_slice(&data[15..15 + len])
        .map_err(|e| Error::signature(format!("deserializing signature: {}", e)))?;

    Ok(sig)
}
