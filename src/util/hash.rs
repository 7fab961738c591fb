//! Content digest computation.
//!
//! Every imported artifact is identified by the SHA-256 of its byte
//! content, rendered as lowercase hex. The digest depends only on the
//! bytes, never on where they came from.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of everything readable from `reader`.
///
/// The stream is consumed incrementally; arbitrarily large inputs are
/// fine. A read error aborts with the underlying I/O error.
pub fn sha256_reader(mut reader: impl Read) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compute the SHA-256 digest of a file's content.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;
    sha256_reader(BufReader::new(file))
        .with_context(|| format!("failed to hash file: {}", path.display()))
}
