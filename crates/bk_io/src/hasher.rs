//! crates/bk_io/src/hasher.rs
//!
//! Deterministic hashing and id builders for canonical artifacts.
//!
//! - `sha256_canonical(..)` hashes JSON values/structs through `canonical_json`.
//! - `sha256_hex(..)` / `sha256_file(..)` hash raw bytes.
//! - Ranking ids are `RANK:` + the digest of the canonical artifact without its id.
//! - Hex digests are lowercase.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bk_core::RankingId;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoError;

/* ---------------------------------- Digests ---------------------------------- */

/// SHA-256 of raw bytes as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 of a file's bytes, streamed.
pub fn sha256_file(path: &Path) -> Result<String, IoError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// SHA-256 of the canonical JSON form of `value`.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    let bytes = to_canonical_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

/* ------------------------------------ IDs ------------------------------------ */

/// `RANK:<hex64>` from the canonical bytes of an id-less ranking artifact.
pub fn ranking_id_from_canonical<T: Serialize>(artifact_without_id: &T) -> Result<RankingId, IoError> {
    let hex64 = sha256_canonical(artifact_without_id)?;
    RankingId::from_digest(&hex64).map_err(|e| IoError::Hash(e.to_string()))
}
