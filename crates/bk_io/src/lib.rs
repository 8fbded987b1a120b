//! crates/bk_io/src/lib.rs
//! Single-source-of-truth I/O crate for the bakery engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - File modules: `canonical_json`, `hasher`, `loader`.
//! - Nothing here computes rankings; the pipeline owns orchestration.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for bk_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a location hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Input exceeded a size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// Hashing / id construction errors.
    #[error("hash error: {0}")]
    Hash(String),

    /// Dataset failed a structural check (duplicate ids, unknown references, ...).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column rather than a pointer
        IoError::Json {
            pointer: format!("line {} column {}", e.line(), e.column()),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub mod prelude {
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::hasher::{ranking_id_from_canonical, sha256_canonical, sha256_file, sha256_hex};
    pub use crate::loader::{
        load_dataset, read_json_or_default, write_dataset, Dataset, LoadedDataset, RecapRecord,
    };
    pub use crate::{IoError, IoResult};
}
