//! crates/bk_io/src/loader.rs
//! Dataset loading: size-limited read, serde parse, structural checks, digest.
//!
//! A dataset file is `{ "criteria"?: [...], "products": [...], "recaps"?: [...] }`.
//! Criterion codes outside C1..C4 fail at parse time (closed enum). The
//! remaining checks live in `validate_dataset`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bk_core::{Criterion, CriterionKind, DailyRecap, Product, ProductId, RecapEntry};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::canonical_json::write_canonical_file;
use crate::hasher::sha256_canonical;
use crate::IoError;

/// Hard cap on dataset and snapshot file sizes.
pub const MAX_DATASET_BYTES: usize = 8 * 1024 * 1024;

/// One recap row as stored on disk; `sold_qty` is always recomputed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecapRecord {
    pub date: NaiveDate,
    pub product_id: ProductId,
    pub production_qty: u32,
    pub leftover_qty: u32,
}

impl RecapRecord {
    pub fn entry(&self) -> RecapEntry {
        RecapEntry {
            product_id: self.product_id.clone(),
            production_qty: self.production_qty,
            leftover_qty: self.leftover_qty,
        }
    }

    pub fn to_recap(&self) -> DailyRecap {
        DailyRecap::from_entry(self.date, self.entry())
    }
}

impl From<&DailyRecap> for RecapRecord {
    fn from(r: &DailyRecap) -> Self {
        RecapRecord {
            date: r.date,
            product_id: r.product_id.clone(),
            production_qty: r.production_qty,
            leftover_qty: r.leftover_qty,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
    pub products: Vec<Product>,
    #[serde(default)]
    pub recaps: Vec<RecapRecord>,
}

impl Dataset {
    /// Configured criteria, or the seeded C1..C4 set when none are given.
    pub fn effective_criteria(&self) -> Vec<Criterion> {
        if self.criteria.is_empty() {
            CriterionKind::ALL.iter().map(|&k| Criterion::seeded(k)).collect()
        } else {
            self.criteria.clone()
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    /// SHA-256 of the canonical JSON of `dataset`.
    pub digest: String,
}

/* ---------------------------------- Reading ---------------------------------- */

fn read_limited(path: &Path, limit: usize) -> Result<Vec<u8>, IoError> {
    let mut f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let mut buf = Vec::new();
    f.by_ref().take(limit as u64 + 1).read_to_end(&mut buf)?;
    if buf.len() > limit {
        return Err(IoError::Limit(format!(
            "{} exceeds {limit} bytes",
            path.display()
        )));
    }
    Ok(buf)
}

/// Parse a JSON file into `T`, enforcing `MAX_DATASET_BYTES`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let bytes = read_limited(path, MAX_DATASET_BYTES)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Like `read_json_file`, but a missing file yields `T::default()`.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, IoError> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json_file(path)
}

/// Read, parse and validate a dataset file.
pub fn load_dataset(path: &Path) -> Result<LoadedDataset, IoError> {
    let dataset: Dataset = read_json_file(path)?;
    validate_dataset(&dataset)?;
    let digest = sha256_canonical(&dataset)?;
    Ok(LoadedDataset { dataset, digest })
}

/// Write a dataset as canonical JSON.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<(), IoError> {
    write_canonical_file(dataset, path)
}

/* -------------------------------- Validation -------------------------------- */

/// Domain checks on one product's editable fields.
pub fn check_product(p: &Product) -> Result<(), IoError> {
    let bad = |what: &str| Err(IoError::Invalid(format!("product {}: {what}", p.id)));
    if p.name.trim().is_empty() {
        return bad("name is empty");
    }
    if p.selling_price < 0 || p.cost_price < 0 {
        return bad("prices must be >= 0");
    }
    if p.shelf_life_hours < 1 {
        return bad("shelf_life_hours must be >= 1");
    }
    if !(1..=5).contains(&p.difficulty) {
        return bad("difficulty must be in 1..=5");
    }
    Ok(())
}

pub fn validate_dataset(ds: &Dataset) -> Result<(), IoError> {
    let mut codes = BTreeSet::new();
    for c in &ds.criteria {
        if !codes.insert(c.kind) {
            return Err(IoError::Invalid(format!("duplicate criterion {}", c.kind)));
        }
        if c.polarity != c.kind.polarity() {
            return Err(IoError::Invalid(format!(
                "criterion {} has fixed polarity {:?}",
                c.kind,
                c.kind.polarity()
            )));
        }
        if !c.weight.is_finite() {
            return Err(IoError::Invalid(format!("criterion {} weight is not finite", c.kind)));
        }
    }

    let mut ids = BTreeSet::new();
    for p in &ds.products {
        if !ids.insert(&p.id) {
            return Err(IoError::Invalid(format!("duplicate product id {}", p.id)));
        }
        check_product(p)?;
    }

    for r in &ds.recaps {
        if !ids.contains(&r.product_id) {
            return Err(IoError::Invalid(format!(
                "recap {} references unknown product {}",
                r.date, r.product_id
            )));
        }
    }
    Ok(())
}
