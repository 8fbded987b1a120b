//! Sample catalog and default criteria for a fresh install.

use bk_core::{Criterion, CriterionKind, Money, Product};
use bk_io::loader::Dataset;

use crate::catalog::ProductDraft;
use crate::{BakeryCtx, PipelineError};

const SAMPLE_PRODUCTS: [(&str, &str, Money, Money, u32, u8); 5] = [
    ("kue-lapis", "Kue Lapis", 25_000, 12_000, 48, 3),
    ("brownies-kukus", "Brownies Kukus", 30_000, 15_000, 72, 2),
    ("bolu-pandan", "Bolu Pandan", 20_000, 8_000, 24, 2),
    ("kue-dadar-gulung", "Kue Dadar Gulung", 15_000, 7_000, 12, 4),
    ("puding-coklat", "Puding Coklat", 18_000, 6_000, 24, 1),
];

pub fn sample_products() -> Vec<Product> {
    SAMPLE_PRODUCTS
        .iter()
        .filter_map(|&(id, name, selling_price, cost_price, shelf_life_hours, difficulty)| {
            Some(Product {
                id: id.parse().ok()?,
                name: name.to_string(),
                selling_price,
                cost_price,
                shelf_life_hours,
                difficulty,
                active: true,
            })
        })
        .collect()
}

/// Seeded criteria plus the sample products; no recaps.
pub fn sample_dataset() -> Dataset {
    Dataset {
        criteria: CriterionKind::ALL.iter().map(|&k| Criterion::seeded(k)).collect(),
        products: sample_products(),
        recaps: Vec::new(),
    }
}

/// Add the sample products to an empty catalog. Returns how many were added.
pub fn seed_catalog(ctx: &mut BakeryCtx) -> Result<usize, PipelineError> {
    if !ctx.catalog.is_empty() {
        tracing::info!(existing = ctx.catalog.len(), "catalog not empty; skipping sample products");
        return Ok(0);
    }
    let products = sample_products();
    for p in &products {
        ctx.catalog.insert(
            p.id.clone(),
            ProductDraft {
                name: p.name.clone(),
                selling_price: p.selling_price,
                cost_price: p.cost_price,
                shelf_life_hours: p.shelf_life_hours,
                difficulty: p.difficulty,
            },
        )?;
    }
    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_valid_products() {
        let ds = sample_dataset();
        assert_eq!(ds.products.len(), 5);
        assert!(bk_io::loader::validate_dataset(&ds).is_ok());
        assert_eq!(ds.products[1].margin(), 15_000);
    }

    #[test]
    fn seeding_only_fills_an_empty_catalog() {
        let mut ctx = BakeryCtx::default();
        assert_eq!(seed_catalog(&mut ctx).unwrap(), 5);
        assert_eq!(seed_catalog(&mut ctx).unwrap(), 0);
        assert_eq!(ctx.catalog.active()[0].name, "Bolu Pandan");
    }
}
