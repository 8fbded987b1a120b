//! Product catalog with soft delete.

use std::collections::BTreeMap;

use bk_core::{Money, Product, ProductId};
use bk_io::loader::check_product;
use bk_io::IoError;

use crate::{not_found, PipelineError};

/// Editable product fields, as submitted by a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub selling_price: Money,
    pub cost_price: Money,
    pub shelf_life_hours: u32,
    pub difficulty: u8,
}

impl ProductDraft {
    fn into_product(self, id: ProductId, active: bool) -> Result<Product, PipelineError> {
        let product = Product {
            id,
            name: self.name.trim().to_string(),
            selling_price: self.selling_price,
            cost_price: self.cost_price,
            shelf_life_hours: self.shelf_life_hours,
            difficulty: self.difficulty,
            active,
        };
        check_product(&product).map_err(|e| match e {
            IoError::Invalid(msg) => PipelineError::Validate(msg),
            other => PipelineError::Io(other),
        })?;
        Ok(product)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Add a new active product.
    pub fn insert(&mut self, id: ProductId, draft: ProductDraft) -> Result<&Product, PipelineError> {
        if self.products.contains_key(&id) {
            return Err(PipelineError::Duplicate(format!("product {id}")));
        }
        let product = draft.into_product(id.clone(), true)?;
        Ok(self.products.entry(id).or_insert(product))
    }

    /// Re-add a stored product as is (including its `active` flag).
    pub(crate) fn restore(&mut self, product: Product) -> Result<(), PipelineError> {
        if self.products.contains_key(&product.id) {
            return Err(PipelineError::Duplicate(format!("product {}", product.id)));
        }
        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Replace the editable fields of an existing product; `active` is untouched.
    pub fn update(&mut self, id: &ProductId, draft: ProductDraft) -> Result<&Product, PipelineError> {
        let slot = self.products.get_mut(id).ok_or_else(|| not_found(id))?;
        *slot = draft.into_product(id.clone(), slot.active)?;
        Ok(slot)
    }

    /// Soft delete. Recap rows keep pointing at the record.
    pub fn deactivate(&mut self, id: &ProductId) -> Result<(), PipelineError> {
        let slot = self.products.get_mut(id).ok_or_else(|| not_found(id))?;
        slot.active = false;
        tracing::info!(product = %id, "product deactivated");
        Ok(())
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Every product, active or not, ordered by name then id.
    pub fn all(&self) -> Vec<&Product> {
        let mut out: Vec<&Product> = self.products.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        out
    }

    /// Active products ordered by name then id.
    pub fn active(&self) -> Vec<&Product> {
        self.all().into_iter().filter(|p| p.active).collect()
    }
}
