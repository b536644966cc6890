//! In-memory product catalog
//!
//! The catalog is seeded once from a bundled JSON list (or an external
//! file) and never mutated afterwards. Lookups hand out references only.

use std::path::Path;

use crate::error::{CoreError, Result};
use crate::product::Product;

/// Bundled sample catalog data
const BUNDLED_PRODUCTS: &str = include_str!("../data/products.json");

/// Read-only product catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-loaded products
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load the catalog bundled with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PRODUCTS)
    }

    /// Parse a catalog from a JSON array of products
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        if products.is_empty() {
            return Err(CoreError::Catalog("catalog is empty".into()));
        }
        tracing::debug!(count = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.in_category(category))
            .collect()
    }

    pub fn by_brand(&self, brand: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.from_brand(brand))
            .collect()
    }

    /// Case-insensitive substring search over name, category, brand and
    /// description
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&query)
                    || product.category.to_lowercase().contains(&query)
                    || product.brand.to_lowercase().contains(&query)
                    || product.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Distinct categories in first-seen order
    pub fn unique_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.iter().any(|c| c.eq_ignore_ascii_case(&product.category)) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Distinct brands in first-seen order, skipping empty brands
    pub fn unique_brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = Vec::new();
        for product in &self.products {
            if product.brand.is_empty() {
                continue;
            }
            if !brands.iter().any(|b| b.eq_ignore_ascii_case(&product.brand)) {
                brands.push(product.brand.clone());
            }
        }
        brands
    }

    /// Highest rated products first
    pub fn top_rated(&self, limit: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));
        products.truncate(limit);
        products
    }
}
