//! Catalog product record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable catalog record. Created once at load time and never mutated;
/// every other component holds read references only.
///
/// `brand` and `description` default to the empty string when absent from
/// the data source, so matching code never has to coalesce missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Price in rupees (positive)
    pub price: f32,
    /// Image URI
    pub image: String,
    /// Rating on a 0-5 scale
    pub rating: f32,
    /// Category (small open set: Jacket, Hoodie, Pants, Gloves, ...)
    pub category: String,
    /// Brand (open string set)
    #[serde(default)]
    pub brand: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Listing timestamp. When present, recency boosts use real age;
    /// otherwise the ranker falls back to the id-as-recency proxy.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Case-insensitive category comparison
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }

    /// Case-insensitive brand comparison
    pub fn from_brand(&self, brand: &str) -> bool {
        self.brand.eq_ignore_ascii_case(brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_to_empty() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "PLAIN TEE",
                "price": 99,
                "image": "https://example.com/tee.jpg",
                "rating": 4.0,
                "category": "Hoodie"
            }"#,
        )
        .unwrap();

        assert_eq!(product.brand, "");
        assert_eq!(product.description, "");
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let product = Product {
            id: 1,
            name: "SKULL PRINTED JACKET".into(),
            price: 399.0,
            image: String::new(),
            rating: 4.8,
            category: "Jacket".into(),
            brand: "Wink".into(),
            description: String::new(),
            created_at: None,
        };

        assert!(product.in_category("jacket"));
        assert!(product.from_brand("WINK"));
        assert!(!product.in_category("hoodie"));
    }
}
