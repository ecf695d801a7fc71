//=========================================================================
// Product Catalog
//=========================================================================
//
// Read-only product records consumed by the grid and the detail modal.
//
// Sources:
//   Catalog::default()   → built-in four-product range
//   Catalog::from_json() → `[{ "id": 1, "title": ..., ... }, ...]`
//   Catalog::load(path)  → same, from a file
//
// Validation: ids unique, titles non-blank. Order is preserved.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== CatalogError ========================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate product id {0}")]
    DuplicateId(u32),

    #[error("Product {0} has an empty title")]
    EmptyTitle(u32),
}

//=== Product =============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    /// Unit price in whole rupees.
    pub price: u32,
    /// Pack size label, e.g. "250g".
    pub unit: String,
    #[serde(alias = "img")]
    pub image: String,
    #[serde(alias = "desc")]
    pub description: String,
}

impl Product {
    fn new(id: u32, title: &str, price: u32, unit: &str, image: &str, description: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            price,
            unit: unit.to_string(),
            image: image.to_string(),
            description: description.to_string(),
        }
    }

    /// Price as displayed on cards, e.g. "₹100".
    pub fn price_label(&self) -> String {
        format!("₹{}", self.price)
    }
}

//=== Catalog =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and blank titles.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(product.id));
            }
        }
        Ok(Self { products })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded {} products from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: vec![
                Product::new(1, "Garlic Murukku — pouch", 100, "250g", "6.png", "Crispy garlic murukku."),
                Product::new(2, "Ribbon Murukku — pouch", 100, "250g", "8.png", "Crunchy ribbon murukku."),
                Product::new(3, "Special Mixture — pouch", 100, "250g", "8.png", "Savory namkeen mix."),
                Product::new(4, "Dry Fruit Laddoo — box", 350, "250g", "10.png", "Healthy dry fruit laddoo."),
            ],
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_four_products() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(4).unwrap().price_label(), "₹350");
        assert!(catalog.get(5).is_none());
    }

    #[test]
    fn json_accepts_short_field_names() {
        let json = r#"[
            { "id": 7, "title": "Thattai", "price": 90, "unit": "200g", "img": "t.png", "desc": "Crisp." }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let product = catalog.get(7).unwrap();
        assert_eq!(product.image, "t.png");
        assert_eq!(product.description, "Crisp.");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut products = Catalog::default().products().to_vec();
        products[1].id = 1;
        assert!(matches!(Catalog::new(products), Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn blank_titles_are_rejected() {
        let mut products = Catalog::default().products().to_vec();
        products[2].title = "  ".into();
        assert!(matches!(Catalog::new(products), Err(CatalogError::EmptyTitle(3))));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Json(_))));
    }
}
