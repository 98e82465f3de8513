//! Injected product-catalog lookup.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog record for one product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    name: String,
    category: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        CatalogEntry {
            name: name.into(),
            category: category.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Read-only lookup table mapping product identifiers to catalog entries.
///
/// The pipeline never owns catalog state; callers inject whatever table
/// applies to the trading partner, so tests can supply arbitrary ones.
///
/// # Examples
/// ```rust
/// use asnval_core::catalog::{CatalogEntry, ProductCatalog};
///
/// let catalog: ProductCatalog =
///     [("12345678901231".to_string(), CatalogEntry::new("Widget", "Electronics"))]
///         .into_iter()
///         .collect();
/// assert!(catalog.get("12345678901231").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        ProductCatalog::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(identifier.into(), entry);
    }

    pub fn get(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Small demo catalog with check-digit-valid identifiers, used by the
    /// CLI when no catalog file is supplied.
    pub fn sample() -> Self {
        let mut catalog = ProductCatalog::new();
        catalog.insert("12345678901231", CatalogEntry::new("Sample Product 1", "Electronics"));
        catalog.insert("98765432109879", CatalogEntry::new("Sample Product 2", "Clothing"));
        catalog.insert("03600029145224", CatalogEntry::new("Test Product", "Food"));
        catalog.insert("89012345678902", CatalogEntry::new("Demo Item", "Home"));
        catalog
    }
}

impl FromIterator<(String, CatalogEntry)> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = (String, CatalogEntry)>>(iter: I) -> Self {
        ProductCatalog {
            entries: iter.into_iter().collect(),
        }
    }
}
