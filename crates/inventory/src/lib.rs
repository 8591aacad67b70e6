#![deny(warnings)]

//! Product inventory: repository abstraction, in-memory store and snapshots.
//!
//! The pricing engine never owns storage. Callers inject a
//! [`ProductRepository`] and hand the engine an immutable `Vec<Sku>` snapshot
//! per optimization pass.

use pricing_core::{validate_sku, Category, Sku, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use thiserror::Error;
use tracing::info;

mod health;
mod sample;

pub use health::{stock_health, HealthStatus, StockHealth};
pub use sample::sample_inventory;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product not found: {0}")]
    NotFound(String),
    #[error("product already exists: {0}")]
    Duplicate(String),
    #[error("invalid product: {0}")]
    Invalid(#[from] ValidationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("repository lock poisoned")]
    Poisoned,
}

/// A product submitted for storage; the id is assigned when absent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub category: Category,
    pub quantity: u32,
    pub base_price: f64,
    pub holding_cost: f64,
    pub depreciation_rate: f64,
    pub demand_index: f64,
    #[serde(default)]
    pub days_to_expiry: Option<u32>,
}

impl NewProduct {
    fn into_sku(self, id: String) -> Sku {
        Sku {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            base_price: self.base_price,
            holding_cost: self.holding_cost,
            depreciation_rate: self.depreciation_rate,
            demand_index: self.demand_index,
            days_to_expiry: self.days_to_expiry,
        }
    }
}

impl From<Sku> for NewProduct {
    fn from(s: Sku) -> Self {
        Self {
            id: Some(s.id),
            name: s.name,
            category: s.category,
            quantity: s.quantity,
            base_price: s.base_price,
            holding_cost: s.holding_cost,
            depreciation_rate: s.depreciation_rate,
            demand_index: s.demand_index,
            days_to_expiry: s.days_to_expiry,
        }
    }
}

/// Storage for the product list.
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order.
    fn list(&self) -> Result<Vec<Sku>, RepositoryError>;
    fn get(&self, id: &str) -> Result<Sku, RepositoryError>;
    /// Validate and store a product, returning it with its final id.
    fn add(&self, product: NewProduct) -> Result<Sku, RepositoryError>;
    fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// First id handed out by [`InMemoryRepository`] when none is supplied.
const FIRST_ASSIGNED_ID: u64 = 2000;

/// Process-local repository guarded by a read/write lock.
#[derive(Debug)]
pub struct InMemoryRepository {
    products: RwLock<Vec<Sku>>,
    next_id: AtomicU64,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(FIRST_ASSIGNED_ID),
        }
    }

    /// Repository pre-filled with `products`, validated as a batch.
    pub fn with_products(products: Vec<Sku>) -> Result<Self, RepositoryError> {
        pricing_core::validate_inventory(&products)?;
        info!(count = products.len(), "inventory loaded");
        Ok(Self {
            products: RwLock::new(products),
            next_id: AtomicU64::new(FIRST_ASSIGNED_ID),
        })
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        let guard = self.products.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(guard.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn fresh_id(&self, taken: &[Sku]) -> String {
        loop {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed);
            let id = format!("PROD-{n}");
            if !taken.iter().any(|s| s.id == id) {
                return id;
            }
        }
    }
}

impl ProductRepository for InMemoryRepository {
    fn list(&self) -> Result<Vec<Sku>, RepositoryError> {
        let guard = self.products.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(guard.clone())
    }

    fn get(&self, id: &str) -> Result<Sku, RepositoryError> {
        let guard = self.products.read().map_err(|_| RepositoryError::Poisoned)?;
        guard
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn add(&self, product: NewProduct) -> Result<Sku, RepositoryError> {
        let mut guard = self.products.write().map_err(|_| RepositoryError::Poisoned)?;
        let id = match product.id.clone() {
            Some(id) if guard.iter().any(|s| s.id == id) => {
                return Err(RepositoryError::Duplicate(id));
            }
            Some(id) => id,
            None => self.fresh_id(&guard),
        };
        let sku = product.into_sku(id);
        validate_sku(&sku)?;
        guard.push(sku.clone());
        info!(id = %sku.id, "product added");
        Ok(sku)
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut guard = self.products.write().map_err(|_| RepositoryError::Poisoned)?;
        let before = guard.len();
        guard.retain(|s| s.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        info!(%id, "product deleted");
        Ok(())
    }
}

/// Read a JSON array of products and validate it as a batch.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<Sku>, RepositoryError> {
    let text = fs::read_to_string(path.as_ref())?;
    let skus: Vec<Sku> = serde_json::from_str(&text)?;
    pricing_core::validate_inventory(&skus)?;
    Ok(skus)
}

/// Write products as pretty JSON, creating parent directories.
pub fn save_snapshot<P: AsRef<Path>>(path: P, skus: &[Sku]) -> Result<(), RepositoryError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(skus)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn new_product(id: Option<&str>) -> NewProduct {
        NewProduct {
            id: id.map(str::to_string),
            name: Some("Olive Oil".into()),
            category: Category::NonPerishable,
            quantity: 40,
            base_price: 12.5,
            holding_cost: 0.8,
            depreciation_rate: 0.0,
            demand_index: 1.1,
            days_to_expiry: None,
        }
    }

    #[test]
    fn add_assigns_ids_and_lists_in_order() {
        let repo = InMemoryRepository::new();
        let a = repo.add(new_product(None)).unwrap();
        let b = repo.add(new_product(Some("CUSTOM-1"))).unwrap();
        assert_eq!(a.id, "PROD-2000");
        assert_eq!(b.id, "CUSTOM-1");
        let ids: Vec<String> = repo.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["PROD-2000", "CUSTOM-1"]);
        assert_eq!(repo.get("CUSTOM-1").unwrap().base_price, 12.5);
    }

    #[test]
    fn assigned_ids_skip_taken_ones() {
        let repo = InMemoryRepository::new();
        repo.add(new_product(Some("PROD-2000"))).unwrap();
        let s = repo.add(new_product(None)).unwrap();
        assert_eq!(s.id, "PROD-2001");
    }

    #[test]
    fn duplicate_and_invalid_are_rejected() {
        let repo = InMemoryRepository::new();
        repo.add(new_product(Some("X"))).unwrap();
        assert!(matches!(
            repo.add(new_product(Some("X"))),
            Err(RepositoryError::Duplicate(_))
        ));
        let mut bad = new_product(None);
        bad.base_price = 0.0;
        assert!(matches!(repo.add(bad), Err(RepositoryError::Invalid(_))));
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let repo = InMemoryRepository::new();
        repo.add(new_product(Some("X"))).unwrap();
        repo.delete("X").unwrap();
        assert!(repo.is_empty().unwrap());
        assert!(matches!(repo.delete("X"), Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let repo = std::sync::Arc::new(InMemoryRepository::new());
        let writer = repo.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.products.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(matches!(repo.len(), Err(RepositoryError::Poisoned)));
        assert!(matches!(repo.is_empty(), Err(RepositoryError::Poisoned)));
        assert!(matches!(repo.list(), Err(RepositoryError::Poisoned)));
    }

    #[test]
    fn snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/inventory.json");
        let skus = sample_inventory(&mut ChaCha8Rng::seed_from_u64(4));
        save_snapshot(&path, &skus).unwrap();
        let back = load_snapshot(&path).unwrap();
        assert_eq!(back, skus);
        let repo = InMemoryRepository::with_products(back).unwrap();
        assert_eq!(repo.len().unwrap(), 16);
    }
}
