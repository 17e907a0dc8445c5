//! # Product Repository
//!
//! Document operations for the product catalog.

use std::sync::Arc;

use tracing::debug;

use super::{collections, from_document, from_documents, to_document};
use crate::error::{BaasError, BaasResult};
use crate::store::DocumentStore;
use paddy_core::Product;

/// Repository for product catalog documents.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        ProductRepository { store }
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: &str) -> BaasResult<Option<Product>> {
        match self.store.get(collections::PRODUCTS, id).await? {
            Some(doc) => Ok(Some(from_document(collections::PRODUCTS, doc)?)),
            None => Ok(None),
        }
    }

    /// Gets a product by ID, failing if it doesn't exist.
    pub async fn require(&self, id: &str) -> BaasResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BaasError::not_found(collections::PRODUCTS, id))
    }

    /// Inserts a new catalog product.
    pub async fn insert(&self, product: &Product) -> BaasResult<()> {
        debug!(id = %product.id, sku = %product.sku, "Inserting product");

        let doc = to_document(collections::PRODUCTS, product)?;
        self.store
            .create(collections::PRODUCTS, &product.id, doc)
            .await?;
        Ok(())
    }

    /// Replaces a catalog product.
    pub async fn update(&self, product: &Product) -> BaasResult<()> {
        let doc = to_document(collections::PRODUCTS, product)?;
        self.store
            .update(collections::PRODUCTS, &product.id, doc)
            .await?;
        Ok(())
    }

    /// Lists the whole catalog.
    pub async fn list_all(&self) -> BaasResult<Vec<Product>> {
        let docs = self.store.list(collections::PRODUCTS).await?;
        from_documents(collections::PRODUCTS, docs)
    }

    /// Lists products the storefront can currently sell.
    pub async fn list_available(&self) -> BaasResult<Vec<Product>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|p| p.is_available)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn product(id: &str, available: bool) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            image_id: None,
            base_price_cents_per_kg: 20000,
            has_tier_pricing: false,
            tier_2_4kg_price_cents: None,
            tier_5_9kg_price_cents: None,
            tier_10kg_up_price_cents: None,
            is_available: available,
            stock_grams: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_and_list_available() {
        let repo = ProductRepository::new(Arc::new(MemoryStore::new()));

        repo.insert(&product("p1", true)).await.unwrap();
        repo.insert(&product("p2", false)).await.unwrap();

        let fetched = repo.require("p1").await.unwrap();
        assert_eq!(fetched.sku, "SKU-p1");
        assert!(repo.get_by_id("missing").await.unwrap().is_none());

        let available = repo.list_available().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, "p1");
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_pricing() {
        let repo = ProductRepository::new(Arc::new(MemoryStore::new()));

        let mut basmati = product("p1", true);
        repo.insert(&basmati).await.unwrap();

        basmati.has_tier_pricing = true;
        basmati.tier_10kg_up_price_cents = Some(17000);
        repo.update(&basmati).await.unwrap();

        let fetched = repo.require("p1").await.unwrap();
        assert!(fetched.has_tier_pricing);
        assert_eq!(fetched.tier_10kg_up_price_cents, Some(17000));
    }

    #[tokio::test]
    async fn test_require_missing_is_not_found() {
        let repo = ProductRepository::new(Arc::new(MemoryStore::new()));
        let result = repo.require("nope").await;
        assert!(matches!(result, Err(BaasError::NotFound { .. })));
    }
}
