//! # Repositories
//!
//! Typed access per aggregate over the [`DocumentStore`] seam. Repositories
//! translate between domain types and JSON documents; they never compute
//! prices and never apply business rules - that is paddy-core's job.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{BaasError, BaasResult};
use crate::store::DocumentStore;

pub mod address;
pub mod customer;
pub mod order;
pub mod product;

pub use address::AddressRepository;
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

// =============================================================================
// Collections
// =============================================================================

/// Collection names in the hosted database.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const ORDER_ITEMS: &str = "order_items";
    pub const CUSTOMERS: &str = "customers";
    pub const ADDRESSES: &str = "addresses";
}

// =============================================================================
// Store Facade
// =============================================================================

/// All repositories over one shared document store.
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::new(Arc::new(BaasClient::new(&config)?));
/// let products = store.products().list_available().await?;
/// ```
#[derive(Clone)]
pub struct Store {
    products: ProductRepository,
    orders: OrderRepository,
    customers: CustomerRepository,
    addresses: AddressRepository,
}

impl Store {
    /// Creates the repository facade over a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Store {
            products: ProductRepository::new(Arc::clone(&store)),
            orders: OrderRepository::new(Arc::clone(&store)),
            customers: CustomerRepository::new(Arc::clone(&store)),
            addresses: AddressRepository::new(store),
        }
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    pub fn addresses(&self) -> &AddressRepository {
        &self.addresses
    }
}

// =============================================================================
// Document Mapping Helpers
// =============================================================================

/// Serializes a domain value into a document.
pub(crate) fn to_document<T: Serialize>(collection: &str, value: &T) -> BaasResult<Value> {
    serde_json::to_value(value).map_err(|e| BaasError::malformed(collection, e))
}

/// Deserializes a document into a domain value.
pub(crate) fn from_document<T: DeserializeOwned>(collection: &str, doc: Value) -> BaasResult<T> {
    serde_json::from_value(doc).map_err(|e| BaasError::malformed(collection, e))
}

/// Deserializes a whole listing, failing on the first malformed document.
pub(crate) fn from_documents<T: DeserializeOwned>(
    collection: &str,
    docs: Vec<Value>,
) -> BaasResult<Vec<T>> {
    docs.into_iter()
        .map(|doc| from_document(collection, doc))
        .collect()
}
