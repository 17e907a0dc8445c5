//! # Address Repository
//!
//! Document operations for shipping addresses. Addresses are written as
//! their own documents during order placement and linked from the order.

use std::sync::Arc;

use tracing::debug;

use super::{collections, from_document, to_document};
use crate::error::{BaasError, BaasResult};
use crate::store::DocumentStore;
use paddy_core::Address;

/// Repository for address documents.
#[derive(Clone)]
pub struct AddressRepository {
    store: Arc<dyn DocumentStore>,
}

impl AddressRepository {
    /// Creates a new AddressRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        AddressRepository { store }
    }

    /// Gets an address by ID.
    pub async fn get_by_id(&self, id: &str) -> BaasResult<Option<Address>> {
        match self.store.get(collections::ADDRESSES, id).await? {
            Some(doc) => Ok(Some(from_document(collections::ADDRESSES, doc)?)),
            None => Ok(None),
        }
    }

    /// Gets an address by ID, failing if it doesn't exist.
    pub async fn require(&self, id: &str) -> BaasResult<Address> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BaasError::not_found(collections::ADDRESSES, id))
    }

    /// Inserts a new address.
    pub async fn insert(&self, address: &Address) -> BaasResult<()> {
        debug!(id = %address.id, "Inserting address");

        let doc = to_document(collections::ADDRESSES, address)?;
        self.store
            .create(collections::ADDRESSES, &address.id, doc)
            .await?;
        Ok(())
    }
}
