//! # Customer Repository
//!
//! Document operations for customers. Authentication lives in the hosted
//! Account API; this collection carries the commerce-facing record only.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::{collections, from_document, from_documents, to_document};
use crate::error::{BaasError, BaasResult};
use crate::store::DocumentStore;
use paddy_core::{Customer, Money, SalesChannel};

/// Repository for customer documents.
#[derive(Clone)]
pub struct CustomerRepository {
    store: Arc<dyn DocumentStore>,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        CustomerRepository { store }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> BaasResult<Option<Customer>> {
        match self.store.get(collections::CUSTOMERS, id).await? {
            Some(doc) => Ok(Some(from_document(collections::CUSTOMERS, doc)?)),
            None => Ok(None),
        }
    }

    /// Gets a customer by ID, failing if it doesn't exist.
    pub async fn require(&self, id: &str) -> BaasResult<Customer> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BaasError::not_found(collections::CUSTOMERS, id))
    }

    /// Inserts a new customer.
    pub async fn insert(&self, customer: &Customer) -> BaasResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        let doc = to_document(collections::CUSTOMERS, customer)?;
        self.store
            .create(collections::CUSTOMERS, &customer.id, doc)
            .await?;
        Ok(())
    }

    /// Lists all customers.
    pub async fn list_all(&self) -> BaasResult<Vec<Customer>> {
        let docs = self.store.list(collections::CUSTOMERS).await?;
        from_documents(collections::CUSTOMERS, docs)
    }

    /// Adds a completed order's total to the customer's lifetime spend.
    ///
    /// Lifetime spend feeds loyalty qualification, so it follows the same
    /// rule as every revenue figure: returned orders never reach this
    /// method (the order flow only records spend for counted orders).
    pub async fn record_spend(&self, customer_id: &str, amount: Money) -> BaasResult<()> {
        let customer = self.require(customer_id).await?;
        let new_spend = customer.lifetime_spend() + amount;

        debug!(customer_id, spend_cents = new_spend.cents(), "Recording spend");

        self.store
            .update(
                collections::CUSTOMERS,
                customer_id,
                json!({ "lifetime_spend_cents": new_spend.cents() }),
            )
            .await?;
        Ok(())
    }

    /// Migrates a legacy record whose display name encodes the sales
    /// channel as a `" (S)"` / `" (K)"` suffix: moves the channel into its
    /// own field and cleans the name. No-op for already-clean records.
    pub async fn migrate_legacy_channel(&self, customer_id: &str) -> BaasResult<Customer> {
        let customer = self.require(customer_id).await?;

        let (clean_name, parsed) = SalesChannel::split_legacy_name(&customer.name);
        let Some(channel) = parsed else {
            return Ok(customer);
        };

        debug!(customer_id, ?channel, "Migrating legacy channel suffix");

        let doc = self
            .store
            .update(
                collections::CUSTOMERS,
                customer_id,
                json!({ "name": clean_name, "channel": channel }),
            )
            .await?;
        from_document(collections::CUSTOMERS, doc)
    }
}
