//! # Order Repository
//!
//! Document operations for orders and their line items.
//!
//! ## Two Collections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders         one document per order (totals, status, address ref)   │
//! │  order_items    one document per line (snapshot of product + pricing)  │
//! │                                                                         │
//! │  order_items is the single source of truth for line data. Nothing     │
//! │  stores a denormalized "productId:quantity" summary on the order;     │
//! │  exports and summaries derive from the items on read.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use super::{collections, from_document, from_documents, to_document};
use crate::error::{BaasError, BaasResult};
use crate::store::DocumentStore;
use paddy_core::{Order, OrderItem, OrderStatus};

/// Repository for order and order-item documents.
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn DocumentStore>,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        OrderRepository { store }
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> BaasResult<Option<Order>> {
        match self.store.get(collections::ORDERS, id).await? {
            Some(doc) => Ok(Some(from_document(collections::ORDERS, doc)?)),
            None => Ok(None),
        }
    }

    /// Gets an order by ID, failing if it doesn't exist.
    pub async fn require(&self, id: &str) -> BaasResult<Order> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BaasError::not_found(collections::ORDERS, id))
    }

    /// Inserts a new order document.
    ///
    /// The order flow calls this only AFTER all of the order's items exist
    /// (see `OrderService::place_order`), so a stored order never references
    /// items that were never written.
    pub async fn insert_order(&self, order: &Order) -> BaasResult<()> {
        debug!(id = %order.id, order_number = %order.order_number, "Inserting order");

        let doc = to_document(collections::ORDERS, order)?;
        self.store.create(collections::ORDERS, &order.id, doc).await?;
        Ok(())
    }

    /// Deletes an order document (rollback path only).
    pub async fn delete_order(&self, id: &str) -> BaasResult<()> {
        self.store.delete(collections::ORDERS, id).await
    }

    /// Links the shipping address document to an order.
    pub async fn link_address(&self, order_id: &str, address_id: &str) -> BaasResult<()> {
        debug!(order_id, address_id, "Linking address to order");

        self.store
            .update(
                collections::ORDERS,
                order_id,
                json!({ "address_id": address_id, "updated_at": Utc::now() }),
            )
            .await?;
        Ok(())
    }

    /// Updates an order's status.
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> BaasResult<()> {
        debug!(order_id, ?status, "Updating order status");

        self.store
            .update(
                collections::ORDERS,
                order_id,
                json!({ "status": status, "updated_at": Utc::now() }),
            )
            .await?;
        Ok(())
    }

    /// Lists all orders.
    pub async fn list_all(&self) -> BaasResult<Vec<Order>> {
        let docs = self.store.list(collections::ORDERS).await?;
        from_documents(collections::ORDERS, docs)
    }

    /// Lists a customer's orders.
    pub async fn list_by_customer(&self, customer_id: &str) -> BaasResult<Vec<Order>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|o| o.customer_id == customer_id)
            .collect())
    }

    // -------------------------------------------------------------------------
    // Order Items
    // -------------------------------------------------------------------------

    /// Inserts an order line item.
    ///
    /// ## Snapshot Pattern
    /// The item carries frozen product and pricing data (name, per-kg price,
    /// tier). Order history stays intact even if the product changes later.
    pub async fn insert_item(&self, item: &OrderItem) -> BaasResult<()> {
        debug!(order_id = %item.order_id, product_id = %item.product_id, "Inserting order item");

        let doc = to_document(collections::ORDER_ITEMS, item)?;
        self.store
            .create(collections::ORDER_ITEMS, &item.id, doc)
            .await?;
        Ok(())
    }

    /// Deletes an order line item (rollback path only).
    pub async fn delete_item(&self, id: &str) -> BaasResult<()> {
        self.store.delete(collections::ORDER_ITEMS, id).await
    }

    /// Gets all items for an order.
    pub async fn items_for_order(&self, order_id: &str) -> BaasResult<Vec<OrderItem>> {
        Ok(self
            .list_all_items()
            .await?
            .into_iter()
            .filter(|i| i.order_id == order_id)
            .collect())
    }

    /// Lists every order item (analytics, exports).
    pub async fn list_all_items(&self) -> BaasResult<Vec<OrderItem>> {
        let docs = self.store.list(collections::ORDER_ITEMS).await?;
        from_documents(collections::ORDER_ITEMS, docs)
    }
}
