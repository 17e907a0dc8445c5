//! # Order Service
//!
//! The one multi-step write flow in the system: placing an order.
//!
//! ## Write Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order Write Sequence                           │
//! │                                                                         │
//! │  0. Validate every line (availability, price, quantity, stock)         │
//! │     Price every line through paddy_core::pricing                       │
//! │     Round every amount half-up to whole units (persistence boundary)   │
//! │                                                                         │
//! │  1. CREATE order-item documents        ◄── STRICTLY FIRST              │
//! │  2. CREATE order document                                              │
//! │  3. CREATE address document                                            │
//! │  4. UPDATE order with address reference                                │
//! │  5. UPDATE customer lifetime spend (best effort)                       │
//! │                                                                         │
//! │  The store is non-transactional. Items go first so a stored order     │
//! │  can never reference items that were never written. On failure, the   │
//! │  documents created so far are deleted best-effort; a failure DURING   │
//! │  rollback is logged and not retried (advisory rollback).              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::BaasError;
use crate::repository::Store;
use paddy_core::analytics::{self, ChannelPerformance, ProductSales, RevenueSummary};
use paddy_core::error::CoreError;
use paddy_core::loyalty;
use paddy_core::pricing;
use paddy_core::validation::{validate_order_quantity, validate_orderable, validate_order_total};
use paddy_core::{
    Address, DiscountRate, Money, Order, OrderItem, OrderStatus, SalesChannel, ValidationError,
    Weight,
};

// =============================================================================
// Requests & Results
// =============================================================================

/// One requested line of an order.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: Weight,
}

/// Shipping address fields collected at checkout.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
}

/// A request to place an order.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub customer_id: String,
    pub lines: Vec<OrderLine>,
    pub address: NewAddress,
    pub channel: SalesChannel,
    pub notes: Option<String>,
}

/// A successfully placed order.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// The loyalty rate that was applied, for confirmation messaging.
    pub loyalty_applied: DiscountRate,
}

/// Order flow errors: a business rejection or a storage failure.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] BaasError),
}

// =============================================================================
// Order Service
// =============================================================================

/// Places orders and serves order-derived reporting.
#[derive(Clone)]
pub struct OrderService {
    store: Store,
}

impl OrderService {
    /// Creates an OrderService over the repository facade.
    pub fn new(store: Store) -> Self {
        OrderService { store }
    }

    /// Places an order: validates, prices, then writes order-items, order,
    /// and address in that sequence with advisory rollback.
    pub async fn place_order(&self, request: OrderRequest) -> Result<PlacedOrder, OrderError> {
        if request.lines.is_empty() {
            return Err(CoreError::Validation(ValidationError::Required {
                field: "order items".to_string(),
            })
            .into());
        }

        let customer = self.store.customers().require(&request.customer_id).await?;
        let loyalty = loyalty::discount_for_customer(&customer);

        // ---------------------------------------------------------------------
        // Step 0: validate and price every line before writing anything.
        // ---------------------------------------------------------------------
        let order_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let mut items: Vec<OrderItem> = Vec::with_capacity(request.lines.len());
        let mut subtotal = Money::zero();
        let mut discount = Money::zero();
        let mut total = Money::zero();

        for line in &request.lines {
            let product = self.store.products().require(&line.product_id).await?;

            validate_orderable(&product).map_err(OrderError::Rejected)?;
            validate_order_quantity(line.quantity).map_err(OrderError::Rejected)?;
            if !product.can_fulfill(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available_kg: product.stock().unwrap_or_else(Weight::zero).kg(),
                    requested_kg: line.quantity.kg(),
                }
                .into());
            }

            let priced = pricing::breakdown(&product.pricing(), line.quantity, loyalty);

            // Persistence boundary: round half-up to whole currency units,
            // per line, the same way every module stores amounts.
            let line_subtotal = priced.subtotal.round_to_major();
            let line_discount = priced.discount_amount.round_to_major();
            let line_total = line_subtotal - line_discount;

            subtotal += line_subtotal;
            discount += line_discount;
            total += line_total;

            items.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: product.id.clone(),
                name_snapshot: product.name.clone(),
                price_per_kg_cents_at_order: priced.price_per_kg.cents(),
                quantity_grams: line.quantity.grams(),
                tier_applied: priced.tier_applied,
                subtotal_before_discount_cents: line_subtotal.cents(),
                discount_cents: line_discount.cents(),
                total_after_discount_cents: line_total.cents(),
                created_at: now,
            });
        }

        validate_order_total(total).map_err(OrderError::Rejected)?;

        let mut order = Order {
            id: order_id.clone(),
            order_number: generate_order_number(),
            customer_id: customer.id.clone(),
            status: OrderStatus::Pending,
            channel: request.channel,
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            total_cents: total.cents(),
            loyalty_discount_bps: loyalty.bps(),
            address_id: None,
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        // ---------------------------------------------------------------------
        // Step 1: order items, strictly before the order document.
        // ---------------------------------------------------------------------
        let mut created_items: Vec<String> = Vec::with_capacity(items.len());
        for item in &items {
            if let Err(err) = self.store.orders().insert_item(item).await {
                self.rollback_items(&created_items).await;
                return Err(err.into());
            }
            created_items.push(item.id.clone());
        }

        // ---------------------------------------------------------------------
        // Step 2: the order document.
        // ---------------------------------------------------------------------
        if let Err(err) = self.store.orders().insert_order(&order).await {
            self.rollback_items(&created_items).await;
            return Err(err.into());
        }

        // ---------------------------------------------------------------------
        // Steps 3-4: address document, then link it from the order.
        // ---------------------------------------------------------------------
        let address = Address {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id.clone(),
            line1: request.address.line1.clone(),
            line2: request.address.line2.clone(),
            city: request.address.city.clone(),
            postal_code: request.address.postal_code.clone(),
            phone: request.address.phone.clone(),
            created_at: now,
        };

        if let Err(err) = self.store.addresses().insert(&address).await {
            self.rollback_order(&order_id, &created_items).await;
            return Err(err.into());
        }

        if let Err(err) = self.store.orders().link_address(&order_id, &address.id).await {
            self.rollback_order(&order_id, &created_items).await;
            return Err(err.into());
        }
        order.address_id = Some(address.id.clone());

        // ---------------------------------------------------------------------
        // Step 5: lifetime spend, best effort - the order stands either way.
        // ---------------------------------------------------------------------
        if let Err(err) = self
            .store
            .customers()
            .record_spend(&customer.id, total)
            .await
        {
            warn!(
                customer_id = %customer.id,
                error = %err,
                "failed to record lifetime spend; loyalty qualification may lag"
            );
        }

        info!(
            order_id = %order_id,
            order_number = %order.order_number,
            total_cents = total.cents(),
            items = items.len(),
            loyalty_bps = loyalty.bps(),
            "Order placed"
        );

        Ok(PlacedOrder {
            order,
            items,
            loyalty_applied: loyalty,
        })
    }

    /// Transitions an order's status, enforcing the allowed lifecycle.
    ///
    /// A transition to `Returned` also deducts the order total from the
    /// customer's lifetime spend, keeping loyalty qualification consistent
    /// with the revenue rule.
    pub async fn transition_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self.store.orders().require(order_id).await?;

        if !allowed_transition(order.status, new_status) {
            return Err(CoreError::InvalidOrderStatus {
                order_id: order_id.to_string(),
                current_status: format!("{:?}", order.status).to_lowercase(),
            }
            .into());
        }

        self.store.orders().update_status(order_id, new_status).await?;
        debug!(order_id, from = ?order.status, to = ?new_status, "Order status changed");

        if new_status == OrderStatus::Returned {
            if let Err(err) = self
                .store
                .customers()
                .record_spend(&order.customer_id, Money::zero() - order.total())
                .await
            {
                warn!(
                    order_id,
                    customer_id = %order.customer_id,
                    error = %err,
                    "failed to deduct returned order from lifetime spend"
                );
            }
        }

        self.store.orders().require(order_id).await.map_err(Into::into)
    }

    // -------------------------------------------------------------------------
    // Reporting (admin dashboard, exports)
    // -------------------------------------------------------------------------

    /// Dashboard revenue summary. Returned orders are excluded by
    /// `paddy_core::analytics`.
    pub async fn revenue_summary(&self) -> Result<RevenueSummary, OrderError> {
        let orders = self.store.orders().list_all().await?;
        Ok(analytics::revenue_summary(&orders))
    }

    /// Lifetime value of a customer, returned orders excluded.
    pub async fn customer_lifetime_value(&self, customer_id: &str) -> Result<Money, OrderError> {
        let orders = self.store.orders().list_by_customer(customer_id).await?;
        Ok(analytics::customer_lifetime_value(customer_id, &orders))
    }

    /// Per-channel order counts and revenue, returned orders excluded.
    pub async fn channel_performance(&self) -> Result<Vec<ChannelPerformance>, OrderError> {
        let orders = self.store.orders().list_all().await?;
        Ok(analytics::channel_performance(&orders))
    }

    /// Best-selling products, derived from the normalized order items.
    pub async fn top_products(&self, limit: usize) -> Result<Vec<ProductSales>, OrderError> {
        let orders = self.store.orders().list_all().await?;
        let items = self.store.orders().list_all_items().await?;
        Ok(analytics::top_products(&orders, &items, limit))
    }

    /// CSV of order line items, derived from the normalized order items.
    pub async fn order_items_csv(&self) -> Result<String, OrderError> {
        let orders = self.store.orders().list_all().await?;
        let items = self.store.orders().list_all_items().await?;
        Ok(analytics::order_items_csv(&orders, &items))
    }

    // -------------------------------------------------------------------------
    // Rollback (advisory)
    // -------------------------------------------------------------------------

    /// Best-effort deletion of already-created order items. A failure here
    /// is logged, never retried - the next placement attempt gets fresh ids,
    /// and orphaned items are invisible to every read path (no order
    /// references them).
    async fn rollback_items(&self, item_ids: &[String]) {
        for item_id in item_ids {
            if let Err(err) = self.store.orders().delete_item(item_id).await {
                warn!(
                    item_id = %item_id,
                    error = %err,
                    "rollback failed; leaving orphaned order item"
                );
            }
        }
    }

    /// Best-effort deletion of the order document and its items, for
    /// failures after the order was written.
    async fn rollback_order(&self, order_id: &str, item_ids: &[String]) {
        if let Err(err) = self.store.orders().delete_order(order_id).await {
            warn!(
                order_id = %order_id,
                error = %err,
                "rollback failed; leaving orphaned order"
            );
        }
        self.rollback_items(item_ids).await;
    }
}

/// Which status transitions the lifecycle allows.
fn allowed_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Confirmed, Shipped)
            | (Confirmed, Cancelled)
            | (Shipped, Delivered)
            | (Delivered, Returned)
    )
}

/// Generates an order number in format: ORD-YYMMDD-HHMMSS-NNNN
fn generate_order_number() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let random: u16 = (nanos % 10000) as u16;
    format!("ORD-{}-{:04}", now.format("%y%m%d-%H%M%S"), random)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, MemoryStore};
    use async_trait::async_trait;
    use paddy_core::{Customer, Product};
    use serde_json::Value;
    use std::sync::Arc;

    /// Tests run with RUST_LOG=paddy_baas=debug to watch the write sequence
    /// and rollback warnings.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn tiered_product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            image_id: None,
            base_price_cents_per_kg: 20000,
            has_tier_pricing: true,
            tier_2_4kg_price_cents: Some(19000),
            tier_5_9kg_price_cents: Some(18000),
            tier_10kg_up_price_cents: Some(17000),
            is_available: true,
            stock_grams: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn customer(id: &str, spend_cents: i64) -> Customer {
        Customer {
            id: id.to_string(),
            name: "Ayesha Khan".to_string(),
            email: Some("ayesha@example.com".to_string()),
            phone: None,
            channel: SalesChannel::Web,
            lifetime_spend_cents: spend_cents,
            created_at: Utc::now(),
        }
    }

    fn request(product_id: &str, grams: i64) -> OrderRequest {
        OrderRequest {
            customer_id: "c1".to_string(),
            lines: vec![OrderLine {
                product_id: product_id.to_string(),
                quantity: Weight::from_grams(grams),
            }],
            address: NewAddress {
                line1: "12 Canal Road".to_string(),
                line2: None,
                city: "Lahore".to_string(),
                postal_code: Some("54000".to_string()),
                phone: Some("0300-0000000".to_string()),
            },
            channel: SalesChannel::Web,
            notes: None,
        }
    }

    async fn seeded(memory: Arc<MemoryStore>, spend_cents: i64) -> OrderService {
        init_tracing();
        let store = Store::new(memory as Arc<dyn DocumentStore>);
        store.products().insert(&tiered_product("p1")).await.unwrap();
        store
            .customers()
            .insert(&customer("c1", spend_cents))
            .await
            .unwrap();
        OrderService::new(store)
    }

    #[tokio::test]
    async fn test_place_order_happy_path_with_loyalty() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 150_000).await; // qualified

        let placed = service.place_order(request("p1", 10_000)).await.unwrap();

        // 10 kg at the 170.00 tier = 1700.00; 5% loyalty = 85.00 off.
        assert_eq!(placed.order.subtotal_cents, 170_000);
        assert_eq!(placed.order.discount_cents, 8_500);
        assert_eq!(placed.order.total_cents, 161_500);
        assert_eq!(placed.order.loyalty_discount_bps, 500);
        assert_eq!(placed.loyalty_applied.bps(), 500);

        assert_eq!(placed.items.len(), 1);
        assert_eq!(placed.items[0].price_per_kg_cents_at_order, 17000);
        assert_eq!(placed.items[0].total_after_discount_cents, 161_500);

        // Order document is linked to the written address.
        let address_id = placed.order.address_id.clone().unwrap();
        let stored = service.store.orders().require(&placed.order.id).await.unwrap();
        assert_eq!(stored.address_id, Some(address_id.clone()));
        assert!(service
            .store
            .addresses()
            .get_by_id(&address_id)
            .await
            .unwrap()
            .is_some());

        // Lifetime spend grew by the order total.
        let updated = service.store.customers().require("c1").await.unwrap();
        assert_eq!(updated.lifetime_spend_cents, 150_000 + 161_500);
    }

    #[tokio::test]
    async fn test_place_order_without_loyalty() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(memory, 0).await; // not qualified

        let placed = service.place_order(request("p1", 3_000)).await.unwrap();

        // 3 kg at the 190.00 tier, no loyalty discount.
        assert_eq!(placed.order.subtotal_cents, 57_000);
        assert_eq!(placed.order.discount_cents, 0);
        assert_eq!(placed.order.total_cents, 57_000);
        assert_eq!(placed.order.loyalty_discount_bps, 0);
    }

    #[tokio::test]
    async fn test_place_order_rejects_unavailable_product() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 0).await;

        let mut hidden = tiered_product("p2");
        hidden.is_available = false;
        service.store.products().insert(&hidden).await.unwrap();

        let result = service.place_order(request("p2", 3_000)).await;
        assert!(matches!(
            result,
            Err(OrderError::Rejected(CoreError::UnavailableProduct { .. }))
        ));

        // Nothing was written.
        assert_eq!(memory.count("orders"), 0);
        assert_eq!(memory.count("order_items"), 0);
    }

    #[tokio::test]
    async fn test_place_order_rejects_zero_price_product() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 0).await;

        let mut free = tiered_product("p3");
        free.base_price_cents_per_kg = 0;
        free.has_tier_pricing = false;
        service.store.products().insert(&free).await.unwrap();

        let result = service.place_order(request("p3", 3_000)).await;
        assert!(matches!(
            result,
            Err(OrderError::Rejected(CoreError::ZeroPriceProduct { .. }))
        ));
    }

    #[tokio::test]
    async fn test_place_order_rejects_zero_total() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 0).await;

        // 1 cent/kg × 1 g rounds to a zero line; the order total guard fires.
        let mut dust = tiered_product("p4");
        dust.base_price_cents_per_kg = 1;
        dust.has_tier_pricing = false;
        service.store.products().insert(&dust).await.unwrap();

        let result = service.place_order(request("p4", 1)).await;
        assert!(matches!(
            result,
            Err(OrderError::Rejected(CoreError::ZeroTotalOrder))
        ));
        assert_eq!(memory.count("order_items"), 0);
    }

    #[tokio::test]
    async fn test_place_order_rejects_over_cap_quantity() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(memory, 0).await;

        let result = service.place_order(request("p1", 1_000_001)).await;
        assert!(matches!(
            result,
            Err(OrderError::Rejected(CoreError::InvalidQuantity { .. }))
        ));
    }

    #[tokio::test]
    async fn test_place_order_rejects_insufficient_stock() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 0).await;

        let mut scarce = tiered_product("p5");
        scarce.stock_grams = Some(2_000);
        service.store.products().insert(&scarce).await.unwrap();

        let result = service.place_order(request("p5", 3_000)).await;
        assert!(matches!(
            result,
            Err(OrderError::Rejected(CoreError::InsufficientStock { .. }))
        ));
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_request() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(memory, 0).await;

        let mut empty = request("p1", 1_000);
        empty.lines.clear();

        let result = service.place_order(empty).await;
        assert!(matches!(
            result,
            Err(OrderError::Rejected(CoreError::Validation(_)))
        ));
    }

    // -------------------------------------------------------------------------
    // Failure injection
    // -------------------------------------------------------------------------

    /// Store wrapper that fails selected operations per collection.
    struct FlakyStore {
        inner: MemoryStore,
        fail_create_in: Option<&'static str>,
        fail_delete_in: Option<&'static str>,
    }

    impl FlakyStore {
        fn failing_create(collection: &'static str) -> Self {
            FlakyStore {
                inner: MemoryStore::new(),
                fail_create_in: Some(collection),
                fail_delete_in: None,
            }
        }
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        async fn create(&self, collection: &str, id: &str, data: Value) -> crate::error::BaasResult<Value> {
            if self.fail_create_in == Some(collection) {
                return Err(BaasError::Api {
                    status: 503,
                    message: "injected failure".to_string(),
                });
            }
            self.inner.create(collection, id, data).await
        }

        async fn get(&self, collection: &str, id: &str) -> crate::error::BaasResult<Option<Value>> {
            self.inner.get(collection, id).await
        }

        async fn update(&self, collection: &str, id: &str, data: Value) -> crate::error::BaasResult<Value> {
            self.inner.update(collection, id, data).await
        }

        async fn delete(&self, collection: &str, id: &str) -> crate::error::BaasResult<()> {
            if self.fail_delete_in == Some(collection) {
                return Err(BaasError::Api {
                    status: 503,
                    message: "injected rollback failure".to_string(),
                });
            }
            self.inner.delete(collection, id).await
        }

        async fn list(&self, collection: &str) -> crate::error::BaasResult<Vec<Value>> {
            self.inner.list(collection).await
        }
    }

    async fn seeded_flaky(flaky: Arc<FlakyStore>) -> OrderService {
        init_tracing();
        let store = Store::new(flaky as Arc<dyn DocumentStore>);
        store.products().insert(&tiered_product("p1")).await.unwrap();
        store.customers().insert(&customer("c1", 0)).await.unwrap();
        OrderService::new(store)
    }

    #[tokio::test]
    async fn test_failed_order_create_rolls_back_items() {
        let flaky = Arc::new(FlakyStore::failing_create("orders"));
        let service = seeded_flaky(Arc::clone(&flaky)).await;

        let result = service.place_order(request("p1", 3_000)).await;
        assert!(matches!(result, Err(OrderError::Storage(_))));

        // Items were created first, then rolled back; no order exists.
        assert_eq!(flaky.inner.count("order_items"), 0);
        assert_eq!(flaky.inner.count("orders"), 0);
    }

    #[tokio::test]
    async fn test_failed_address_create_rolls_back_order_and_items() {
        let flaky = Arc::new(FlakyStore::failing_create("addresses"));
        let service = seeded_flaky(Arc::clone(&flaky)).await;

        let result = service.place_order(request("p1", 3_000)).await;
        assert!(matches!(result, Err(OrderError::Storage(_))));

        assert_eq!(flaky.inner.count("orders"), 0);
        assert_eq!(flaky.inner.count("order_items"), 0);
        assert_eq!(flaky.inner.count("addresses"), 0);
    }

    #[tokio::test]
    async fn test_rollback_failure_is_advisory() {
        // Order creation fails AND item deletion fails: the original error
        // surfaces, the orphaned items stay, nothing panics or retries.
        let flaky = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            fail_create_in: Some("orders"),
            fail_delete_in: Some("order_items"),
        });
        let service = seeded_flaky(Arc::clone(&flaky)).await;

        let result = service.place_order(request("p1", 3_000)).await;
        assert!(matches!(result, Err(OrderError::Storage(BaasError::Api { status: 503, .. }))));

        // Rollback couldn't delete the items - they remain, orphaned.
        assert_eq!(flaky.inner.count("order_items"), 1);
        assert_eq!(flaky.inner.count("orders"), 0);
    }

    // -------------------------------------------------------------------------
    // Status lifecycle
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_status_lifecycle_and_return_deducts_spend() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 0).await;

        let placed = service.place_order(request("p1", 3_000)).await.unwrap();
        let order_id = placed.order.id.clone();

        let spend_after_order = service
            .store
            .customers()
            .require("c1")
            .await
            .unwrap()
            .lifetime_spend_cents;
        assert_eq!(spend_after_order, 57_000);

        service
            .transition_status(&order_id, OrderStatus::Confirmed)
            .await
            .unwrap();
        service
            .transition_status(&order_id, OrderStatus::Shipped)
            .await
            .unwrap();
        let delivered = service
            .transition_status(&order_id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);

        // Returning the order deducts its total from lifetime spend.
        let returned = service
            .transition_status(&order_id, OrderStatus::Returned)
            .await
            .unwrap();
        assert_eq!(returned.status, OrderStatus::Returned);

        let spend_after_return = service
            .store
            .customers()
            .require("c1")
            .await
            .unwrap()
            .lifetime_spend_cents;
        assert_eq!(spend_after_return, 0);
    }

    #[tokio::test]
    async fn test_invalid_status_transition_rejected() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(memory, 0).await;

        let placed = service.place_order(request("p1", 3_000)).await.unwrap();

        // Pending → Delivered skips the lifecycle.
        let result = service
            .transition_status(&placed.order.id, OrderStatus::Delivered)
            .await;
        assert!(matches!(
            result,
            Err(OrderError::Rejected(CoreError::InvalidOrderStatus { .. }))
        ));
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_revenue_summary_excludes_returned_orders() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 0).await;

        let first = service.place_order(request("p1", 3_000)).await.unwrap(); // 570.00
        service.place_order(request("p1", 10_000)).await.unwrap(); // 1700.00

        // Walk the first order to returned.
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Returned,
        ] {
            service
                .transition_status(&first.order.id, status)
                .await
                .unwrap();
        }

        let summary = service.revenue_summary().await.unwrap();
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.revenue, Money::from_cents(170_000));
        assert_eq!(summary.returned_count, 1);
        assert_eq!(summary.returned_total, Money::from_cents(57_000));

        let clv = service.customer_lifetime_value("c1").await.unwrap();
        assert_eq!(clv, Money::from_cents(170_000));

        let channels = service.channel_performance().await.unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].channel, SalesChannel::Web);
        assert_eq!(channels[0].revenue, Money::from_cents(170_000));

        let csv = service.order_items_csv().await.unwrap();
        // Header plus the one non-returned order's line.
        assert_eq!(csv.trim_end().lines().count(), 2);
    }

    #[tokio::test]
    async fn test_top_products_derive_from_items() {
        let memory = Arc::new(MemoryStore::new());
        let service = seeded(Arc::clone(&memory), 0).await;

        service.place_order(request("p1", 3_000)).await.unwrap();
        service.place_order(request("p1", 10_000)).await.unwrap();

        let ranked = service.top_products(5).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].product_id, "p1");
        assert_eq!(ranked[0].total_weight, Weight::from_grams(13_000));
        assert_eq!(ranked[0].revenue, Money::from_cents(227_000));
    }
}
