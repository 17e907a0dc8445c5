//! # Domain Types
//!
//! Core domain types used throughout Paddy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │   Customer      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  sku (business) │   │  order_number   │   │  name           │       │
//! │  │  price schedule │   │  status         │   │  channel        │       │
//! │  │  is_available   │   │  total_cents    │   │  lifetime_spend │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │   OrderStatus   │   │  SalesChannel   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Pending..      │   │  Web            │       │
//! │  │  500 = 5%       │   │  Returned       │   │  Shop / Kiosk   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for document relations
//! - Business ID: (sku, order_number, etc.) - human-readable, potentially mutable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::PriceTier;
use crate::weight::Weight;

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the loyalty program discount)
///
/// Keeping the rate integral means discount math shares the same half-up
/// integer arithmetic as everything else in [`crate::money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Price Schedule
// =============================================================================

/// The pricing-relevant slice of a product.
///
/// This is the single input type of the pricing engine. The cart freezes a
/// copy of it per line item (snapshot pattern) so an already-carted product
/// keeps its price even if the catalog record changes underneath it.
///
/// ## Tier Semantics
/// A tier that is `None` OR configured as zero is "not applicable": the
/// engine falls through to the next lower tier, ultimately to the base
/// price. Any subset of tiers may be configured (e.g. only a 10kg+ tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceSchedule {
    /// Per-kg price in cents when no tier applies. Non-negative.
    pub base_price_cents_per_kg: i64,

    /// When false, all tier fields are ignored.
    pub has_tier_pricing: bool,

    /// Per-kg price for 2 kg up to (but not including) 5 kg.
    pub tier_2_4kg_price_cents: Option<i64>,

    /// Per-kg price for 5 kg up to (but not including) 10 kg.
    pub tier_5_9kg_price_cents: Option<i64>,

    /// Per-kg price for 10 kg and above.
    pub tier_10kg_up_price_cents: Option<i64>,
}

impl PriceSchedule {
    /// Returns the base per-kg price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents_per_kg)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A rice product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown in the storefront and on order records.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// File id of the product image in the hosted storage bucket.
    pub image_id: Option<String>,

    /// Per-kg base price in cents.
    pub base_price_cents_per_kg: i64,

    /// Whether weight-bucketed tier pricing is configured.
    pub has_tier_pricing: bool,

    /// Per-kg price for the 2-4 kg bucket (absent or zero = not applicable).
    pub tier_2_4kg_price_cents: Option<i64>,

    /// Per-kg price for the 5-9 kg bucket (absent or zero = not applicable).
    pub tier_5_9kg_price_cents: Option<i64>,

    /// Per-kg price for the 10 kg+ bucket (absent or zero = not applicable).
    pub tier_10kg_up_price_cents: Option<i64>,

    /// Whether the product can currently be ordered.
    pub is_available: bool,

    /// Stock on hand in grams, if tracked.
    pub stock_grams: Option<i64>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the pricing-relevant slice of this product.
    #[inline]
    pub fn pricing(&self) -> PriceSchedule {
        PriceSchedule {
            base_price_cents_per_kg: self.base_price_cents_per_kg,
            has_tier_pricing: self.has_tier_pricing,
            tier_2_4kg_price_cents: self.tier_2_4kg_price_cents,
            tier_5_9kg_price_cents: self.tier_5_9kg_price_cents,
            tier_10kg_up_price_cents: self.tier_10kg_up_price_cents,
        }
    }

    /// Returns the base per-kg price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents_per_kg)
    }

    /// Returns the stock on hand, if tracked.
    #[inline]
    pub fn stock(&self) -> Option<Weight> {
        self.stock_grams.map(Weight::from_grams)
    }

    /// Checks whether the requested weight can be fulfilled from stock.
    /// Products without stock tracking always fulfill.
    pub fn can_fulfill(&self, quantity: Weight) -> bool {
        match self.stock() {
            Some(stock) => stock >= quantity,
            None => true,
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    Pending,
    /// Order confirmed by staff.
    Confirmed,
    /// Order handed to the courier.
    Shipped,
    /// Order delivered to the customer.
    Delivered,
    /// Order returned by the customer.
    Returned,
    /// Order cancelled before shipping.
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status counts toward revenue aggregations.
    ///
    /// Returned orders are excluded from every revenue figure - dashboard
    /// totals, customer lifetime value, channel performance, exports. The
    /// rule lives here so no aggregation can apply its own variant of it.
    #[inline]
    pub const fn counts_toward_revenue(&self) -> bool {
        !matches!(self, OrderStatus::Returned)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Sales Channel
// =============================================================================

/// Sales channel attribution for customers and orders.
///
/// Channel is a first-class field. Historically it was encoded as a suffix
/// on the customer's display name (`"Ayesha (S)"`); that convention survives
/// only in [`SalesChannel::split_legacy_name`] for migrating old records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    /// Web storefront (default; includes the conversational agent).
    Web,
    /// Walk-in shop sale.
    Shop,
    /// Kiosk partner sale.
    Kiosk,
}

impl SalesChannel {
    /// Splits a legacy display name into a clean name and the channel its
    /// suffix encoded, if any.
    ///
    /// Matches a trailing `"(S)"` / `"(K)"` marker case-insensitively,
    /// tolerating surrounding whitespace. Only for migrating existing
    /// customer records - new records store the channel in its own field.
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::types::SalesChannel;
    ///
    /// let (name, channel) = SalesChannel::split_legacy_name("Ayesha Khan (S)");
    /// assert_eq!(name, "Ayesha Khan");
    /// assert_eq!(channel, Some(SalesChannel::Shop));
    ///
    /// let (name, channel) = SalesChannel::split_legacy_name("Bilal");
    /// assert_eq!(name, "Bilal");
    /// assert_eq!(channel, None);
    /// ```
    pub fn split_legacy_name(name: &str) -> (String, Option<SalesChannel>) {
        let trimmed = name.trim_end();

        if let Some(open) = trimmed.rfind('(') {
            if trimmed.ends_with(')') {
                let marker = trimmed[open + 1..trimmed.len() - 1].trim();
                let channel = if marker.eq_ignore_ascii_case("s") {
                    Some(SalesChannel::Shop)
                } else if marker.eq_ignore_ascii_case("k") {
                    Some(SalesChannel::Kiosk)
                } else {
                    None
                };

                if channel.is_some() {
                    return (trimmed[..open].trim_end().to_string(), channel);
                }
            }
        }

        (trimmed.to_string(), None)
    }
}

impl Default for SalesChannel {
    fn default() -> Self {
        SalesChannel::Web
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// Monetary fields are stored rounded half-up to whole currency units (the
/// write boundary applies [`Money::round_to_major`] uniformly).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub channel: SalesChannel,
    /// Sum of line subtotals before the loyalty discount.
    pub subtotal_cents: i64,
    /// Loyalty discount amount across all lines.
    pub discount_cents: i64,
    /// Grand total after all discounts.
    pub total_cents: i64,
    /// Loyalty rate applied at order time, in basis points.
    pub loyalty_discount_bps: u32,
    /// Shipping address document, linked after the address is written.
    pub address_id: Option<String>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Whether this order counts toward revenue aggregations.
    #[inline]
    pub fn counts_toward_revenue(&self) -> bool {
        self.status.counts_toward_revenue()
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product and pricing data at order time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product name at time of order (frozen).
    pub name_snapshot: String,
    /// Resolved per-kg price in cents at time of order (frozen).
    pub price_per_kg_cents_at_order: i64,
    /// Ordered weight in grams.
    pub quantity_grams: i64,
    /// Which weight bucket the per-kg price came from.
    pub tier_applied: PriceTier,
    /// Line subtotal before the loyalty discount.
    pub subtotal_before_discount_cents: i64,
    /// Loyalty discount applied to this line.
    pub discount_cents: i64,
    /// Line total after discount.
    pub total_after_discount_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the ordered weight.
    #[inline]
    pub fn quantity(&self) -> Weight {
        Weight::from_grams(self.quantity_grams)
    }

    /// Returns the frozen per-kg price as Money.
    #[inline]
    pub fn price_per_kg(&self) -> Money {
        Money::from_cents(self.price_per_kg_cents_at_order)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total_after_discount(&self) -> Money {
        Money::from_cents(self.total_after_discount_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A storefront customer.
///
/// Authentication lives in the hosted Account API; this record carries the
/// commerce-facing fields only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    /// Display name. Never encodes the sales channel (see [`SalesChannel`]).
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Channel this customer was acquired through.
    pub channel: SalesChannel,
    /// Lifetime spend across non-returned orders, in cents.
    pub lifetime_spend_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the lifetime spend as Money.
    #[inline]
    pub fn lifetime_spend(&self) -> Money {
        Money::from_cents(self.lifetime_spend_cents)
    }
}

// =============================================================================
// Address
// =============================================================================

/// A shipping address, written as its own document and linked from the order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    pub id: String,
    pub customer_id: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(5.0);
        assert_eq!(rate.bps(), 500);

        let rate = DiscountRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_returned_orders_do_not_count_toward_revenue() {
        assert!(OrderStatus::Delivered.counts_toward_revenue());
        assert!(OrderStatus::Pending.counts_toward_revenue());
        assert!(OrderStatus::Cancelled.counts_toward_revenue());
        assert!(!OrderStatus::Returned.counts_toward_revenue());
    }

    #[test]
    fn test_split_legacy_name_suffixes() {
        let (name, channel) = SalesChannel::split_legacy_name("Ayesha Khan (S)");
        assert_eq!(name, "Ayesha Khan");
        assert_eq!(channel, Some(SalesChannel::Shop));

        let (name, channel) = SalesChannel::split_legacy_name("Bilal (K)");
        assert_eq!(name, "Bilal");
        assert_eq!(channel, Some(SalesChannel::Kiosk));
    }

    #[test]
    fn test_split_legacy_name_is_case_insensitive_and_whitespace_tolerant() {
        let (name, channel) = SalesChannel::split_legacy_name("Ayesha (s)  ");
        assert_eq!(name, "Ayesha");
        assert_eq!(channel, Some(SalesChannel::Shop));

        let (name, channel) = SalesChannel::split_legacy_name("Bilal ( K )");
        assert_eq!(name, "Bilal");
        assert_eq!(channel, Some(SalesChannel::Kiosk));
    }

    #[test]
    fn test_split_legacy_name_leaves_plain_names_alone() {
        let (name, channel) = SalesChannel::split_legacy_name("Bilal");
        assert_eq!(name, "Bilal");
        assert_eq!(channel, None);

        // Parenthesized text that is not a channel marker stays in the name.
        let (name, channel) = SalesChannel::split_legacy_name("Rice Traders (Pvt)");
        assert_eq!(name, "Rice Traders (Pvt)");
        assert_eq!(channel, None);
    }

    #[test]
    fn test_product_can_fulfill() {
        let product = Product {
            id: "p1".to_string(),
            sku: "BASMATI-SELLA".to_string(),
            name: "Basmati Sella".to_string(),
            description: None,
            image_id: None,
            base_price_cents_per_kg: 20000,
            has_tier_pricing: false,
            tier_2_4kg_price_cents: None,
            tier_5_9kg_price_cents: None,
            tier_10kg_up_price_cents: None,
            is_available: true,
            stock_grams: Some(5000),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(product.can_fulfill(Weight::from_grams(5000)));
        assert!(!product.can_fulfill(Weight::from_grams(5001)));

        let untracked = Product {
            stock_grams: None,
            ..product
        };
        assert!(untracked.can_fulfill(Weight::from_grams(1_000_000)));
    }
}
