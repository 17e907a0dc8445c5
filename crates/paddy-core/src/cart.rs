//! # Cart
//!
//! Owned cart state for the storefront.
//!
//! The cart is plain data passed into whatever handler needs it - there is
//! deliberately no process-wide cart singleton here. Callers own their cart
//! (per session, per request) and thread it explicitly.
//!
//! ## Pricing
//! Every number the cart reports comes from [`crate::pricing`]:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Totals Flow                                     │
//! │                                                                         │
//! │  CartItem (frozen PriceSchedule + quantity)                            │
//! │       │                                                                 │
//! │       ├──► pricing::resolve_tier_price ──► per-kg price, tier          │
//! │       ├──► pricing::savings ──► "you saved X%" messaging               │
//! │       └──► pricing::item_total ──► line total with loyalty             │
//! │                                                                         │
//! │  Cart::totals sums the lines - no cart-local price math exists         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{self, ItemTotal, Savings, TierPrice};
use crate::types::{DiscountRate, PriceSchedule, Product};
use crate::validation::validate_order_quantity;
use crate::weight::Weight;
use crate::MAX_CART_ITEMS;

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the product (for document lookup)
/// - `pricing`: Frozen copy of the product's price schedule at time of
///   adding. The cart keeps displaying consistent prices even if the
///   catalog record is updated after the item was added.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product ID (UUID)
    pub product_id: String,

    /// SKU at time of adding (frozen)
    pub sku: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Price schedule at time of adding (frozen)
    pub pricing: PriceSchedule,

    /// Quantity in the cart
    pub quantity: Weight,

    /// When this item was added to cart
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item from a product and quantity.
    ///
    /// ## Price Freezing
    /// The full price schedule is captured at this moment, so tier
    /// resolution stays stable for this line even if the product changes
    /// in the catalog.
    pub fn from_product(product: &Product, quantity: Weight) -> Self {
        CartItem {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            pricing: product.pricing(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The per-kg price and tier this line currently resolves to.
    pub fn resolved_price(&self) -> TierPrice {
        pricing::resolve_tier_price(&self.pricing, self.quantity)
    }

    /// Line subtotal before any loyalty discount.
    pub fn subtotal(&self) -> Money {
        pricing::subtotal(&self.pricing, self.quantity)
    }

    /// Savings against base price for this line ("you saved X%").
    pub fn savings(&self) -> Savings {
        pricing::savings(&self.pricing, self.quantity)
    }

    /// Line total with the loyalty discount applied after tier pricing.
    pub fn total(&self, loyalty: DiscountRate) -> ItemTotal {
        pricing::item_total(self.resolved_price().price_per_kg, self.quantity, loyalty)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product accumulates weight)
/// - Quantity must be > 0 (updating to zero removes the item)
/// - Maximum line items: 100
/// - Maximum weight per item: 1000 kg
#[derive(Debug, Clone, Serialize, Deserialize, Default, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Items in the cart
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or accumulates weight if already present.
    pub fn add_item(&mut self, product: &Product, quantity: Weight) -> CoreResult<()> {
        validate_order_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_quantity = item.quantity + quantity;
            validate_order_quantity(new_quantity)?;
            item.quantity = new_quantity;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Updates the quantity of an item in the cart.
    ///
    /// ## Behavior
    /// - If quantity is zero: removes the item
    /// - If product not found: returns error
    pub fn update_quantity(&mut self, product_id: &str, quantity: Weight) -> CoreResult<()> {
        if quantity.is_zero() {
            return self.remove_item(product_id);
        }

        validate_order_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
            Ok(())
        } else {
            Err(CoreError::ProductNotFound(product_id.to_string()))
        }
    }

    /// Removes an item from the cart by product ID.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotFound(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of unique line items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total weight of all items.
    pub fn total_weight(&self) -> Weight {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal (before the loyalty discount).
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.subtotal()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Full cart totals at a given loyalty rate.
    pub fn totals(&self, loyalty: DiscountRate) -> CartTotals {
        let mut subtotal = Money::zero();
        let mut discount = Money::zero();
        let mut total = Money::zero();
        let mut tier_savings = Money::zero();

        for item in &self.items {
            let line = item.total(loyalty);
            subtotal += line.subtotal;
            discount += line.discount_amount;
            total += line.total;
            tier_savings += item.savings().savings;
        }

        CartTotals {
            item_count: self.items.len(),
            total_weight: self.total_weight(),
            subtotal,
            discount,
            total,
            tier_savings,
        }
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_weight: Weight,
    /// Sum of tier-priced line subtotals.
    pub subtotal: Money,
    /// Loyalty discount across all lines.
    pub discount: Money,
    /// Grand total after the loyalty discount.
    pub total: Money,
    /// What tier pricing saved against base prices (display only).
    pub tier_savings: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceTier;

    fn test_product(id: &str, base_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            image_id: None,
            base_price_cents_per_kg: base_cents,
            has_tier_pricing: false,
            tier_2_4kg_price_cents: None,
            tier_5_9kg_price_cents: None,
            tier_10kg_up_price_cents: None,
            is_available: true,
            stock_grams: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tiered_product(id: &str) -> Product {
        Product {
            has_tier_pricing: true,
            tier_2_4kg_price_cents: Some(19000),
            tier_5_9kg_price_cents: Some(18000),
            tier_10kg_up_price_cents: Some(17000),
            ..test_product(id, 20000)
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product("1", 9990); // 99.90/kg

        cart.add_item(&product, Weight::from_grams(2000)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_weight(), Weight::from_grams(2000));
        assert_eq!(cart.subtotal(), Money::from_cents(19_980));
    }

    #[test]
    fn test_cart_add_same_product_accumulates_weight() {
        let mut cart = Cart::new();
        let product = tiered_product("1");

        cart.add_item(&product, Weight::from_grams(1500)).unwrap();
        cart.add_item(&product, Weight::from_grams(1500)).unwrap();

        assert_eq!(cart.item_count(), 1); // Still one line item
        assert_eq!(cart.total_weight(), Weight::from_grams(3000));

        // The accumulated 3 kg now crosses into the 2-4 kg tier.
        let resolved = cart.items[0].resolved_price();
        assert_eq!(resolved.tier, PriceTier::Bulk2To4);
        assert_eq!(cart.subtotal(), Money::from_cents(57_000));
    }

    #[test]
    fn test_cart_rejects_over_cap_accumulation() {
        let mut cart = Cart::new();
        let product = test_product("1", 9990);

        cart.add_item(&product, Weight::from_grams(600_000)).unwrap();
        let result = cart.add_item(&product, Weight::from_grams(600_000));
        assert!(matches!(result, Err(CoreError::InvalidQuantity { .. })));

        // The original line is unchanged.
        assert_eq!(cart.total_weight(), Weight::from_grams(600_000));
    }

    #[test]
    fn test_cart_totals_with_loyalty() {
        let mut cart = Cart::new();
        cart.add_item(&tiered_product("1"), Weight::from_grams(10_000))
            .unwrap();

        // 10 kg at 170.00 (10kg+ tier) = 1700.00; 5% loyalty = 85.00 off.
        let totals = cart.totals(DiscountRate::from_bps(500));
        assert_eq!(totals.subtotal, Money::from_cents(170_000));
        assert_eq!(totals.discount, Money::from_cents(8_500));
        assert_eq!(totals.total, Money::from_cents(161_500));

        // Tier savings vs base: 10 kg × (200 - 170) = 300.00.
        assert_eq!(totals.tier_savings, Money::from_cents(30_000));
    }

    #[test]
    fn test_cart_update_quantity_and_remove() {
        let mut cart = Cart::new();
        let product = test_product("1", 9990);

        cart.add_item(&product, Weight::from_grams(2000)).unwrap();
        cart.update_quantity("1", Weight::from_grams(5000)).unwrap();
        assert_eq!(cart.total_weight(), Weight::from_grams(5000));

        // Updating to zero removes the line.
        cart.update_quantity("1", Weight::zero()).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.update_quantity("1", Weight::from_grams(1000)),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 9990), Weight::from_grams(2000))
            .unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
    }
}
