//! # Pricing Engine
//!
//! The tier pricing engine: maps (price schedule, quantity, optional loyalty
//! discount) to a deterministic price breakdown.
//!
//! ## Why One Module
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Consumer, One Engine                           │
//! │                                                                         │
//! │   Cart UI ────────────┐                                                 │
//! │   Checkout ───────────┤                                                 │
//! │   Agent tool ─────────┼──────► pricing::resolve_tier_price              │
//! │   Order placement ────┤        pricing::item_total                      │
//! │   Admin analytics ────┘        pricing::savings                         │
//! │                                                                         │
//! │   The number a customer sees in chat, in the cart, and on the order    │
//! │   record is computed by the same code path. Reimplementing any of     │
//! │   this per call site is how tier-boundary drift happens.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tier Model
//! Four weight buckets with per-kg prices, evaluated highest threshold
//! first, each guarded by "present and > 0":
//!
//! ```text
//!   quantity >= 10 kg  ──► tier_10kg_up_price   (tier "10kg+")
//!   quantity >=  5 kg  ──► tier_5_9kg_price     (tier "5-9kg")
//!   quantity >=  2 kg  ──► tier_2_4kg_price     (tier "2-4kg")
//!   otherwise          ──► base_price_per_kg    (tier "base")
//! ```
//!
//! A tier that is absent or zero is "not applicable" and falls through to
//! the NEXT LOWER tier, never to a higher one: with no 5-9 kg price
//! configured, 6 kg resolves to base price even when a 10 kg+ price exists.
//!
//! ## Failure Semantics
//! None. Every function here is total: no I/O, no errors, no panics. Inputs
//! are validated by callers ([`crate::validation`]) before money is quoted
//! or persisted; the engine itself degrades to base price on incomplete
//! tier configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DiscountRate, PriceSchedule};
use crate::weight::Weight;

// =============================================================================
// Tier Thresholds
// =============================================================================

/// Lower bound of the 2-4 kg bucket.
pub const TIER_2KG_MIN: Weight = Weight::from_grams(2_000);

/// Lower bound of the 5-9 kg bucket.
pub const TIER_5KG_MIN: Weight = Weight::from_grams(5_000);

/// Lower bound of the 10 kg+ bucket.
pub const TIER_10KG_MIN: Weight = Weight::from_grams(10_000);

// =============================================================================
// Price Tier
// =============================================================================

/// Which weight bucket a per-kg price was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PriceTier {
    /// No bucket applied; base per-kg price.
    #[serde(rename = "base")]
    Base,
    /// 2 kg up to (but not including) 5 kg.
    #[serde(rename = "2-4kg")]
    Bulk2To4,
    /// 5 kg up to (but not including) 10 kg.
    #[serde(rename = "5-9kg")]
    Bulk5To9,
    /// 10 kg and above.
    #[serde(rename = "10kg+")]
    Bulk10Plus,
}

impl PriceTier {
    /// Display label, matching the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            PriceTier::Base => "base",
            PriceTier::Bulk2To4 => "2-4kg",
            PriceTier::Bulk5To9 => "5-9kg",
            PriceTier::Bulk10Plus => "10kg+",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Engine Output Types
// =============================================================================

/// A resolved per-kg price and the bucket it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierPrice {
    pub price_per_kg: Money,
    pub tier: PriceTier,
}

/// Savings of the tiered price against the base price, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Savings {
    /// Base per-kg price × quantity.
    pub original_price: Money,
    /// Tier-resolved per-kg price × quantity.
    pub discounted_price: Money,
    /// `original_price - discounted_price`, never negative for a
    /// well-configured schedule.
    pub savings: Money,
    /// Savings as a percentage of the original price; 0 when the base
    /// price is zero.
    pub savings_percentage: f64,
    /// The bucket that produced the savings. `None` when nothing was
    /// saved - used purely for display/messaging, never for further
    /// calculation.
    pub tier_applied: Option<PriceTier>,
}

/// A line total with the loyalty discount broken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemTotal {
    /// Per-kg price × quantity, before the loyalty discount.
    pub subtotal: Money,
    /// Loyalty discount amount.
    pub discount_amount: Money,
    /// `subtotal - discount_amount`.
    pub total: Money,
}

/// The full per-line price breakdown: tier resolution, loyalty stacking,
/// and savings against base, in one pass.
///
/// Derived fresh on every invocation and never persisted as-is; the order
/// flow copies the fields it stores onto the order-item record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    pub price_per_kg: Money,
    pub tier_applied: PriceTier,
    /// Tiered price × quantity, before the loyalty discount.
    pub subtotal: Money,
    /// Loyalty discount amount.
    pub discount_amount: Money,
    pub total_after_discount: Money,
    /// Base price × quantity minus `total_after_discount` - what the
    /// customer saved against buying at base with no loyalty.
    pub savings: Money,
    /// `savings` as a percentage of base price × quantity; 0 when the base
    /// price is zero.
    pub savings_percentage: f64,
}

// =============================================================================
// Engine Operations
// =============================================================================

/// Resolves the effective per-kg price for a quantity.
///
/// Buckets are evaluated from the highest threshold downward, each guarded
/// by a presence/positivity check, so any subset of tiers can be configured
/// without an absent tier accidentally resolving to a price of zero.
///
/// ## Example
/// ```rust
/// use paddy_core::money::Money;
/// use paddy_core::pricing::{resolve_tier_price, PriceTier};
/// use paddy_core::types::PriceSchedule;
/// use paddy_core::weight::Weight;
///
/// let schedule = PriceSchedule {
///     base_price_cents_per_kg: 20000,
///     has_tier_pricing: true,
///     tier_2_4kg_price_cents: Some(19000),
///     tier_5_9kg_price_cents: None, // not configured
///     tier_10kg_up_price_cents: Some(17000),
/// };
///
/// // 6 kg falls through the missing 5-9 bucket to BASE, not to 10kg+.
/// let resolved = resolve_tier_price(&schedule, Weight::from_grams(6_000));
/// assert_eq!(resolved.price_per_kg, Money::from_cents(20000));
/// assert_eq!(resolved.tier, PriceTier::Base);
/// ```
pub fn resolve_tier_price(schedule: &PriceSchedule, quantity: Weight) -> TierPrice {
    if !schedule.has_tier_pricing {
        return TierPrice {
            price_per_kg: schedule.base_price(),
            tier: PriceTier::Base,
        };
    }

    if quantity >= TIER_10KG_MIN {
        if let Some(price) = configured(schedule.tier_10kg_up_price_cents) {
            return TierPrice {
                price_per_kg: price,
                tier: PriceTier::Bulk10Plus,
            };
        }
    }

    if quantity >= TIER_5KG_MIN {
        if let Some(price) = configured(schedule.tier_5_9kg_price_cents) {
            return TierPrice {
                price_per_kg: price,
                tier: PriceTier::Bulk5To9,
            };
        }
    }

    if quantity >= TIER_2KG_MIN {
        if let Some(price) = configured(schedule.tier_2_4kg_price_cents) {
            return TierPrice {
                price_per_kg: price,
                tier: PriceTier::Bulk2To4,
            };
        }
    }

    TierPrice {
        price_per_kg: schedule.base_price(),
        tier: PriceTier::Base,
    }
}

/// A tier price that is present and positive. Present-but-zero means "not
/// applicable", same as absent.
#[inline]
fn configured(tier_price_cents: Option<i64>) -> Option<Money> {
    tier_price_cents
        .filter(|cents| *cents > 0)
        .map(Money::from_cents)
}

/// Tier-resolved per-kg price × quantity, before any loyalty discount.
///
/// No rounding to whole currency units happens here; that is the caller's
/// responsibility at the point of persistence ([`Money::round_to_major`]),
/// applied uniformly so stored totals never disagree across modules.
pub fn subtotal(schedule: &PriceSchedule, quantity: Weight) -> Money {
    resolve_tier_price(schedule, quantity)
        .price_per_kg
        .mul_weight(quantity)
}

/// How much the tiered price saves against the base price.
///
/// `tier_applied` is `None` whenever nothing was saved, so "you saved X%"
/// messaging has a single condition to check.
pub fn savings(schedule: &PriceSchedule, quantity: Weight) -> Savings {
    let resolved = resolve_tier_price(schedule, quantity);
    let original_price = schedule.base_price().mul_weight(quantity);
    let discounted_price = resolved.price_per_kg.mul_weight(quantity);
    let saved = original_price - discounted_price;

    Savings {
        original_price,
        discounted_price,
        savings: saved,
        savings_percentage: percentage_of(saved, original_price),
        tier_applied: if saved.is_positive() {
            Some(resolved.tier)
        } else {
            None
        },
    }
}

/// Applies the stackable loyalty discount to an already tier-resolved price.
///
/// Ordering is a deliberate business rule: a customer who already gets a
/// bulk tier price receives the loyalty percentage off the DISCOUNTED
/// per-kg price, never off the base price.
///
/// ## Example
/// ```rust
/// use paddy_core::money::Money;
/// use paddy_core::pricing::item_total;
/// use paddy_core::types::DiscountRate;
/// use paddy_core::weight::Weight;
///
/// // Tiered price 90.00/kg, 10 kg, 5% loyalty:
/// let line = item_total(
///     Money::from_cents(9000),
///     Weight::from_grams(10_000),
///     DiscountRate::from_bps(500),
/// );
/// assert_eq!(line.total, Money::from_cents(85_500)); // 855.00, not 950.00
/// ```
pub fn item_total(price_per_kg: Money, quantity: Weight, loyalty: DiscountRate) -> ItemTotal {
    let line_subtotal = price_per_kg.mul_weight(quantity);
    let discount_amount = line_subtotal.discount_amount(loyalty);

    ItemTotal {
        subtotal: line_subtotal,
        discount_amount,
        total: line_subtotal - discount_amount,
    }
}

/// The composed breakdown: tier resolution, loyalty stacking, and savings
/// against base, exactly as the cart, checkout, and the agent quote them.
pub fn breakdown(
    schedule: &PriceSchedule,
    quantity: Weight,
    loyalty: DiscountRate,
) -> PriceBreakdown {
    let resolved = resolve_tier_price(schedule, quantity);
    let line = item_total(resolved.price_per_kg, quantity, loyalty);
    let original_price = schedule.base_price().mul_weight(quantity);
    let saved = original_price - line.total;

    PriceBreakdown {
        price_per_kg: resolved.price_per_kg,
        tier_applied: resolved.tier,
        subtotal: line.subtotal,
        discount_amount: line.discount_amount,
        total_after_discount: line.total,
        savings: saved,
        savings_percentage: percentage_of(saved, original_price),
    }
}

/// `part / whole * 100`, guarding the divide-by-zero when the base price
/// is zero (a misconfigured product must render "0%", not NaN).
fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_positive() {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    } else {
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
