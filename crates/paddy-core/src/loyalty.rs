//! # Loyalty Program
//!
//! A customer qualifies for the loyalty discount after crossing a lifetime
//! spend threshold. The discount is a fixed percentage, stackable ON TOP of
//! tier pricing: [`crate::pricing::item_total`] applies it to the
//! already-tiered per-kg price, never to the base price.

use crate::money::Money;
use crate::types::{Customer, DiscountRate};

/// Lifetime spend (cents) after which the loyalty discount is earned.
pub const QUALIFYING_SPEND: Money = Money::from_cents(100_000);

/// The loyalty discount rate: 5%.
pub const LOYALTY_DISCOUNT: DiscountRate = DiscountRate::from_bps(500);

/// Whether a lifetime spend qualifies for the loyalty discount.
#[inline]
pub fn qualifies(lifetime_spend: Money) -> bool {
    lifetime_spend >= QUALIFYING_SPEND
}

/// The discount rate earned by a lifetime spend: the loyalty rate once the
/// qualifying threshold is crossed, zero before.
pub fn discount_for_spend(lifetime_spend: Money) -> DiscountRate {
    if qualifies(lifetime_spend) {
        LOYALTY_DISCOUNT
    } else {
        DiscountRate::zero()
    }
}

/// The discount rate a customer is entitled to right now.
///
/// Lifetime spend only counts non-returned orders; the spend figure on the
/// customer record is maintained by the order flow under that rule.
#[inline]
pub fn discount_for_customer(customer: &Customer) -> DiscountRate {
    discount_for_spend(customer.lifetime_spend())
}
