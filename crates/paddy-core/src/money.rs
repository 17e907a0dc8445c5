//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a storefront that prices per kilogram:                              │
//! │    199.99 × 2.5 kg = 499.97499999...  → Which total do we store?       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Integer Grams                            │
//! │    19999 cents × 2500 g / 1000 = 49997.5 → 49998 (half-up, once)       │
//! │    The rounding point is explicit and the same at every call site      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use paddy_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(18500); // 185.00 per kg
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // 370.00
//! let total = price + Money::from_cents(500);    // 190.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(185.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;
use crate::weight::Weight;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON documents
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.base_price_cents_per_kg ──► pricing::resolve_tier_price        │
/// │                                          │                              │
/// │                                          ▼                              │
/// │  pricing::item_total ──► OrderItem.total_after_discount_cents           │
/// │                                          │                              │
/// │  Cart totals ◄── same engine ──► Agent price quotes                     │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::money::Money;
    ///
    /// let price = Money::from_cents(18500); // Represents 185.00
    /// assert_eq!(price.cents(), 18500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::money::Money;
    ///
    /// let price = Money::from_major_minor(185, 50); // 185.50
    /// assert_eq!(price.cents(), 18550);
    ///
    /// let refund = Money::from_major_minor(-5, 50); // -5.50
    /// assert_eq!(refund.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a per-kilogram price by a weight.
    ///
    /// This is the single place where price-per-kg meets quantity. The
    /// intermediate product is `cents × grams`, so the division by 1000
    /// rounds half away from zero at cent precision - the sub-cent remainder
    /// is resolved here, once, instead of at each call site.
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::money::Money;
    /// use paddy_core::weight::Weight;
    ///
    /// let per_kg = Money::from_cents(19999); // 199.99 per kg
    /// let total = per_kg.mul_weight(Weight::from_grams(2500)); // 2.5 kg
    /// // 19999 × 2500 / 1000 = 49997.5 → 49998
    /// assert_eq!(total.cents(), 49998);
    /// ```
    pub fn mul_weight(&self, weight: Weight) -> Money {
        // Use i128 to prevent overflow on large amounts
        let raw = self.0 as i128 * weight.grams() as i128;
        let cents = if raw >= 0 {
            (raw + 500) / 1000
        } else {
            (raw - 500) / 1000
        };
        Money::from_cents(cents as i64)
    }

    /// Calculates a percentage of this amount using half-up rounding.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::money::Money;
    /// use paddy_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(90_000);    // 900.00
    /// let rate = DiscountRate::from_bps(500);      // 5%
    ///
    /// let discount = subtotal.discount_amount(rate);
    /// assert_eq!(discount.cents(), 4500);          // 45.00
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        // rate.bps() is basis points: 500 = 5%
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::money::Money;
    /// use paddy_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(10000); // 100.00
    /// let discounted = subtotal.apply_discount(DiscountRate::from_bps(1000)); // 10% off
    /// assert_eq!(discounted.cents(), 9000); // 90.00
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.discount_amount(rate)
    }

    /// Rounds half-up to whole currency units.
    ///
    /// The pricing engine works at cent precision and never rounds to whole
    /// units itself. This is the rounding applied at persistence points -
    /// every amount written to an order or order-item document goes through
    /// this method so stored totals can never disagree across modules.
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(49997).round_to_major().cents(), 50000);
    /// assert_eq!(Money::from_cents(49950).round_to_major().cents(), 50000);
    /// assert_eq!(Money::from_cents(49949).round_to_major().cents(), 49900);
    /// ```
    pub fn round_to_major(&self) -> Money {
        let cents = if self.0 >= 0 {
            (self.0 + 50) / 100 * 100
        } else {
            (self.0 - 50) / 100 * 100
        };
        Money::from_cents(cents)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and agent chat output. Use frontend formatting for
/// actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.major_units().abs(),
            self.minor_units()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for whole-unit quantities).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation for aggregations (revenue totals, cart totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
