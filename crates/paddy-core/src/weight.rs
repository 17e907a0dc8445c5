//! # Weight Module
//!
//! Provides the `Weight` type for purchase quantities.
//!
//! Rice is priced per kilogram but ordered in fractional amounts (2.5 kg of
//! basmati), so quantities get the same treatment prices do: an integer
//! newtype in the smallest unit (grams), converted from floating point once
//! at the input boundary and exact everywhere after.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

/// A purchase weight in grams.
///
/// ## Design Decisions
/// - **i64 grams**: exact arithmetic; 1 g resolution is far below anything
///   the storefront sells
/// - **Conversions from f64 are fallible**: user and agent input arrives as
///   fractional kilograms and must be rejected when non-finite
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Weight(i64);

impl Weight {
    /// Creates a weight from grams.
    #[inline]
    pub const fn from_grams(grams: i64) -> Self {
        Weight(grams)
    }

    /// Converts fractional kilograms to a weight, rounding to the nearest
    /// gram.
    ///
    /// Returns `None` for NaN or infinite input - form fields and tool-call
    /// arguments are parsed from JSON numbers and can carry either.
    ///
    /// ## Example
    /// ```rust
    /// use paddy_core::weight::Weight;
    ///
    /// assert_eq!(Weight::try_from_kg(2.5), Some(Weight::from_grams(2500)));
    /// assert_eq!(Weight::try_from_kg(f64::NAN), None);
    /// ```
    pub fn try_from_kg(kg: f64) -> Option<Self> {
        if !kg.is_finite() {
            return None;
        }
        Some(Weight((kg * 1000.0).round() as i64))
    }

    /// Returns the weight in grams.
    #[inline]
    pub const fn grams(&self) -> i64 {
        self.0
    }

    /// Returns the weight in kilograms (for display only).
    #[inline]
    pub fn kg(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Zero weight.
    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
    }

    /// Checks if the weight is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the weight is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.kg())
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl AddAssign for Weight {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Weight {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Weight(self.0 - other.0)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Weight {
        iter.fold(Weight::zero(), Add::add)
    }
}
