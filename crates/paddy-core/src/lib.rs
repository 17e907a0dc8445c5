//! # paddy-core: Pure Business Logic for Paddy
//!
//! This crate is the **heart** of the Paddy rice storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Paddy Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web Storefront / Admin Dashboard               │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Analytics UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          paddy-agent (order-taking tool layer)                  │   │
//! │  │    calculate_order_price, check_product_availability, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ paddy-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │   tiers   │  │  Weight   │  │ CartItem  │  │   rules   │  │   │
//! │  │   │  savings  │  │ Discount  │  │  totals   │  │  guards   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DOCUMENT STORE • NO NETWORK • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              paddy-baas (Document Store Layer)                  │   │
//! │  │        Hosted BaaS REST client, repositories, order flow        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Customer, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`weight`] - Weight type in grams (rice is priced per kilogram)
//! - [`pricing`] - The tier pricing engine: every price in the system
//!   resolves through this one module
//! - [`cart`] - Cart state and engine-derived totals
//! - [`loyalty`] - Loyalty discount qualification
//! - [`analytics`] - Revenue aggregation (returned orders excluded)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Document store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **One Pricing Engine**: cart, checkout, the agent tools, and analytics
//!    all call [`pricing`] - the numbers a customer sees in chat, in the cart,
//!    and on the receipt come from the same code path
//!
//! ## Example Usage
//!
//! ```rust
//! use paddy_core::money::Money;
//! use paddy_core::weight::Weight;
//! use paddy_core::pricing::{self, PriceTier};
//! use paddy_core::types::PriceSchedule;
//!
//! let schedule = PriceSchedule {
//!     base_price_cents_per_kg: 20000, // 200.00 per kg
//!     has_tier_pricing: true,
//!     tier_2_4kg_price_cents: Some(19000),
//!     tier_5_9kg_price_cents: Some(18000),
//!     tier_10kg_up_price_cents: Some(17000),
//! };
//!
//! let resolved = pricing::resolve_tier_price(&schedule, Weight::from_grams(12_000));
//! assert_eq!(resolved.price_per_kg, Money::from_cents(17000));
//! assert_eq!(resolved.tier, PriceTier::Bulk10Plus);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod error;
pub mod loyalty;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use paddy_core::Money` instead of
// `use paddy_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique line items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum weight of a single line item, in grams (1000 kg)
///
/// ## Business Reason
/// Orders above a metric ton are wholesale territory and handled offline.
/// Also guards against typo quantities (e.g. 2500 kg instead of 2.5 kg).
pub const MAX_ITEM_WEIGHT_GRAMS: i64 = 1_000_000;
