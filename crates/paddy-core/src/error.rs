//! # Error Types
//!
//! Domain-specific error types for paddy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  paddy-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations (checkout guards)     │
//! │  └── ValidationError  - Field-level input validation failures          │
//! │                                                                         │
//! │  paddy-baas errors (separate crate)                                    │
//! │  └── BaasError        - Document store operation failures              │
//! │                                                                         │
//! │  paddy-agent errors (separate crate)                                   │
//! │  └── ToolError        - What the tool-calling SDK sees (serialized)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BaasError → ToolError → SDK       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantity, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! Note the pricing engine itself never produces any of these: it is a
//! total function. These errors belong to the CALLERS, which must guard
//! their inputs before quoting or persisting money.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule violations.
///
/// The first four variants are the checkout guard taxonomy: every consumer
/// (checkout form, agent tool, order service) short-circuits on them BEFORE
/// invoking the pricing engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity is non-positive, exceeds the business cap, or came from a
    /// non-finite number.
    ///
    /// ## When This Occurs
    /// - A form or tool call submits 0, a negative amount, or NaN
    /// - Quantity above 1000 kg (wholesale is handled offline)
    #[error("Invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    /// A product configured with a zero base price must block order
    /// placement entirely.
    ///
    /// ## When This Occurs
    /// - Catalog misconfiguration; without this guard such a product
    ///   would produce free orders
    #[error("Product '{name}' has no price configured")]
    ZeroPriceProduct { name: String },

    /// Computed grand total is zero or negative after all discounts.
    /// Blocks checkout regardless of individual item validity.
    #[error("Order total must be greater than zero")]
    ZeroTotalOrder,

    /// Product flagged unavailable must be rejected before pricing is
    /// computed, not silently priced.
    #[error("Product '{name}' is currently unavailable")]
    UnavailableProduct { name: String },

    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient stock to fulfill the requested weight.
    #[error("Insufficient stock for {name}: available {available_kg} kg, requested {requested_kg} kg")]
    InsufficientStock {
        name: String,
        available_kg: f64,
        requested_kg: f64,
    },

    /// Order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Marking a delivered order as shipped
    /// - Returning an order that was never delivered
    #[error("Order {order_id} is {current_status}, cannot perform operation")]
    InvalidOrderStatus {
        order_id: String,
        current_status: String,
    },

    /// Cart has exceeded maximum allowed line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
