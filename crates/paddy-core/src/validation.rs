//! # Validation Module
//!
//! Caller-side guards for Paddy.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront (TypeScript)                                      │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (checkout form, agent tools, order service)      │
//! │  ├── Quantity guards (positive, ≤ 1000 kg, finite)                     │
//! │  ├── Product guards (available, priced)                                │
//! │  └── Total guard (> 0 after all discounts)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine - TOTAL function, assumes guarded input       │
//! │                                                                         │
//! │  The engine never throws; these guards short-circuit BEFORE it runs   │
//! │  and surface a typed, user-facing error                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use paddy_core::validation::validate_quantity_kg;
//!
//! // Validate a checkout form / tool-call quantity before pricing
//! let quantity = validate_quantity_kg(2.5).unwrap();
//! assert_eq!(quantity.grams(), 2500);
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{DiscountRate, Product};
use crate::weight::Weight;
use crate::{MAX_CART_ITEMS, MAX_ITEM_WEIGHT_GRAMS};

/// Result type for field-level validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Checkout Guards
// =============================================================================

/// Validates a quantity arriving as fractional kilograms (form fields,
/// tool-call arguments) and converts it to a [`Weight`].
///
/// ## Rules
/// - Must be finite (JSON numbers can carry NaN/Infinity through f64)
/// - Must be positive
/// - Must not exceed the 1000 kg business cap
pub fn validate_quantity_kg(kg: f64) -> CoreResult<Weight> {
    let Some(quantity) = Weight::try_from_kg(kg) else {
        return Err(CoreError::InvalidQuantity {
            reason: "must be a finite number".to_string(),
        });
    };

    validate_order_quantity(quantity)?;
    Ok(quantity)
}

/// Validates an already-converted order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed 1000 kg
pub fn validate_order_quantity(quantity: Weight) -> CoreResult<()> {
    if !quantity.is_positive() {
        return Err(CoreError::InvalidQuantity {
            reason: "must be greater than zero".to_string(),
        });
    }

    if quantity.grams() > MAX_ITEM_WEIGHT_GRAMS {
        return Err(CoreError::InvalidQuantity {
            reason: format!(
                "must not exceed {} kg per item",
                MAX_ITEM_WEIGHT_GRAMS / 1000
            ),
        });
    }

    Ok(())
}

/// Validates that a product may be ordered at all.
///
/// Rejects unavailable products BEFORE any price is computed, and blocks
/// zero-priced products entirely - a misconfigured catalog record must
/// never produce a free order.
pub fn validate_orderable(product: &Product) -> CoreResult<()> {
    if !product.is_available {
        return Err(CoreError::UnavailableProduct {
            name: product.name.clone(),
        });
    }

    if product.base_price_cents_per_kg <= 0 {
        return Err(CoreError::ZeroPriceProduct {
            name: product.name.clone(),
        });
    }

    Ok(())
}

/// Validates the computed grand total at checkout.
///
/// A total of zero or less after all discounts blocks the order regardless
/// of individual item validity.
pub fn validate_order_total(total: Money) -> CoreResult<()> {
    if !total.is_positive() {
        return Err(CoreError::ZeroTotalOrder);
    }

    Ok(())
}

/// Validates a loyalty discount percentage and converts it to a rate.
///
/// ## Rules
/// - Must be finite
/// - Must be within [0, 100]
pub fn validate_loyalty_percent(percent: f64) -> CoreResult<DiscountRate> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(CoreError::Validation(ValidationError::OutOfRange {
            field: "loyalty discount".to_string(),
            min: 0,
            max: 100,
        }));
    }

    Ok(DiscountRate::from_percentage(percent))
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a per-kg price in cents (admin product form).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed at SAVE time; ordering a zero-priced product is
///   blocked separately by [`validate_orderable`]
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of unique line items).
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a document id string format.
///
/// ## Rules
/// - Must be a valid UUID v4 format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
pub fn validate_document_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn orderable_product() -> Product {
        Product {
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
            stock_grams: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_quantity_kg() {
        assert_eq!(validate_quantity_kg(2.5).unwrap().grams(), 2500);
        assert_eq!(validate_quantity_kg(1000.0).unwrap().grams(), 1_000_000);

        assert!(matches!(
            validate_quantity_kg(0.0),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            validate_quantity_kg(-1.0),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            validate_quantity_kg(1000.5),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            validate_quantity_kg(f64::NAN),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            validate_quantity_kg(f64::INFINITY),
            Err(CoreError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_validate_orderable() {
        assert!(validate_orderable(&orderable_product()).is_ok());

        let unavailable = Product {
            is_available: false,
            ..orderable_product()
        };
        assert!(matches!(
            validate_orderable(&unavailable),
            Err(CoreError::UnavailableProduct { .. })
        ));

        let free = Product {
            base_price_cents_per_kg: 0,
            ..orderable_product()
        };
        assert!(matches!(
            validate_orderable(&free),
            Err(CoreError::ZeroPriceProduct { .. })
        ));
    }

    #[test]
    fn test_unavailable_wins_over_zero_price() {
        // Availability is checked before pricing configuration.
        let product = Product {
            is_available: false,
            base_price_cents_per_kg: 0,
            ..orderable_product()
        };
        assert!(matches!(
            validate_orderable(&product),
            Err(CoreError::UnavailableProduct { .. })
        ));
    }

    #[test]
    fn test_validate_order_total() {
        assert!(validate_order_total(Money::from_cents(1)).is_ok());
        assert!(matches!(
            validate_order_total(Money::zero()),
            Err(CoreError::ZeroTotalOrder)
        ));
        assert!(matches!(
            validate_order_total(Money::from_cents(-100)),
            Err(CoreError::ZeroTotalOrder)
        ));
    }

    #[test]
    fn test_validate_loyalty_percent() {
        assert_eq!(validate_loyalty_percent(5.0).unwrap().bps(), 500);
        assert_eq!(validate_loyalty_percent(0.0).unwrap().bps(), 0);
        assert_eq!(validate_loyalty_percent(100.0).unwrap().bps(), 10000);

        assert!(validate_loyalty_percent(-1.0).is_err());
        assert!(validate_loyalty_percent(101.0).is_err());
        assert!(validate_loyalty_percent(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("BASMATI-SELLA").is_ok());
        assert!(validate_sku("SUPER_KERNEL1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Basmati Sella 5kg Bag").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(20000).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_document_id() {
        assert!(validate_document_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_document_id("").is_err());
        assert!(validate_document_id("not-a-uuid").is_err());
    }
}
