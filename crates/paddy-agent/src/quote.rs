//! # Price Quote
//!
//! Structured price breakdown plus the human-readable rendering the agent
//! shows the customer before order confirmation. The numbers come straight
//! from [`paddy_core::pricing::breakdown`] - the rendering adds words only,
//! so the quote can never disagree with the cart or checkout.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use paddy_core::pricing::{PriceBreakdown, PriceTier};
use paddy_core::{Money, Product, Weight};

/// A price quote for one product and quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub product_id: String,
    pub product_name: String,
    pub quantity_kg: f64,
    pub price_per_kg_cents: i64,
    pub tier_applied: PriceTier,
    pub subtotal_cents: i64,
    pub discount_amount_cents: i64,
    pub total_after_discount_cents: i64,
    pub savings_cents: i64,
    pub savings_percentage: f64,
    pub loyalty_discount_percent: f64,
    /// Ready-to-send text breakdown for the chat transcript.
    pub rendered: String,
}

impl PriceQuote {
    /// Builds a quote from an engine breakdown.
    pub fn from_breakdown(
        product: &Product,
        quantity: Weight,
        loyalty_percent: f64,
        breakdown: PriceBreakdown,
    ) -> Self {
        let rendered = render(product, quantity, loyalty_percent, &breakdown);

        PriceQuote {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity_kg: quantity.kg(),
            price_per_kg_cents: breakdown.price_per_kg.cents(),
            tier_applied: breakdown.tier_applied,
            subtotal_cents: breakdown.subtotal.cents(),
            discount_amount_cents: breakdown.discount_amount.cents(),
            total_after_discount_cents: breakdown.total_after_discount.cents(),
            savings_cents: breakdown.savings.cents(),
            savings_percentage: breakdown.savings_percentage,
            loyalty_discount_percent: loyalty_percent,
            rendered,
        }
    }
}

/// Renders the breakdown as chat-ready lines.
fn render(
    product: &Product,
    quantity: Weight,
    loyalty_percent: f64,
    breakdown: &PriceBreakdown,
) -> String {
    let mut out = String::new();

    let rate_note = match breakdown.tier_applied {
        PriceTier::Base => String::new(),
        tier => format!(" ({} bulk rate)", tier.label()),
    };
    let _ = writeln!(
        out,
        "{}: {} at {}/kg{}",
        product.name, quantity, breakdown.price_per_kg, rate_note
    );
    let _ = writeln!(out, "Subtotal: {}", breakdown.subtotal);

    if breakdown.discount_amount.is_positive() {
        let _ = writeln!(
            out,
            "Loyalty discount ({}%): -{}",
            loyalty_percent, breakdown.discount_amount
        );
    }

    let _ = writeln!(out, "Total: {}", breakdown.total_after_discount);

    if breakdown.savings.is_positive() {
        let _ = write!(
            out,
            "You save {} ({:.1}%) compared to the base price",
            breakdown.savings, breakdown.savings_percentage
        );
    }

    out.trim_end().to_string()
}

/// Base price reference shown alongside availability checks.
pub(crate) fn format_per_kg(price: Money) -> String {
    format!("{price}/kg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use paddy_core::pricing;
    use paddy_core::DiscountRate;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            sku: "BASMATI-SELLA".to_string(),
            name: "Basmati Sella".to_string(),
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

    #[test]
    fn test_quote_carries_engine_numbers() {
        let product = product();
        let quantity = Weight::from_grams(10_000);
        let breakdown =
            pricing::breakdown(&product.pricing(), quantity, DiscountRate::from_bps(500));

        let quote = PriceQuote::from_breakdown(&product, quantity, 5.0, breakdown);

        assert_eq!(quote.price_per_kg_cents, 17000);
        assert_eq!(quote.subtotal_cents, 170_000);
        assert_eq!(quote.discount_amount_cents, 8_500);
        assert_eq!(quote.total_after_discount_cents, 161_500);
        assert_eq!(quote.tier_applied, PriceTier::Bulk10Plus);
    }

    #[test]
    fn test_rendering_mentions_tier_and_loyalty() {
        let product = product();
        let quantity = Weight::from_grams(10_000);
        let breakdown =
            pricing::breakdown(&product.pricing(), quantity, DiscountRate::from_bps(500));

        let quote = PriceQuote::from_breakdown(&product, quantity, 5.0, breakdown);

        assert!(quote.rendered.contains("10 kg at $170.00/kg (10kg+ bulk rate)"));
        assert!(quote.rendered.contains("Subtotal: $1700.00"));
        assert!(quote.rendered.contains("Loyalty discount (5%): -$85.00"));
        assert!(quote.rendered.contains("Total: $1615.00"));
        assert!(quote.rendered.contains("You save $385.00"));
    }

    #[test]
    fn test_rendering_omits_absent_discounts() {
        let product = product();
        let quantity = Weight::from_grams(1_000); // base tier, no loyalty
        let breakdown = pricing::breakdown(&product.pricing(), quantity, DiscountRate::zero());

        let quote = PriceQuote::from_breakdown(&product, quantity, 0.0, breakdown);

        assert!(!quote.rendered.contains("Loyalty"));
        assert!(!quote.rendered.contains("You save"));
        assert!(quote.rendered.contains("1 kg at $200.00/kg"));
        assert!(!quote.rendered.contains("bulk rate"));
    }
}
