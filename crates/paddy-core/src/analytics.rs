//! # Admin Analytics
//!
//! Pure aggregation functions over already-loaded order data. The dashboard,
//! customer views, and exports all call these - none of them sum order
//! totals on their own.
//!
//! ## The Returned-Order Rule
//! Orders with status `returned` are excluded from EVERY revenue figure:
//! dashboard totals, customer lifetime value, channel performance, top
//! products, CSV exports. The rule is
//! [`crate::types::OrderStatus::counts_toward_revenue`] and each function
//! here applies it; consumers never re-derive it.
//!
//! ## Why No Queries Here
//! These take slices, not repositories - the storage layer loads documents,
//! this module does arithmetic. That keeps the numbers testable and keeps
//! the exclusion rule in exactly one place for every surface that reports
//! money.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, OrderItem, SalesChannel};
use crate::weight::Weight;

// =============================================================================
// Revenue Summary
// =============================================================================

/// Dashboard-level revenue figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RevenueSummary {
    /// Orders counting toward revenue.
    pub order_count: usize,
    /// Total revenue across non-returned orders.
    pub revenue: Money,
    /// Returned orders, reported separately.
    pub returned_count: usize,
    /// Total value of returned orders (not part of `revenue`).
    pub returned_total: Money,
}

/// Aggregates revenue across orders, excluding returned ones.
pub fn revenue_summary(orders: &[Order]) -> RevenueSummary {
    let mut summary = RevenueSummary {
        order_count: 0,
        revenue: Money::zero(),
        returned_count: 0,
        returned_total: Money::zero(),
    };

    for order in orders {
        if order.counts_toward_revenue() {
            summary.order_count += 1;
            summary.revenue += order.total();
        } else {
            summary.returned_count += 1;
            summary.returned_total += order.total();
        }
    }

    summary
}

/// Total revenue across orders, excluding returned ones.
pub fn total_revenue(orders: &[Order]) -> Money {
    orders
        .iter()
        .filter(|o| o.counts_toward_revenue())
        .map(Order::total)
        .sum()
}

// =============================================================================
// Customer Lifetime Value
// =============================================================================

/// Lifetime value of one customer: their order totals, returned orders
/// excluded.
pub fn customer_lifetime_value(customer_id: &str, orders: &[Order]) -> Money {
    orders
        .iter()
        .filter(|o| o.customer_id == customer_id && o.counts_toward_revenue())
        .map(Order::total)
        .sum()
}

// =============================================================================
// Channel Performance
// =============================================================================

/// Revenue attributed to one sales channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChannelPerformance {
    pub channel: SalesChannel,
    pub order_count: usize,
    pub revenue: Money,
}

/// Per-channel order counts and revenue, sorted by revenue descending.
/// Returned orders are excluded.
pub fn channel_performance(orders: &[Order]) -> Vec<ChannelPerformance> {
    let mut by_channel: HashMap<SalesChannel, (usize, Money)> = HashMap::new();

    for order in orders {
        if !order.counts_toward_revenue() {
            continue;
        }
        let entry = by_channel
            .entry(order.channel)
            .or_insert((0, Money::zero()));
        entry.0 += 1;
        entry.1 += order.total();
    }

    let mut performance: Vec<ChannelPerformance> = by_channel
        .into_iter()
        .map(|(channel, (order_count, revenue))| ChannelPerformance {
            channel,
            order_count,
            revenue,
        })
        .collect();

    performance.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    performance
}

// =============================================================================
// Top Products
// =============================================================================

/// Sales figures for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSales {
    pub product_id: String,
    pub name: String,
    pub total_weight: Weight,
    pub revenue: Money,
}

/// The best-selling products by revenue, computed from the normalized
/// order-item records. Items belonging to returned orders are excluded.
pub fn top_products(orders: &[Order], items: &[OrderItem], limit: usize) -> Vec<ProductSales> {
    let counted: HashSet<&str> = orders
        .iter()
        .filter(|o| o.counts_toward_revenue())
        .map(|o| o.id.as_str())
        .collect();

    let mut by_product: HashMap<&str, ProductSales> = HashMap::new();

    for item in items {
        if !counted.contains(item.order_id.as_str()) {
            continue;
        }
        let entry = by_product
            .entry(item.product_id.as_str())
            .or_insert_with(|| ProductSales {
                product_id: item.product_id.clone(),
                name: item.name_snapshot.clone(),
                total_weight: Weight::zero(),
                revenue: Money::zero(),
            });
        entry.total_weight += item.quantity();
        entry.revenue += item.total_after_discount();
    }

    let mut ranked: Vec<ProductSales> = by_product.into_values().collect();
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// CSV Export
// =============================================================================

/// Renders order line items as CSV, derived from the normalized order-item
/// records on read. Items of returned orders are excluded, consistent with
/// every other revenue surface.
///
/// The order-items table is the single source of truth; nothing here reads
/// a denormalized line-item snapshot off the order record.
pub fn order_items_csv(orders: &[Order], items: &[OrderItem]) -> String {
    let number_by_id: HashMap<&str, &str> = orders
        .iter()
        .map(|o| (o.id.as_str(), o.order_number.as_str()))
        .collect();
    let counted: HashSet<&str> = orders
        .iter()
        .filter(|o| o.counts_toward_revenue())
        .map(|o| o.id.as_str())
        .collect();

    let mut out = String::from(
        "order_number,product,quantity_kg,price_per_kg,tier,subtotal,discount,total\n",
    );

    for item in items {
        if !counted.contains(item.order_id.as_str()) {
            continue;
        }
        let order_number = number_by_id
            .get(item.order_id.as_str())
            .copied()
            .unwrap_or("");

        out.push_str(&format!(
            "{},{},{},{:.2},{},{:.2},{:.2},{:.2}\n",
            csv_field(order_number),
            csv_field(&item.name_snapshot),
            item.quantity().kg(),
            item.price_per_kg().cents() as f64 / 100.0,
            item.tier_applied.label(),
            item.subtotal_before_discount_cents as f64 / 100.0,
            item.discount_cents as f64 / 100.0,
            item.total_after_discount_cents as f64 / 100.0,
        ));
    }

    out
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceTier;
    use crate::types::OrderStatus;
    use chrono::Utc;

    fn order(id: &str, customer: &str, total_cents: i64, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            order_number: format!("ORD-{}", id),
            customer_id: customer.to_string(),
            status,
            channel: SalesChannel::Web,
            subtotal_cents: total_cents,
            discount_cents: 0,
            total_cents,
            loyalty_discount_bps: 0,
            address_id: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(id: &str, order_id: &str, product_id: &str, total_cents: i64) -> OrderItem {
        OrderItem {
            id: id.to_string(),
            order_id: order_id.to_string(),
            product_id: product_id.to_string(),
            name_snapshot: format!("Product {}", product_id),
            price_per_kg_cents_at_order: 20000,
            quantity_grams: 5000,
            tier_applied: PriceTier::Bulk5To9,
            subtotal_before_discount_cents: total_cents,
            discount_cents: 0,
            total_after_discount_cents: total_cents,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_returned_orders_excluded_from_revenue() {
        // Delivered 1000.00 + returned 500.00 → revenue 1000.00, not 1500.00.
        let orders = vec![
            order("1", "c1", 100_000, OrderStatus::Delivered),
            order("2", "c1", 50_000, OrderStatus::Returned),
        ];

        assert_eq!(total_revenue(&orders), Money::from_cents(100_000));

        let summary = revenue_summary(&orders);
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.revenue, Money::from_cents(100_000));
        assert_eq!(summary.returned_count, 1);
        assert_eq!(summary.returned_total, Money::from_cents(50_000));
    }

    #[test]
    fn test_customer_lifetime_value_excludes_returns() {
        let orders = vec![
            order("1", "c1", 100_000, OrderStatus::Delivered),
            order("2", "c1", 40_000, OrderStatus::Returned),
            order("3", "c2", 70_000, OrderStatus::Delivered),
            order("4", "c1", 25_000, OrderStatus::Shipped),
        ];

        assert_eq!(
            customer_lifetime_value("c1", &orders),
            Money::from_cents(125_000)
        );
        assert_eq!(
            customer_lifetime_value("c2", &orders),
            Money::from_cents(70_000)
        );
        assert_eq!(customer_lifetime_value("c3", &orders), Money::zero());
    }

    #[test]
    fn test_channel_performance_sorted_and_filtered() {
        let mut shop_order = order("1", "c1", 80_000, OrderStatus::Delivered);
        shop_order.channel = SalesChannel::Shop;
        let mut returned_shop = order("2", "c2", 500_000, OrderStatus::Returned);
        returned_shop.channel = SalesChannel::Shop;

        let orders = vec![
            shop_order,
            returned_shop,
            order("3", "c3", 100_000, OrderStatus::Delivered),
        ];

        let performance = channel_performance(&orders);
        assert_eq!(performance.len(), 2);
        assert_eq!(performance[0].channel, SalesChannel::Web);
        assert_eq!(performance[0].revenue, Money::from_cents(100_000));
        assert_eq!(performance[1].channel, SalesChannel::Shop);
        assert_eq!(performance[1].order_count, 1);
        assert_eq!(performance[1].revenue, Money::from_cents(80_000));
    }

    #[test]
    fn test_top_products_excludes_returned_orders() {
        let orders = vec![
            order("1", "c1", 100_000, OrderStatus::Delivered),
            order("2", "c2", 900_000, OrderStatus::Returned),
        ];
        let items = vec![
            item("i1", "1", "p1", 60_000),
            item("i2", "1", "p2", 40_000),
            item("i3", "2", "p1", 900_000), // returned - must not count
        ];

        let ranked = top_products(&orders, &items, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].product_id, "p1");
        assert_eq!(ranked[0].revenue, Money::from_cents(60_000));
        assert_eq!(ranked[1].product_id, "p2");

        let top_one = top_products(&orders, &items, 1);
        assert_eq!(top_one.len(), 1);
    }

    #[test]
    fn test_csv_derived_from_items_and_excludes_returns() {
        let orders = vec![
            order("1", "c1", 100_000, OrderStatus::Delivered),
            order("2", "c2", 50_000, OrderStatus::Returned),
        ];
        let items = vec![
            item("i1", "1", "p1", 100_000),
            item("i2", "2", "p1", 50_000),
        ];

        let csv = order_items_csv(&orders, &items);
        let lines: Vec<&str> = csv.trim_end().lines().collect();

        // Header plus the single non-returned line.
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("order_number,product,"));
        assert!(lines[1].starts_with("ORD-1,Product p1,5,200.00,5-9kg,"));
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
