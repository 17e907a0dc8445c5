//! # Agent Tools
//!
//! The tool surface of the order-taking agent: definitions the SDK
//! advertises to the model, and the dispatch that executes a call.
//!
//! ## Tools
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_order_price       quote a product/quantity with tier and    │
//! │                              loyalty breakdown (same engine as cart)   │
//! │  check_product_availability  availability, stock, base price           │
//! │  place_order                 run the full checkout flow                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler follows the same shape as the storefront: validate with
//! `paddy_core::validation`, then call into the engine or the order
//! service. Handlers never do price math of their own.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::ToolError;
use crate::quote::{format_per_kg, PriceQuote};
use paddy_baas::{NewAddress, OrderLine, OrderRequest, OrderService, Store};
use paddy_core::pricing;
use paddy_core::validation::{validate_loyalty_percent, validate_orderable, validate_quantity_kg};
use paddy_core::{DiscountRate, SalesChannel};

// =============================================================================
// Tool Definitions
// =============================================================================

/// A tool definition as advertised to the tool-calling SDK.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON schema of the arguments object.
    pub parameters: Value,
}

/// The tools the order-taking agent may call.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "calculate_order_price",
            description: "Calculate the exact price for a quantity of a product, \
                          including bulk tier pricing and the customer's loyalty \
                          discount. Always call this before confirming an order.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "productId": { "type": "string" },
                    "quantityKg": { "type": "number", "exclusiveMinimum": 0 },
                    "loyaltyDiscountPercent": {
                        "type": "number",
                        "minimum": 0,
                        "maximum": 100,
                        "description": "Omit when the customer has no loyalty discount"
                    }
                },
                "required": ["productId", "quantityKg"]
            }),
        },
        ToolDefinition {
            name: "check_product_availability",
            description: "Check whether a product can currently be ordered, and \
                          how much stock is on hand.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "productId": { "type": "string" }
                },
                "required": ["productId"]
            }),
        },
        ToolDefinition {
            name: "place_order",
            description: "Place the order after the customer has confirmed the \
                          quoted price. Items, totals, and the shipping address \
                          are written to the store.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "customerId": { "type": "string" },
                    "items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "productId": { "type": "string" },
                                "quantityKg": { "type": "number", "exclusiveMinimum": 0 }
                            },
                            "required": ["productId", "quantityKg"]
                        },
                        "minItems": 1
                    },
                    "address": {
                        "type": "object",
                        "properties": {
                            "line1": { "type": "string" },
                            "line2": { "type": "string" },
                            "city": { "type": "string" },
                            "postalCode": { "type": "string" },
                            "phone": { "type": "string" }
                        },
                        "required": ["line1", "city"]
                    },
                    "notes": { "type": "string" }
                },
                "required": ["customerId", "items", "address"]
            }),
        },
    ]
}

// =============================================================================
// Argument DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculatePriceArgs {
    product_id: String,
    quantity_kg: f64,
    loyalty_discount_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityArgs {
    product_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderArgs {
    customer_id: String,
    items: Vec<PlaceOrderItemArgs>,
    address: PlaceOrderAddressArgs,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderItemArgs {
    product_id: String,
    quantity_kg: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderAddressArgs {
    line1: String,
    line2: Option<String>,
    city: String,
    postal_code: Option<String>,
    phone: Option<String>,
}

// =============================================================================
// Tool Dispatch
// =============================================================================

/// Executes agent tool calls against the store.
#[derive(Clone)]
pub struct OrderTools {
    store: Store,
    orders: OrderService,
}

impl OrderTools {
    /// Creates the toolbox over the repository facade.
    pub fn new(store: Store) -> Self {
        let orders = OrderService::new(store.clone());
        OrderTools { store, orders }
    }

    /// Dispatches one tool call by name.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "calculate_order_price" => {
                let args: CalculatePriceArgs = parse_args(arguments)?;
                let quote = self.calculate_order_price(args).await?;
                Ok(json!(quote))
            }
            "check_product_availability" => {
                let args: AvailabilityArgs = parse_args(arguments)?;
                self.check_product_availability(args).await
            }
            "place_order" => {
                let args: PlaceOrderArgs = parse_args(arguments)?;
                self.place_order(args).await
            }
            other => Err(ToolError::unknown_tool(other)),
        }
    }

    /// Quotes a price through the same engine the cart and checkout use.
    async fn calculate_order_price(
        &self,
        args: CalculatePriceArgs,
    ) -> Result<PriceQuote, ToolError> {
        let product = self.store.products().require(&args.product_id).await?;
        validate_orderable(&product)?;

        let quantity = validate_quantity_kg(args.quantity_kg)?;
        let loyalty_percent = args.loyalty_discount_percent.unwrap_or(0.0);
        let loyalty: DiscountRate = validate_loyalty_percent(loyalty_percent)?;

        let breakdown = pricing::breakdown(&product.pricing(), quantity, loyalty);

        Ok(PriceQuote::from_breakdown(
            &product,
            quantity,
            loyalty_percent,
            breakdown,
        ))
    }

    /// Reports availability, stock, and base price for one product.
    async fn check_product_availability(
        &self,
        args: AvailabilityArgs,
    ) -> Result<Value, ToolError> {
        let product = self.store.products().require(&args.product_id).await?;

        Ok(json!({
            "productId": product.id,
            "name": product.name,
            "isAvailable": product.is_available,
            "inStockKg": product.stock().map(|w| w.kg()),
            "basePricePerKg": format_per_kg(product.base_price()),
            "hasTierPricing": product.has_tier_pricing,
        }))
    }

    /// Places the order through the same flow as checkout.
    async fn place_order(&self, args: PlaceOrderArgs) -> Result<Value, ToolError> {
        let mut lines = Vec::with_capacity(args.items.len());
        for item in &args.items {
            lines.push(OrderLine {
                product_id: item.product_id.clone(),
                quantity: validate_quantity_kg(item.quantity_kg)?,
            });
        }

        let request = OrderRequest {
            customer_id: args.customer_id.clone(),
            lines,
            address: NewAddress {
                line1: args.address.line1.clone(),
                line2: args.address.line2.clone(),
                city: args.address.city.clone(),
                postal_code: args.address.postal_code.clone(),
                phone: args.address.phone.clone(),
            },
            channel: SalesChannel::Web,
            notes: args.notes.clone(),
        };

        let placed = self.orders.place_order(request).await?;

        info!(
            order_id = %placed.order.id,
            order_number = %placed.order.order_number,
            "agent placed order"
        );

        Ok(json!({
            "orderId": placed.order.id,
            "orderNumber": placed.order.order_number,
            "totalCents": placed.order.total_cents,
            "discountCents": placed.order.discount_cents,
            "loyaltyDiscountPercent": placed.loyalty_applied.percentage(),
            "itemCount": placed.items.len(),
        }))
    }
}

/// Parses a tool's arguments object, mapping schema mismatches to a stable
/// error the model can react to.
fn parse_args<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
