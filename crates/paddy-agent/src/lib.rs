//! # paddy-agent: Order-Taking Agent Tool Layer
//!
//! The storefront's conversational agent is a hosted LLM driven through a
//! tool-calling SDK. This crate is the tool surface it calls - the model
//! and its prompt live with the SDK, not here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Agent Tool Flow                                  │
//! │                                                                         │
//! │  Customer chat                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Hosted LLM (tool-calling SDK)                                         │
//! │       │  call: calculate_order_price {productId, quantityKg, ...}      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   paddy-agent (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   tool_definitions() ──► advertised JSON schemas                │   │
//! │  │   OrderTools::dispatch ──► validate, then:                      │   │
//! │  │       calculate_order_price ──► paddy_core::pricing             │   │
//! │  │       check_product_availability ──► paddy_baas repositories    │   │
//! │  │       place_order ──► paddy_baas::OrderService                  │   │
//! │  │                                                                 │   │
//! │  │   NO PRICE MATH HERE - quotes reuse the one pricing engine,    │   │
//! │  │   so chat, cart, and checkout can never disagree               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tools`] - Tool definitions and dispatch
//! - [`quote`] - Structured price quotes with chat-ready rendering
//! - [`error`] - Serialized tool errors

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod quote;
pub mod tools;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ToolError, ToolErrorCode};
pub use quote::PriceQuote;
pub use tools::{tool_definitions, OrderTools, ToolDefinition};
