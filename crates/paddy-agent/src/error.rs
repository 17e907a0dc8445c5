//! # Tool Error Type
//!
//! Unified error type for agent tool calls.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Agent                              │
//! │                                                                         │
//! │  Tool-calling SDK              Rust Backend                             │
//! │  ────────────────              ────────────                             │
//! │                                                                         │
//! │  call('calculate_order_price')                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Tool Handler                                                    │  │
//! │  │  Result<Value, ToolError>                                        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Guard failed? ── CoreError::UnavailableProduct ──┐             │  │
//! │  │         │                                          ▼             │  │
//! │  │  Store failed? ── BaasError::NotFound ──────── ToolError ──────► │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The SDK serializes the error back to the model, which apologizes      │
//! │  to the customer in words. Codes keep that mapping stable.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use paddy_baas::{BaasError, OrderError};
use paddy_core::CoreError;

/// Error returned from agent tool calls.
///
/// ## Serialization
/// This is what the tool-calling SDK receives when a call fails:
/// ```json
/// {
///   "code": "UNAVAILABLE_PRODUCT",
///   "message": "Product 'Basmati Sella' is currently unavailable"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolError {
    /// Machine-readable error code for programmatic handling
    pub code: ToolErrorCode,

    /// Human-readable error message the agent can relay
    pub message: String,
}

/// Error codes for tool call failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorCode {
    /// The requested tool does not exist
    UnknownTool,

    /// Arguments did not match the tool's schema
    InvalidArguments,

    /// Referenced document not found
    NotFound,

    /// Input validation failed (quantity, loyalty percent, ...)
    ValidationError,

    /// A checkout guard rejected the request
    BusinessRule,

    /// Product cannot be ordered right now
    UnavailableProduct,

    /// Not enough stock for the requested weight
    InsufficientStock,

    /// Document store operation failed
    StorageError,

    /// Internal error
    Internal,
}

impl ToolError {
    /// Creates a new tool error.
    pub fn new(code: ToolErrorCode, message: impl Into<String>) -> Self {
        ToolError {
            code,
            message: message.into(),
        }
    }

    /// Creates an unknown-tool error.
    pub fn unknown_tool(name: &str) -> Self {
        ToolError::new(ToolErrorCode::UnknownTool, format!("Unknown tool: {name}"))
    }

    /// Creates an invalid-arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        ToolError::new(ToolErrorCode::InvalidArguments, message)
    }
}

/// Converts checkout guard errors to tool errors.
impl From<CoreError> for ToolError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidQuantity { .. } => ToolErrorCode::ValidationError,
            CoreError::ZeroPriceProduct { .. } => ToolErrorCode::BusinessRule,
            CoreError::ZeroTotalOrder => ToolErrorCode::BusinessRule,
            CoreError::UnavailableProduct { .. } => ToolErrorCode::UnavailableProduct,
            CoreError::ProductNotFound(_) => ToolErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ToolErrorCode::InsufficientStock,
            CoreError::InvalidOrderStatus { .. } => ToolErrorCode::BusinessRule,
            CoreError::CartTooLarge { .. } => ToolErrorCode::BusinessRule,
            CoreError::Validation(_) => ToolErrorCode::ValidationError,
        };
        ToolError::new(code, err.to_string())
    }
}

/// Converts document store errors to tool errors.
impl From<BaasError> for ToolError {
    fn from(err: BaasError) -> Self {
        match err {
            BaasError::NotFound { .. } => ToolError::new(ToolErrorCode::NotFound, err.to_string()),
            other => {
                // Log the real failure, hand the model a stable message.
                tracing::error!("document store failure in tool call: {other}");
                ToolError::new(
                    ToolErrorCode::StorageError,
                    "The store backend is unavailable right now",
                )
            }
        }
    }
}

/// Converts order flow errors to tool errors.
impl From<OrderError> for ToolError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Rejected(core) => core.into(),
            OrderError::Storage(store) => store.into(),
        }
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}
