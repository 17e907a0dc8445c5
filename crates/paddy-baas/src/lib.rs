//! # paddy-baas: Hosted Document Store Layer for Paddy
//!
//! This crate provides document-store access for the Paddy storefront.
//! Persistence is delegated to a hosted backend-as-a-service: JSON documents
//! in named collections behind a REST API.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Paddy Data Flow                                │
//! │                                                                         │
//! │  Storefront checkout / agent place_order tool                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     paddy-baas (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ DocumentStore │    │  Repositories │    │ OrderService │  │   │
//! │  │   │   (store.rs)  │    │ (repository/) │    │  (orders.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ BaasClient    │◄───│ ProductRepo   │◄───│ items first, │  │   │
//! │  │   │ MemoryStore   │    │ OrderRepo ... │    │ advisory     │  │   │
//! │  │   │               │    │               │    │ rollback     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Hosted BaaS (databases/collections/documents)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven configuration
//! - [`client`] - REST client for the hosted API
//! - [`store`] - The `DocumentStore` trait and the in-memory test double
//! - [`error`] - Store error types
//! - [`repository`] - Typed repositories per aggregate
//! - [`orders`] - The order placement flow and reporting
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use paddy_baas::{BaasClient, BaasConfig, OrderService, Store};
//!
//! let config = BaasConfig::from_env()?;
//! let client = Arc::new(BaasClient::new(&config)?);
//! let store = Store::new(client);
//!
//! let orders = OrderService::new(store.clone());
//! let placed = orders.place_order(request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod orders;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::BaasClient;
pub use config::{BaasConfig, ConfigError};
pub use error::{BaasError, BaasResult};
pub use orders::{NewAddress, OrderError, OrderLine, OrderRequest, OrderService, PlacedOrder};
pub use store::{DocumentStore, MemoryStore};

// Repository re-exports for convenience
pub use repository::{
    AddressRepository, CustomerRepository, OrderRepository, ProductRepository, Store,
};
