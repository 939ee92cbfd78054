//! HTTP transport layer.
//!
//! This module provides the reqwest-backed client primitives and the typed
//! endpoint definitions for the billing API.

mod client;
mod config;
mod endpoints;

pub use config::{RequestConfig, RequestConfigBuilder};
pub use endpoints::{OrderItemSummary, OrderSummary, OrdersPage};

pub(crate) use client::ApiClient;
pub(crate) use endpoints::*;
