//! Core library for the `weather-server` proxy.
//!
//! This crate defines:
//! - The upstream client capability and its reqwest implementation
//! - The two-hop forecast lookup against api.weather.gov
//! - Temperature classification and the shared domain models
//! - Configuration handling
//!
//! It is used by `weather-server`, but has no dependency on any HTTP server.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod resolver;

pub use client::{HttpUpstreamClient, UpstreamClient};
pub use config::{Config, ServerConfig, UpstreamConfig};
pub use error::{ForecastError, UpstreamError};
pub use model::{
    Coordinate, ForecastPeriod, ForecastSummary, TemperatureLabel, UpstreamValue, classify,
};
pub use resolver::{ForecastResolver, NWS_API_BASE};
