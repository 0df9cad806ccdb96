//! Broker Adapters
//!
//! Implementations of `BrokerGateway` for upstream brokerages.

pub mod alpaca;

pub use alpaca::{AlpacaConfig, AlpacaError, AlpacaGateway};
