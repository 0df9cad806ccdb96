//! Application Ports
//!
//! Interfaces the application core depends on, implemented by infrastructure
//! adapters.

pub mod broker_port;

pub use broker_port::{BrokerGateway, GatewayError, OrderListQuery, Position};
