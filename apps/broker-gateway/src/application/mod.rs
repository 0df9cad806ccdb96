//! Application Layer
//!
//! Ports describing what the façade needs from the outside world, plus the
//! services that orchestrate them: cached, fallback-protected reads over
//! the brokerage.

pub mod cache;
pub mod ports;
pub mod services;

pub use cache::{SNAPSHOT_CACHE_TTL, TtlCache};
pub use ports::{BrokerGateway, GatewayError, OrderListQuery, Position};
pub use services::OptionPositionsService;
