// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Broker Gateway - Brokerage REST Facade
//!
//! Thin routing layer between desk tooling and the Alpaca trading API.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure order normalization, no I/O
//!   - `symbol`: prefixed-symbol canonicalization, OCC pattern matching
//!   - `intent`: position intent resolution (explicit override or side default)
//!   - `order_class`: simple vs. multi-leg class mapping
//!   - `leg` / `order`: loose inbound payloads → canonical broker requests
//!
//! - **Application**: Orchestration over port interfaces
//!   - `ports`: `BrokerGateway` interface for the upstream brokerage
//!   - `cache`: short-TTL read caching for snapshot endpoints
//!   - `services`: resilient option position lookup with fallback
//!
//! - **Infrastructure**: Adapters
//!   - `broker`: Alpaca HTTP adapter (reqwest)
//!   - `http`: Axum REST surface mirroring the desk's mount points

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Order normalization logic with no external dependencies.
pub mod domain;

/// Application layer - Services, caching, and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Observability - Metrics recording and exporter bootstrap.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::{
    NormalizedOrder, OrderClass, OrderLeg, OrderSide, OrderType, PositionIntent, RawOrderLeg,
    RawOrderRequest, TimeInForce, ValidationError, normalize_order,
};

// Application re-exports
pub use application::cache::TtlCache;
pub use application::ports::{BrokerGateway, GatewayError, Position};
pub use application::services::OptionPositionsService;

// Infrastructure re-exports
pub use infrastructure::broker::alpaca::{
    AlpacaConfig, AlpacaEnvironment, AlpacaError, AlpacaGateway,
};
pub use infrastructure::http::{AppState, create_router};
