//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer. Following
//! hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `broker/`: Brokerage API adapters (Alpaca)
//!
//! - **Driver Adapters (Inbound)**: Expose the application to the outside
//!   - `http/`: REST API controllers

pub mod broker;
pub mod http;
