//! Alpaca gateway adapter implementing `BrokerGateway`.

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{BrokerGateway, GatewayError, OrderListQuery, Position};
use crate::domain::NormalizedOrder;

use super::api_types::OrdersPayload;
use super::config::{AlpacaConfig, AlpacaEnvironment};
use super::error::AlpacaError;
use super::http_client::AlpacaHttpClient;

/// Alpaca Markets gateway adapter.
///
/// Implements `BrokerGateway` against the Alpaca trading REST API. Reads
/// pass upstream JSON through untouched; order submission sends the
/// already-normalized request as-is.
#[derive(Debug, Clone)]
pub struct AlpacaGateway {
    client: AlpacaHttpClient,
    environment: AlpacaEnvironment,
}

impl AlpacaGateway {
    /// Create a new Alpaca gateway adapter.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        let client = AlpacaHttpClient::new(config)?;
        Ok(Self {
            client,
            environment: config.environment,
        })
    }

    /// Check if this gateway routes to live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }
}

#[async_trait]
impl BrokerGateway for AlpacaGateway {
    async fn account(&self) -> Result<Value, GatewayError> {
        self.client
            .get("/v2/account")
            .await
            .map_err(GatewayError::from)
    }

    async fn clock(&self) -> Result<Value, GatewayError> {
        self.client
            .get("/v2/clock")
            .await
            .map_err(GatewayError::from)
    }

    async fn positions(&self) -> Result<Vec<Position>, GatewayError> {
        self.client
            .get("/v2/positions")
            .await
            .map_err(GatewayError::from)
    }

    async fn option_positions(&self) -> Result<Vec<Position>, GatewayError> {
        self.client
            .get("/v2/options/positions")
            .await
            .map_err(GatewayError::from)
    }

    async fn option_orders(&self, query: &OrderListQuery) -> Result<Vec<Value>, GatewayError> {
        let payload: OrdersPayload = self
            .client
            .get_with_query("/v2/options/orders", query)
            .await
            .map_err(GatewayError::from)?;
        Ok(payload.into_orders())
    }

    async fn submit_options_order(&self, order: &NormalizedOrder) -> Result<Value, GatewayError> {
        if self.is_live() {
            tracing::warn!(
                order_class = %order.order_class,
                "Submitting LIVE options order - this will execute real trades"
            );
        }

        tracing::info!(
            order_class = %order.order_class,
            order_type = %order.order_type,
            time_in_force = %order.time_in_force,
            legs = order.leg_count(),
            "Submitting options order to Alpaca"
        );

        let response: Value = self
            .client
            .post("/v2/options/orders", order)
            .await
            .map_err(GatewayError::from)?;

        tracing::info!(
            order_id = response["id"].as_str().unwrap_or("unknown"),
            status = response["status"].as_str().unwrap_or("unknown"),
            "Options order submitted"
        );

        Ok(response)
    }
}
