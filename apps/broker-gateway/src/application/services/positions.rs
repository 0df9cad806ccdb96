//! Resilient option position reads.
//!
//! The dedicated option positions endpoint is the fast path, but it is
//! also the least reliable one: some accounts see empty payloads from it
//! while holding contracts, and some environments do not expose it at
//! all. This service layers a fallback over the full position listing and
//! a short snapshot cache on top, so dashboard polling keeps working when
//! the primary endpoint misbehaves.

use std::sync::Arc;

use crate::application::cache::TtlCache;
use crate::application::ports::{BrokerGateway, GatewayError, Position};
use crate::domain::{is_occ_symbol, to_bare_symbol};
use crate::observability::metrics;

/// Cached option position reader with a fallback over the full listing.
pub struct OptionPositionsService<G> {
    gateway: Arc<G>,
    cache: TtlCache<Vec<Position>>,
}

impl<G> OptionPositionsService<G>
where
    G: BrokerGateway,
{
    /// Creates a service with the standard snapshot TTL.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            cache: TtlCache::with_default_ttl("option_positions"),
        }
    }

    /// Returns the cached snapshot when fresh, otherwise fetches and
    /// caches a new one. Failed fetches are never cached.
    pub async fn get(&self) -> Result<Vec<Position>, GatewayError> {
        if let Some(positions) = self.cache.get() {
            return Ok(positions);
        }
        let positions = self.fetch().await?;
        self.cache.store(positions.clone());
        Ok(positions)
    }

    /// Fetches option positions from the gateway, bypassing the cache.
    ///
    /// A non-empty result from the dedicated endpoint wins. An empty
    /// result or a 404 falls back to filtering the full position listing
    /// down to OCC option symbols. Any other upstream failure propagates
    /// to the caller.
    pub async fn fetch(&self) -> Result<Vec<Position>, GatewayError> {
        match self.gateway.option_positions().await {
            Ok(positions) if !positions.is_empty() => Ok(canonicalize(positions)),
            Ok(_) => {
                tracing::warn!(
                    "option positions endpoint returned no entries, filtering full listing"
                );
                Ok(self.fallback().await)
            }
            Err(error) if error.is_not_found() => {
                tracing::warn!(
                    "option positions endpoint not available, filtering full listing"
                );
                Ok(self.fallback().await)
            }
            Err(error) => Err(error),
        }
    }

    /// Filters the full position listing down to OCC option symbols.
    ///
    /// This path only runs once the primary endpoint has already come up
    /// empty, so a failure here degrades to an empty snapshot instead of
    /// failing the read.
    async fn fallback(&self) -> Vec<Position> {
        metrics::record_positions_fallback();
        match self.gateway.positions().await {
            Ok(positions) => {
                let mut options = canonicalize(positions);
                options.retain(|position| is_occ_symbol(&position.symbol));
                options
            }
            Err(error) => {
                metrics::record_positions_degraded();
                tracing::warn!(%error, "position fallback failed, degrading to empty snapshot");
                Vec::new()
            }
        }
    }
}

/// Rewrites every symbol into its bare form so callers never see the
/// prefixed option spelling.
fn canonicalize(mut positions: Vec<Position>) -> Vec<Position> {
    for position in &mut positions {
        position.symbol = to_bare_symbol(&position.symbol).to_owned();
    }
    positions
}
