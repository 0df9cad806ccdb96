//! Time-based caching for brokerage snapshots.
//!
//! Both snapshot caches in this service share one shape: a single slot
//! holding the last fetched value until a fixed TTL elapses. Reads within
//! the TTL return a clone without touching the network; an expired or empty
//! slot reports a miss and the caller fetches and stores. A failed fetch
//! changes nothing: the prior entry stays as it was, and errors are never
//! cached.

use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::observability::metrics;

/// TTL shared by the brokerage snapshot caches.
pub const SNAPSHOT_CACHE_TTL: Duration = Duration::from_secs(10);

/// One cached value with its expiry.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

/// Single-slot cache with a fixed time-to-live.
///
/// Owned by whichever component needs it, never global, so tests can
/// build isolated instances and drive the clock through [`Self::get_at`] and
/// [`Self::store_at`]. Lock scope never spans an await point. Concurrent
/// misses are not deduplicated: two requests racing past the same expiry
/// both fetch, and the later store wins. Acceptable at the request volume
/// this service sees.
#[derive(Debug)]
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Duration,
    slot: RwLock<Option<CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Cache with the given TTL, named for logs and metrics.
    #[must_use]
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Cache with the standard snapshot TTL.
    #[must_use]
    pub fn with_default_ttl(name: &'static str) -> Self {
        Self::new(name, SNAPSHOT_CACHE_TTL)
    }

    /// Name used in logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// How long entries stay fresh.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if still fresh.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.get_at(Instant::now())
    }

    /// Store a value, fresh for one TTL from now. Replaces any prior entry
    /// wholesale.
    pub fn store(&self, value: T) {
        self.store_at(value, Instant::now());
    }

    /// Freshness check against an explicit clock.
    #[must_use]
    pub fn get_at(&self, now: Instant) -> Option<T> {
        let slot = self.slot.read();
        match slot.as_ref() {
            Some(entry) if now < entry.expires_at => {
                metrics::record_cache_hit(self.name);
                Some(entry.value.clone())
            }
            _ => {
                metrics::record_cache_miss(self.name);
                None
            }
        }
    }

    /// Store against an explicit clock.
    pub fn store_at(&self, value: T, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + self.ttl,
        };
        *self.slot.write() = Some(entry);
        tracing::debug!(cache = self.name, ttl_ms = self.ttl.as_millis() as u64, "Cache entry refreshed");
    }
}
