//! Alpaca adapter configuration.
//!
//! Credentials and base URLs are discovered from the environment, accepting
//! the variable spellings that have accumulated across deployments. Every
//! variable is optional: a gateway without credentials still starts, warns
//! once, and lets requests fail upstream.

use std::env;
use std::time::Duration;

/// Default HTTP request timeout for upstream calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepted spellings for the API key id, in precedence order.
const API_KEY_VARS: [&str; 3] = ["ALPACA_API_KEY", "ALPACA_KEY_ID", "APCA_API_KEY_ID"];

/// Accepted spellings for the API secret, in precedence order.
const API_SECRET_VARS: [&str; 3] = ["ALPACA_API_SECRET", "ALPACA_SECRET_KEY", "APCA_API_SECRET_KEY"];

/// Accepted spellings for the base URL override, in precedence order.
const BASE_URL_VARS: [&str; 3] = ["ALPACA_API_BASE", "ALPACA_BASE_URL", "APCA_API_BASE_URL"];

/// Environment for the Alpaca trading API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlpacaEnvironment {
    /// Paper trading (simulated).
    #[default]
    Paper,
    /// Live trading (real money).
    Live,
}

impl AlpacaEnvironment {
    /// Get the default base URL for the trading API.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Paper => "https://paper-api.alpaca.markets",
            Self::Live => "https://api.alpaca.markets",
        }
    }

    /// Check if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl std::fmt::Display for AlpacaEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paper => write!(f, "PAPER"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Configuration for the Alpaca gateway adapter.
#[derive(Clone)]
pub struct AlpacaConfig {
    /// API key id.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Trading environment.
    pub environment: AlpacaEnvironment,
    /// Normalized base URL: no trailing slash, no version suffix. Route
    /// paths are appended as `/v2/...`.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl AlpacaConfig {
    /// Create a configuration with the environment's default base URL.
    #[must_use]
    pub fn new(api_key: String, api_secret: String, environment: AlpacaEnvironment) -> Self {
        Self {
            api_key,
            api_secret,
            environment,
            base_url: environment.base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the base URL, normalizing it first.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// Paper trading is the default; only a literal `false` (any casing) in
    /// `ALPACA_PAPER` selects the live environment. Data-feed selectors are
    /// logged so deployments can confirm what a pod picked up.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = first_env(&API_KEY_VARS).unwrap_or_default();
        let api_secret = first_env(&API_SECRET_VARS).unwrap_or_default();

        let environment = if env::var("ALPACA_PAPER").is_ok_and(|v| v.eq_ignore_ascii_case("false"))
        {
            AlpacaEnvironment::Live
        } else {
            AlpacaEnvironment::Paper
        };

        let mut config = Self::new(api_key, api_secret, environment);
        if let Some(base_url) = first_env(&BASE_URL_VARS) {
            config = config.with_base_url(&base_url);
        }

        for feed_var in ["ALPACA_DATA_FEED", "ALPACA_OPTION_FEED"] {
            if let Ok(feed) = env::var(feed_var) {
                tracing::info!(var = feed_var, feed = %feed, "data feed selector configured");
            }
        }

        config
    }

    /// Whether both credentials are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl std::fmt::Debug for AlpacaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Strip trailing slashes and one trailing `/v2` segment so that route
/// paths can always be appended in full.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/v2").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.is_empty()))
}
