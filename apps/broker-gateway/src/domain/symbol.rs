//! Option contract symbol canonicalization.
//!
//! Desk tooling addresses option contracts with a market-data style prefix
//! (`O:AAPL240621C00190000`), while the brokerage API expects the bare OCC
//! form (`AAPL240621C00190000`). This module converts between the two and
//! recognizes OCC-formatted strings by pattern.

/// Prefix used by market-data feeds for option contract tickers.
pub const OPTION_PREFIX: &str = "O:";

/// Strip the option-market prefix, if present.
///
/// The remainder is not validated; a bare equity ticker passes through
/// unchanged. Applying this twice is a no-op.
#[must_use]
pub fn to_bare_symbol(input: &str) -> &str {
    input.strip_prefix(OPTION_PREFIX).unwrap_or(input)
}

/// Whether a string is a bare OCC option symbol.
///
/// OCC symbols encode root ticker, expiration (YYMMDD), right (`C`/`P`),
/// and strike price ×1000 zero-padded to 8 digits. Used for filtering mixed
/// position listings, never for rejecting order input.
#[must_use]
#[allow(clippy::expect_used)]
pub fn is_occ_symbol(input: &str) -> bool {
    use std::sync::OnceLock;

    static OCC_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = OCC_REGEX.get_or_init(|| {
        regex::Regex::new(r"^[A-Z]+[0-9]{6}[CP][0-9]{8}$").expect("OCC symbol regex is valid")
    });

    re.is_match(input)
}
