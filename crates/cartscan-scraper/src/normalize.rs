//! Canonicalization of raw extracted text.
//!
//! Markup text arrives with arbitrary whitespace and price strings carry
//! surrounding noise (`"₹ 45.00 onwards"`). These helpers are pure and are
//! applied per field by the extractor.

use std::sync::LazyLock;

use regex::Regex;

/// Currency-symbol-prefixed decimal amount, optional 2-decimal fraction.
/// Whitespace between symbol and digits is tolerated (`"₹ 45"`).
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([₹$€£])\s*(\d+(?:\.\d{2})?)").expect("valid price regex"));

/// Collapses every run of whitespace (spaces, tabs, newlines) to a single
/// space and trims the ends. Empty input yields an empty string. Idempotent.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the first currency-symbol-prefixed amount from `raw` and returns
/// it as `"<symbol><amount>"` with no surrounding text.
///
/// When no such pattern is present the input is returned trimmed of
/// whitespace — a degraded fallback that may retain arbitrary text, so
/// callers must tolerate non-canonical output.
#[must_use]
pub fn extract_price(raw: &str) -> String {
    match PRICE_RE.captures(raw) {
        Some(caps) => format!("{}{}", &caps[1], &caps[2]),
        None => raw.trim().to_string(),
    }
}
