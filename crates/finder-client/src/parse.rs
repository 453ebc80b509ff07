//! Field-level parsing for raw webhook entries.
//!
//! The address helpers are best-effort: they assume the French
//! `"street, POSTCODE City, Country"` layout the webhook uses and make no
//! attempt at general address parsing.

use std::sync::LazyLock;

use rand::distr::{Alphanumeric, SampleString};
use regex::Regex;

const RANDOM_ID_LEN: usize = 9;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{5}\b").expect("valid regex"));

static FLOAT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid regex")
});

/// Turns a center name into its id: whitespace runs become `-`, then lowercase.
///
/// `"Centre Dentaire Balard"` → `"centre-dentaire-balard"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(name, "-").to_lowercase()
}

/// Opaque lowercase alphanumeric token for centers that have no name.
#[must_use]
pub fn random_id() -> String {
    Alphanumeric
        .sample_string(&mut rand::rng(), RANDOM_ID_LEN)
        .to_lowercase()
}

/// City from the second-to-last comma-separated segment, minus its first
/// space-delimited token (the postal code).
///
/// `"83 Rue de l'Ourcq, 75019 Paris, France"` → `"Paris"`. Returns an empty
/// string when the address has fewer than two segments.
#[must_use]
pub fn extract_city(address: &str) -> String {
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() < 2 {
        return String::new();
    }
    let city_part = parts[parts.len() - 2].trim();
    city_part.split(' ').skip(1).collect::<Vec<_>>().join(" ")
}

/// First standalone five-digit run anywhere in the address.
#[must_use]
pub fn extract_postal_code(address: &str) -> String {
    POSTAL_CODE_RE
        .find(address)
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default()
}

/// Parses the longest leading decimal literal, ignoring leading whitespace
/// and any trailing garbage (`"48.89abc"` → `48.89`).
#[must_use]
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let m = FLOAT_PREFIX_RE.find(raw.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a coordinate that may be a JSON number or a numeric string.
#[must_use]
pub fn parse_coordinate(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
