//! Configuration loading and representation.

/// Environment variable allowing stock counters to go below zero.
pub const ALLOW_NEGATIVE_STOCK_ENV: &str = "TIENDA_ALLOW_NEGATIVE_STOCK";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct InfraConfig {
    /// When false, an increment that would leave a counter negative is rejected.
    pub allow_negative_stock: bool,
}

impl InfraConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (environment-like key/value source).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let allow_negative_stock = match lookup(ALLOW_NEGATIVE_STOCK_ENV) {
            None => defaults.allow_negative_stock,
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    key = ALLOW_NEGATIVE_STOCK_ENV,
                    value = %raw,
                    "invalid boolean; using default {}",
                    defaults.allow_negative_stock
                );
                defaults.allow_negative_stock
            }),
        };

        Self {
            allow_negative_stock,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
