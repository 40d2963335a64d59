//! Environment-variable configuration.

use std::env;

/// Kernel configuration.
///
/// `SKIFF_DEBUG`: when `1` or `true`, 500 responses carry the full error
/// chain instead of the generic body. Off by default; never enable it
/// where clients are untrusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppConfig {
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let debug = env::var("SKIFF_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self { debug }
    }
}
