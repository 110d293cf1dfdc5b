//! Service configuration.
//!
//! All knobs are resolved from the environment exactly once, in `main`, and
//! the resulting [`Config`] is passed down explicitly. Nothing else in the
//! service reads environment variables, which is what lets tests substitute
//! the renderer binary.

use anyhow::Context;
use std::net::SocketAddr;

/// Environment variable overriding the renderer executable.
pub const BIN_ENV: &str = "WKHTMLTOPDF_BIN";
/// Environment variable overriding the listen address.
pub const LISTEN_ENV: &str = "LISTEN_ADDR";

const DEFAULT_BIN: &str = "wkhtmltopdf";

#[derive(Debug, Clone)]
pub struct Config {
    /// Renderer executable. Bare names resolve through `PATH`.
    pub bin: String,
    /// Address the HTTP server binds.
    pub listen: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bin: DEFAULT_BIN.to_string(),
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl Config {
    /// Read the configuration from the environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Config::default();

        if let Ok(bin) = std::env::var(BIN_ENV) {
            if !bin.is_empty() {
                config.bin = bin;
            }
        }
        if let Ok(listen) = std::env::var(LISTEN_ENV) {
            config.listen = listen
                .parse()
                .with_context(|| format!("invalid {LISTEN_ENV} value: {listen}"))?;
        }

        Ok(config)
    }
}
