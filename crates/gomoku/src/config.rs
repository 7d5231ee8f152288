//! Server configuration.
//!
//! The process takes no command-line arguments. Everything comes from the
//! environment:
//!
//! | Variable                   | Default   | Meaning                          |
//! |----------------------------|-----------|----------------------------------|
//! | `PORT`                     | `3000`    | TCP port to listen on            |
//! | `GOMOKU_HOST`              | `0.0.0.0` | Interface to bind                |
//! | `GOMOKU_NOTIFY_REJECTIONS` | `false`   | Send `invalidMove` on rejections |
//!
//! `GOMOKU_PORT` is accepted too; `PORT` wins when both are set.

use ::config::{Config, Environment};
use serde::Deserialize;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind interface.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Prefix for every variable except `PORT`.
const ENV_PREFIX: &str = "GOMOKU";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set to a value its field can't hold.
    #[error("invalid configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port to listen on. `0` lets the OS choose.
    pub port: u16,

    /// When `true`, a rejected move is answered with `invalidMove` to its
    /// sender. When `false` it is dropped silently.
    pub notify_rejections: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            notify_rejections: false,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a variable is set to an unparsable value.
    /// Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(environment(), std::env::var("PORT").ok())
    }

    /// Layers defaults, the `GOMOKU_` variables and then `port`.
    fn load(
        env: Environment,
        port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("notify_rejections", false)?
            .add_source(env)
            .set_override_option("port", port)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Returns `host:port`, ready for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The `GOMOKU_*` source. Values like `8081` or `true` are parsed into
/// their field types.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Loads from a fixed set of variables instead of the process
    /// environment.
    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: ::config::Map<String, String> = pairs
            .iter()
            .filter(|(k, _)| *k != "PORT")
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let port = pairs
            .iter()
            .find(|(k, _)| *k == "PORT")
            .map(|(_, v)| v.to_string());

        ServerConfig::load(environment().source(Some(vars)), port)
    }

    #[test]
    fn test_load_empty_gives_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_load_reads_port_and_host() {
        let config =
            load(&[("PORT", "8081"), ("GOMOKU_HOST", "127.0.0.1")]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn test_load_port_overrides_prefixed_port() {
        let config = load(&[("GOMOKU_PORT", "4000"), ("PORT", "5000")]).unwrap();
        assert_eq!(config.port, 5000);

        let config = load(&[("GOMOKU_PORT", "4000")]).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_load_rejects_bad_port() {
        let err = load(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_load_parses_notify_flag() {
        for (raw, expected) in [("true", true), ("1", true), ("NO", false)] {
            let config = load(&[("GOMOKU_NOTIFY_REJECTIONS", raw)]).unwrap();
            assert_eq!(config.notify_rejections, expected, "{raw}");
        }
    }

    #[test]
    fn test_load_rejects_bad_bool() {
        let err = load(&[("GOMOKU_NOTIFY_REJECTIONS", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_load_ignores_unprefixed_variables() {
        let config = load(&[("HOST", "10.0.0.1")]).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
