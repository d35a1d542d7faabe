//! Daemon settings.
//!
//! Read once at startup from an optional `tidydo.toml` next to the binary's
//! working directory, then patched by `TIDYDO_*` variables (and `RUST_LOG`
//! for the log filter). Missing keys keep their defaults.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// File looked up in the working directory.
const CONFIG_FILE: &str = "tidydo.toml";

/// Settings of the `tidydod` process.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[server]`: where the JSON API listens.
    pub server: ServerConfig,
    /// `[database]`: where todos and preferences live.
    pub database: DatabaseConfig,
    /// `[logging]`
    pub logging: LoggingConfig,
    /// `[notices]`: lifetime of user-facing notices.
    pub notices: NoticesConfig,
}

/// Listening address of the API.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Must not be `0`.
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection string, e.g. `sqlite:tidydo.db?mode=rwc` or
    /// `sqlite::memory:`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NoticesConfig {
    /// Seconds before an undismissed notice disappears. Must not be `0`.
    pub ttl_secs: u64,
}

impl Config {
    /// Build the settings the daemon starts with.
    ///
    /// # Errors
    ///
    /// Fails when `tidydo.toml` exists but cannot be read or parsed, or when
    /// the merged settings hold a zero port or a zero notice lifetime.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Patch settings from variables looked up through `var`.
    ///
    /// `TIDYDO_BIND` (`host:port`) wins over `TIDYDO_HOST`/`TIDYDO_PORT`, and
    /// `RUST_LOG` over `TIDYDO_LOG`. Numbers that do not parse are ignored.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("TIDYDO_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parsed(&var, "TIDYDO_PORT") {
            self.server.port = port;
        }
        if let Some((host, port)) = var("TIDYDO_BIND")
            .as_deref()
            .and_then(|bind| bind.rsplit_once(':'))
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(url) = var("TIDYDO_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(filter) = var("RUST_LOG").or_else(|| var("TIDYDO_LOG")) {
            self.logging.filter = filter;
        }
        if let Some(ttl) = parsed(&var, "TIDYDO_NOTICE_TTL_SECS") {
            self.notices.ttl_secs = ttl;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero"));
        }
        if self.notices.ttl_secs == 0 {
            return Err(ConfigError::Validation("notices.ttl_secs must be non-zero"));
        }
        Ok(())
    }

    /// Address handed to `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Lifetime given to the notice board.
    #[must_use]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notices.ttl_secs)
    }
}

fn parsed<T: FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    var(name).and_then(|val| val.parse().ok())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:tidydo.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "tidydod=info,tidydo=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self { ttl_secs: 5 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse tidydo.toml")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read tidydo.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}
