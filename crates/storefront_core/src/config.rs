//! Layered configuration for storefront applications.
//!
//! `defaults/storefront.default.toml` is embedded into every binary. Callers
//! layer user files, `STOREFRONT__SECTION__KEY` environment variables and
//! explicit overrides on top via [`Loader`] before deserializing into
//! [`StorefrontConfig`].
//!
//! Bearer tokens are not configuration; callers pass credentials explicitly.

use crate::menu::MenuOptions;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub use ::config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/storefront.default.toml");
const ENV_PREFIX: &str = "STOREFRONT";
const ENV_SEPARATOR: &str = "__";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    pub api: ApiConfig,
    pub menu: MenuConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuConfig {
    pub max_depth: usize,
    pub indent_width: usize,
}

impl MenuConfig {
    pub fn options(&self) -> MenuOptions {
        MenuOptions {
            max_depth: self.max_depth,
            indent_width: self.indent_width,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute log directory; file logging stays off when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `STOREFRONT__SECTION__KEY` environment variables.
    pub fn with_env(mut self) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    ///
    /// # Errors
    /// - Any layer fails to load or the merged values do not deserialize.
    /// - `api.timeout_secs` is `0`.
    pub fn build(self) -> Result<StorefrontConfig, ConfigError> {
        let config: StorefrontConfig = self.builder.build()?.try_deserialize()?;
        if config.api.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<StorefrontConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::DEFAULT_MAX_DEPTH;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.menu.options().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("menu.max_depth", 2_i64)
            .expect("override to apply")
            .set_override("api.base_url", "https://shop.example")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.menu.max_depth, 2);
        assert_eq!(config.api.base_url, "https://shop.example");
    }
}
