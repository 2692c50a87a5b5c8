//! Configuration providers.

use crate::domain::MembershipConfig;
use crate::ports::ConfigProvider;
use serde::Deserialize;
use std::fs;
use std::path::Path;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider.
///
/// Useful for testing and development. For production, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: MembershipConfig,
}

impl StaticConfigProvider {
    #[must_use]
    pub fn new(config: MembershipConfig) -> Self {
        Self { config }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn membership_config(&self) -> MembershipConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Production config loading
// ============================================================================

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    membership: MembershipConfig,
}

/// TOML-based configuration provider.
///
/// # Config File Format
///
/// ```toml
/// [membership]
/// max_peers = 64
/// emit_rejection_events = true
///
/// [membership.trust_bounds]
/// min = 0.0
/// max = 100.0
/// ```
///
/// Every key is optional; missing keys keep their defaults.
#[derive(Debug, Clone)]
pub struct TomlConfigProvider {
    config: MembershipConfig,
}

impl TomlConfigProvider {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed, or holds invalid values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = file.membership;

        if let Some(bounds) = &config.trust_bounds {
            if !(bounds.min <= bounds.max) {
                return Err(ConfigError::Invalid(format!(
                    "trust_bounds.min ({}) exceeds trust_bounds.max ({})",
                    bounds.min, bounds.max
                )));
            }
        }
        if config.max_peers == Some(0) {
            return Err(ConfigError::Invalid("max_peers must be positive".to_string()));
        }

        Ok(Self { config })
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn membership_config(&self) -> MembershipConfig {
        self.config.clone()
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
