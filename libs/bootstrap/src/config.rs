//! Layered application configuration.
//!
//! Both binaries read the same file; sections they do not use are
//! ignored. Precedence, lowest to highest: built-in defaults, the YAML
//! file (when one is given), `SEQHUB__*` environment variables. A
//! nested key is addressed by doubling the separator, e.g.
//! `SEQHUB__CLIENT__MAX_BATCH=16`.

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use seqhub_directory::DirectoryConfig;
use serde::{Deserialize, Serialize};

/// Environment variable prefix recognized by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "SEQHUB__";

/// Settings shared by the server and client binaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Service directory settings.
    pub directory: DirectoryConfig,
    /// Client-side settings; the server ignores this section.
    pub client: ClientConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Settings for the querying side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Most indices accepted in a single batch request.
    pub max_batch: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_batch: sequences_sdk::DEFAULT_MAX_BATCH,
        }
    }
}

/// Log filtering defaults; see [`crate::logging::init`] for precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives applied when neither `RUST_LOG` nor `-v` says
    /// otherwise. Accepts anything `tracing_subscriber::EnvFilter` does.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering the YAML file at `path` and the
    /// environment over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            // Yaml::file skips missing files silently; a path the user
            // asked for has to exist.
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.directory.namespace, "integer-seq");
        assert_eq!(config.directory.page_size, 100);
        assert!(!config.directory.create_if_absent);
        assert_eq!(config.client.max_batch, sequences_sdk::DEFAULT_MAX_BATCH);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn yaml_overrides_defaults_and_keeps_the_rest() {
        let file = write_yaml(
            "directory:\n  namespace: staging-seq\nclient:\n  max_batch: 16\n",
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.directory.namespace, "staging-seq");
        assert_eq!(config.client.max_batch, 16);
        // Untouched sections keep their defaults.
        assert_eq!(config.directory.page_size, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn environment_wins_over_yaml() {
        let file = write_yaml("client:\n  max_batch: 16\nlogging:\n  level: warn\n");
        temp_env::with_var("SEQHUB__CLIENT__MAX_BATCH", Some("5"), || {
            let config = AppConfig::load(Some(file.path())).unwrap();
            assert_eq!(config.client.max_batch, 5);
            assert_eq!(config.logging.level, "warn");
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let file = write_yaml("client:\n  max_batch: lots\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }
}
