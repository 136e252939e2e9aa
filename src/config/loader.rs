//! Configuration loading from disk and the command line.

use std::fs;
use std::path::Path;

use crate::config::schema::MirrorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[source] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub source: Option<String>,
    pub bind_address: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Apply every override that was set.
    pub fn apply(&self, config: &mut MirrorConfig) {
        if let Some(source) = &self.source {
            config.source.location = source.clone();
        }
        if let Some(bind_address) = &self.bind_address {
            config.listener.bind_address = bind_address.clone();
        }
        if let Some(secs) = self.poll_interval_secs {
            config.source.poll_interval_secs = secs;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<MirrorConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Build the effective configuration: defaults, then the optional file,
/// then command-line overrides. The result is validated once at the end.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<MirrorConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path).map_err(ConfigError::Io)?)?,
        None => MirrorConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            [source]
            location = "https://example.com/spec.json"
            poll_interval_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.source.location, "https://example.com/spec.json");
        assert_eq!(config.source.poll_interval_secs, 10);
        assert_eq!(config.source.fetch_timeout_secs, 5);
        assert_eq!(config.source.debounce_ms, 500);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8585");
        assert_eq!(config.docs.document_path, "/swagger.json");
        assert!(config.docs.persist_authorization);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[source\nlocation = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_file_values_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror.toml");
        std::fs::write(&path, "[source]\npoll_interval_secs = 0\n").unwrap();

        let err = resolve_config(Some(&path), &ConfigOverrides::default()).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: source.poll_interval_secs: must be greater than 0");
    }

    #[test]
    fn test_validation_message_lists_every_error() {
        let overrides = ConfigOverrides {
            bind_address: Some("localhost".into()),
            poll_interval_secs: Some(0),
            ..Default::default()
        };
        let err = resolve_config(None, &overrides).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.bind_address: 'localhost' is not a socket address, \
             source.poll_interval_secs: must be greater than 0"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_config(Some(&dir.path().join("absent.toml")), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror.toml");
        std::fs::write(
            &path,
            "[listener]\nbind_address = \"127.0.0.1:9000\"\n[source]\nlocation = \"docs/api.json\"\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            source: Some("https://example.com/spec.json".into()),
            poll_interval_secs: Some(5),
            ..Default::default()
        };
        let config = resolve_config(Some(&path), &overrides).unwrap();

        assert_eq!(config.source.location, "https://example.com/spec.json");
        assert_eq!(config.source.poll_interval_secs, 5);
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let overrides = ConfigOverrides {
            bind_address: Some("localhost".into()),
            ..Default::default()
        };
        let err = resolve_config(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }
}
