//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "swagger-mirror")]
#[command(version, about = "Mirror a JSON API document from a file or URL and serve it with Swagger UI", long_about = None)]
pub struct Cli {
    /// Document path or URL; relative paths resolve against the executable's directory
    #[arg(short, long)]
    pub source: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8585
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Remote polling interval in seconds
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source: self.source.clone(),
            bind_address: self.bind.clone(),
            poll_interval_secs: self.poll_interval_secs,
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_means_no_overrides() {
        let cli = Cli::try_parse_from(["swagger-mirror"]).unwrap();
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "swagger-mirror",
            "-s",
            "https://example.com/spec.json",
            "--bind",
            "127.0.0.1:9000",
            "--poll-interval-secs",
            "10",
            "-c",
            "mirror.toml",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.source.as_deref(), Some("https://example.com/spec.json"));
        assert_eq!(overrides.bind_address.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(overrides.poll_interval_secs, Some(10));
        assert_eq!(cli.config, Some(PathBuf::from("mirror.toml")));
    }

    #[test]
    fn test_rejects_non_numeric_interval() {
        assert!(Cli::try_parse_from(["swagger-mirror", "--poll-interval-secs", "soon"]).is_err());
    }
}
