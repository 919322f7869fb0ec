use crate::{
    args::{Args, get_confpath},
    units::Unit,
};
use rate_core::MonitorConfig;
use serde::Deserialize;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read config file \"{path}\": {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("could not parse config file \"{path}\": {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// The contents of a config file
///
/// ```toml
/// unit = "MiB"
/// progress = true
/// interval_ms = 1000
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    unit: Option<Unit>,
    progress: bool,
    #[serde(flatten)]
    monitor: MonitorConfig,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&config).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The settings the tool runs with, after merging the config file and the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) unit: Unit,
    pub(crate) progress: bool,
    pub(crate) monitor: MonitorConfig,
}

impl Settings {
    pub(crate) fn resolve(args: &Args) -> Result<Self, ConfigError> {
        Self::resolve_with(args, get_confpath(args).as_deref())
    }

    /// Merge `args` over the config file at `confpath`, if there is one
    fn resolve_with(args: &Args, confpath: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match confpath {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        Ok(Self {
            unit: args.unit.or(file.unit).unwrap_or_default(),
            progress: args.progress || file.progress,
            monitor: args.interval.map(MonitorConfig::new).unwrap_or(file.monitor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempdir::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("rate.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_without_config() {
        let args = Args::try_parse_from(["rate"]).unwrap();
        let settings = Settings::resolve_with(&args, None).unwrap();

        assert_eq!(
            settings,
            Settings {
                unit: Unit::KB,
                progress: false,
                monitor: MonitorConfig::default(),
            }
        );
    }

    #[test]
    fn config_file_is_applied() {
        let dir = TempDir::new("rate").unwrap();
        let path = write_config(
            &dir,
            "
            unit = \"GiB\"
            progress = true
            interval_ms = 1000
            ",
        );

        let args = Args::try_parse_from(["rate"]).unwrap();
        let settings = Settings::resolve_with(&args, Some(&path)).unwrap();

        assert_eq!(settings.unit, Unit::GiB);
        assert!(settings.progress);
        assert_eq!(settings.monitor, MonitorConfig::new(1000));
    }

    #[test]
    fn arguments_override_config_file() {
        let dir = TempDir::new("rate").unwrap();
        let path = write_config(&dir, "unit = \"GiB\"\ninterval_ms = 1000\n");

        let args = Args::try_parse_from(["rate", "-u", "B", "-i", "100"]).unwrap();
        let settings = Settings::resolve_with(&args, Some(&path)).unwrap();

        assert_eq!(settings.unit, Unit::B);
        assert_eq!(settings.monitor, MonitorConfig::new(100));
    }

    #[test]
    fn bad_unit_in_config_file() {
        let dir = TempDir::new("rate").unwrap();
        let path = write_config(&dir, "unit = \"parsecs\"\n");

        let args = Args::try_parse_from(["rate"]).unwrap();
        let err = Settings::resolve_with(&args, Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_config_file() {
        let dir = TempDir::new("rate").unwrap();
        let path = dir.path().join("missing.toml");

        let args = Args::try_parse_from(["rate"]).unwrap();
        let err = Settings::resolve_with(&args, Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
