use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::pipeline::PipelineOptions;

/// Conventional location of the cleaned dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "cleaned_titanic.csv";

/// Names a JSON file with [`Config`] overrides.
pub const CONFIG_ENV: &str = "TITANIC_EDA_CONFIG";

/// Overrides the data file path.
pub const DATA_ENV: &str = "TITANIC_EDA_DATA";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Start-up configuration of the dashboard.
///
/// Sources, each overriding the previous: built-in defaults, the JSON file
/// named by `TITANIC_EDA_CONFIG`, the `TITANIC_EDA_DATA` variable, and the
/// first command-line argument.
///
/// ```json
/// { "data_path": "data/titanic.parquet", "pipeline": { "histogram_bins": 20 } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_path: PathBuf,
    /// Initial window size in points.
    pub window_size: [f32; 2],
    pub pipeline: PipelineOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1200.0, 800.0],
            pipeline: PipelineOptions::default(),
        }
    }
}

impl Config {
    /// Read a JSON config file. Keys left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Resolve the configuration from the process environment and arguments.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os(DATA_ENV),
            std::env::args_os().skip(1),
        )
    }

    pub fn resolve(
        config_file: Option<PathBuf>,
        data_override: Option<OsString>,
        mut args: impl Iterator<Item = OsString>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        if let Some(path) = data_override.filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(path) = args.next() {
            config.data_path = PathBuf::from(path);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_conventional_file() {
        let config = Config::resolve(None, None, std::iter::empty()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("cleaned_titanic.csv"));
        assert_eq!(config.pipeline.preview_rows, 5);
        assert_eq!(config.pipeline.histogram_bins, 30);
    }

    #[test]
    fn argument_wins_over_environment() {
        let config = Config::resolve(
            None,
            Some(OsString::from("env.csv")),
            vec![OsString::from("arg.csv")].into_iter(),
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("arg.csv"));

        let config = Config::resolve(None, Some(OsString::from("env.csv")), std::iter::empty())
            .unwrap();
        assert_eq!(config.data_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "pipeline": { "histogram_bins": 12 } }"#).unwrap();
        assert_eq!(config.pipeline.histogram_bins, 12);
        assert_eq!(config.pipeline.preview_rows, 5);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = Config::from_file(Path::new("/nonexistent/titanic-eda.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));
    }
}
