//! Configuration file handling.
//!
//! This module handles loading the `.labelstats.toml` file that
//! describes the labeling sources and the artifact file names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Artifact file names.
    #[serde(default)]
    pub output: OutputConfig,

    /// Labeling sources to aggregate, in processing order.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            sources: default_sources(),
        }
    }
}

/// One spreadsheet source: the file, the sheets to read from it, and
/// the assignee its rows are booked under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub file: PathBuf,
    pub sheets: Vec<String>,
    pub assignee: String,
}

/// File names of the JSON artifacts written by the two jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Comprehensive report written by the aggregate job.
    #[serde(default = "default_report")]
    pub report: String,

    /// Dashboard dataset written by the aggregate job.
    #[serde(default = "default_dashboard")]
    pub dashboard: String,

    /// Extended report written by the merge job. The aggregate report
    /// is never overwritten in place.
    #[serde(default = "default_updated_report")]
    pub updated_report: String,

    /// Dashboard dataset regenerated by the merge job.
    #[serde(default = "default_updated_dashboard")]
    pub updated_dashboard: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: default_report(),
            dashboard: default_dashboard(),
            updated_report: default_updated_report(),
            updated_dashboard: default_updated_dashboard(),
        }
    }
}

fn default_report() -> String {
    "comprehensive_statistics.json".to_string()
}

fn default_dashboard() -> String {
    "dashboard_data.json".to_string()
}

fn default_updated_report() -> String {
    "comprehensive_statistics_updated.json".to_string()
}

fn default_updated_dashboard() -> String {
    "dashboard_data_updated.json".to_string()
}

fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor {
            file: PathBuf::from("Sawwaf_Enhanced_Labeling_Output.xlsx"),
            sheets: vec!["Sheet1".to_string()],
            assignee: "Sawwaf".to_string(),
        },
        SourceDescriptor {
            file: PathBuf::from("handling issues 24 7.xlsx"),
            sheets: vec![
                "joe 27 labeling",
                "Labeling - Joe_31July",
                "Mohamed's Labeling",
                "Zeyad's Labeling Jul 27",
                "Labeling - Razan",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            assignee: "Multiple".to_string(),
        },
    ]
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it
    /// exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".labelstats.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
