//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("{0} must be set.")]
    MissingField(&'static str),
}

/// Config file as written on disk; every field may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub template_path: Option<PathBuf>,

    #[serde(default)]
    pub markdown_path: Option<PathBuf>,

    #[serde(default)]
    pub default_template: Option<String>,

    #[serde(default)]
    pub web_pages_path: Option<PathBuf>,

    #[serde(default)]
    pub markdown_output_dir: Option<PathBuf>,

    #[serde(default)]
    pub toc_file: Option<PathBuf>,
}

/// Validated configuration matching the tsk.yml schema
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory the template loader reads from
    pub template_path: PathBuf,
    /// Source documents (`*.md`, non-recursive)
    pub markdown_path: PathBuf,
    /// Template used when a document doesn't name one
    pub default_template: String,
    /// Where final pages are written
    pub web_pages_path: PathBuf,
    /// Where converted page fragments are written; also where outline URLs
    /// are checked
    pub markdown_output_dir: PathBuf,
    /// Optional outline document
    pub toc_file: Option<PathBuf>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let raw: RawConfig = serde_yaml::from_str(&contents)?;

        let mut config = Self::from_raw(raw)?;
        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate a raw config; paths stay as given
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            template_path: raw
                .template_path
                .ok_or(ConfigError::MissingField("template_path"))?,
            markdown_path: raw
                .markdown_path
                .ok_or(ConfigError::MissingField("markdown_path"))?,
            default_template: raw
                .default_template
                .filter(|t| !t.trim().is_empty())
                .ok_or(ConfigError::MissingField("default_template"))?,
            web_pages_path: raw
                .web_pages_path
                .ok_or(ConfigError::MissingField("web_pages_path"))?,
            markdown_output_dir: raw
                .markdown_output_dir
                .ok_or(ConfigError::MissingField("markdown_output_dir"))?,
            toc_file: raw.toc_file,
            config_path: None,
        })
    }

    /// Get the templates directory, resolved relative to config file
    pub fn template_dir(&self) -> PathBuf {
        self.resolve_path(&self.template_path)
    }

    /// Get the markdown source directory, resolved relative to config file
    pub fn markdown_dir(&self) -> PathBuf {
        self.resolve_path(&self.markdown_path)
    }

    /// Get the web pages directory, resolved relative to config file
    pub fn web_pages_dir(&self) -> PathBuf {
        self.resolve_path(&self.web_pages_path)
    }

    /// Get the page fragment directory, resolved relative to config file
    pub fn markdown_output_dir(&self) -> PathBuf {
        self.resolve_path(&self.markdown_output_dir)
    }

    /// Get the outline file, resolved relative to config file
    pub fn toc_path(&self) -> Option<PathBuf> {
        self.toc_file.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}
