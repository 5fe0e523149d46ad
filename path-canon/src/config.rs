use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::report::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config failed: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config failed: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Directory for JSONL logs. File logging is off when unset.
    pub log_dir: Option<PathBuf>,

    /// Filter used when RUST_LOG is not set, e.g. `info` or `path_canon=trace`.
    /// Default: warn
    pub log_level: Option<String>,

    pub format: Option<OutputFormat>,

    /// Treat inputs as request targets instead of bare paths.
    pub uri: Option<bool>,

    /// File with one path per line, read instead of stdin.
    pub input: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(base_dir);
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, empty config.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn uri_mode(&self) -> bool {
        self.uri.unwrap_or(false)
    }

    /// Resolve relative paths in config based on the directory containing the config file.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if let Some(p) = &self.log_dir {
            self.log_dir = Some(resolve_path(base_dir, p));
        }
        if let Some(p) = &self.input {
            self.input = Some(resolve_path(base_dir, p));
        }
    }
}

fn resolve_path(base_dir: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
