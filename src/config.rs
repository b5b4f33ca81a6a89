//! CLI settings.
//!
//! Read from `restql.toml` in the working directory, or from
//! `<config dir>/restql/config.toml`. Both are optional.
//!
//! ```toml
//! [api]
//! host = "acme.dev"
//!
//! [output]
//! format = "json"
//! ```

use crate::compiler::CompileOptions;
use crate::error::{RestqlError, RestqlResult};
use crate::example::DEFAULT_HOST;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const LOCAL_FILE: &str = "restql.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub host: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl Settings {
    /// Load the first settings file found, or defaults if there is none.
    pub fn load() -> RestqlResult<Self> {
        match Self::locate() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Where `load` looks, in order.
    pub fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("restql").join("config.toml"));
        }
        paths
    }

    fn locate() -> Option<PathBuf> {
        Self::candidates().into_iter().find(|p| p.exists())
    }

    pub fn from_path(path: &Path) -> RestqlResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)
            .map_err(|e| RestqlError::settings(path.display().to_string(), e.to_string()))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            host: self.api.host.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::from_toml("").unwrap();
        assert_eq!(s.api.host, "example.com");
        assert_eq!(s.output.format, Format::Text);
    }

    #[test]
    fn test_overrides() {
        let s = Settings::from_toml("[api]\nhost = \"acme.dev\"\n[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(s.compile_options().host, "acme.dev");
        assert_eq!(s.output.format, Format::Json);
    }

    #[test]
    fn test_bad_format_is_an_error() {
        assert!(Settings::from_toml("[output]\nformat = \"yaml\"").is_err());
    }

    #[test]
    fn test_local_file_is_checked_first() {
        assert_eq!(Settings::candidates()[0], PathBuf::from("restql.toml"));
    }
}
