//! Configuration management for suffixseek
//!
//! Settings come from defaults, an optional `.toml` / `.json` file and
//! `SUFFIXSEEK_*` environment variables, in that order. Command-line flags are
//! applied last by the binary.

use crate::error::{Result, SearchError};
use crate::index::{IndexConfig, SortAlgorithm};
use crate::logging::{LogLevel, LoggingConfig};
use crate::output::DEFAULT_PREVIEW_WIDTH;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use validator::Validate;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixSeekConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Index building configuration
    pub index: IndexSettings,

    /// Output configuration
    pub output: OutputSettings,
}

/// Index building settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IndexSettings {
    /// Construction strategy
    pub algorithm: SortAlgorithm,

    /// Enable parallel sorting
    pub parallel: bool,

    /// Number of worker threads (0 = rayon default)
    #[validate(range(max = 1024))]
    pub threads: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            algorithm: SortAlgorithm::Comparison,
            parallel: true,
            threads: 0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputSettings {
    /// Bytes shown per suffix in the listing
    #[validate(range(min = 1, max = 10000))]
    pub preview_width: usize,

    /// Print the sorted suffix listing after indexing
    pub list_suffixes: bool,

    /// Print search results as JSON
    pub json: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            preview_width: DEFAULT_PREVIEW_WIDTH,
            list_suffixes: false,
            json: false,
        }
    }
}

impl SuffixSeekConfig {
    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: SuffixSeekConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| SearchError::config(format!("TOML parse error: {}", e)))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| SearchError::config(format!("JSON parse error: {}", e)))?,
            _ => {
                return Err(SearchError::config(
                    "Unsupported config file format. Use .toml or .json",
                ));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration, format chosen by extension
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| SearchError::config(format!("TOML serialize error: {}", e)))?,
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| SearchError::config(format!("JSON serialize error: {}", e)))?,
            _ => {
                return Err(SearchError::config(
                    "Unsupported config file format. Use .toml or .json",
                ));
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override values from `SUFFIXSEEK_*` environment variables
    pub fn load_from_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Override values from any key lookup using the environment variable names
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("SUFFIXSEEK_LOG_LEVEL") {
            self.logging.level = level.parse::<LogLevel>().map_err(SearchError::config)?;
        }

        if let Some(json_logs) = lookup("SUFFIXSEEK_JSON_LOGS") {
            self.logging.json_format = json_logs
                .parse()
                .map_err(|e| SearchError::config(format!("Invalid SUFFIXSEEK_JSON_LOGS: {}", e)))?;
        }

        if let Some(algorithm) = lookup("SUFFIXSEEK_ALGORITHM") {
            self.index.algorithm = algorithm.parse().map_err(SearchError::config)?;
        }

        if let Some(threads) = lookup("SUFFIXSEEK_THREADS") {
            self.index.threads = threads
                .parse()
                .map_err(|e| SearchError::config(format!("Invalid SUFFIXSEEK_THREADS: {}", e)))?;
        }

        if let Some(width) = lookup("SUFFIXSEEK_PREVIEW_WIDTH") {
            self.output.preview_width = width.parse().map_err(|e| {
                SearchError::config(format!("Invalid SUFFIXSEEK_PREVIEW_WIDTH: {}", e))
            })?;
        }

        self.validate()
    }

    /// Check every section against its allowed ranges
    pub fn validate(&self) -> Result<()> {
        self.index
            .validate()
            .map_err(|e| SearchError::config(format!("Invalid index settings: {}", e)))?;
        self.output
            .validate()
            .map_err(|e| SearchError::config(format!("Invalid output settings: {}", e)))?;
        Ok(())
    }

    /// Index construction options derived from these settings
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            algorithm: self.index.algorithm,
            parallel: self.index.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SuffixSeekConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.index.algorithm, SortAlgorithm::Comparison);
        assert_eq!(config.output.preview_width, 50);
    }

    #[test]
    fn test_toml_file_loading() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(
            b"[index]\nalgorithm = \"sais\"\nthreads = 4\n\n[output]\npreview_width = 20\n",
        )
        .unwrap();
        file.flush().unwrap();

        let config = SuffixSeekConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.index.algorithm, SortAlgorithm::SuffixArray);
        assert_eq!(config.index.threads, 4);
        assert!(config.index.parallel);
        assert_eq!(config.output.preview_width, 20);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_json_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suffixseek.json");

        let mut config = SuffixSeekConfig::default();
        config.output.list_suffixes = true;
        config.save_to_file(&path).unwrap();

        let loaded = SuffixSeekConfig::load_from_file(&path).unwrap();
        assert!(loaded.output.list_suffixes);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            SuffixSeekConfig::load_from_file(file.path()),
            Err(SearchError::Config(_))
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = SuffixSeekConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("SUFFIXSEEK_LOG_LEVEL", "debug"),
                ("SUFFIXSEEK_JSON_LOGS", "true"),
                ("SUFFIXSEEK_ALGORITHM", "sais"),
                ("SUFFIXSEEK_THREADS", "8"),
            ]))
            .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.json_format);
        assert_eq!(config.index.algorithm, SortAlgorithm::SuffixArray);
        assert_eq!(config.index.threads, 8);
        assert_eq!(config.index_config().algorithm, SortAlgorithm::SuffixArray);
    }

    #[test]
    fn test_invalid_overrides() {
        let mut config = SuffixSeekConfig::default();
        assert!(config
            .apply_overrides(lookup_from(&[("SUFFIXSEEK_ALGORITHM", "radix")]))
            .is_err());

        let mut config = SuffixSeekConfig::default();
        assert!(config
            .apply_overrides(lookup_from(&[("SUFFIXSEEK_PREVIEW_WIDTH", "0")]))
            .is_err());

        let mut config = SuffixSeekConfig::default();
        assert!(config
            .apply_overrides(lookup_from(&[("SUFFIXSEEK_THREADS", "5000")]))
            .is_err());
    }
}
