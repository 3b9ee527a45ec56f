//! Configuration types for skill-triage.
//!
//! These types represent the TOML configuration file structure.

use crate::error::TriageError;
use crate::logging::LoggingConfig;
use crate::triage::DEFAULT_MATCH_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory under `~/.cache` where the discovery step writes its index.
const INDEX_CACHE_DIR: &str = "skillrecommender";

/// File name of the skill index.
const INDEX_FILE_NAME: &str = "skill_index.json";

/// Root configuration structure for skill-triage.
///
/// # Example
///
/// ```toml
/// index_path = "/home/me/.cache/skillrecommender/skill_index.json"
/// match_limit = 5
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Location of the skill index. Defaults to the discovery cache.
    #[serde(default)]
    pub index_path: Option<PathBuf>,

    /// Maximum number of ranked matches. 0 or absent means 5.
    #[serde(default)]
    pub match_limit: Option<usize>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TriageConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the skill index location.
    #[must_use]
    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = Some(path.into());
        self
    }

    /// Sets the ranking limit.
    #[must_use]
    pub fn with_match_limit(mut self, limit: usize) -> Self {
        self.match_limit = Some(limit);
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Returns the index path to load.
    ///
    /// Uses `index_path` if set, otherwise [`default_index_path`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no path is set and the user cache
    /// directory cannot be determined.
    pub fn effective_index_path(&self) -> Result<PathBuf, TriageError> {
        if let Some(ref path) = self.index_path {
            return Ok(path.clone());
        }

        default_index_path().ok_or_else(|| {
            TriageError::configuration(
                "index_path",
                "could not determine the user cache directory; set index_path or SKILL_TRIAGE_INDEX",
            )
        })
    }

    /// Returns the ranking limit, never 0.
    #[must_use]
    pub fn effective_match_limit(&self) -> usize {
        self.match_limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_MATCH_LIMIT)
    }
}

/// Location the discovery step writes the index to:
/// `~/.cache/skillrecommender/skill_index.json` on every platform.
#[must_use]
pub fn default_index_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".cache")
            .join(INDEX_CACHE_DIR)
            .join(INDEX_FILE_NAME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn default_config_is_empty() {
        let config = TriageConfig::default();
        assert!(config.index_path.is_none());
        assert!(config.match_limit.is_none());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn builder_pattern() {
        let config = TriageConfig::new()
            .with_index_path("/tmp/index.json")
            .with_match_limit(3)
            .with_logging(LoggingConfig::new().with_level(LogLevel::Debug));

        assert_eq!(
            config.effective_index_path().unwrap(),
            PathBuf::from("/tmp/index.json")
        );
        assert_eq!(config.effective_match_limit(), 3);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn zero_match_limit_means_default() {
        let config = TriageConfig::new().with_match_limit(0);
        assert_eq!(config.effective_match_limit(), DEFAULT_MATCH_LIMIT);
        assert_eq!(TriageConfig::new().effective_match_limit(), DEFAULT_MATCH_LIMIT);
    }

    #[test]
    fn default_index_path_points_at_discovery_cache() {
        // Depends on a home dir being resolvable, true on most systems
        if let (Some(path), Some(home)) = (default_index_path(), dirs::home_dir()) {
            assert_eq!(path, home.join(".cache/skillrecommender/skill_index.json"));
            assert_eq!(TriageConfig::new().effective_index_path().unwrap(), path);
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let config = TriageConfig::new()
            .with_index_path("/tmp/index.json")
            .with_match_limit(7);

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: TriageConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
