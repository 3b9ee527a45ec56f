//! Configuration file loading.
//!
//! This module handles loading skill-triage configuration from TOML files
//! at XDG-compliant locations.

use crate::config::types::TriageConfig;
use crate::error::TriageError;
use std::path::{Path, PathBuf};

/// Default configuration file name for project-local config.
const LOCAL_CONFIG_NAME: &str = "skill-triage.toml";

/// Default configuration file name within XDG config directory.
const XDG_CONFIG_NAME: &str = "config.toml";

/// Application name for XDG directory lookup.
const APP_NAME: &str = "skill-triage";

/// Loads configuration from the default search paths.
///
/// Search order:
/// 1. `./skill-triage.toml` (project-local)
/// 2. `~/.config/skill-triage/config.toml` (XDG config)
///
/// Returns the default configuration if no config file is found.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed.
///
/// # Example
///
/// ```rust,ignore
/// use skill_triage::config::load;
///
/// let config = load()?;
/// println!("index: {}", config.effective_index_path()?.display());
/// ```
pub fn load() -> Result<TriageConfig, TriageError> {
    // Try project-local config first
    let local_path = PathBuf::from(LOCAL_CONFIG_NAME);
    if local_path.exists() {
        return from_path(&local_path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let xdg_path = config_dir.join(APP_NAME).join(XDG_CONFIG_NAME);
        if xdg_path.exists() {
            return from_path(&xdg_path);
        }
    }

    Ok(TriageConfig::default())
}

/// Loads configuration from a specific file path.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file contains invalid TOML
/// - The TOML doesn't match the expected schema
pub fn from_path(path: &Path) -> Result<TriageConfig, TriageError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        TriageError::configuration(
            "config_file",
            format!("failed to read '{}': {}", path.display(), e),
        )
    })?;

    from_str(&contents).map_err(|e| {
        TriageError::configuration(
            "config_file",
            format!("failed to parse '{}': {}", path.display(), e),
        )
    })
}

/// Parses configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or doesn't match the schema.
///
/// # Example
///
/// ```rust,ignore
/// use skill_triage::config::from_str;
///
/// let config = from_str(r#"
/// match_limit = 3
///
/// [logging]
/// level = "debug"
/// "#)?;
/// ```
pub fn from_str(toml_str: &str) -> Result<TriageConfig, TriageError> {
    toml::from_str(toml_str)
        .map_err(|e| TriageError::configuration("config", format!("invalid TOML: {e}")))
}

/// Returns the paths that would be searched for configuration files.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join(XDG_CONFIG_NAME));
    }

    paths
}

/// Returns the path to the XDG config directory for skill-triage.
///
/// This is `~/.config/skill-triage` on most systems.
#[must_use]
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn load_does_not_fail_without_config() {
        // The user might have a config file, so only check that loading works
        let _ = load().unwrap();
    }

    #[test]
    fn from_str_parses_full_config() {
        let toml = r#"
index_path = "/data/skill_index.json"
match_limit = 3

[logging]
enabled = true
level = "debug"
log_dir = "/tmp/skill-triage-logs"
        "#;

        let config = from_str(toml).unwrap();

        assert_eq!(
            config.index_path,
            Some(PathBuf::from("/data/skill_index.json"))
        );
        assert_eq!(config.effective_match_limit(), 3);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(
            config.logging.log_dir,
            Some(PathBuf::from("/tmp/skill-triage-logs"))
        );
    }

    #[test]
    fn from_str_accepts_empty_document() {
        let config = from_str("").unwrap();
        assert_eq!(config, TriageConfig::default());
    }

    #[test]
    fn from_str_partial_logging_section() {
        let config = from_str("[logging]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert!(config.logging.enabled);
    }

    #[test]
    fn from_str_error_on_invalid_toml() {
        let err = from_str("this is not valid toml [[[").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn from_str_error_on_wrong_type() {
        let err = from_str("match_limit = \"many\"").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn from_path_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "match_limit = 2").unwrap();

        let config = from_path(&config_path).unwrap();
        assert_eq!(config.match_limit, Some(2));
    }

    #[test]
    fn from_path_error_on_missing_file() {
        let err = from_path(Path::new("/nonexistent/path/config.toml")).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn search_paths_includes_local() {
        let paths = search_paths();

        assert!(paths
            .iter()
            .any(|p| p.file_name() == Some(std::ffi::OsStr::new(LOCAL_CONFIG_NAME))));
    }

    #[test]
    fn xdg_config_dir_returns_path() {
        if let Some(dir) = xdg_config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
