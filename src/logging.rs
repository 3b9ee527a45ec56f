//! Logging setup for skill-triage.
//!
//! Logs go to stderr by default so they never mix with report output on
//! stdout. When a log directory is configured they go to a daily rolling
//! file instead. `RUST_LOG` overrides the configured level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Configuration for logging.
///
/// # Example
///
/// ```rust
/// use skill_triage::logging::{LogLevel, LoggingConfig};
///
/// // Warnings and errors on stderr
/// let config = LoggingConfig::default();
///
/// // Debug output to ~/logs/skill-triage.log.YYYY-MM-DD
/// let config = LoggingConfig::new()
///     .with_log_dir("/home/me/logs")
///     .with_level(LogLevel::Debug);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether logging is enabled.
    pub enabled: bool,
    /// The application name used for log file naming.
    /// Log files are named `{app_name}.log` with daily rotation.
    pub app_name: String,
    /// Log directory. If None, logs go to stderr.
    pub log_dir: Option<PathBuf>,
    /// Log level filter.
    pub level: LogLevel,
}

impl LoggingConfig {
    /// Creates a new LoggingConfig with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a disabled logging configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Sets the application name for log file naming.
    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Sets a log directory, switching output from stderr to files.
    #[must_use]
    pub fn with_log_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(path.into());
        self
    }

    /// Sets the log level filter.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            app_name: "skill-triage".to_string(),
            log_dir: None,
            level: LogLevel::default(),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level - most verbose.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warn level - default.
    #[default]
    Warn,
    /// Error level - least verbose.
    Error,
}

impl LogLevel {
    /// Converts to tracing_subscriber LevelFilter.
    #[must_use]
    pub fn to_filter(self) -> tracing_subscriber::filter::LevelFilter {
        match self {
            Self::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            Self::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            Self::Info => tracing_subscriber::filter::LevelFilter::INFO,
            Self::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            Self::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

/// Guard that must be held to keep logging active.
///
/// When dropped, flushes pending logs.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

impl fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingGuard").finish_non_exhaustive()
    }
}

/// Keeps the guard alive for the lifetime of the process.
static LOGGING_GUARD: std::sync::OnceLock<LoggingGuard> = std::sync::OnceLock::new();

/// Errors that can occur during logging initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingError {
    /// The specific error that occurred.
    pub kind: LoggingErrorKind,
}

/// Specific logging error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingErrorKind {
    /// Failed to create log directory.
    CreateDirFailed {
        /// The path that could not be created.
        path: PathBuf,
        /// The reason for failure.
        reason: String,
    },
    /// Subscriber initialization failed.
    SubscriberInitFailed {
        /// The reason for failure.
        reason: String,
    },
}

impl LoggingError {
    /// Creates a new LoggingError with the given kind.
    #[must_use]
    pub fn new(kind: LoggingErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an error for failed directory creation.
    #[must_use]
    pub fn create_dir_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::new(LoggingErrorKind::CreateDirFailed {
            path,
            reason: reason.into(),
        })
    }

    /// Creates an error for subscriber initialization failure.
    #[must_use]
    pub fn subscriber_init_failed(reason: impl Into<String>) -> Self {
        Self::new(LoggingErrorKind::SubscriberInitFailed {
            reason: reason.into(),
        })
    }
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LoggingErrorKind::CreateDirFailed { path, reason } => {
                write!(
                    f,
                    "failed to create log directory '{}': {}; check permissions",
                    path.display(),
                    reason
                )
            }
            LoggingErrorKind::SubscriberInitFailed { reason } => {
                write!(
                    f,
                    "failed to initialize tracing subscriber: {}; \
                     a subscriber may already be set",
                    reason
                )
            }
        }
    }
}

impl std::error::Error for LoggingError {}

/// Builds the level filter: `RUST_LOG` if set, otherwise the configured level.
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(config.level.to_filter().into())
        .from_env_lossy()
}

/// Initializes logging with the given configuration.
///
/// Returns a guard that must be held to keep logging active.
///
/// # Returns
///
/// `Ok(Some(LoggingGuard))` if logging was initialized successfully.
/// `Ok(None)` if logging is disabled in config.
/// `Err(LoggingError)` if initialization failed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<LoggingGuard>, LoggingError> {
    if !config.enabled {
        return Ok(None);
    }

    let (writer, guard) = match &config.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .map_err(|e| LoggingError::create_dir_failed(log_dir.clone(), e.to_string()))?;
            let file_appender =
                tracing_appender::rolling::daily(log_dir, format!("{}.log", config.app_name));
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .with(build_filter(config))
        .try_init();

    match result {
        Ok(()) => Ok(Some(LoggingGuard { _guard: guard })),
        Err(e) => Err(LoggingError::subscriber_init_failed(e.to_string())),
    }
}

/// Initializes logging and stores the guard globally.
///
/// # Returns
///
/// `Ok(true)` if logging was initialized successfully.
/// `Ok(false)` if logging is disabled or already initialized.
/// `Err(LoggingError)` if initialization failed.
pub fn init_and_store_logging(config: &LoggingConfig) -> Result<bool, LoggingError> {
    if LOGGING_GUARD.get().is_some() {
        return Ok(false);
    }

    match init_logging(config)? {
        Some(guard) => {
            // A concurrent caller may have stored one first; either guard works.
            let _ = LOGGING_GUARD.set(guard);
            Ok(true)
        }
        None => Ok(false),
    }
}
