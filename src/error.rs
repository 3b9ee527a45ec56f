//! Custom error types for skill-triage.
//!
//! Each error type implements Display, Debug, Clone, PartialEq, Eq, and std::error::Error.
//!
//! Ambiguous input is not an error: it is a regular triage outcome
//! (`Action::Clarify`). Malformed catalog records are not errors either; they
//! are skipped or defaulted and reported as index warnings.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while preparing or running a triage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageError {
    /// The specific error that occurred
    pub kind: TriageErrorKind,
}

/// Specific triage error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageErrorKind {
    /// The skill index file does not exist
    CatalogNotFound {
        /// Path that was looked up
        path: PathBuf,
    },
    /// The skill index file exists but could not be read
    CatalogUnreadable {
        /// Path of the index file
        path: PathBuf,
        /// Reason for the failure
        reason: String,
    },
    /// The skill index is not a valid index document
    CatalogMalformed {
        /// Path of the index file, if it was loaded from disk
        path: Option<PathBuf>,
        /// What was wrong with the document
        reason: String,
    },
    /// Configuration error
    Configuration {
        /// Description of what was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },
}

impl TriageError {
    /// Creates a new TriageError with the given kind.
    #[must_use]
    pub fn new(kind: TriageErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a catalog not found error.
    #[must_use]
    pub fn catalog_not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(TriageErrorKind::CatalogNotFound { path: path.into() })
    }

    /// Creates a catalog unreadable error.
    #[must_use]
    pub fn catalog_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::new(TriageErrorKind::CatalogUnreadable {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// Creates a catalog malformed error.
    #[must_use]
    pub fn catalog_malformed(path: Option<PathBuf>, reason: impl Into<String>) -> Self {
        Self::new(TriageErrorKind::CatalogMalformed {
            path,
            reason: reason.into(),
        })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(TriageErrorKind::Configuration {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if the skill catalog could not be used.
    ///
    /// Triage never proceeds without a catalog, so callers map this to
    /// their "catalog unavailable" failure path.
    #[must_use]
    pub fn is_catalog_unavailable(&self) -> bool {
        matches!(
            self.kind,
            TriageErrorKind::CatalogNotFound { .. }
                | TriageErrorKind::CatalogUnreadable { .. }
                | TriageErrorKind::CatalogMalformed { .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, TriageErrorKind::Configuration { .. })
    }

    /// Returns the catalog path involved in this error, if any.
    #[must_use]
    pub fn catalog_path(&self) -> Option<&PathBuf> {
        match &self.kind {
            TriageErrorKind::CatalogNotFound { path }
            | TriageErrorKind::CatalogUnreadable { path, .. } => Some(path),
            TriageErrorKind::CatalogMalformed { path, .. } => path.as_ref(),
            TriageErrorKind::Configuration { .. } => None,
        }
    }
}

impl fmt::Display for TriageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TriageErrorKind::CatalogNotFound { path } => {
                write!(
                    f,
                    "skill index not found at '{}'; run skill discovery first",
                    path.display()
                )
            }
            TriageErrorKind::CatalogUnreadable { path, reason } => {
                write!(
                    f,
                    "failed to read skill index '{}': {}; check permissions",
                    path.display(),
                    reason
                )
            }
            TriageErrorKind::CatalogMalformed { path, reason } => match path {
                Some(path) => write!(
                    f,
                    "skill index '{}' is malformed: {}; regenerate the index",
                    path.display(),
                    reason
                ),
                None => write!(f, "skill index is malformed: {}", reason),
            },
            TriageErrorKind::Configuration { field, reason } => {
                write!(f, "configuration error for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TriageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_not_found_display() {
        let error = TriageError::catalog_not_found("/tmp/skill_index.json");
        let message = error.to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("/tmp/skill_index.json"));
        assert!(message.contains("discovery"));
    }

    #[test]
    fn catalog_unreadable_display() {
        let error = TriageError::catalog_unreadable("/tmp/index.json", "permission denied");
        let message = error.to_string();
        assert!(message.contains("/tmp/index.json"));
        assert!(message.contains("permission denied"));
    }

    #[test]
    fn catalog_malformed_display_with_and_without_path() {
        let error = TriageError::catalog_malformed(
            Some(PathBuf::from("/tmp/index.json")),
            "expected value at line 1",
        );
        assert!(error.to_string().contains("/tmp/index.json"));
        assert!(error.to_string().contains("expected value"));

        let error = TriageError::catalog_malformed(None, "top level is not an object");
        assert_eq!(
            error.to_string(),
            "skill index is malformed: top level is not an object"
        );
    }

    #[test]
    fn configuration_display() {
        let error = TriageError::configuration("match_limit", "must be a number");
        assert_eq!(
            error.to_string(),
            "configuration error for 'match_limit': must be a number"
        );
    }

    #[test]
    fn catalog_errors_are_catalog_unavailable() {
        assert!(TriageError::catalog_not_found("/a").is_catalog_unavailable());
        assert!(TriageError::catalog_unreadable("/a", "x").is_catalog_unavailable());
        assert!(TriageError::catalog_malformed(None, "x").is_catalog_unavailable());
        assert!(!TriageError::configuration("a", "b").is_catalog_unavailable());
        assert!(TriageError::configuration("a", "b").is_configuration());
    }

    #[test]
    fn catalog_path_is_exposed() {
        let error = TriageError::catalog_not_found("/a/b.json");
        assert_eq!(error.catalog_path(), Some(&PathBuf::from("/a/b.json")));
        assert!(TriageError::catalog_malformed(None, "x").catalog_path().is_none());
        assert!(TriageError::configuration("a", "b").catalog_path().is_none());
    }

    #[test]
    fn errors_are_clone_and_eq() {
        let error1 = TriageError::catalog_not_found("/a");
        let error2 = error1.clone();
        assert_eq!(error1, error2);
        assert_ne!(error1, TriageError::catalog_not_found("/b"));
    }
}
