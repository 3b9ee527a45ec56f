//! Skill index loading.
//!
//! The index is a JSON document produced by the discovery step:
//!
//! ```json
//! {
//!   "version": "2.0.0",
//!   "generated_at": "2026-01-01T12:00:00",
//!   "skills": [{"name": "pdf-export", "domains": ["pdf"], "...": "..."}],
//!   "domains": {"pdf": ["pdf-export"]},
//!   "sources": {"custom": "/home/me/.claude/skills"},
//!   "total_count": 1
//! }
//! ```
//!
//! Only `skills[].{name,source,description,keywords,triggers,domains}` drive
//! triage. A missing or unparsable document is an error; individual bad
//! entries are skipped and reported through [`SkillIndex::warnings`].

use super::types::{RawSkillRecord, SkillRecord};
use crate::error::TriageError;
use crate::triage::DomainVocabulary;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level shape of the index document.
#[derive(Debug, Default, Deserialize)]
struct IndexDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    generated_at: Option<String>,
    #[serde(default)]
    skills: Option<Vec<Value>>,
    #[serde(default)]
    domains: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    sources: BTreeMap<String, String>,
    #[serde(default)]
    total_count: Option<usize>,
}

/// Read-only catalog of skills handed to the triage engine.
#[derive(Debug, Clone, Default)]
pub struct SkillIndex {
    skills: Vec<SkillRecord>,
    domains: BTreeMap<String, Vec<String>>,
    sources: BTreeMap<String, String>,
    version: Option<String>,
    generated_at: Option<String>,
    declared_total: Option<usize>,
    warnings: Vec<String>,
}

impl SkillIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from already validated records.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = SkillRecord>) -> Self {
        let index = Self {
            skills: records.into_iter().collect(),
            ..Self::default()
        };
        index.report_unknown_domains();
        index
    }

    /// Loads an index file.
    ///
    /// # Errors
    ///
    /// Returns a catalog error if the file is missing, cannot be read, or is
    /// not a valid index document.
    pub fn from_path(path: &Path) -> Result<Self, TriageError> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TriageError::catalog_not_found(path),
            _ => TriageError::catalog_unreadable(path, e.to_string()),
        })?;

        let index = Self::parse(&contents).map_err(|reason| {
            TriageError::catalog_malformed(Some(path.to_path_buf()), reason)
        })?;

        tracing::info!(
            path = %path.display(),
            skills = index.len(),
            skipped = index.warnings.len(),
            "Loaded skill index"
        );
        Ok(index)
    }

    /// Parses an index document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a catalog error if the JSON is invalid or its top level is
    /// not an object.
    pub fn from_json_str(json: &str) -> Result<Self, TriageError> {
        Self::parse(json).map_err(|reason| TriageError::catalog_malformed(None, reason))
    }

    fn parse(json: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(json).map_err(|e| format!("invalid JSON: {e}"))?;
        if !value.is_object() {
            return Err("top level is not a JSON object".to_string());
        }

        let document: IndexDocument =
            serde_json::from_value(value).map_err(|e| format!("unexpected structure: {e}"))?;

        let mut warnings = Vec::new();
        let entries = match document.skills {
            Some(entries) => entries,
            None => {
                warnings.push("index has no 'skills' list".to_string());
                Vec::new()
            }
        };

        let mut skills = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let record = serde_json::from_value::<RawSkillRecord>(entry)
                .map_err(|e| e.to_string())
                .and_then(SkillRecord::try_from);

            match record {
                Ok(skill) => skills.push(skill),
                Err(reason) => {
                    tracing::warn!(position, reason = %reason, "Skipping skill entry");
                    warnings.push(format!("skipped skill entry #{position}: {reason}"));
                }
            }
        }

        let index = Self {
            skills,
            domains: document.domains,
            sources: document.sources,
            version: document.version,
            generated_at: document.generated_at,
            declared_total: document.total_count,
            warnings,
        };
        index.report_unknown_domains();
        Ok(index)
    }

    /// Logs domain tags that the vocabulary does not define; such tags can
    /// never earn domain-based boosts.
    fn report_unknown_domains(&self) {
        let vocabulary = DomainVocabulary::standard();
        for skill in &self.skills {
            for domain in skill.domains.iter().filter(|d| !vocabulary.contains(d)) {
                tracing::debug!(skill = %skill.name, domain = %domain, "Domain not in vocabulary");
            }
        }
    }

    /// Returns the number of skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Returns true if the index has no skills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Returns all skills in index order.
    #[must_use]
    pub fn skills(&self) -> &[SkillRecord] {
        &self.skills
    }

    /// Returns an iterator over all skills in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SkillRecord> {
        self.skills.iter()
    }

    /// Gets the first skill with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SkillRecord> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    /// Returns the skills tagged with `domain`.
    ///
    /// Uses the document's domain map when it lists the domain, otherwise
    /// the records' own domain tags.
    #[must_use]
    pub fn skills_in_domain(&self, domain: &str) -> Vec<&SkillRecord> {
        match self.domains.get(domain) {
            Some(names) => names.iter().filter_map(|name| self.get(name)).collect(),
            None => self
                .skills
                .iter()
                .filter(|skill| skill.has_domain(domain))
                .collect(),
        }
    }

    /// Index format version, if recorded.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Generation timestamp, if recorded.
    #[must_use]
    pub fn generated_at(&self) -> Option<&str> {
        self.generated_at.as_deref()
    }

    /// Skill sources by name.
    #[must_use]
    pub fn sources(&self) -> &BTreeMap<String, String> {
        &self.sources
    }

    /// The `total_count` recorded in the document, if any.
    #[must_use]
    pub fn declared_total(&self) -> Option<usize> {
        self.declared_total
    }

    /// Problems found while loading (skipped entries and the like).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl<'a> IntoIterator for &'a SkillIndex {
    type Item = &'a SkillRecord;
    type IntoIter = std::slice::Iter<'a, SkillRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriageErrorKind;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "version": "2.0.0",
        "generated_at": "2026-01-01T12:00:00",
        "skills": [
            {
                "name": "pdf-export",
                "source": "custom",
                "description": "Exports documents to PDF",
                "keywords": ["pdf", "export"],
                "triggers": [],
                "domains": ["pdf"]
            },
            {
                "name": "bug-hunter",
                "description": "Track down crashes",
                "domains": ["debugging"]
            },
            "not an object",
            {"description": "nameless"}
        ],
        "domains": {"pdf": ["pdf-export"]},
        "sources": {"custom": "/skills"},
        "total_count": 4
    }"#;

    #[test]
    fn parses_valid_entries_and_skips_bad_ones() {
        let index = SkillIndex::from_json_str(SAMPLE).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.warnings().len(), 2);
        assert!(index.warnings()[0].contains("#2"));
        assert!(index.warnings()[1].contains("missing 'name'"));
        assert_eq!(index.version(), Some("2.0.0"));
        assert_eq!(index.generated_at(), Some("2026-01-01T12:00:00"));
        assert_eq!(index.declared_total(), Some(4));
        assert_eq!(index.sources().get("custom").map(String::as_str), Some("/skills"));
    }

    #[test]
    fn lookup_by_name_and_domain() {
        let index = SkillIndex::from_json_str(SAMPLE).unwrap();

        let skill = index.get("bug-hunter").unwrap();
        assert!(skill.keywords.is_empty());
        assert!(index.get("missing").is_none());

        let pdf: Vec<_> = index
            .skills_in_domain("pdf")
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(pdf, vec!["pdf-export"]);
        let debugging = index.skills_in_domain("debugging");
        assert_eq!(debugging.len(), 1);
        assert!(index.skills_in_domain("testing").is_empty());
    }

    #[test]
    fn missing_skills_list_is_empty_with_warning() {
        let index = SkillIndex::from_json_str(r#"{"version": "2.0.0"}"#).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.warnings().len(), 1);
    }

    #[test]
    fn invalid_documents_are_malformed() {
        let err = SkillIndex::from_json_str("{not json").unwrap_err();
        assert!(err.is_catalog_unavailable());
        assert!(err.to_string().contains("invalid JSON"));

        let err = SkillIndex::from_json_str("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));

        let err = SkillIndex::from_json_str(r#"{"skills": 5}"#).unwrap_err();
        assert!(err.is_catalog_unavailable());
    }

    #[test]
    fn from_path_loads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skill_index.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{SAMPLE}").unwrap();

        let index = SkillIndex::from_path(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.iter().count(), 2);
        assert_eq!((&index).into_iter().next().unwrap().name, "pdf-export");
    }

    #[test]
    fn from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let err = SkillIndex::from_path(&path).unwrap_err();
        assert!(err.is_catalog_unavailable());
        assert!(matches!(err.kind, TriageErrorKind::CatalogNotFound { .. }));
        assert_eq!(err.catalog_path(), Some(&path));
    }

    #[test]
    fn from_path_existing_but_unreadable() {
        let dir = TempDir::new().unwrap();

        // A directory exists but cannot be read as a file
        let err = SkillIndex::from_path(dir.path()).unwrap_err();
        assert!(err.is_catalog_unavailable());
        assert!(matches!(err.kind, TriageErrorKind::CatalogUnreadable { .. }));
        assert_eq!(err.catalog_path(), Some(&dir.path().to_path_buf()));
    }

    #[test]
    fn from_path_malformed_file_keeps_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "nope").unwrap();

        let err = SkillIndex::from_path(&path).unwrap_err();
        assert_eq!(err.catalog_path(), Some(&path));
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn from_records_builds_index() {
        let index = SkillIndex::from_records([
            SkillRecord::new("one").with_domains(["api"]),
            SkillRecord::new("two"),
        ]);
        assert_eq!(index.len(), 2);
        assert!(index.warnings().is_empty());
        assert_eq!(index.skills_in_domain("api").len(), 1);
        assert!(SkillIndex::new().is_empty());
    }
}
