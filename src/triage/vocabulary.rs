//! Domain vocabulary shared by the detector, the scorer and the catalog loader.
//!
//! Domain names here must be the same strings that catalogs attach to
//! `SkillRecord::domains`; a domain the vocabulary does not know can never
//! earn a domain-based boost.

/// A fixed mapping from domain name to ordered synonym terms.
///
/// Entry order is significant: it is the tie-break order for domain hits
/// that matched the same number of terms.
#[derive(Debug, Clone, Copy)]
pub struct DomainVocabulary {
    entries: &'static [(&'static str, &'static [&'static str])],
}

/// The process-wide vocabulary.
static STANDARD: DomainVocabulary = DomainVocabulary::new(&[
    // Document formats
    (
        "spreadsheet",
        &[
            "excel", "xlsx", "xls", "csv", "workbook", "tabular", "data table", "cells",
            "rows columns",
        ],
    ),
    (
        "document",
        &["word", "docx", "doc", "text document", "write document", "report"],
    ),
    (
        "presentation",
        &["powerpoint", "pptx", "slides", "deck", "slide deck", "keynote", "pitch"],
    ),
    ("pdf", &["pdf", "export pdf", "portable document"]),
    // Development
    (
        "debugging",
        &[
            "debug", "error", "exception", "stack trace", "traceback", "crash", "fix bug",
            "breakpoint", "investigate",
        ],
    ),
    (
        "testing",
        &[
            "test", "unit test", "integration test", "e2e", "coverage", "spec", "tdd", "jest",
            "vitest", "pytest", "mocha",
        ],
    ),
    (
        "security",
        &[
            "security", "vulnerability", "owasp", "audit", "secure", "penetration", "pentest",
            "xss", "injection",
        ],
    ),
    (
        "code_quality",
        &[
            "review", "code review", "pr review", "pull request", "refactor", "clean code",
            "code smell", "lint",
        ],
    ),
    (
        "database",
        &[
            "database", "db", "schema", "migration", "sql", "postgres", "mysql", "mongodb",
            "data model", "orm",
        ],
    ),
    (
        "api",
        &["api", "rest", "graphql", "endpoint", "openapi", "swagger", "restful", "http"],
    ),
    (
        "frontend",
        &[
            "ui", "ux", "frontend", "react", "vue", "angular", "css", "styling", "component",
            "user interface",
        ],
    ),
    (
        "accessibility",
        &["accessibility", "a11y", "wcag", "screen reader", "aria", "keyboard navigation"],
    ),
    (
        "performance",
        &["performance", "optimize", "slow", "speed", "fast", "bottleneck", "profiling", "cache"],
    ),
    (
        "authentication",
        &[
            "auth", "login", "authentication", "oauth", "jwt", "session", "sign in", "sign up",
            "password",
        ],
    ),
    (
        "deployment",
        &[
            "deploy", "deployment", "production", "release", "ship", "hosting", "ci", "cd",
            "pipeline",
        ],
    ),
    (
        "devops",
        &["docker", "kubernetes", "k8s", "container", "helm", "terraform", "infrastructure"],
    ),
    (
        "documentation",
        &["documentation", "docs", "readme", "changelog", "api docs", "jsdoc"],
    ),
    (
        "architecture",
        &["architecture", "system design", "design pattern", "microservices", "monolith"],
    ),
    (
        "workflow",
        &[
            "flowchart", "diagram", "workflow", "process", "swimlane", "sequence diagram", "uml",
        ],
    ),
    // AI/ML
    (
        "ai_ml",
        &["ai", "ml", "machine learning", "llm", "rag", "embedding", "langchain", "prompt", "model"],
    ),
    // Creative
    ("visual", &["visual", "image", "graphic", "art", "canvas", "design"]),
]);

impl DomainVocabulary {
    /// Creates a vocabulary over the given `(domain, terms)` entries.
    ///
    /// Terms are matched against lower-cased text, so they must be lower-case.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    /// Returns the shared, read-only vocabulary used by the triage engine.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Iterates over `(domain, terms)` in vocabulary order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }

    /// Iterates over the domain names in vocabulary order.
    pub fn domains(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(domain, _)| *domain)
    }

    /// Returns the synonym terms for a domain.
    #[must_use]
    pub fn terms(&self, domain: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == domain)
            .map(|(_, terms)| *terms)
    }

    /// Returns true if the vocabulary defines this domain.
    #[must_use]
    pub fn contains(&self, domain: &str) -> bool {
        self.terms(domain).is_some()
    }

    /// Returns the number of domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no domains are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_vocabulary_has_expected_domains() {
        let vocabulary = DomainVocabulary::standard();
        assert_eq!(vocabulary.len(), 21);
        for domain in ["debugging", "code_quality", "api", "documentation", "pdf"] {
            assert!(vocabulary.contains(domain), "missing domain {domain}");
        }
        assert!(!vocabulary.contains("general"));
    }

    #[test]
    fn domain_names_are_unique() {
        let vocabulary = DomainVocabulary::standard();
        let unique: HashSet<_> = vocabulary.domains().collect();
        assert_eq!(unique.len(), vocabulary.len());
    }

    #[test]
    fn terms_are_lowercase_and_non_empty() {
        for (domain, terms) in DomainVocabulary::standard().entries() {
            assert!(!terms.is_empty(), "{domain} has no terms");
            for term in terms {
                assert!(!term.is_empty());
                assert_eq!(*term, term.to_lowercase(), "{domain}: {term}");
            }
        }
    }

    #[test]
    fn terms_lookup() {
        let vocabulary = DomainVocabulary::standard();
        assert_eq!(
            vocabulary.terms("pdf"),
            Some(&["pdf", "export pdf", "portable document"][..])
        );
        assert!(vocabulary.terms("unknown").is_none());
    }

    #[test]
    fn custom_vocabulary() {
        static ENTRIES: &[(&str, &[&str])] = &[("music", &["song", "melody"])];
        let vocabulary = DomainVocabulary::new(ENTRIES);
        assert_eq!(vocabulary.len(), 1);
        assert!(vocabulary.contains("music"));
        assert!(!vocabulary.is_empty());
    }
}
