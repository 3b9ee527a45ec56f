//! The triage engine.
//!
//! A triage call classifies the input, ranks the catalog against it and
//! runs the decision table for the input's category:
//!
//! ```text
//! query ──► classify ──► (category, signals)
//!   │                          │
//!   └──────► rank(catalog) ────┴──► decide ──► TriageOutcome
//! ```
//!
//! Everything here is synchronous and free of I/O except
//! [`SkillTriage`], which loads the catalog before running the engine.
//!
//! # Example
//!
//! ```rust
//! use skill_triage::skills::{SkillIndex, SkillRecord};
//! use skill_triage::triage::{triage, Action};
//!
//! let index = SkillIndex::from_records([SkillRecord::new("pdf-export")
//!     .with_domains(["pdf"])
//!     .with_keywords(["pdf", "export"])
//!     .with_description("Exports documents to PDF")]);
//!
//! let outcome = triage("export this report as a pdf", &index);
//! assert_ne!(outcome.action, Action::CreateNew);
//! ```

mod classifier;
mod decision;
mod domains;
mod outcome;
mod ranker;
mod rules;
mod scorer;
mod vocabulary;

pub use classifier::{classify, InputCategory, Signals};
pub use decision::{decide, Action, ActionPayload, Decision, DecisionContext, DecisionDetails};
pub use domains::{detect_domains, DomainHit};
pub use outcome::TriageOutcome;
pub use ranker::{rank, MatchResult, DEFAULT_MATCH_LIMIT};
pub use scorer::{score, QueryProfile, ScoreCard, MAX_SCORE};
pub use vocabulary::DomainVocabulary;

use crate::config::TriageConfig;
use crate::error::TriageError;
use crate::skills::SkillIndex;

/// Matches reported in an outcome, whatever the ranking limit.
const REPORTED_MATCHES: usize = 5;

/// Triages `query` against `index`, keeping the default number of matches.
#[must_use]
pub fn triage(query: &str, index: &SkillIndex) -> TriageOutcome {
    triage_with_limit(query, index, DEFAULT_MATCH_LIMIT)
}

/// Triages `query` against `index`, ranking at most `limit` matches.
///
/// The decision sees all ranked matches; the outcome reports the first
/// five.
#[must_use]
pub fn triage_with_limit(query: &str, index: &SkillIndex, limit: usize) -> TriageOutcome {
    let (category, signals) = classify(query);
    let matches = rank(query, index.skills(), &signals, limit);
    let decision = decide(category, &signals, &matches, query);

    tracing::debug!(
        category = %category,
        action = %decision.action(),
        matches = matches.len(),
        scanned = index.len(),
        "Triage complete"
    );

    let top_matches = matches.into_iter().take(REPORTED_MATCHES).collect();
    TriageOutcome::new(decision, signals, top_matches, index.len())
}

/// Triage bound to a configuration: loads the catalog, then triages.
///
/// # Example
///
/// ```rust,ignore
/// use skill_triage::config::TriageConfig;
/// use skill_triage::triage::SkillTriage;
///
/// let triage = SkillTriage::new(TriageConfig::new().with_index_path("skill_index.json"));
/// let outcome = triage.run("do I have a skill for testing?")?;
/// println!("{}", outcome.action);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SkillTriage {
    config: TriageConfig,
}

impl SkillTriage {
    /// Creates a triage runner for the given configuration.
    #[must_use]
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Loads the catalog from the configured index path.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no index path can be resolved, or a
    /// catalog error if the index is missing or malformed.
    pub fn load_index(&self) -> Result<SkillIndex, TriageError> {
        let path = self.config.effective_index_path()?;
        SkillIndex::from_path(&path)
    }

    /// Loads the catalog and triages `query` against it.
    ///
    /// # Errors
    ///
    /// Fails without triaging when the catalog is unavailable.
    pub fn run(&self, query: &str) -> Result<TriageOutcome, TriageError> {
        let index = self.load_index()?;
        Ok(self.run_with_index(query, &index))
    }

    /// Triages `query` against an already loaded catalog, using the
    /// configured match limit.
    #[must_use]
    pub fn run_with_index(&self, query: &str, index: &SkillIndex) -> TriageOutcome {
        triage_with_limit(query, index, self.config.effective_match_limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillRecord;
    use tempfile::TempDir;

    #[test]
    fn empty_catalog_still_decides() {
        let outcome = triage("create a skill for database migrations", &SkillIndex::new());

        assert_eq!(outcome.category, InputCategory::ExplicitCreate);
        assert_eq!(outcome.action, Action::CreateNew);
        assert_eq!(outcome.total_skills_scanned, 0);
        assert!(outcome.top_matches.is_empty());
    }

    #[test]
    fn outcome_action_matches_payload() {
        let index = SkillIndex::from_records([SkillRecord::new("pdf-export")
            .with_domains(["pdf"])
            .with_keywords(["pdf", "export"])
            .with_description("Exports documents to PDF")]);

        let outcome = triage("export this report as a pdf", &index);
        assert_eq!(outcome.action, outcome.payload().action());
        assert_eq!(outcome.top_match().map(|m| m.score), Some(96));
        assert!(!outcome.reason().is_empty());
    }

    #[test]
    fn reported_matches_are_capped() {
        let index = SkillIndex::from_records(
            (0..8).map(|i| SkillRecord::new(format!("pdf-tool-{i}")).with_domains(["pdf"])),
        );

        let outcome = triage_with_limit("convert this pdf", &index, 8);
        assert_eq!(outcome.details.match_count, 8);
        assert_eq!(outcome.top_matches.len(), REPORTED_MATCHES);
    }

    #[test]
    fn skill_triage_reports_missing_catalog() {
        let dir = TempDir::new().unwrap();
        let config = TriageConfig::new().with_index_path(dir.path().join("missing.json"));

        let err = SkillTriage::new(config).run("anything").unwrap_err();
        assert!(err.is_catalog_unavailable());
    }

    #[test]
    fn skill_triage_runs_against_index_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skill_index.json");
        std::fs::write(
            &path,
            r#"{"skills": [{"name": "pdf-export", "domains": ["pdf"], "keywords": ["pdf", "export"]}]}"#,
        )
        .unwrap();

        let runner = SkillTriage::new(TriageConfig::new().with_index_path(&path));
        let outcome = runner.run("export this report as a pdf").unwrap();

        assert_eq!(outcome.total_skills_scanned, 1);
        assert_eq!(outcome.top_matches[0].name, "pdf-export");
        assert_eq!(runner.config().effective_match_limit(), DEFAULT_MATCH_LIMIT);
    }
}
