//! The record returned by a triage call.

use super::classifier::{InputCategory, Signals};
use super::decision::{Action, ActionPayload, Decision, DecisionDetails};
use super::ranker::MatchResult;
use serde::Serialize;

/// Result of triaging one query against one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageOutcome {
    /// Chosen action
    pub action: Action,
    /// Decision details, including the reason and action payload
    pub details: DecisionDetails,
    /// Category the input was classified into
    #[serde(rename = "input_category")]
    pub category: InputCategory,
    /// Signals extracted during classification
    pub signals: Signals,
    /// Best matches, best first
    pub top_matches: Vec<MatchResult>,
    /// Number of skills in the catalog
    pub total_skills_scanned: usize,
}

impl TriageOutcome {
    pub(crate) fn new(
        decision: Decision,
        signals: Signals,
        top_matches: Vec<MatchResult>,
        total_skills_scanned: usize,
    ) -> Self {
        Self {
            action: decision.action(),
            category: decision.details.category,
            details: decision.details,
            signals,
            top_matches,
            total_skills_scanned,
        }
    }

    /// Justification of the chosen action.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.details.reason
    }

    /// Action-specific payload.
    #[must_use]
    pub fn payload(&self) -> &ActionPayload {
        &self.details.payload
    }

    /// The best match, if any skill scored above zero.
    #[must_use]
    pub fn top_match(&self) -> Option<&MatchResult> {
        self.top_matches.first()
    }
}
