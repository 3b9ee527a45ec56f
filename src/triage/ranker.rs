//! Ranking of the whole catalog against a query.

use super::classifier::Signals;
use super::scorer::{QueryProfile, ScoreCard, MAX_SCORE};
use crate::skills::SkillRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of matches kept when no limit is configured.
pub const DEFAULT_MATCH_LIMIT: usize = 5;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// One scored skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Skill name
    pub name: String,
    /// Final score in `1..=100`
    pub score: u32,
    /// Scoring reasons followed by context boost reasons
    pub reasons: Vec<String>,
    /// Source the skill came from
    pub source: String,
    /// Description, cut to 100 characters
    pub description: String,
    /// Domain tags of the skill
    pub domains: BTreeSet<String>,
}

impl MatchResult {
    /// Returns true if the matched skill is tagged with `domain`.
    #[must_use]
    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }
}

/// A signal-dependent bonus for skills in particular domains.
struct ContextBoost {
    reason: &'static str,
    applies: fn(&Signals, &SkillRecord) -> bool,
    delta: u32,
}

const URL_BOOST_DOMAINS: [&str; 3] = ["code_quality", "api", "documentation"];

const CONTEXT_BOOSTS: &[ContextBoost] = &[
    ContextBoost {
        reason: "error context boost",
        applies: |signals, skill| signals.has_error && skill.has_domain("debugging"),
        delta: 25,
    },
    ContextBoost {
        reason: "code context boost",
        applies: |signals, skill| signals.has_code && skill.has_domain("code_quality"),
        delta: 15,
    },
    ContextBoost {
        reason: "URL context boost",
        applies: |signals, skill| {
            signals.has_url && URL_BOOST_DOMAINS.iter().any(|domain| skill.has_domain(domain))
        },
        delta: 10,
    },
];

/// Scores every skill, applies context boosts and returns the best `limit`.
///
/// Skills whose base score is zero are dropped before any boost applies.
/// Sorting is stable, so equal scores keep catalog order.
#[must_use]
pub fn rank(
    query: &str,
    skills: &[SkillRecord],
    signals: &Signals,
    limit: usize,
) -> Vec<MatchResult> {
    let profile = QueryProfile::new(query);
    let query_domains: BTreeSet<&str> = profile.domain_names().collect();

    let mut matches: Vec<MatchResult> = skills
        .iter()
        .filter_map(|skill| {
            let ScoreCard { score, mut reasons } = profile.score(skill);
            if score == 0 {
                return None;
            }

            let mut total = score;
            for boost in CONTEXT_BOOSTS.iter().filter(|boost| (boost.applies)(signals, skill)) {
                total += boost.delta;
                reasons.push(boost.reason.to_string());
            }

            let aligned = skill
                .domains
                .iter()
                .filter(|domain| query_domains.contains(domain.as_str()))
                .count();
            total += (5 * aligned).min(15) as u32;

            Some(MatchResult {
                name: skill.name.clone(),
                score: total.min(MAX_SCORE),
                reasons,
                source: skill.source.clone(),
                description: skill.description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect(),
                domains: skill.domains.clone(),
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(limit);

    tracing::debug!(
        scanned = skills.len(),
        kept = matches.len(),
        top = matches.first().map(|m| m.name.as_str()),
        "Ranked skills"
    );
    matches
}
