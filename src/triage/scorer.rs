//! Relevance scoring of a single skill against a query.
//!
//! Scoring is a fixed pipeline of independent rules. Each rule looks at the
//! query profile, the skill and the reasons recorded so far, and returns an
//! optional [`Contribution`]. Contributions are summed in pipeline order and
//! the total is clamped to [`MAX_SCORE`] once at the end.

use super::domains::{detect_domains, DomainHit};
use crate::skills::SkillRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Upper bound of every relevance score.
pub const MAX_SCORE: u32 = 100;

/// Result of scoring one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    /// Score in `0..=MAX_SCORE`
    pub score: u32,
    /// Short tags naming what contributed, in pipeline order
    pub reasons: Vec<String>,
}

/// Everything the scoring rules need to know about the query.
///
/// Built once per query and reused for every skill in the catalog.
#[derive(Debug, Clone)]
pub struct QueryProfile {
    lower: String,
    words: BTreeSet<String>,
    hits: Vec<DomainHit>,
}

impl QueryProfile {
    /// Lower-cases the query, splits it into words and detects its domains.
    #[must_use]
    pub fn new(query: &str) -> Self {
        let lower = query.to_lowercase();
        let words = lower.split_whitespace().map(str::to_string).collect();
        Self {
            hits: detect_domains(query),
            words,
            lower,
        }
    }

    /// Ranked domain hits of the query.
    #[must_use]
    pub fn domains(&self) -> &[DomainHit] {
        &self.hits
    }

    /// Names of the detected domains, in rank order.
    pub fn domain_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.hits.iter().map(|hit| hit.domain)
    }

    /// Scores `skill` against this query.
    #[must_use]
    pub fn score(&self, skill: &SkillRecord) -> ScoreCard {
        let text = SkillText::new(skill);
        let mut total: u32 = 0;
        let mut reasons = Vec::new();

        for (rule_name, rule) in SCORING_RULES {
            if let Some(contribution) = rule(self, &text, &reasons) {
                tracing::trace!(
                    skill = %skill.name,
                    rule = rule_name,
                    delta = contribution.delta,
                    "Scoring rule fired"
                );
                total += contribution.delta;
                reasons.extend(contribution.reason);
            }
        }

        ScoreCard {
            score: total.min(MAX_SCORE),
            reasons,
        }
    }
}

/// Scores one skill against one query.
#[must_use]
pub fn score(query: &str, skill: &SkillRecord) -> ScoreCard {
    QueryProfile::new(query).score(skill)
}

/// A rule's share of the score.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Contribution {
    delta: u32,
    reason: Option<String>,
}

impl Contribution {
    fn new(delta: u32, reason: impl Into<String>) -> Self {
        Self {
            delta,
            reason: Some(reason.into()),
        }
    }
}

/// Lower-cased text fields of the skill being scored.
struct SkillText<'s> {
    record: &'s SkillRecord,
    name: String,
    description: String,
}

impl<'s> SkillText<'s> {
    fn new(record: &'s SkillRecord) -> Self {
        Self {
            record,
            name: record.name.to_lowercase(),
            description: record.description.to_lowercase(),
        }
    }
}

type ScoringRule = for<'s> fn(&QueryProfile, &SkillText<'s>, &[String]) -> Option<Contribution>;

const SCORING_RULES: &[(&str, ScoringRule)] = &[
    ("domain", domain_match),
    ("domain_keyword", domain_keyword),
    ("domain_description", domain_description),
    ("name", name_match),
    ("trigger", trigger_match),
    ("keyword_overlap", keyword_overlap),
    ("description_overlap", description_overlap),
];

fn longer_than(word: &str, len: usize) -> bool {
    word.chars().count() > len
}

/// The first ranked query domain the skill is tagged with.
fn domain_match(query: &QueryProfile, skill: &SkillText<'_>, _: &[String]) -> Option<Contribution> {
    let hit = query
        .hits
        .iter()
        .find(|hit| skill.record.has_domain(hit.domain))?;

    let delta = (35 + 5 * hit.strength()).min(50) as u32;
    let shown = &hit.terms[..hit.terms.len().min(2)];
    Some(Contribution::new(
        delta,
        format!("domain: {} ({})", hit.domain, shown.join(", ")),
    ))
}

/// A matched domain term, or the domain name itself, among the skill's keywords.
fn domain_keyword(
    query: &QueryProfile,
    skill: &SkillText<'_>,
    _: &[String],
) -> Option<Contribution> {
    let keywords = &skill.record.keywords;

    for hit in &query.hits {
        if let Some(term) = hit.terms.iter().find(|term| keywords.contains(**term)) {
            return Some(Contribution::new(15, format!("keyword: {term}")));
        }
        if keywords.contains(hit.domain) || keywords.contains(hit.domain.replace('_', " ").as_str())
        {
            return Some(Contribution::new(15, format!("keyword: {}", hit.domain)));
        }
    }
    None
}

/// A matched domain term, or the domain name itself, in the skill's description.
fn domain_description(
    query: &QueryProfile,
    skill: &SkillText<'_>,
    _: &[String],
) -> Option<Contribution> {
    for hit in &query.hits {
        if let Some(term) = hit
            .terms
            .iter()
            .find(|term| skill.description.contains(**term))
        {
            return Some(Contribution::new(10, format!("description: {term}")));
        }
        if skill.description.contains(hit.domain) {
            return Some(Contribution::new(10, format!("description: {}", hit.domain)));
        }
    }
    None
}

fn name_match(query: &QueryProfile, skill: &SkillText<'_>, _: &[String]) -> Option<Contribution> {
    if skill.name.is_empty() {
        return None;
    }
    if query.lower.contains(skill.name.as_str()) {
        return Some(Contribution::new(35, format!("name match: {}", skill.record.name)));
    }

    let spaced = skill.name.replace(|c| c == '-' || c == '_', " ");
    let overlap: BTreeSet<&str> = spaced
        .split_whitespace()
        .filter(|word| query.words.contains(*word))
        .collect();

    overlap
        .iter()
        .any(|word| longer_than(word, 3))
        .then(|| {
            let words: Vec<&str> = overlap.iter().copied().collect();
            Contribution::new(20, format!("partial name: {}", words.join(", ")))
        })
}

fn trigger_match(query: &QueryProfile, skill: &SkillText<'_>, _: &[String]) -> Option<Contribution> {
    skill
        .record
        .triggers
        .iter()
        .find(|trigger| query.lower.contains(trigger.as_str()))
        .map(|trigger| Contribution::new(25, format!("trigger: {trigger}")))
}

fn keyword_overlap(
    query: &QueryProfile,
    skill: &SkillText<'_>,
    reasons: &[String],
) -> Option<Contribution> {
    let overlap: Vec<&str> = query
        .words
        .iter()
        .filter(|word| longer_than(word, 3) && skill.record.keywords.contains(word.as_str()))
        .map(String::as_str)
        .collect();

    if overlap.is_empty() {
        return None;
    }

    let delta = (6 * overlap.len()).min(20) as u32;
    let already_named = reasons.iter().any(|reason| reason.contains("keyword:"));
    let reason = (!already_named)
        .then(|| format!("keywords: {}", overlap[..overlap.len().min(3)].join(", ")));

    Some(Contribution { delta, reason })
}

fn description_overlap(
    query: &QueryProfile,
    skill: &SkillText<'_>,
    reasons: &[String],
) -> Option<Contribution> {
    if reasons.iter().any(|reason| reason.contains("description:")) {
        return None;
    }

    let shared: BTreeSet<&str> = skill
        .description
        .split_whitespace()
        .filter(|word| longer_than(word, 4) && query.words.contains(*word))
        .collect();

    (shared.len() >= 2).then(|| Contribution::new(8, "description overlap"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_export() -> SkillRecord {
        SkillRecord::new("pdf-export")
            .with_domains(["pdf"])
            .with_keywords(["pdf", "export"])
            .with_description("Exports documents to PDF")
    }

    #[test]
    fn domain_keyword_description_and_partial_name() {
        let card = score("export this report as a pdf", &pdf_export());

        assert_eq!(card.score, 91);
        assert_eq!(
            card.reasons,
            vec![
                "domain: pdf (pdf)",
                "keyword: pdf",
                "description: document",
                "partial name: export, pdf",
            ]
        );
    }

    #[test]
    fn domain_name_as_spaced_keyword() {
        let skill = SkillRecord::new("linter").with_keywords(["code quality"]);
        let card = score("please refactor this module", &skill);

        assert_eq!(card.score, 15);
        assert_eq!(card.reasons, vec!["keyword: code_quality"]);
    }

    #[test]
    fn trigger_and_keyword_overlap() {
        let skill = SkillRecord::new("changelog-writer")
            .with_keywords(["changelog", "release", "notes"])
            .with_triggers(["write the changelog"]);

        let card = score("write the changelog for the release", &skill);

        assert_eq!(card.score, 72);
        assert_eq!(
            card.reasons,
            vec![
                "keyword: release",
                "partial name: changelog",
                "trigger: write the changelog",
            ]
        );
    }

    #[test]
    fn keyword_overlap_reason_when_no_domain_keyword() {
        let skill = SkillRecord::new("alpha").with_keywords(["inventory", "warehouse"]);
        let card = score("warehouse inventory check", &skill);

        assert_eq!(card.score, 12);
        assert_eq!(card.reasons, vec!["keywords: inventory, warehouse"]);
    }

    #[test]
    fn description_overlap_fallback() {
        let skill = SkillRecord::new("inventory")
            .with_description("Tracks warehouse inventory levels across stores");
        let card = score("warehouse levels are wrong", &skill);

        assert_eq!(card.score, 8);
        assert_eq!(card.reasons, vec!["description overlap"]);
    }

    #[test]
    fn exact_name_match() {
        let skill = SkillRecord::new("Bug-Hunter");
        let card = score("run bug-hunter now", &skill);
        assert_eq!(card.score, 35);
        assert_eq!(card.reasons, vec!["name match: Bug-Hunter"]);
    }

    #[test]
    fn short_name_words_do_not_count() {
        let skill = SkillRecord::new("api-kit");
        let card = score("the api kit", &skill);
        assert_eq!(card.score, 0);
    }

    #[test]
    fn score_is_clamped() {
        let skill = SkillRecord::new("pdf-export")
            .with_domains(["pdf", "document"])
            .with_keywords(["pdf", "export", "portable"])
            .with_triggers(["export pdf"])
            .with_description("export pdf portable document");

        let card = score("pdf-export should export pdf as portable document", &skill);
        assert_eq!(card.score, MAX_SCORE);
        assert_eq!(card.reasons[0], "domain: pdf (pdf, export pdf)");
    }

    #[test]
    fn unrelated_skill_scores_zero() {
        let card = score("hello there", &pdf_export());
        assert_eq!(card.score, 0);
        assert!(card.reasons.is_empty());
    }

    #[test]
    fn empty_query_scores_zero() {
        let card = score("", &pdf_export());
        assert_eq!(card.score, 0);
    }

    #[test]
    fn profile_reuse_matches_free_function() {
        let profile = QueryProfile::new("export this report as a pdf");
        assert_eq!(
            profile.score(&pdf_export()),
            score("export this report as a pdf", &pdf_export())
        );
        assert_eq!(profile.domain_names().collect::<Vec<_>>(), vec!["document", "pdf"]);
        assert_eq!(profile.domains().len(), 2);
    }
}
