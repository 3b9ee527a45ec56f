//! Decision tables turning (category, signals, matches) into an action.
//!
//! Every category owns an ordered table of rules plus an `otherwise`
//! outcome, so a decision always exists. Each outcome carries a
//! human-readable reason and exactly one action payload.

use super::classifier::{InputCategory, Signals};
use super::ranker::MatchResult;
use super::rules::{first_match, Rule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What the caller should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Invoke a skill that already exists
    UseExisting,
    /// Extend an existing skill
    ImproveExisting,
    /// Build a new skill
    CreateNew,
    /// Chain several existing skills
    Compose,
    /// Ask the user a follow-up question
    Clarify,
}

impl Action {
    /// All actions.
    pub const ALL: [Self; 5] = [
        Self::UseExisting,
        Self::ImproveExisting,
        Self::CreateNew,
        Self::Compose,
        Self::Clarify,
    ];

    /// Returns the SCREAMING_SNAKE_CASE name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UseExisting => "USE_EXISTING",
            Self::ImproveExisting => "IMPROVE_EXISTING",
            Self::CreateNew => "CREATE_NEW",
            Self::Compose => "COMPOSE",
            Self::Clarify => "CLARIFY",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action-specific part of a decision.
///
/// Serialized untagged, so its single field lands next to the other
/// details (`recommended_skills`, `target_skill`, `purpose`,
/// `recommended_chain` or `suggested_action`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionPayload {
    /// Skills to invoke, best first
    UseExisting { recommended_skills: Vec<String> },
    /// Skill to improve
    ImproveExisting { target_skill: String },
    /// What the new skill is for
    CreateNew { purpose: String },
    /// Skills to run in order
    Compose { recommended_chain: Vec<String> },
    /// Follow-up question for the user
    Clarify { suggested_action: String },
}

impl ActionPayload {
    /// The action this payload belongs to.
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Self::UseExisting { .. } => Action::UseExisting,
            Self::ImproveExisting { .. } => Action::ImproveExisting,
            Self::CreateNew { .. } => Action::CreateNew,
            Self::Compose { .. } => Action::Compose,
            Self::Clarify { .. } => Action::Clarify,
        }
    }
}

/// Everything a decision reports about how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionDetails {
    /// Input category the decision was made for
    pub category: InputCategory,
    /// Best match, if any
    pub top_match: Option<MatchResult>,
    /// Score of the best match, 0 without matches
    pub top_score: u32,
    /// Number of ranked matches
    pub match_count: usize,
    /// The top three matches span at least three domains
    pub multi_domain: bool,
    /// Human-readable justification
    pub reason: String,
    /// Action-specific payload
    #[serde(flatten)]
    pub payload: ActionPayload,
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Decision details, including the payload that fixes the action
    pub details: DecisionDetails,
}

impl Decision {
    /// The chosen action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.details.payload.action()
    }

    /// The justification for the chosen action.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.details.reason
    }
}

/// Facts the decision rules are evaluated against.
#[derive(Debug, Clone)]
pub struct DecisionContext<'a> {
    /// Input category
    pub category: InputCategory,
    /// Input signals
    pub signals: &'a Signals,
    /// Ranked matches, best first
    pub matches: &'a [MatchResult],
    /// Raw query text
    pub query: &'a str,
    /// First match, if any
    pub top: Option<&'a MatchResult>,
    /// Score of `top`, 0 without matches
    pub top_score: u32,
    /// The top three matches span at least three domains
    pub multi_domain: bool,
}

impl<'a> DecisionContext<'a> {
    /// Derives the decision facts from the ranked matches.
    #[must_use]
    pub fn new(
        category: InputCategory,
        signals: &'a Signals,
        matches: &'a [MatchResult],
        query: &'a str,
    ) -> Self {
        let top = matches.first();
        let multi_domain = matches.len() >= 3 && {
            let domains: BTreeSet<&str> = matches[..3]
                .iter()
                .flat_map(|m| m.domains.iter().map(String::as_str))
                .collect();
            domains.len() >= 3
        };

        Self {
            category,
            signals,
            matches,
            query,
            top,
            top_score: top.map_or(0, |m| m.score),
            multi_domain,
        }
    }

    fn top_name(&self) -> &'a str {
        self.top.map_or("", |m| m.name.as_str())
    }

    fn top_names(&self, count: usize) -> Vec<String> {
        self.matches
            .iter()
            .take(count)
            .map(|m| m.name.clone())
            .collect()
    }

    /// The match whose name contains the skill named in an improve request.
    fn improve_target(&self) -> Option<&'a MatchResult> {
        let wanted = self.signals.mentioned_skill_name.as_deref()?.to_lowercase();
        self.matches
            .iter()
            .find(|m| m.name.to_lowercase().contains(&wanted))
    }

    /// The best match tagged with the debugging domain.
    fn debugging_match(&self) -> Option<&'a MatchResult> {
        self.matches.iter().find(|m| m.has_domain("debugging"))
    }

    /// The extracted purpose, or the trimmed query when none was extracted.
    fn purpose(&self) -> String {
        self.signals
            .extracted_purpose
            .clone()
            .unwrap_or_else(|| self.query.trim().to_string())
    }
}

/// A resolved rule: the reason plus the payload.
struct Verdict {
    reason: String,
    payload: ActionPayload,
}

impl Verdict {
    fn new(reason: impl Into<String>, payload: ActionPayload) -> Self {
        Self {
            reason: reason.into(),
            payload,
        }
    }

    fn use_existing(reason: impl Into<String>, skills: Vec<String>) -> Self {
        Self::new(reason, ActionPayload::UseExisting { recommended_skills: skills })
    }

    fn improve(reason: impl Into<String>, target: &str) -> Self {
        Self::new(
            reason,
            ActionPayload::ImproveExisting {
                target_skill: target.to_string(),
            },
        )
    }

    fn create(reason: impl Into<String>, ctx: &DecisionContext<'_>) -> Self {
        Self::new(reason, ActionPayload::CreateNew { purpose: ctx.purpose() })
    }

    fn clarify(reason: impl Into<String>, question: impl Into<String>) -> Self {
        Self::new(
            reason,
            ActionPayload::Clarify {
                suggested_action: question.into(),
            },
        )
    }
}

type Predicate = for<'a> fn(&DecisionContext<'a>) -> bool;
type Resolve = for<'a> fn(&DecisionContext<'a>) -> Verdict;
type DecisionRule = Rule<Predicate, Resolve>;

/// Ordered rules for one group of categories.
struct DecisionTable {
    rules: &'static [DecisionRule],
    otherwise: Resolve,
}

const CREATE_TABLE: DecisionTable = DecisionTable {
    rules: &[
        Rule {
            name: "existing_strong",
            when: |ctx| ctx.top_score >= 80,
            then: |ctx| {
                Verdict::clarify(
                    format!(
                        "Existing skill '{}' ({}%) may already handle this. Create anyway or use existing?",
                        ctx.top_name(),
                        ctx.top_score
                    ),
                    format!("Create a new skill anyway, or use '{}'?", ctx.top_name()),
                )
            },
        },
        Rule {
            name: "existing_similar",
            when: |ctx| ctx.top_score >= 50,
            then: |ctx| {
                Verdict::clarify(
                    format!(
                        "Existing skill '{}' ({}%) is similar. Create new or improve existing?",
                        ctx.top_name(),
                        ctx.top_score
                    ),
                    format!("Create a new skill, or improve '{}' instead?", ctx.top_name()),
                )
            },
        },
    ],
    otherwise: |ctx| {
        Verdict::create(
            "No strong existing match found. Proceeding with skill creation.",
            ctx,
        )
    },
};

const IMPROVE_TABLE: DecisionTable = DecisionTable {
    rules: &[Rule {
        name: "mentioned_skill_found",
        when: |ctx| ctx.improve_target().is_some(),
        then: |ctx| {
            let target = ctx.improve_target().map_or("", |m| m.name.as_str());
            Verdict::improve(format!("Improving existing skill: {target}"), target)
        },
    }],
    otherwise: |_| {
        Verdict::clarify(
            "Could not identify which skill to improve",
            "Which skill should be improved? Name it, as in 'improve the <name> skill'.",
        )
    },
};

const QUESTION_TABLE: DecisionTable = DecisionTable {
    rules: &[Rule {
        name: "good_match",
        when: |ctx| ctx.top_score >= 60,
        then: |ctx| {
            Verdict::use_existing(
                format!(
                    "Recommending existing skill: {} ({}%)",
                    ctx.top_name(),
                    ctx.top_score
                ),
                ctx.top_names(3),
            )
        },
    }],
    otherwise: |ctx| Verdict::create("No good existing skill matches. Consider creating one.", ctx),
};

const ERROR_TABLE: DecisionTable = DecisionTable {
    rules: &[
        Rule {
            name: "debugging_skill",
            when: |ctx| ctx.debugging_match().is_some_and(|m| m.score >= 50),
            then: |ctx| {
                let (name, score) = ctx
                    .debugging_match()
                    .map_or(("", 0), |m| (m.name.as_str(), m.score));
                Verdict::use_existing(
                    format!("Error detected - recommending: {name} ({score}%)"),
                    vec![name.to_string()],
                )
            },
        },
        Rule {
            name: "good_match",
            when: |ctx| ctx.top_score >= 50,
            then: |ctx| {
                Verdict::use_existing(
                    format!("Error handling skill: {} ({}%)", ctx.top_name(), ctx.top_score),
                    ctx.top_names(3),
                )
            },
        },
    ],
    otherwise: |ctx| Verdict::create("No error handling skill found. Consider creating one.", ctx),
};

/// Code snippets, URLs and task requests.
const ROUTED_TABLE: DecisionTable = DecisionTable {
    rules: &[
        Rule {
            name: "multi_domain",
            when: |ctx| ctx.multi_domain && ctx.top_score >= 50,
            then: |ctx| {
                Verdict::new(
                    "Multiple domains detected. Suggest skill composition.",
                    ActionPayload::Compose {
                        recommended_chain: ctx.top_names(3),
                    },
                )
            },
        },
        Rule {
            name: "strong_match",
            when: |ctx| ctx.top_score >= 80,
            then: |ctx| {
                Verdict::use_existing(
                    format!("Strong match: {} ({}%)", ctx.top_name(), ctx.top_score),
                    ctx.top_names(3),
                )
            },
        },
        Rule {
            name: "partial_match",
            when: |ctx| ctx.top_score >= 50,
            then: |ctx| {
                Verdict::improve(
                    format!(
                        "Partial match: {} ({}%) could be enhanced for this use case",
                        ctx.top_name(),
                        ctx.top_score
                    ),
                    ctx.top_name(),
                )
            },
        },
    ],
    otherwise: |ctx| {
        Verdict::create(
            "No good existing skill handles this. Consider creating one.",
            ctx,
        )
    },
};

const GENERAL_TABLE: DecisionTable = DecisionTable {
    rules: &[
        Rule {
            name: "best_match",
            when: |ctx| ctx.top_score >= 70,
            then: |ctx| {
                Verdict::use_existing(
                    format!("Best match: {} ({}%)", ctx.top_name(), ctx.top_score),
                    ctx.top_names(3),
                )
            },
        },
        Rule {
            name: "partial_matches",
            when: |ctx| ctx.top_score >= 40,
            then: |ctx| {
                Verdict::clarify(
                    "Unclear intent. Partial matches found.",
                    format!(
                        "What do you need? Closest skills: {}.",
                        ctx.top_names(3).join(", ")
                    ),
                )
            },
        },
    ],
    otherwise: |_| {
        Verdict::clarify(
            "Unclear intent and no good skill matches",
            "Could you elaborate on your goal?",
        )
    },
};

fn table_for(category: InputCategory) -> &'static DecisionTable {
    match category {
        InputCategory::ExplicitCreate => &CREATE_TABLE,
        InputCategory::ExplicitImprove => &IMPROVE_TABLE,
        InputCategory::SkillQuestion => &QUESTION_TABLE,
        InputCategory::ErrorMessage => &ERROR_TABLE,
        InputCategory::CodeSnippet | InputCategory::UrlContent | InputCategory::TaskRequest => {
            &ROUTED_TABLE
        }
        InputCategory::General => &GENERAL_TABLE,
    }
}

/// Decides the action for a classified, ranked query.
///
/// Total: every input yields a decision with a non-empty reason and the
/// payload of its action.
#[must_use]
pub fn decide(
    category: InputCategory,
    signals: &Signals,
    matches: &[MatchResult],
    query: &str,
) -> Decision {
    let ctx = DecisionContext::new(category, signals, matches, query);
    let table = table_for(category);

    let (rule_name, verdict) = match first_match(table.rules, &ctx) {
        Some(rule) => (rule.name, (rule.then)(&ctx)),
        None => ("otherwise", (table.otherwise)(&ctx)),
    };

    tracing::debug!(
        category = %category,
        rule = rule_name,
        action = %verdict.payload.action(),
        top_score = ctx.top_score,
        multi_domain = ctx.multi_domain,
        "Decided triage action"
    );

    Decision {
        details: DecisionDetails {
            category,
            top_match: ctx.top.cloned(),
            top_score: ctx.top_score,
            match_count: matches.len(),
            multi_domain: ctx.multi_domain,
            reason: verdict.reason,
            payload: verdict.payload,
        },
    }
}
