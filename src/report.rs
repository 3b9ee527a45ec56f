//! Presentation of triage results.
//!
//! [`TriageReport`] is the envelope handed to programmatic consumers (the
//! `--json` output). [`format_report`] renders an outcome for people.

use crate::error::{TriageError, TriageErrorKind};
use crate::triage::{ActionPayload, TriageOutcome};
use serde::Serialize;

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────";

/// Matches shown in the human-readable report.
const SHOWN_MATCHES: usize = 3;
const SHOWN_DESCRIPTION_CHARS: usize = 60;
const SHOWN_REASONS: usize = 2;

/// Success flag, message and data of one triage run.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    /// True if triage ran (whatever the action)
    pub success: bool,
    /// One-line summary
    pub message: String,
    /// The outcome, absent on failure
    pub data: Option<TriageOutcome>,
    /// Failure details
    pub errors: Vec<String>,
    /// Non-fatal problems, such as skipped catalog entries
    pub warnings: Vec<String>,
    /// Creation time, RFC 3339
    pub timestamp: String,
}

impl TriageReport {
    /// Wraps a successful outcome.
    #[must_use]
    pub fn success(outcome: TriageOutcome, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            message: format!("Triage complete: {}", outcome.action),
            data: Some(outcome),
            errors: Vec::new(),
            warnings,
            timestamp: now(),
        }
    }

    /// Describes a triage that could not run.
    #[must_use]
    pub fn failure(error: &TriageError) -> Self {
        let (message, errors) = match &error.kind {
            TriageErrorKind::CatalogNotFound { path } => (
                "Skill index not found. Run the skill discovery step first.".to_string(),
                vec![format!("Index file missing: {}", path.display())],
            ),
            TriageErrorKind::CatalogUnreadable { .. } | TriageErrorKind::CatalogMalformed { .. } => (
                "Skill index could not be loaded.".to_string(),
                vec![error.to_string()],
            ),
            TriageErrorKind::Configuration { .. } => {
                ("Triage failed.".to_string(), vec![error.to_string()])
            }
        };

        Self {
            success: false,
            message,
            data: None,
            errors,
            warnings: Vec::new(),
            timestamp: now(),
        }
    }

    /// Pretty-printed JSON form of the report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Renders an outcome as a multi-section text report.
///
/// Header with the action, the input category and reason, up to three
/// matches, then the recommended next step for the action.
#[must_use]
pub fn format_report(outcome: &TriageOutcome) -> String {
    let mut lines = vec![
        String::new(),
        HEAVY_RULE.to_string(),
        format!("SKILL TRIAGE RESULT: {}", outcome.action),
        HEAVY_RULE.to_string(),
        String::new(),
        format!("Input Category: {}", outcome.category),
        format!("Reason: {}", outcome.reason()),
    ];

    if !outcome.top_matches.is_empty() {
        lines.push(String::new());
        lines.push("Top Skill Matches:".to_string());
        for (rank, m) in outcome.top_matches.iter().take(SHOWN_MATCHES).enumerate() {
            let description: String = m.description.chars().take(SHOWN_DESCRIPTION_CHARS).collect();
            lines.push(format!("  {}. {} ({}%)", rank + 1, m.name, m.score));
            lines.push(format!("     {description}..."));
            if !m.reasons.is_empty() {
                let shown = &m.reasons[..m.reasons.len().min(SHOWN_REASONS)];
                lines.push(format!("     Matched: {}", shown.join(", ")));
            }
        }
    }

    lines.push(String::new());
    lines.push(LIGHT_RULE.to_string());
    lines.push("RECOMMENDED NEXT STEP:".to_string());
    lines.extend(next_steps(outcome.payload()).into_iter().map(|line| format!("  {line}")));
    lines.push(LIGHT_RULE.to_string());

    lines.join("\n")
}

fn next_steps(payload: &ActionPayload) -> Vec<String> {
    match payload {
        ActionPayload::UseExisting { recommended_skills } => {
            let first = recommended_skills.first().map_or("unknown", String::as_str);
            vec![
                format!("Invoke existing skill: {first}"),
                format!("Example: /{first}"),
            ]
        }
        ActionPayload::ImproveExisting { target_skill } => vec![
            format!("Improve skill: {target_skill}"),
            format!("Command: SkillForge: improve {target_skill}"),
        ],
        ActionPayload::CreateNew { purpose } => vec![
            format!("Create new skill for: {purpose}"),
            format!("Command: SkillForge: create a skill for {purpose}"),
        ],
        ActionPayload::Compose { recommended_chain } => vec![
            format!("Compose skill chain: {}", recommended_chain.join(" → ")),
            "Use SkillComposer to orchestrate".to_string(),
        ],
        ActionPayload::Clarify { suggested_action } => vec![suggested_action.clone()],
    }
}
