//! Input classification.
//!
//! Raw input is matched against ordered rule groups; the first group with a
//! matching pattern decides the [`InputCategory`]. Error and code patterns run
//! against the original text because their syntax is case-sensitive, every
//! other group runs against the lower-cased text.

use super::rules::{first_match, Rule};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Category of a piece of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputCategory {
    /// "create a skill for X"
    ExplicitCreate,
    /// "improve the X skill"
    ExplicitImprove,
    /// "do I have a skill for X?"
    SkillQuestion,
    /// "help me with X", "I need to X"
    TaskRequest,
    /// Stack traces, error output
    ErrorMessage,
    /// Pasted code
    CodeSnippet,
    /// Input containing a URL
    UrlContent,
    /// Nothing more specific matched
    General,
}

impl InputCategory {
    /// All categories, in classification order (General last).
    pub const ALL: [Self; 8] = [
        Self::ExplicitCreate,
        Self::ExplicitImprove,
        Self::SkillQuestion,
        Self::ErrorMessage,
        Self::CodeSnippet,
        Self::UrlContent,
        Self::TaskRequest,
        Self::General,
    ];

    /// Returns the snake_case name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExplicitCreate => "explicit_create",
            Self::ExplicitImprove => "explicit_improve",
            Self::SkillQuestion => "skill_question",
            Self::TaskRequest => "task_request",
            Self::ErrorMessage => "error_message",
            Self::CodeSnippet => "code_snippet",
            Self::UrlContent => "url_content",
            Self::General => "general",
        }
    }
}

impl fmt::Display for InputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals extracted from the input alongside its category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    /// The word "skill" appears anywhere in the input
    pub has_skill_mention: bool,
    /// Input was classified as an error message
    pub has_error: bool,
    /// Input was classified as a code snippet
    pub has_code: bool,
    /// Input was classified as URL content
    pub has_url: bool,
    /// Skill named in an improvement request ("improve the X skill")
    pub mentioned_skill_name: Option<String>,
    /// Purpose clause of a creation request ("skill for X")
    pub extracted_purpose: Option<String>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern)
                .unwrap_or_else(|err| panic!("invalid classifier pattern {pattern:?}: {err}"))
        })
        .collect()
}

static CREATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(?:create|build|make|design|develop)\s+(?:a\s+)?(?:new\s+)?skill\b",
        r"\bskillforge[:\s]",
        r"\b(?:new|custom)\s+skill\s+(?:for|to)\b",
        r"\bultimate\s+skill\b",
    ])
});

static IMPROVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(?:improve|enhance|update|upgrade|fix|extend)\s+(?:the\s+)?(?:\w+(?:-\w+)*\s+)?skill\b",
        r"\bskill\s+(?:needs?|could\s+use|should\s+have)\b",
        r"\b(?:add|include)\s+(?:to|in)\s+(?:the\s+)?\w+\s+skill\b",
    ])
});

static QUESTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\bdo\s+(?:i|we)\s+have\s+(?:a\s+)?skill\b",
        r"\bwhich\s+skill\b",
        r"\bwhat\s+skill\b",
        r"\brecommend\s+(?:a\s+)?skill\b",
        r"\bskill\s+for\b",
        r"\bfind\s+(?:a\s+)?skill\b",
        r"\bsuggest\s+(?:a\s+)?skill\b",
        r"\bis\s+there\s+(?:a\s+)?skill\b",
    ])
});

static ERROR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"Error:",
        r"Exception:",
        r"TypeError:",
        r"ReferenceError:",
        r"SyntaxError:",
        r"at\s+\S+\s+\(",
        r"Traceback \(most recent call",
        r#"File "[^"]+", line \d+"#,
    ])
});

static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?m)^\s*(?:function|const|let|var|class|import|export|def|async|await)\s+",
        r"(?m)^\s*<[a-zA-Z][^>]*>",
        r"=>",
        r"(?m)^\s*@\w+",
    ])
});

static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&[r"https?://\S+"]));

static TASK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(?:help|assist)\s+(?:me\s+)?(?:with|to)\b",
        r"\b(?:help|assist)\s+me\b",
        r"\bi\s+need\s+to\b",
        r"\bhow\s+(?:do\s+i|can\s+i|to)\b",
        r"\bcan\s+you\b",
        r"\bplease\b.*\b(?:help|do|make|create|fix|build)\b",
    ])
});

static PURPOSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"skill\s+(?:for|to)\s+(.+?)(?:\.|\n?\z)")
        .unwrap_or_else(|err| panic!("invalid purpose pattern: {err}"))
});

static SKILL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:improve|enhance|update|fix)\s+(?:the\s+)?(\w+(?:-\w+)*)\s+skill")
        .unwrap_or_else(|err| panic!("invalid skill name pattern: {err}"))
});

/// Input text in both casings.
struct ClassifyInput<'a> {
    original: &'a str,
    lower: String,
}

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}

type ClassifyRule = Rule<for<'a> fn(&ClassifyInput<'a>) -> bool, InputCategory>;

const CLASSIFICATION_RULES: &[ClassifyRule] = &[
    Rule {
        name: "explicit_create",
        when: |input| any_match(&CREATE_PATTERNS, &input.lower),
        then: InputCategory::ExplicitCreate,
    },
    Rule {
        name: "explicit_improve",
        when: |input| any_match(&IMPROVE_PATTERNS, &input.lower),
        then: InputCategory::ExplicitImprove,
    },
    Rule {
        name: "skill_question",
        when: |input| any_match(&QUESTION_PATTERNS, &input.lower),
        then: InputCategory::SkillQuestion,
    },
    Rule {
        name: "error_message",
        when: |input| any_match(&ERROR_PATTERNS, input.original),
        then: InputCategory::ErrorMessage,
    },
    Rule {
        name: "code_snippet",
        when: |input| any_match(&CODE_PATTERNS, input.original),
        then: InputCategory::CodeSnippet,
    },
    Rule {
        name: "url_content",
        when: |input| any_match(&URL_PATTERNS, input.original),
        then: InputCategory::UrlContent,
    },
    Rule {
        name: "task_request",
        when: |input| any_match(&TASK_PATTERNS, &input.lower),
        then: InputCategory::TaskRequest,
    },
];

/// Classifies raw input into exactly one category and extracts signals.
///
/// Total: every input, including the empty string, gets a category
/// (`General` when no rule group matches).
#[must_use]
pub fn classify(query: &str) -> (InputCategory, Signals) {
    let input = ClassifyInput {
        original: query,
        lower: query.to_lowercase(),
    };

    let mut signals = Signals {
        has_skill_mention: input.lower.contains("skill"),
        ..Signals::default()
    };

    let category = first_match(CLASSIFICATION_RULES, &input)
        .map_or(InputCategory::General, |rule| rule.then);

    match category {
        InputCategory::ExplicitCreate => {
            signals.extracted_purpose = extract_purpose(&input.lower);
        }
        InputCategory::ExplicitImprove => {
            signals.mentioned_skill_name = extract_skill_name(&input.lower);
        }
        InputCategory::ErrorMessage => signals.has_error = true,
        InputCategory::CodeSnippet => signals.has_code = true,
        InputCategory::UrlContent => signals.has_url = true,
        InputCategory::SkillQuestion | InputCategory::TaskRequest | InputCategory::General => {}
    }

    tracing::debug!(category = %category, ?signals, "Classified input");
    (category, signals)
}

/// Extracts the clause after "skill for" / "skill to", up to a period or the end.
fn extract_purpose(lower: &str) -> Option<String> {
    PURPOSE_PATTERN
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|purpose| !purpose.is_empty())
}

/// Extracts the skill name token preceding "skill".
fn extract_skill_name(lower: &str) -> Option<String> {
    SKILL_NAME_PATTERN
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
