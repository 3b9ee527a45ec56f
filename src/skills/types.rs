//! Skill record types.
//!
//! Catalog entries arrive as loosely-typed JSON. They are decoded into
//! [`RawSkillRecord`] and validated once into a [`SkillRecord`], whose
//! multi-valued fields are always present (possibly empty) and normalised.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A skill as seen by the triage engine.
///
/// Keywords, triggers and domains are trimmed, lower-cased and
/// de-duplicated on construction. Name, source and description keep
/// their original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Skill identifier (usually hyphen-case)
    pub name: String,
    /// Name of the source the skill was discovered in
    pub source: String,
    /// Human-readable description
    pub description: String,
    /// Matching keywords
    pub keywords: BTreeSet<String>,
    /// Literal trigger phrases
    pub triggers: BTreeSet<String>,
    /// Domain tags, drawn from the domain vocabulary
    pub domains: BTreeSet<String>,
}

impl SkillRecord {
    /// Creates a record with the given name and empty metadata.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: String::new(),
            description: String::new(),
            keywords: BTreeSet::new(),
            triggers: BTreeSet::new(),
            domains: BTreeSet::new(),
        }
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(normalize_terms(keywords));
        self
    }

    /// Adds trigger phrases.
    #[must_use]
    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.triggers.extend(normalize_terms(triggers));
        self
    }

    /// Adds domain tags.
    #[must_use]
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains.extend(normalize_terms(domains));
        self
    }

    /// Returns true if the skill is tagged with `domain`.
    #[must_use]
    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }
}

fn normalize_terms<I, S>(terms: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|term| term.as_ref().trim().to_lowercase())
        .filter(|term| !term.is_empty())
}

/// Splits a multi-valued field as found in index files: a list of strings,
/// or one comma-separated string. Anything else counts as empty.
fn term_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(joined)) => joined.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn text_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// A catalog entry exactly as decoded from the index document.
///
/// Every field is optional; unexpected field types degrade to "absent".
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawSkillRecord {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub source: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub keywords: Option<Value>,
    #[serde(default)]
    pub triggers: Option<Value>,
    #[serde(default)]
    pub domains: Option<Value>,
}

impl TryFrom<RawSkillRecord> for SkillRecord {
    type Error = String;

    /// Validates a raw entry. Only a missing or blank name is rejected.
    fn try_from(raw: RawSkillRecord) -> Result<Self, Self::Error> {
        let name = text_field(raw.name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| "missing 'name'".to_string())?;

        Ok(Self::new(name)
            .with_source(text_field(raw.source).unwrap_or_default())
            .with_description(text_field(raw.description).unwrap_or_default())
            .with_keywords(term_list(raw.keywords))
            .with_triggers(term_list(raw.triggers))
            .with_domains(term_list(raw.domains)))
    }
}
