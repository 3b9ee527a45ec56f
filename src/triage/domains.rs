//! Domain detection over free text.

use super::vocabulary::DomainVocabulary;
use serde::Serialize;

/// A vocabulary domain found in the input, with the terms that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainHit {
    /// Domain name
    pub domain: &'static str,
    /// Synonym terms found in the input, in vocabulary order
    pub terms: Vec<&'static str>,
}

impl DomainHit {
    /// Number of matched terms.
    #[must_use]
    pub fn strength(&self) -> usize {
        self.terms.len()
    }
}

impl DomainVocabulary {
    /// Finds every domain with at least one term occurring in `text`.
    ///
    /// Terms are matched as literal substrings of the lower-cased text.
    /// Hits are ordered by descending term count; equal counts keep
    /// vocabulary order.
    #[must_use]
    pub fn detect(&self, text: &str) -> Vec<DomainHit> {
        let lower = text.to_lowercase();

        let mut hits: Vec<DomainHit> = self
            .entries()
            .filter_map(|(domain, synonyms)| {
                let terms: Vec<&'static str> = synonyms
                    .iter()
                    .copied()
                    .filter(|term| lower.contains(term))
                    .collect();
                (!terms.is_empty()).then_some(DomainHit { domain, terms })
            })
            .collect();

        hits.sort_by(|a, b| b.strength().cmp(&a.strength()));
        hits
    }
}

/// Detects domains in `query` using the standard vocabulary.
#[must_use]
pub fn detect_domains(query: &str) -> Vec<DomainHit> {
    DomainVocabulary::standard().detect(query)
}
