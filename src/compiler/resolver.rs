//! Term resolver
//!
//! Maps a candidate term to concrete `facet:value` pairs against the current
//! vocabulary snapshot. Resolution order, first success wins:
//!
//! 1. Explicit `facet:value` — verbatim passthrough, no lookup
//! 2. Wildcard — case-insensitive prefix/suffix scan over facet values and
//!    facet names; a matching name expands to all of its values
//! 3. Quoted single word — exact case-insensitive match only, first facet in
//!    vocabulary order wins
//! 4. Bare word — exact case-insensitive matches across all facets, then a
//!    similarity fallback keeping the strictly-highest score above the
//!    threshold
//!
//! An unresolved term aborts the whole compile; the caller falls back to
//! free-text search rather than applying partial filters.

use serde::{Deserialize, Serialize};

use super::classifier::Term;
use crate::vocabulary::Vocabulary;

/// One concrete facet/value filter fragment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetPair {
    pub facet: String,
    pub value: String,
}

impl FacetPair {
    pub fn new(facet: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            facet: facet.into(),
            value: value.into(),
        }
    }

    /// Render as a filter fragment, single-quoting multi-word values.
    pub fn to_filter(&self) -> String {
        if self.value.contains(char::is_whitespace) {
            format!("{}:'{}'", self.facet, self.value)
        } else {
            format!("{}:{}", self.facet, self.value)
        }
    }
}

/// Outcome of resolving one term
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// Explicit `facet:value` text, passed through unchanged
    Verbatim(String),
    /// One or more vocabulary pairs; more than one forms an OR-set
    Facets(Vec<FacetPair>),
}

/// Resolve a term against the vocabulary, or report it unresolved.
pub fn resolve_term(term: &Term, vocabulary: &Vocabulary, threshold: f64) -> Option<Resolved> {
    if term.explicit {
        return Some(Resolved::Verbatim(term.text.clone()));
    }

    if term.wildcard_prefix || term.wildcard_suffix {
        let pairs = wildcard_matches(term, vocabulary);
        return if pairs.is_empty() {
            None
        } else {
            Some(Resolved::Facets(pairs))
        };
    }

    let lowered = term.text.to_lowercase();

    if term.quoted {
        // Quoting is an exact-match contract: no fuzzy fallback.
        return exact_first(vocabulary, &lowered).map(|pair| Resolved::Facets(vec![pair]));
    }

    let matches = exact_all(vocabulary, &lowered);
    if !matches.is_empty() {
        return Some(Resolved::Facets(matches));
    }

    closest_match(vocabulary, &lowered, threshold).map(|pair| Resolved::Facets(vec![pair]))
}

/// Collect every wildcard match across all facets into one OR-set.
fn wildcard_matches(term: &Term, vocabulary: &Vocabulary) -> Vec<FacetPair> {
    let stem = term.text.to_lowercase();
    let stem_matches = |candidate: &str| {
        let lowered = candidate.to_lowercase();
        if term.wildcard_prefix {
            lowered.ends_with(&stem)
        } else {
            lowered.starts_with(&stem)
        }
    };

    let mut pairs: Vec<FacetPair> = Vec::new();
    let push_unique = |pairs: &mut Vec<FacetPair>, pair: FacetPair| {
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    };

    for (facet, values) in vocabulary.iter() {
        if stem_matches(facet) {
            for value in values {
                push_unique(&mut pairs, FacetPair::new(facet, value));
            }
        }
        for value in values {
            if stem_matches(value) {
                push_unique(&mut pairs, FacetPair::new(facet, value));
            }
        }
    }
    pairs
}

/// First exact case-insensitive match in vocabulary order.
fn exact_first(vocabulary: &Vocabulary, lowered: &str) -> Option<FacetPair> {
    vocabulary.iter().find_map(|(facet, values)| {
        values
            .iter()
            .find(|value| value.to_lowercase() == lowered)
            .map(|value| FacetPair::new(facet, value))
    })
}

/// Every exact case-insensitive match across all facets.
fn exact_all(vocabulary: &Vocabulary, lowered: &str) -> Vec<FacetPair> {
    let mut pairs = Vec::new();
    for (facet, values) in vocabulary.iter() {
        for value in values {
            if value.to_lowercase() == lowered {
                pairs.push(FacetPair::new(facet, value));
            }
        }
    }
    pairs
}

/// The vocabulary value with the strictly-highest similarity score above the
/// threshold. Ties keep the first facet/value in vocabulary order.
fn closest_match(vocabulary: &Vocabulary, lowered: &str, threshold: f64) -> Option<FacetPair> {
    let mut best: Option<(FacetPair, f64)> = None;
    for (facet, values) in vocabulary.iter() {
        for value in values {
            let score = strsim::normalized_levenshtein(lowered, &value.to_lowercase());
            if score > threshold && best.as_ref().map_or(true, |(_, kept)| score > *kept) {
                best = Some((FacetPair::new(facet, value), score));
            }
        }
    }
    best.map(|(pair, _)| pair)
}
