//! Facet vocabulary and its snapshot store
//!
//! The vocabulary maps facet names to their known values and is the only
//! state the compiler reads. It is replaced wholesale on refresh and read as
//! an immutable snapshot during a compile, so concurrent compiles against
//! overlapping snapshots need no locking.

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Result;

/// Facet listing returned by the search backend collaborator
///
/// `display_order`, when present, defines both the order and the set of
/// facets kept in the resulting vocabulary.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FacetListing {
    pub facets: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub display_order: Option<Vec<String>>,
}

/// Source of facet listings, implemented by the backend collaborator
pub trait FacetSource: Send + Sync {
    fn fetch_facets(&self) -> Result<FacetListing>;
}

/// Immutable mapping of facet name to known facet values
///
/// Values within a facet are unique (case-insensitively) and keep the order
/// the listing delivered them in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    facets: IndexMap<String, Vec<String>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from a backend listing, applying the display-order
    /// hint when present.
    pub fn from_listing(listing: FacetListing) -> Self {
        let FacetListing {
            mut facets,
            display_order,
        } = listing;

        let mut vocabulary = Vocabulary::new();
        match display_order {
            Some(order) => {
                for name in order {
                    if let Some(values) = facets.shift_remove(&name) {
                        vocabulary.insert_facet(name, values);
                    }
                }
            }
            None => {
                for (name, values) in facets {
                    vocabulary.insert_facet(name, values);
                }
            }
        }
        vocabulary
    }

    /// Add a facet with its values, for direct construction.
    pub fn with_facet<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_facet(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    fn insert_facet(&mut self, name: String, values: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if value.is_empty() {
                continue;
            }
            let lowered = value.to_lowercase();
            if !deduped.iter().any(|kept| kept.to_lowercase() == lowered) {
                deduped.push(value);
            }
        }
        self.facets.insert(name, deduped);
    }

    /// Iterate facets and their values in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.facets
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Values of a single facet, if known.
    pub fn values(&self, facet: &str) -> Option<&[String]> {
        self.facets.get(facet).map(Vec::as_slice)
    }

    /// Number of facets.
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Holds the current vocabulary snapshot
///
/// Refreshes swap the snapshot atomically; in-flight compiles keep reading
/// the snapshot they started with.
pub struct VocabularyStore {
    snapshot: ArcSwap<Vocabulary>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Vocabulary::default()),
        }
    }

    /// The current snapshot, valid for the duration of one compile.
    pub fn snapshot(&self) -> Arc<Vocabulary> {
        self.snapshot.load_full()
    }

    /// Replace the snapshot wholesale.
    pub fn replace(&self, vocabulary: Vocabulary) {
        self.snapshot.store(Arc::new(vocabulary));
    }

    /// Fetch a fresh listing from the source and swap it in.
    pub fn refresh(&self, source: &dyn FacetSource) -> Result<()> {
        let listing = source.fetch_facets()?;
        let vocabulary = Vocabulary::from_listing(listing);
        info!(facets = vocabulary.len(), "vocabulary refreshed");
        self.replace(vocabulary);
        Ok(())
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new()
    }
}
