//! Boolean search compilation for faceted search backends
//!
//! boolex turns a free-text boolean search string such as
//! `red or blue -sold shoe*` into a filter expression in a faceted-search
//! backend's filter grammar (`facet:value` terms combined with `AND`, `OR`,
//! `NOT`, and parentheses). Bare words resolve against a vocabulary of
//! known facet values by exact, wildcard, or similarity match; a query that
//! cannot be fully resolved falls back to plain free-text search.
//!
//! The crate is a pure transformer: it executes no searches, ranks nothing,
//! and persists nothing. The [`QueryRouter`] decides per request whether to
//! compile at all, and the [`VocabularyStore`] holds the facet vocabulary
//! snapshot the resolver reads.

pub mod compiler;
pub mod config;
pub mod error;
pub mod router;
pub mod vocabulary;

pub use compiler::validator::{FilterValidator, GrammarValidator};
pub use compiler::{is_boolean_query, CompileResult, QueryCompiler};
pub use config::CompilerConfig;
pub use error::{BoolexError, Result};
pub use router::{QueryRouter, SearchPlan};
pub use vocabulary::{FacetListing, FacetSource, Vocabulary, VocabularyStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
