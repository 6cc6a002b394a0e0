//! Boolean search compilation
//!
//! Turns a free-text boolean query into a filter expression in the backend
//! filter grammar. Bare words resolve against the vocabulary; operators,
//! negation, wildcards, and explicit `facet:value` terms pass through the
//! classifier. Compilation is pure: the same query against the same
//! vocabulary snapshot always yields the same result.
//!
//! ```text
//! red or blue        ->  color:red OR color:blue
//! nike and shoe*     ->  brand:nike AND (categories:shoes OR categories:shoe-covers)
//! -colo*             ->  NOT color:red AND NOT color:blue
//! brand:nike         ->  brand:nike
//! ```
//!
//! # Example
//!
//! ```rust
//! use boolex::{QueryCompiler, Vocabulary};
//!
//! let vocabulary = Vocabulary::new()
//!     .with_facet("color", ["red", "blue"])
//!     .with_facet("brand", ["nike"]);
//!
//! let result = QueryCompiler::new().compile("red and brand:nike", &vocabulary);
//! assert_eq!(result.filters, "color:red AND brand:nike");
//! ```

pub mod assembler;
pub mod classifier;
pub mod resolver;
pub mod validator;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CompilerConfig;
use crate::vocabulary::Vocabulary;
use assembler::{assemble, Fragment};
use classifier::{classify, Token};
use resolver::resolve_term;
use validator::{FilterValidator, GrammarValidator};

/// Pattern spotting boolean syntax: `and`/`or` between words, `not` or a
/// `-` negation, a `*` wildcard, or an explicit `facet:value`.
static BOOLEAN_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\sand\s|\sor\s|\s?not\s|(?:^|\s)-\w|\w+\*|\*\w+|\w+:\w+")
        .expect("boolean query pattern is valid")
});

/// Cheap pre-check: does this query use boolean syntax at all?
///
/// Queries failing this test should go straight to free-text search without
/// invoking the compiler.
pub fn is_boolean_query(query: &str) -> bool {
    BOOLEAN_QUERY.is_match(query)
}

/// Outcome of one compile call
///
/// At most one of the fields is meaningful: usable filters with no error, or
/// an error message alongside the rejected expression. Empty filters with no
/// error mean the query could not be compiled and the caller should fall
/// back to free-text search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileResult {
    pub filters: String,
    pub error_message: Option<String>,
}

impl CompileResult {
    /// Filters are present and passed validation.
    pub fn is_usable(&self) -> bool {
        !self.filters.is_empty() && self.error_message.is_none()
    }
}

/// Compiles boolean queries into validated filter expressions
pub struct QueryCompiler {
    config: CompilerConfig,
    validator: Box<dyn FilterValidator>,
}

impl QueryCompiler {
    /// Create a compiler with the default configuration and the shipped
    /// grammar validator.
    pub fn new() -> Self {
        Self {
            config: CompilerConfig::default(),
            validator: Box::new(GrammarValidator),
        }
    }

    /// Set the compiler configuration.
    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Substitute the backend's own filter grammar validator.
    pub fn with_validator(mut self, validator: impl FilterValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Compile a query against a vocabulary snapshot.
    ///
    /// Never fails for malformed input: an unresolved term yields an empty
    /// result, a grammar violation yields an error message, and both mean
    /// the caller should fall back to free-text search.
    pub fn compile(&self, query: &str, vocabulary: &Vocabulary) -> CompileResult {
        let tokens = classify(query);
        let mut fragments = Vec::with_capacity(tokens.len());

        for token in tokens {
            match token {
                Token::Operator(op) => fragments.push(Fragment::Operator(op)),
                Token::Term(term) => {
                    let resolved =
                        resolve_term(&term, vocabulary, self.config.similarity_threshold);
                    let Some(resolved) = resolved else {
                        debug!(term = %term.text, "unresolved term, compile aborted");
                        return CompileResult::default();
                    };
                    fragments.push(Fragment::Term {
                        resolved,
                        negated: term.negated,
                        group_open: term.group_open,
                        group_close: term.group_close,
                    });
                }
            }
        }

        let filters = assemble(fragments);
        if filters.is_empty() {
            return CompileResult::default();
        }

        if let Err(err) = self.validator.validate(&filters) {
            return CompileResult {
                filters,
                error_message: Some(err.to_string()),
            };
        }

        CompileResult {
            filters,
            error_message: None,
        }
    }
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new()
    }
}
