//! Query routing
//!
//! Decides, per incoming search request, whether to compile the query into
//! filters or fall back to plain free-text search. The router owns the one
//! piece of session state in the crate: the last compiled query/filter pair,
//! kept so a page-only change can reapply the filters instead of
//! reclassifying the empty query text the filter-driven mode leaves behind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compiler::{is_boolean_query, QueryCompiler};
use crate::vocabulary::VocabularyStore;

/// How one search request should be executed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchPlan {
    /// Plain free-text search with the backend's own query syntax enabled
    FreeText { query: String, page: u32 },
    /// Filter-driven search; the filters carry all semantics and the
    /// visible query is cleared
    Filtered { filters: String, page: u32 },
}

impl SearchPlan {
    /// Whether the backend's free-text syntax parsing should be enabled.
    pub fn advanced_syntax(&self) -> bool {
        matches!(self, SearchPlan::FreeText { .. })
    }

    /// The filter expression to apply, empty for free-text search.
    pub fn filters(&self) -> &str {
        match self {
            SearchPlan::FreeText { .. } => "",
            SearchPlan::Filtered { filters, .. } => filters,
        }
    }

    /// The visible query text, empty for filter-driven search.
    pub fn query(&self) -> &str {
        match self {
            SearchPlan::FreeText { query, .. } => query,
            SearchPlan::Filtered { .. } => "",
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            SearchPlan::FreeText { page, .. } | SearchPlan::Filtered { page, .. } => *page,
        }
    }
}

/// The last successfully compiled request
#[derive(Clone, Debug)]
struct CompiledQuery {
    query: String,
    filters: String,
    page: u32,
}

/// Routes search requests to free-text or filter-driven execution
pub struct QueryRouter {
    compiler: QueryCompiler,
    vocabulary: Arc<VocabularyStore>,
    last: Option<CompiledQuery>,
}

impl QueryRouter {
    pub fn new(vocabulary: Arc<VocabularyStore>) -> Self {
        Self {
            compiler: QueryCompiler::new(),
            vocabulary,
            last: None,
        }
    }

    /// Substitute a customized compiler.
    pub fn with_compiler(mut self, compiler: QueryCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Decide how to execute one search request.
    pub fn route(&mut self, query: &str, page: u32) -> SearchPlan {
        if query.trim().is_empty() {
            // Filter-driven mode clears the visible query text, so an empty
            // query with only the page changed means pagination, not a new
            // search.
            if let Some(last) = self.last.as_mut() {
                if last.page != page {
                    last.page = page;
                    debug!(query = %last.query, page, "page-only change, reapplying filters");
                    return SearchPlan::Filtered {
                        filters: last.filters.clone(),
                        page,
                    };
                }
            }
            self.last = None;
            return SearchPlan::FreeText {
                query: String::new(),
                page,
            };
        }

        if !is_boolean_query(query) {
            self.last = None;
            return SearchPlan::FreeText {
                query: query.to_string(),
                page,
            };
        }

        let snapshot = self.vocabulary.snapshot();
        let result = self.compiler.compile(query, &snapshot);

        if result.is_usable() {
            debug!(query, filters = %result.filters, "boolean search compiled");
            self.last = Some(CompiledQuery {
                query: query.to_string(),
                filters: result.filters.clone(),
                page,
            });
            SearchPlan::Filtered {
                filters: result.filters,
                page,
            }
        } else {
            if let Some(message) = &result.error_message {
                debug!(query, %message, "filter validation failed, falling back");
            }
            self.last = None;
            SearchPlan::FreeText {
                query: query.to_string(),
                page,
            }
        }
    }
}
