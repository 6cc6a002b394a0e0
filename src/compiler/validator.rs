//! Filter grammar validation
//!
//! The compiler never submits an expression it has not checked against the
//! backend's filter grammar. `FilterValidator` is the seam: integrations
//! can plug in the hosted backend's own validator, and the error message is
//! surfaced to the caller unchanged. `GrammarValidator` is the shipped
//! implementation, a token walk enforcing the grammar's shape:
//!
//! ```text
//! expression := clause ((AND | OR) clause)*
//! clause     := NOT? (filter | '(' expression ')')
//! filter     := facet ':' value        value may be single-quoted
//! ```

use crate::error::BoolexError;
use crate::Result;

/// Checks an assembled expression against the backend filter grammar
pub trait FilterValidator: Send + Sync {
    /// Err carries the grammar error message, surfaced to callers unchanged.
    fn validate(&self, expression: &str) -> Result<()>;
}

/// Shipped validator for the backend filter grammar
#[derive(Clone, Copy, Debug, Default)]
pub struct GrammarValidator;

/// What the walk expects next
#[derive(Clone, Copy, PartialEq)]
enum Expect {
    Filter,
    FilterAfterNot,
    OperatorOrClose,
}

impl FilterValidator for GrammarValidator {
    fn validate(&self, expression: &str) -> Result<()> {
        let tokens = tokenize(expression);
        let mut depth: u32 = 0;
        let mut state = Expect::Filter;

        for token in &tokens {
            match token.as_str() {
                "(" => {
                    if state == Expect::OperatorOrClose {
                        return invalid("Unexpected `(` after a filter");
                    }
                    depth += 1;
                    state = Expect::Filter;
                }
                ")" => {
                    if depth == 0 {
                        return invalid("Unbalanced parentheses in filter expression");
                    }
                    if state != Expect::OperatorOrClose {
                        return invalid("Unexpected `)`");
                    }
                    depth -= 1;
                }
                "AND" | "OR" => {
                    if state != Expect::OperatorOrClose {
                        return invalid(&format!("Unexpected operator `{token}`"));
                    }
                    state = Expect::Filter;
                }
                "NOT" => {
                    if state != Expect::Filter {
                        return invalid("Unexpected operator `NOT`");
                    }
                    state = Expect::FilterAfterNot;
                }
                filter => {
                    if state == Expect::OperatorOrClose {
                        return invalid(&format!("Expected an operator before `{filter}`"));
                    }
                    if !is_facet_filter(filter) {
                        return invalid(&format!("Expected a facet filter, found `{filter}`"));
                    }
                    state = Expect::OperatorOrClose;
                }
            }
        }

        if depth != 0 {
            return invalid("Unbalanced parentheses in filter expression");
        }
        if state != Expect::OperatorOrClose {
            return invalid("Unexpected end of filter expression");
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Result<()> {
    Err(BoolexError::InvalidFilter(message.to_string()))
}

/// Split an expression into tokens: parentheses stand alone, whitespace
/// separates, single-quoted spans stay inside their filter token.
fn tokenize(expression: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in expression.chars() {
        match ch {
            '\'' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '(' | ')' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// A filter token has a facet name and a value on either side of a colon.
fn is_facet_filter(token: &str) -> bool {
    token
        .split_once(':')
        .is_some_and(|(facet, value)| !facet.is_empty() && !value.is_empty())
}
