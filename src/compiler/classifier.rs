//! Token classifier for boolean search strings
//!
//! Splits a raw query into words and classifies each one as a boolean
//! operator or a candidate term. Markers on a word (negation, group
//! boundaries, wildcards, quotes, an embedded colon) become independent
//! flags on the term; no word is ever dropped.

/// Boolean operators recognized in a query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    /// Recognize a word as an operator, case-insensitively.
    pub fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") {
            Some(Operator::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(Operator::Or)
        } else if word.eq_ignore_ascii_case("not") {
            Some(Operator::Not)
        } else {
            None
        }
    }

    /// The operator as it appears in the filter grammar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }
}

/// A candidate term with its classification flags
///
/// `text` is the word with all recognized markers stripped. An explicit
/// term (`facet:value`) keeps its text verbatim from the point the colon was
/// detected; wildcard and quote markers are left in place on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub text: String,
    pub negated: bool,
    pub group_open: bool,
    pub group_close: bool,
    pub wildcard_prefix: bool,
    pub wildcard_suffix: bool,
    pub quoted: bool,
    pub explicit: bool,
}

/// A lexical unit of the input
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Operator(Operator),
    Term(Term),
}

/// Classify a raw query string into an ordered token sequence.
pub fn classify(query: &str) -> Vec<Token> {
    let normalized = normalize_quotes(query);
    normalized.split_whitespace().map(classify_word).collect()
}

/// Turn every quote character into the canonical double quote.
fn normalize_quotes(query: &str) -> String {
    query
        .chars()
        .map(|ch| match ch {
            '\'' | '`' => '"',
            ch => ch,
        })
        .collect()
}

fn classify_word(word: &str) -> Token {
    if let Some(op) = Operator::from_word(word) {
        return Token::Operator(op);
    }

    let mut text = word;
    let mut negated = false;
    let mut group_open = false;

    loop {
        if !negated && text.starts_with('-') {
            negated = true;
            text = &text[1..];
        } else if !group_open && text.starts_with('(') {
            group_open = true;
            text = &text[1..];
        } else {
            break;
        }
    }

    let group_close = text.ends_with(')');
    if group_close {
        text = &text[..text.len() - 1];
    }

    // Explicit facet:value bypasses all further stripping and resolution.
    if text.contains(':') {
        return Token::Term(Term {
            text: text.to_string(),
            negated,
            group_open,
            group_close,
            wildcard_prefix: false,
            wildcard_suffix: false,
            quoted: false,
            explicit: true,
        });
    }

    let mut wildcard_prefix = false;
    let mut wildcard_suffix = false;
    if let Some(rest) = text.strip_prefix('*') {
        wildcard_prefix = true;
        text = rest;
    }
    if let Some(rest) = text.strip_suffix('*') {
        wildcard_suffix = true;
        text = rest;
    }

    let quoted = is_quoted(text);
    if quoted {
        text = &text[1..text.len() - 1];
    }

    Token::Term(Term {
        text: text.to_string(),
        negated,
        group_open,
        group_close,
        wildcard_prefix,
        wildcard_suffix,
        quoted,
        explicit: false,
    })
}

/// A word fully surrounded by canonical quotes, with none inside.
fn is_quoted(text: &str) -> bool {
    text.len() >= 2
        && text.starts_with('"')
        && text.ends_with('"')
        && !text[1..text.len() - 1].contains('"')
}
