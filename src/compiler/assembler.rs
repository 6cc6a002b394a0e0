//! Expression assembler
//!
//! Folds the resolved fragment sequence into one filter expression. Three
//! passes, each pure:
//!
//! 1. render: each fragment becomes a text piece; OR-sets join with ` OR `,
//!    negation distributes by De Morgan, group markers attach as parentheses
//! 2. rebalance: a piece opening an unmatched `(` merges with everything up
//!    to the piece carrying the matching `)`, both markers stripped
//! 3. fold: implicit `AND` insertion, OR-set parenthesization, and explicit
//!    `NOT` distribution, driven by the previous piece kind
//!
//! Markers that survive rebalancing unmatched are left in the output for the
//! validator to reject.

use super::classifier::Operator;
use super::resolver::Resolved;

/// One resolved fragment of the token sequence
#[derive(Clone, Debug)]
pub enum Fragment {
    Operator(Operator),
    Term {
        resolved: Resolved,
        negated: bool,
        group_open: bool,
        group_close: bool,
    },
}

/// A rendered piece awaiting the fold
#[derive(Clone, Debug, PartialEq)]
enum Piece {
    Operator(Operator),
    Clause(String),
}

/// Kind of the previously folded piece
#[derive(Clone, Copy, Debug, PartialEq)]
enum Prev {
    Start,
    Operator(Operator),
    Clause,
}

/// Assemble the fragment sequence into the final filter expression.
pub fn assemble(fragments: Vec<Fragment>) -> String {
    let pieces = fragments.into_iter().map(render).collect();
    fold(rebalance(pieces))
}

fn render(fragment: Fragment) -> Piece {
    match fragment {
        Fragment::Operator(op) => Piece::Operator(op),
        Fragment::Term {
            resolved,
            negated,
            group_open,
            group_close,
        } => {
            let body = match resolved {
                Resolved::Verbatim(text) => {
                    if negated {
                        format!("NOT {text}")
                    } else {
                        text
                    }
                }
                Resolved::Facets(pairs) => {
                    if negated {
                        // De Morgan: a negated OR-set becomes an AND of NOTs.
                        pairs
                            .iter()
                            .map(|pair| format!("NOT {}", pair.to_filter()))
                            .collect::<Vec<_>>()
                            .join(" AND ")
                    } else {
                        pairs
                            .iter()
                            .map(|pair| pair.to_filter())
                            .collect::<Vec<_>>()
                            .join(" OR ")
                    }
                }
            };

            let mut text = String::with_capacity(body.len() + 2);
            if group_open {
                text.push('(');
            }
            text.push_str(&body);
            if group_close {
                text.push(')');
            }
            Piece::Clause(text)
        }
    }
}

/// Net parenthesis depth of a piece's text.
fn paren_depth(text: &str) -> i32 {
    text.chars().fold(0, |depth, ch| match ch {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

/// Merge each unmatched `(` piece with everything up to its closing piece.
/// Single left-to-right pass; unmatched markers are left in place.
fn rebalance(mut pieces: Vec<Piece>) -> Vec<Piece> {
    let mut i = 0;
    while i < pieces.len() {
        let opens = matches!(&pieces[i], Piece::Clause(text)
            if text.starts_with('(') && paren_depth(text) > 0);
        if !opens {
            i += 1;
            continue;
        }

        let close = (i + 1..pieces.len()).find(|&j| {
            matches!(&pieces[j], Piece::Clause(text)
                if text.ends_with(')') && paren_depth(text) < 0)
        });
        let Some(j) = close else {
            i += 1;
            continue;
        };

        let count = j - i + 1;
        let mut merged = String::new();
        for (k, piece) in pieces.drain(i..=j).enumerate() {
            let mut part = match piece {
                Piece::Operator(op) => op.as_str().to_string(),
                Piece::Clause(text) => text,
            };
            if k == 0 {
                part.remove(0);
            }
            if k == count - 1 {
                part.pop();
            }
            if !merged.is_empty() {
                merged.push(' ');
            }
            merged.push_str(&part);
        }
        pieces.insert(i, Piece::Clause(merged));
        i += 1;
    }
    pieces
}

fn is_operator_text(text: &str) -> bool {
    matches!(text, "AND" | "OR" | "NOT")
}

/// Fold pieces into the final expression, tracking the previous piece kind.
fn fold(pieces: Vec<Piece>) -> String {
    let mut out: Vec<String> = Vec::with_capacity(pieces.len());
    let mut prev = Prev::Start;

    for piece in pieces {
        match piece {
            Piece::Operator(op) => {
                out.push(op.as_str().to_string());
                prev = Prev::Operator(op);
            }
            Piece::Clause(text) => {
                let or_set = text.contains(" OR ");
                let mut formatted = text;

                match prev {
                    Prev::Operator(Operator::Not) if or_set => {
                        // The explicit NOT is consumed by the distribution.
                        out.pop();
                        formatted = formatted
                            .split(" OR ")
                            .map(|clause| format!("NOT {clause}"))
                            .collect::<Vec<_>>()
                            .join(" AND ");
                        if out.last().is_some_and(|last| !is_operator_text(last)) {
                            out.push("AND".to_string());
                        }
                        if !out.is_empty() {
                            formatted = format!("({formatted})");
                        }
                    }
                    Prev::Clause | Prev::Operator(Operator::And) | Prev::Operator(Operator::Or)
                        if or_set =>
                    {
                        if prev == Prev::Clause {
                            out.push("AND".to_string());
                        }
                        formatted = format!("({formatted})");
                    }
                    Prev::Clause => out.push("AND".to_string()),
                    _ => {}
                }

                out.push(formatted);
                prev = Prev::Clause;
            }
        }
    }

    out.join(" ")
}
