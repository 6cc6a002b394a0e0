//! End-to-end compile behavior against a storefront-style vocabulary.

use boolex::{QueryCompiler, Vocabulary};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn storefront_vocabulary() -> Vocabulary {
    Vocabulary::new()
        .with_facet("gender", ["men", "women"])
        .with_facet("categories", ["shoes", "shoe-covers", "running"])
        .with_facet("brand", ["nike", "adidas"])
        .with_facet("color", ["red", "blue", "black"])
}

fn compile(query: &str) -> boolex::CompileResult {
    QueryCompiler::new().compile(query, &storefront_vocabulary())
}

#[test]
fn explicit_facet_value_round_trips_unchanged() {
    let result = compile("brand:nike");
    assert_eq!(result.filters, "brand:nike");
    assert_eq!(result.error_message, None);
}

#[test]
fn adjacent_terms_get_implicit_and() {
    assert_eq!(compile("red nike").filters, "color:red AND brand:nike");
}

#[test]
fn negated_wildcard_distributes_over_all_matches() {
    // "colo*" expands through the facet name to every color value; negation
    // distributes by De Morgan across all of them.
    assert_eq!(
        compile("-colo*").filters,
        "NOT color:red AND NOT color:blue AND NOT color:black"
    );
}

#[test]
fn or_set_is_parenthesized_mid_expression() {
    assert_eq!(
        compile("nike and shoe*").filters,
        "brand:nike AND (categories:shoes OR categories:shoe-covers)"
    );
}

#[test]
fn or_set_is_parenthesized_after_explicit_or() {
    assert_eq!(
        compile("red or shoe*").filters,
        "color:red OR (categories:shoes OR categories:shoe-covers)"
    );
}

#[test]
fn leading_or_set_stays_bare() {
    assert_eq!(
        compile("shoe*").filters,
        "categories:shoes OR categories:shoe-covers"
    );
}

#[test]
fn explicit_not_distributes_and_wraps() {
    assert_eq!(
        compile("nike and not shoe*").filters,
        "brand:nike AND (NOT categories:shoes AND NOT categories:shoe-covers)"
    );
}

#[test]
fn leading_not_distribution_stays_bare() {
    assert_eq!(
        compile("not shoe*").filters,
        "NOT categories:shoes AND NOT categories:shoe-covers"
    );
}

#[test]
fn not_over_group_distributes() {
    assert_eq!(
        compile("not (red or blue)").filters,
        "NOT color:red AND NOT color:blue"
    );
}

#[test]
fn group_markers_are_rebalanced() {
    assert_eq!(
        compile("nike and (red or blue)").filters,
        "brand:nike AND (color:red OR color:blue)"
    );
}

#[test]
fn negation_flag_on_single_term() {
    assert_eq!(compile("red -nike").filters, "color:red AND NOT brand:nike");
}

#[test]
fn quoted_word_matches_exactly_despite_casing() {
    assert_eq!(compile("\"RED\" and nike").filters, "color:red AND brand:nike");
}

#[test]
fn quoted_word_never_falls_back_to_fuzzy() {
    // Unquoted, "runnin" resolves by similarity; quoted it must not.
    assert_eq!(compile("runnin and nike").filters, "categories:running AND brand:nike");

    let quoted = compile("\"runnin\" and nike");
    assert_eq!(quoted.filters, "");
    assert_eq!(quoted.error_message, None);
}

#[test]
fn similarity_at_threshold_stays_unresolved() {
    // One edit over five characters scores exactly 0.8, not above it.
    let result = compile("nikee and red");
    assert_eq!(result.filters, "");
    assert_eq!(result.error_message, None);
}

#[test]
fn unresolved_term_aborts_the_whole_query() {
    // "red" alone resolves, but the whole compile fails fast.
    let result = compile("red and zzzqqq");
    assert_eq!(result.filters, "");
    assert_eq!(result.error_message, None);
}

#[test]
fn multi_word_values_are_single_quoted() {
    let vocabulary = Vocabulary::new().with_facet("categories", ["running shoes"]);
    let result = QueryCompiler::new().compile("running*", &vocabulary);
    assert_eq!(result.filters, "categories:'running shoes'");
}

#[test]
fn same_value_under_two_facets_forms_an_or_set() {
    let vocabulary = Vocabulary::new()
        .with_facet("brand", ["nike"])
        .with_facet("color", ["red"])
        .with_facet("tags", ["red"]);
    let result = QueryCompiler::new().compile("nike and red", &vocabulary);
    assert_eq!(result.filters, "brand:nike AND (color:red OR tags:red)");
}

#[test]
fn unbalanced_group_surfaces_a_grammar_error() {
    let result = compile("(red and nike");
    assert_eq!(result.filters, "(color:red AND brand:nike");
    assert_eq!(
        result.error_message.as_deref(),
        Some("Unbalanced parentheses in filter expression")
    );
    assert!(!result.is_usable());
}

#[test]
fn malformed_operator_sequence_surfaces_a_grammar_error() {
    let result = compile("red and or nike");
    assert_eq!(result.error_message.as_deref(), Some("Unexpected operator `OR`"));
}

#[test]
fn compilation_is_idempotent() {
    let vocabulary = storefront_vocabulary();
    let compiler = QueryCompiler::new();
    let first = compiler.compile("red or blue shoe*", &vocabulary);
    let second = compiler.compile("red or blue shoe*", &vocabulary);
    assert_eq!(first, second);
    assert!(first.is_usable());
}

proptest! {
    #[test]
    fn compile_never_panics_and_is_deterministic(query in r#"[a-z()*: "-]{0,40}"#) {
        let vocabulary = storefront_vocabulary();
        let compiler = QueryCompiler::new();
        let first = compiler.compile(&query, &vocabulary);
        let second = compiler.compile(&query, &vocabulary);
        prop_assert_eq!(first, second);
    }
}
