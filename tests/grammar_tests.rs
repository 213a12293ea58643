//! Unit tests for the grammar loader

use lr1_parser::grammar::{self, AUGMENTED_START, Grammar};
use lr1_parser::{Catalog, GrammarError};

fn try_load(text: &str, names: &[&str]) -> lr1_parser::Result<(Grammar, Catalog)> {
    let mut catalog = Catalog::from_names(names.iter().copied());
    let tokens = grammar::spec_lexicon()
        .unwrap()
        .scan(text, &[grammar::WHITESPACE])
        .unwrap();
    let grammar = Grammar::from_tokens(&tokens, &mut catalog)?;
    Ok((grammar, catalog))
}

fn load(text: &str, names: &[&str]) -> (Grammar, Catalog) {
    try_load(text, names).unwrap()
}

#[test]
fn test_first_lhs_becomes_start_symbol() {
    let (grammar, catalog) = load("List -> Pair ; Pair -> a ;", &["List", "Pair", "a"]);
    assert_eq!(grammar.start(), catalog.get("List").unwrap());
    assert_eq!(grammar.goal(), catalog.get(AUGMENTED_START).unwrap());
    assert_eq!(grammar.production(0).rhs, vec![grammar.start()]);
}

#[test]
fn test_partition_is_disjoint() {
    let (grammar, catalog) = load(
        "Expr -> Expr + Term ; | Term ; Term -> num ;",
        &["Expr", "Term", "+", "num"],
    );
    for nt in grammar.nonterminals() {
        assert!(!grammar.terminals().contains(nt), "NT ∩ T must be empty");
    }
    assert!(grammar.nonterminals().contains(&grammar.start()));
    assert!(grammar.terminals().contains(&catalog.get("+").unwrap()));
    assert!(grammar.terminals().contains(&catalog.get("num").unwrap()));
}

#[test]
fn test_alternatives_share_the_lhs() {
    let (grammar, catalog) = load("S -> a S ; | a ;", &["S", "a"]);
    let s = catalog.get("S").unwrap();
    let indices = grammar.productions_of(s);
    assert_eq!(indices.len(), 2);
    for &index in indices {
        assert_eq!(grammar.production(index).lhs, s);
    }
}

#[test]
fn test_epsilon_alternative_becomes_empty_rhs() {
    let (grammar, catalog) = load("S -> a B ; B -> Epsilon ; | b ;", &["S", "B", "a", "b"]);
    let b = catalog.get("B").unwrap();
    let empty = grammar.productions_of(b)[0];
    assert!(grammar.production(empty).rhs.is_empty());
}

#[test]
fn test_unknown_word_is_named_in_the_error() {
    let err = try_load("Goal -> Xyz ;", &["Goal"]).unwrap_err();
    match &err {
        GrammarError::UnknownWord { word } => assert_eq!(word, "Xyz"),
        other => panic!("expected UnknownWord, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("Rules Synthax Error"));
    assert!(message.contains("Xyz"));
}

#[test]
fn test_malformed_sequence_reports_the_category() {
    let err = try_load("S -> -> a ;", &["S", "a"]).unwrap_err();
    match err {
        GrammarError::MalformedRule { category, .. } => assert_eq!(category, "`->`"),
        other => panic!("expected MalformedRule, got {other:?}"),
    }
}

#[test]
fn test_dangling_rule_is_rejected() {
    let err = try_load("S -> a", &["S", "a"]).unwrap_err();
    assert!(matches!(err, GrammarError::MalformedRule { .. }));
}

#[test]
fn test_leading_alternative_is_rejected() {
    let err = try_load("| a ;", &["S", "a"]).unwrap_err();
    assert!(matches!(err, GrammarError::MalformedRule { .. }));
}

#[test]
fn test_duplicate_production_is_rejected() {
    let err = try_load("S -> a ; S -> a ;", &["S", "a"]).unwrap_err();
    assert!(matches!(err, GrammarError::DuplicateProduction { .. }));
}

#[test]
fn test_empty_spec_is_rejected() {
    let err = try_load("", &["S"]).unwrap_err();
    assert!(matches!(err, GrammarError::EmptyInput));
}
