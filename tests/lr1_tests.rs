//! Unit tests for the LR(1) item algebra, canonical collection, and tables

use lr1_parser::grammar::{self, Grammar};
use lr1_parser::item::{Item, ItemSet, closure};
use lr1_parser::tables::{Action, ConflictKind};
use lr1_parser::{Catalog, CanonicalCollection, FirstSets, ParseTables, Symbol};
use std::collections::HashSet;

fn load(text: &str, names: &[&str]) -> (Grammar, Catalog) {
    let mut catalog = Catalog::from_names(names.iter().copied());
    let tokens = grammar::spec_lexicon()
        .unwrap()
        .scan(text, &[grammar::WHITESPACE])
        .unwrap();
    let grammar = Grammar::from_tokens(&tokens, &mut catalog).unwrap();
    (grammar, catalog)
}

const EXPR_SPEC: &str = "Expr -> Expr + Term ; | Term ; Term -> Term * Factor ; | Factor ; \
                         Factor -> ( Expr ) ; | num ;";
const EXPR_NAMES: &[&str] = &["Expr", "Term", "Factor", "+", "*", "(", ")", "num"];

#[test]
fn test_closure_is_idempotent() {
    let (grammar, _) = load(EXPR_SPEC, EXPR_NAMES);
    let first = FirstSets::compute(&grammar);

    let seed = ItemSet::from([Item::new(0, 0, Symbol::END)]);
    let once = closure(&grammar, &first, seed);
    let twice = closure(&grammar, &first, once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_closure_lookaheads_are_terminals() {
    let (grammar, _) = load(EXPR_SPEC, EXPR_NAMES);
    let first = FirstSets::compute(&grammar);

    let cc0 = closure(&grammar, &first, ItemSet::from([Item::new(0, 0, Symbol::END)]));
    for item in &cc0 {
        assert!(
            item.lookahead.is_end() || grammar.terminals().contains(&item.lookahead),
            "lookahead of {item:?} is not a terminal"
        );
    }
}

#[test]
fn test_collection_states_are_unique() {
    let (grammar, _) = load(EXPR_SPEC, EXPR_NAMES);
    let first = FirstSets::compute(&grammar);
    let collection = CanonicalCollection::build(&grammar, &first);

    let distinct: HashSet<&ItemSet> = collection.states.iter().collect();
    assert_eq!(distinct.len(), collection.state_count());
}

#[test]
fn test_collection_is_deterministic() {
    let (grammar, _) = load(EXPR_SPEC, EXPR_NAMES);
    let first = FirstSets::compute(&grammar);

    let one = CanonicalCollection::build(&grammar, &first);
    let two = CanonicalCollection::build(&grammar, &first);
    assert_eq!(one.states, two.states);
    assert_eq!(one.transitions, two.transitions);
}

#[test]
fn test_transitions_are_unique_per_state_and_symbol() {
    let (grammar, _) = load(EXPR_SPEC, EXPR_NAMES);
    let first = FirstSets::compute(&grammar);
    let collection = CanonicalCollection::build(&grammar, &first);

    let mut keys = HashSet::new();
    for transition in &collection.transitions {
        assert!(
            keys.insert((transition.from, transition.symbol)),
            "duplicate transition key"
        );
        assert!(transition.to < collection.state_count());
    }
}

#[test]
fn test_accept_appears_once_and_only_under_end() {
    let (grammar, _) = load(EXPR_SPEC, EXPR_NAMES);
    let first = FirstSets::compute(&grammar);
    let collection = CanonicalCollection::build(&grammar, &first);
    let (tables, conflicts) = ParseTables::build(&grammar, &collection);
    assert!(conflicts.is_empty());

    let mut accepts = 0;
    for state in 0..tables.state_count() {
        for (column, &action) in tables.action_row(state).iter().enumerate() {
            if action == Action::Accept {
                accepts += 1;
                assert_eq!(tables.action_columns()[column], Symbol::END);
            }
        }
    }
    assert_eq!(accepts, 1);
}

#[test]
fn test_right_recursion_is_lr1() {
    // S -> a S | a needs no conflict: state 1 shifts on `a` and reduces
    // only under End.
    let (grammar, _) = load("S -> a S ; | a ;", &["S", "a"]);
    let first = FirstSets::compute(&grammar);
    let collection = CanonicalCollection::build(&grammar, &first);
    let (_, conflicts) = ParseTables::build(&grammar, &collection);
    assert!(conflicts.is_empty(), "unexpected conflicts: {conflicts:?}");
}

#[test]
fn test_ambiguous_grammar_reports_shift_reduce() {
    let (grammar, catalog) = load("E -> E + E ; | num ;", &["E", "+", "num"]);
    let first = FirstSets::compute(&grammar);
    let collection = CanonicalCollection::build(&grammar, &first);
    let (_, conflicts) = ParseTables::build(&grammar, &collection);

    assert!(!conflicts.is_empty(), "E -> E + E | num must conflict");
    let conflict = conflicts
        .iter()
        .find(|c| c.kind == ConflictKind::ShiftReduce)
        .expect("a shift/reduce conflict must be reported");
    assert_eq!(catalog.name(conflict.lookahead), "+");
}

#[test]
fn test_common_prefix_reports_reduce_reduce() {
    let (grammar, _) = load("S -> A ; | B ; A -> a ; B -> a ;", &["S", "A", "B", "a"]);
    let first = FirstSets::compute(&grammar);
    let collection = CanonicalCollection::build(&grammar, &first);
    let (_, conflicts) = ParseTables::build(&grammar, &collection);

    assert!(
        conflicts
            .iter()
            .any(|c| c.kind == ConflictKind::ReduceReduce),
        "A -> a / B -> a must collide on the End lookahead"
    );
}

#[test]
fn test_conflicted_cell_keeps_the_first_write() {
    let (grammar, _) = load("E -> E + E ; | num ;", &["E", "+", "num"]);
    let first = FirstSets::compute(&grammar);
    let collection = CanonicalCollection::build(&grammar, &first);
    let (tables, conflicts) = ParseTables::build(&grammar, &collection);

    for conflict in &conflicts {
        assert_eq!(
            tables.action(conflict.state, conflict.lookahead),
            conflict.kept
        );
    }
}
