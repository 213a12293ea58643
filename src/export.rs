//! Textual export of the generator's intermediate artifacts.
//!
//! Human-readable dumps of the grammar, FIRST sets, canonical
//! collection, transition relation, parse tables, and token streams.
//! Nothing downstream consumes these formats.

use crate::catalog::{Catalog, Symbol};
use crate::collection::CanonicalCollection;
use crate::first::FirstSets;
use crate::grammar::Grammar;
use crate::item::Item;
use crate::scanner::Token;
use crate::tables::{Action, ParseTables};
use std::io::{self, Write};

pub fn export_grammar(grammar: &Grammar, catalog: &Catalog, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Goal: {}", catalog.name(grammar.start()))?;
    write!(out, "Terminals\n [")?;
    for &terminal in grammar.terminals() {
        write!(out, "{}, ", catalog.name(terminal))?;
    }
    writeln!(out, "]")?;
    write!(out, "Non Terminals\n [")?;
    for &nonterminal in grammar.nonterminals() {
        write!(out, "{}, ", catalog.name(nonterminal))?;
    }
    writeln!(out, "]")?;
    writeln!(out, "Production Rules")?;
    for (index, production) in grammar.productions().iter().enumerate() {
        writeln!(out, "{index} | {}", production.display(catalog))?;
    }
    Ok(())
}

pub fn export_first_sets(
    grammar: &Grammar,
    first: &FirstSets,
    catalog: &Catalog,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "\n--- FIRST SETS ---")?;
    for &nonterminal in grammar.nonterminals() {
        let names: Vec<&str> = first
            .first(nonterminal)
            .iter()
            .map(|&symbol| catalog.name(symbol))
            .collect();
        writeln!(
            out,
            "FIRST({}) = {{ {} }}",
            catalog.name(nonterminal),
            names.join(", ")
        )?;
    }
    writeln!(out, "------------------")
}

fn format_item(item: &Item, grammar: &Grammar, catalog: &Catalog) -> String {
    let production = grammar.production(item.production);
    let mut rhs = String::new();
    for (position, &symbol) in production.rhs.iter().enumerate() {
        if position == item.dot {
            rhs.push('*');
        }
        rhs.push_str(catalog.name(symbol));
        rhs.push(' ');
    }
    if item.dot == production.rhs.len() {
        rhs.push('*');
    }
    format!(
        "[ {} -> {}, {} ]",
        catalog.name(production.lhs),
        rhs.trim_end(),
        catalog.name(item.lookahead)
    )
}

pub fn export_collection(
    collection: &CanonicalCollection,
    grammar: &Grammar,
    catalog: &Catalog,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "\n=== CANONICAL COLLECTION ===")?;
    for (index, items) in collection.states.iter().enumerate() {
        writeln!(out, "-------- State {index} --------")?;
        for item in items {
            writeln!(out, "{}", format_item(item, grammar, catalog))?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Total States: {}", collection.state_count())?;
    writeln!(out, "============================")
}

pub fn export_transitions(
    collection: &CanonicalCollection,
    catalog: &Catalog,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(
        out,
        "\n=== LR(1) Transition Table ({} entries) ===",
        collection.transitions.len()
    )?;
    for transition in &collection.transitions {
        writeln!(
            out,
            "  State {} --( {} )--> State {}",
            transition.from,
            catalog.name(transition.symbol),
            transition.to
        )?;
    }
    writeln!(out, "============================================")
}

pub fn export_tables(
    tables: &ParseTables,
    catalog: &Catalog,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "\n--- LR(1) PARSER TABLES ---\n")?;

    write!(out, "{:<5} |", "State")?;
    for &terminal in tables.action_columns() {
        write!(out, " {:<4} |", catalog.name(terminal))?;
    }
    for &nonterminal in tables.goto_columns() {
        write!(out, " {:<4} |", catalog.name(nonterminal))?;
    }
    writeln!(out)?;

    for state in 0..tables.state_count() {
        write!(out, "{state:<5} |")?;
        for &action in tables.action_row(state) {
            let cell = match action {
                Action::Shift(to) => format!("s{to}"),
                Action::Reduce(production) => format!("r{production}"),
                Action::Accept => "acc".to_string(),
                Action::Error => String::new(),
            };
            write!(out, " {cell:<4} |")?;
        }
        for &target in tables.goto_row(state) {
            match target {
                Some(to) => write!(out, " {to:<4} |")?,
                None => write!(out, "      |")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn export_tokens(tokens: &[Token], catalog: &Catalog, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\n--- TOKEN STREAM ---")?;
    for token in tokens {
        writeln!(
            out,
            "{:<12} `{}`",
            catalog.name(Symbol::from_index(token.category)),
            token.text
        )?;
    }
    writeln!(out, "--------------------")
}
