//! CLI: drives the generate-and-parse pipeline end to end.
//!
//! The binary carries a built-in demo language, the classic expression
//! language, as its symbol catalog and lexical rules. It loads a
//! grammar spec over that catalog, builds the LR(1) tables, scans the
//! source file, parses it, and prints the tree; every phase writes its
//! diagnostic dump into the output directory on the way.

use crate::catalog::Catalog;
use crate::collection::CanonicalCollection;
use crate::driver::Lr1Parser;
use crate::error::{GrammarError, Result};
use crate::export;
use crate::first::FirstSets;
use crate::grammar::{self, Grammar};
use crate::scanner::Lexicon;
use crate::tables::ParseTables;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "lr1_parser",
    about = "Canonical LR(1) parser generator and driver"
)]
pub struct Cli {
    /// Grammar specification file (`*.specs`).
    grammar: PathBuf,
    /// Source file to scan and parse.
    source: PathBuf,
    /// Directory receiving the phase dumps.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,
    /// Suppress the stdout copies of the dumps.
    #[arg(long)]
    quiet: bool,
}

/// Symbol names of the built-in demo language, in catalog id order.
const DEMO_SYMBOLS: &[&str] = &[
    "End", "Epsilon", "Goal", "Expr", "Term", "Factor", "+", "-", "*", "/", "(", ")", "num",
    "name",
];

pub fn demo_catalog() -> Catalog {
    Catalog::from_names(DEMO_SYMBOLS.iter().copied())
}

fn symbol_id(catalog: &Catalog, name: &str) -> Result<usize> {
    catalog
        .get(name)
        .map(|symbol| symbol.index())
        .ok_or_else(|| GrammarError::UnknownWord {
            word: name.to_string(),
        })
}

/// Lexical rules for demo source files. Categories are catalog ids;
/// whitespace is routed to `Epsilon` and skipped, as the scanner of the
/// grammar spec file does with its own whitespace category.
pub fn demo_lexicon(catalog: &Catalog) -> Result<Lexicon> {
    let rules = [
        (r"[ \t\r\n]+", symbol_id(catalog, "Epsilon")?),
        (r"\+", symbol_id(catalog, "+")?),
        (r"-", symbol_id(catalog, "-")?),
        (r"\*", symbol_id(catalog, "*")?),
        (r"/", symbol_id(catalog, "/")?),
        (r"\(", symbol_id(catalog, "(")?),
        (r"\)", symbol_id(catalog, ")")?),
        (r"0|[1-9][0-9]*", symbol_id(catalog, "num")?),
        (r"[a-zA-Z_][a-zA-Z0-9_]*", symbol_id(catalog, "name")?),
    ];
    Lexicon::new(&rules)
}

/// Main CLI runner.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(&cli)
}

fn execute(cli: &Cli) -> Result<()> {
    fs::create_dir_all(&cli.out_dir)?;

    let mut catalog = demo_catalog();

    // Grammar phase.
    let spec_text = fs::read_to_string(&cli.grammar)?;
    let spec_tokens = grammar::spec_lexicon()?.scan(&spec_text, &[grammar::WHITESPACE])?;
    let grammar = Grammar::from_tokens(&spec_tokens, &mut catalog)?;
    write_dump(cli, "grammar.txt", &mut |out| {
        export::export_grammar(&grammar, &catalog, out)
    })?;

    // FIRST phase.
    let first = FirstSets::compute(&grammar);
    write_dump(cli, "first_sets.txt", &mut |out| {
        export::export_first_sets(&grammar, &first, &catalog, out)
    })?;

    // Canonical collection and transitions.
    let collection = CanonicalCollection::build(&grammar, &first);
    write_dump(cli, "collection.txt", &mut |out| {
        export::export_collection(&collection, &grammar, &catalog, out)?;
        export::export_transitions(&collection, &catalog, out)
    })?;

    // Table synthesis; conflicts make the grammar unusable.
    let (tables, conflicts) = ParseTables::build(&grammar, &collection);
    write_dump(cli, "parser_tables.txt", &mut |out| {
        export::export_tables(&tables, &catalog, out)
    })?;
    if !conflicts.is_empty() {
        for conflict in &conflicts {
            eprintln!("{}", conflict.display(&catalog));
        }
        return Err(GrammarError::NotLr1 {
            conflicts: conflicts.len(),
        });
    }

    // Scan the source file.
    let source_text = fs::read_to_string(&cli.source)?;
    let skip = [symbol_id(&catalog, "Epsilon")?];
    let tokens = demo_lexicon(&catalog)?.scan(&source_text, &skip)?;
    write_dump(cli, "lexer_seq.txt", &mut |out| {
        export::export_tokens(&tokens, &catalog, out)
    })?;

    // Parse and print the tree.
    let parser = Lr1Parser::new(&grammar, &tables);
    let mut trace = fs::File::create(cli.out_dir.join("parse_trace.txt"))?;
    let tree = parser.parse_traced(&tokens, &catalog, &mut trace)?;
    drop(trace);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "\n--- Parse Tree ---")?;
    tree.render(&mut out)?;
    Ok(())
}

/// Writes one phase dump into the output directory and, unless
/// `--quiet`, to stdout as well.
fn write_dump(
    cli: &Cli,
    file: &str,
    emit: &mut dyn FnMut(&mut dyn io::Write) -> io::Result<()>,
) -> Result<()> {
    let mut file_out = fs::File::create(cli.out_dir.join(file))?;
    emit(&mut file_out)?;
    if !cli.quiet {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        emit(&mut lock)?;
    }
    Ok(())
}
