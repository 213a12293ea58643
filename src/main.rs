//! Canonical LR(1) Parser Generator
//!
//! Builds the LR(1) automaton for a grammar spec, scans a source file
//! with the built-in demo lexicon, parses it, and prints the parse tree
//! along with per-phase diagnostic dumps.

use std::process;

fn main() {
    if let Err(e) = lr1_parser::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
