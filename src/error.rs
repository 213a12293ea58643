//! Error types for the LR(1) parser generator.

use thiserror::Error;

/// Errors that can occur while loading a grammar, scanning input, or parsing.
///
/// Table conflicts are collected as diagnostics during the build (see
/// `tables::Conflict`); `NotLr1` is the summary error raised once they
/// have been reported.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Rules Synthax Error: word unrecognized: `{word}`")]
    UnknownWord { word: String },

    #[error("Rules Synthax Error: unexpected {category} token `{text}`")]
    MalformedRule { category: String, text: String },

    #[error("Empty grammar input")]
    EmptyInput,

    #[error("Duplicate production: {production}")]
    DuplicateProduction { production: String },

    #[error("Invalid lexical rule `{pattern}`: {source}")]
    InvalidRule {
        pattern: String,
        source: regex::Error,
    },

    #[error("Lexical error: no token matches at line {line}, column {column}")]
    LexicalError { line: usize, column: usize },

    #[error("Syntax error: state {state} has no action for {category} token `{text}`")]
    SyntaxError {
        state: usize,
        category: String,
        text: String,
    },

    #[error("Grammar is not LR(1): {conflicts} conflict(s) reported")]
    NotLr1 { conflicts: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
