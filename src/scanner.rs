//! Regex-driven token scanner.
//!
//! A [`Lexicon`] is an ordered list of `(pattern, category)` rules. At
//! every input position all rules are tried against the remaining text;
//! the longest match wins and ties break toward the earlier rule.
//! Categories are opaque ids: catalog symbol ids when scanning source
//! files, the grammar micro-syntax categories when scanning `*.specs`.

use crate::catalog::Symbol;
use crate::error::{GrammarError, Result};
use regex::Regex;

/// A scanned token: the matched surface text and the category id of the
/// rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub category: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, category: usize) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// The sentinel terminating every scan.
    pub fn end() -> Self {
        Self {
            text: String::new(),
            category: Symbol::END.index(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.category == Symbol::END.index()
    }
}

struct LexRule {
    pattern: Regex,
    category: usize,
}

/// A compiled lexical specification.
pub struct Lexicon {
    rules: Vec<LexRule>,
}

impl Lexicon {
    /// Compiles the rule list. Patterns are anchored at the scan
    /// position, so `a+` means "a run of `a` starting here".
    pub fn new(rules: &[(&str, usize)]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for &(pattern, category) in rules {
            let anchored = format!(r"\A(?:{pattern})");
            let regex = Regex::new(&anchored).map_err(|source| GrammarError::InvalidRule {
                pattern: pattern.to_string(),
                source,
            })?;
            compiled.push(LexRule {
                pattern: regex,
                category,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Scans `input` into a token stream terminated by the END sentinel.
    ///
    /// Tokens whose category appears in `skip` are dropped. A position
    /// where no rule matches a non-empty prefix is a lexical error,
    /// reported with its 1-based line and column.
    pub fn scan(&self, input: &str, skip: &[usize]) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let mut best: Option<(usize, usize)> = None;
            for rule in &self.rules {
                if let Some(found) = rule.pattern.find(rest) {
                    let length = found.end();
                    if length > 0 && best.is_none_or(|(best_length, _)| length > best_length) {
                        best = Some((length, rule.category));
                    }
                }
            }

            match best {
                Some((length, category)) => {
                    if !skip.contains(&category) {
                        tokens.push(Token::new(&rest[..length], category));
                    }
                    pos += length;
                }
                None => {
                    let (line, column) = position(input, pos);
                    return Err(GrammarError::LexicalError { line, column });
                }
            }
        }

        tokens.push(Token::end());
        Ok(tokens)
    }
}

/// 1-based line/column of a byte offset.
fn position(input: &str, offset: usize) -> (usize, usize) {
    let prefix = &input[..offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, offset - line_start + 1)
}
