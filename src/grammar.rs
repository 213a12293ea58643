//! Grammar representation and the `*.specs` loader.
//!
//! A grammar spec file is a whitespace-separated sequence of rules:
//!
//! ```text
//! Expr -> Expr + Term ;
//!      | Term ;
//! ```
//!
//! `->` separates LHS from RHS, `;` terminates each alternative, `|`
//! repeats the previous LHS. The first rule's LHS becomes the start
//! symbol and the loader prepends the augmenting production `Goal' → S`
//! as production 0.

use crate::catalog::{Catalog, Symbol};
use crate::error::{GrammarError, Result};
use crate::scanner::{Lexicon, Token};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Token categories of the grammar micro-syntax.
pub const WHITESPACE: usize = 1;
pub const NAME: usize = 2;
pub const ALT: usize = 3;
pub const ARROW: usize = 4;
pub const SEMI: usize = 5;

/// Name under which the loader interns the augmented start symbol.
/// `'` is not a NAME character, so user grammars cannot collide with it.
pub const AUGMENTED_START: &str = "Goal'";

/// Builds the lexicon that tokenizes grammar spec files.
pub fn spec_lexicon() -> Result<Lexicon> {
    Lexicon::new(&[
        (r"[ \t\r\n]+", WHITESPACE),
        (r"->", ARROW),
        (r"\|", ALT),
        (r";", SEMI),
        (r"[^\s|;']+", NAME),
    ])
}

/// A production rule `lhs → rhs`.
///
/// `Epsilon` occurrences are flattened out of the RHS on construction;
/// an alternative consisting only of `Epsilon` becomes the empty RHS
/// and reduces without consuming anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        let rhs = rhs.into_iter().filter(|s| !s.is_epsilon()).collect();
        Self { lhs, rhs }
    }

    /// Display adapter resolving symbol names through the catalog.
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> ProductionDisplay<'a> {
        ProductionDisplay {
            production: self,
            catalog,
        }
    }
}

pub struct ProductionDisplay<'a> {
    production: &'a Production,
    catalog: &'a Catalog,
}

impl fmt::Display for ProductionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} →", self.catalog.name(self.production.lhs))?;
        if self.production.rhs.is_empty() {
            return write!(f, " ε");
        }
        for &symbol in &self.production.rhs {
            write!(f, " {}", self.catalog.name(symbol))?;
        }
        Ok(())
    }
}

/// Loader state machine over the four micro-syntax categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoaderState {
    ExpectLhs,
    ExpectArrow,
    ExpectRhs,
}

/// An immutable context-free grammar with its symbol partition.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    nonterminals: BTreeSet<Symbol>,
    terminals: BTreeSet<Symbol>,
    start: Symbol,
    goal: Symbol,
    symbol_count: usize,
    /// Production indices per LHS, in declaration order.
    production_map: HashMap<Symbol, Vec<usize>>,
}

impl Grammar {
    /// Loads a grammar from the token stream of a spec file.
    ///
    /// Every NAME is resolved against the catalog; an unresolved name or
    /// a token arriving in the wrong state aborts with the rules-file
    /// diagnostic. The augmented start symbol is interned on entry.
    pub fn from_tokens(tokens: &[Token], catalog: &mut Catalog) -> Result<Self> {
        let goal = catalog.intern(AUGMENTED_START);

        let mut productions: Vec<Production> = Vec::new();
        let mut head: Option<Symbol> = None;
        let mut rhs: Vec<Symbol> = Vec::new();
        let mut state = LoaderState::ExpectLhs;

        for token in tokens {
            if token.is_end() {
                break;
            }
            state = match (state, token.category) {
                (LoaderState::ExpectLhs, NAME) => {
                    head = Some(lookup(catalog, &token.text)?);
                    LoaderState::ExpectArrow
                }
                (LoaderState::ExpectLhs, ALT) if head.is_some() => LoaderState::ExpectRhs,
                (LoaderState::ExpectArrow, ARROW) => LoaderState::ExpectRhs,
                (LoaderState::ExpectRhs, NAME) => {
                    rhs.push(lookup(catalog, &token.text)?);
                    LoaderState::ExpectRhs
                }
                (LoaderState::ExpectRhs, SEMI) => {
                    let Some(lhs) = head else {
                        return Err(malformed(token));
                    };
                    productions.push(Production::new(lhs, std::mem::take(&mut rhs)));
                    LoaderState::ExpectLhs
                }
                _ => return Err(malformed(token)),
            };
        }

        if state != LoaderState::ExpectLhs {
            // The file ended in the middle of a rule.
            return Err(GrammarError::MalformedRule {
                category: "End".to_string(),
                text: String::new(),
            });
        }
        if productions.is_empty() {
            return Err(GrammarError::EmptyInput);
        }

        Self::assemble(goal, productions, catalog)
    }

    /// Builds the partition and the augmentation around raw productions.
    fn assemble(goal: Symbol, mut productions: Vec<Production>, catalog: &Catalog) -> Result<Self> {
        let start = productions[0].lhs;
        productions.insert(0, Production::new(goal, vec![start]));

        let mut seen: HashSet<(Symbol, Vec<Symbol>)> = HashSet::new();
        for production in &productions {
            if !seen.insert((production.lhs, production.rhs.clone())) {
                return Err(GrammarError::DuplicateProduction {
                    production: production.display(catalog).to_string(),
                });
            }
        }

        // Partition: LHS symbols form NT, every other referenced symbol
        // is a terminal.
        let nonterminals: BTreeSet<Symbol> = productions.iter().map(|p| p.lhs).collect();
        let mut terminals = BTreeSet::new();
        for production in &productions {
            for &symbol in &production.rhs {
                if !nonterminals.contains(&symbol) {
                    terminals.insert(symbol);
                }
            }
        }

        let mut production_map: HashMap<Symbol, Vec<usize>> = HashMap::new();
        for (index, production) in productions.iter().enumerate() {
            production_map
                .entry(production.lhs)
                .or_default()
                .push(index);
        }

        Ok(Self {
            productions,
            nonterminals,
            terminals,
            start,
            goal,
            symbol_count: catalog.len(),
            production_map,
        })
    }

    /// All productions; index 0 is the augmentation.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    /// Indices of the productions whose LHS is `nt`, in declaration order.
    pub fn productions_of(&self, nt: Symbol) -> &[usize] {
        self.production_map
            .get(&nt)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn nonterminals(&self) -> &BTreeSet<Symbol> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    pub fn is_nonterminal(&self, symbol: Symbol) -> bool {
        self.nonterminals.contains(&symbol)
    }

    /// The user's start symbol S (the first rule's LHS).
    pub fn start(&self) -> Symbol {
        self.start
    }

    /// The augmented start symbol of production 0.
    pub fn goal(&self) -> Symbol {
        self.goal
    }

    /// Total number of catalog ids at load time; later phases use it to
    /// dimension dense per-symbol maps.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }
}

fn lookup(catalog: &Catalog, word: &str) -> Result<Symbol> {
    catalog.get(word).ok_or_else(|| GrammarError::UnknownWord {
        word: word.to_string(),
    })
}

fn malformed(token: &Token) -> GrammarError {
    GrammarError::MalformedRule {
        category: category_name(token.category).to_string(),
        text: token.text.clone(),
    }
}

fn category_name(category: usize) -> &'static str {
    match category {
        NAME => "name",
        ALT => "`|`",
        ARROW => "`->`",
        SEMI => "`;`",
        _ => "unknown",
    }
}
