//! Table-driven shift/reduce parse driver.
//!
//! The stack holds (tree node, symbol category, state) triples; the
//! bottom triple is a placeholder sentinel at state 0. Shifts push a
//! leaf per token, reductions fold the popped nodes into an internal
//! node labeled with the producing non-terminal, and accept hands back
//! the node sitting immediately above the sentinel.

use crate::catalog::{Catalog, Symbol};
use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::scanner::Token;
use crate::tables::{Action, ParseTables};
use crate::tree::TreeNode;
use std::io::{self, Write};

/// Driver status, advanced once per dispatched action.
#[derive(Debug)]
enum DriverState {
    Running,
    Accepted,
    Failed(GrammarError),
}

struct StackEntry {
    node: TreeNode,
    category: Symbol,
    state: usize,
}

/// The table-driven LR(1) parser.
pub struct Lr1Parser<'a> {
    grammar: &'a Grammar,
    tables: &'a ParseTables,
}

impl<'a> Lr1Parser<'a> {
    pub fn new(grammar: &'a Grammar, tables: &'a ParseTables) -> Self {
        Self { grammar, tables }
    }

    /// Parses a token stream into a parse tree.
    ///
    /// The stream must be terminated by the END sentinel the scanner
    /// appends; token categories are catalog symbol ids.
    pub fn parse(&self, tokens: &[Token], catalog: &Catalog) -> Result<TreeNode> {
        self.parse_traced(tokens, catalog, &mut io::sink())
    }

    /// Like [`Lr1Parser::parse`], also writing a per-iteration trace of
    /// the current token, state, stack, and dispatched action.
    pub fn parse_traced(
        &self,
        tokens: &[Token],
        catalog: &Catalog,
        trace: &mut impl Write,
    ) -> Result<TreeNode> {
        let mut stack = vec![StackEntry {
            node: TreeNode::leaf("Root"),
            category: Symbol::END,
            state: 0,
        }];
        let mut cursor = 0usize;
        let mut status = DriverState::Running;

        while matches!(status, DriverState::Running) {
            let state = top_state(&stack);
            let Some(token) = tokens.get(cursor) else {
                // The stream ended without the End sentinel.
                return Err(GrammarError::SyntaxError {
                    state,
                    category: "End".to_string(),
                    text: String::new(),
                });
            };
            let terminal = Symbol::from_index(token.category);

            writeln!(trace, "--- Iteration ---")?;
            writeln!(
                trace,
                "Current Word: `{}` ({})",
                token.text,
                catalog.name(terminal)
            )?;
            writeln!(trace, "Current State: {state}")?;
            write_stack(trace, &stack, catalog)?;

            match self.tables.action(state, terminal) {
                Action::Shift(next) => {
                    stack.push(StackEntry {
                        node: TreeNode::leaf(token.text.as_str()),
                        category: terminal,
                        state: next,
                    });
                    cursor += 1;
                    writeln!(trace, "Shift -> {next}")?;
                }
                Action::Reduce(index) => {
                    let production = self.grammar.production(index);
                    let arity = production.rhs.len();
                    assert!(
                        stack.len() > arity,
                        "reduction of production {index} would pop the stack sentinel"
                    );

                    let split = stack.len() - arity;
                    let children: Vec<TreeNode> =
                        stack.drain(split..).map(|entry| entry.node).collect();
                    let node = TreeNode::internal(catalog.name(production.lhs), children);

                    let below = top_state(&stack);
                    let Some(target) = self.tables.goto(below, production.lhs) else {
                        panic!(
                            "GOTO[{below}][{}] is undefined after reducing production {index}",
                            catalog.name(production.lhs)
                        );
                    };
                    stack.push(StackEntry {
                        node,
                        category: production.lhs,
                        state: target,
                    });
                    writeln!(trace, "Reduce -> {index}")?;
                }
                Action::Accept => {
                    writeln!(trace, "Accept")?;
                    status = DriverState::Accepted;
                }
                Action::Error => {
                    writeln!(trace, "Error")?;
                    status = DriverState::Failed(GrammarError::SyntaxError {
                        state,
                        category: catalog.name(terminal).to_string(),
                        text: token.text.clone(),
                    });
                }
            }
        }

        match status {
            DriverState::Accepted => {
                // The node immediately above the bottom sentinel is the
                // parse result.
                Ok(stack.swap_remove(1).node)
            }
            DriverState::Failed(error) => Err(error),
            DriverState::Running => unreachable!("the dispatch loop only exits on a terminal state"),
        }
    }
}

fn top_state(stack: &[StackEntry]) -> usize {
    stack.last().map_or(0, |entry| entry.state)
}

fn write_stack(out: &mut impl Write, stack: &[StackEntry], catalog: &Catalog) -> io::Result<()> {
    write!(out, "--- Stack ---\n[ ")?;
    for entry in stack {
        write!(out, "{} {} ", catalog.name(entry.category), entry.state)?;
    }
    writeln!(out, "]")
}
