//! ACTION/GOTO table synthesis.
//!
//! Projects the canonical collection and its transitions into dense
//! tables. Terminal columns are assigned in first-seen transition order
//! with column 0 reserved for `End`; non-terminals get GOTO columns the
//! same way. Conflicting writes keep the first entry and are recorded
//! as diagnostics for the caller.

use crate::catalog::{Catalog, Symbol};
use crate::collection::CanonicalCollection;
use crate::grammar::Grammar;
use std::collections::HashMap;
use std::fmt;

/// A parse action for one `(state, terminal)` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
    Error,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "shift {state}"),
            Action::Reduce(production) => write!(f, "reduce {production}"),
            Action::Accept => write!(f, "accept"),
            Action::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

/// A table cell that was written twice. The first write wins; the
/// grammar is not LR(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub state: usize,
    pub lookahead: Symbol,
    pub kind: ConflictKind,
    pub kept: Action,
    pub dropped: Action,
}

impl Conflict {
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> ConflictDisplay<'a> {
        ConflictDisplay {
            conflict: self,
            catalog,
        }
    }
}

pub struct ConflictDisplay<'a> {
    conflict: &'a Conflict,
    catalog: &'a Catalog,
}

impl fmt::Display for ConflictDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.conflict.kind {
            ConflictKind::ShiftReduce => "Shift/Reduce",
            ConflictKind::ReduceReduce => "Reduce/Reduce",
        };
        write!(
            f,
            "{kind} conflict at state {} on lookahead `{}`: kept {}, dropped {}",
            self.conflict.state,
            self.catalog.name(self.conflict.lookahead),
            self.conflict.kept,
            self.conflict.dropped,
        )
    }
}

/// Dense ACTION/GOTO tables with their column catalogs.
#[derive(Debug, Clone)]
pub struct ParseTables {
    action: Vec<Vec<Action>>,
    goto_: Vec<Vec<Option<usize>>>,
    action_columns: Vec<Symbol>,
    goto_columns: Vec<Symbol>,
    action_column_of: HashMap<Symbol, usize>,
    goto_column_of: HashMap<Symbol, usize>,
}

impl ParseTables {
    /// Builds ACTION and GOTO from the collection.
    ///
    /// Shift and goto entries come from the transitions, reduce and
    /// accept entries from the end-dot items of each state. Every
    /// conflicting write leaves the cell in its first-written state and
    /// is returned for reporting.
    pub fn build(grammar: &Grammar, collection: &CanonicalCollection) -> (Self, Vec<Conflict>) {
        let states = collection.state_count();

        let mut action_column_of = HashMap::from([(Symbol::END, 0usize)]);
        let mut goto_column_of: HashMap<Symbol, usize> = HashMap::new();
        let mut action_columns = vec![Symbol::END];
        let mut goto_columns: Vec<Symbol> = Vec::new();

        for transition in &collection.transitions {
            let symbol = transition.symbol;
            if grammar.is_nonterminal(symbol) {
                if !goto_column_of.contains_key(&symbol) {
                    goto_column_of.insert(symbol, goto_columns.len());
                    goto_columns.push(symbol);
                }
            } else if !action_column_of.contains_key(&symbol) {
                action_column_of.insert(symbol, action_columns.len());
                action_columns.push(symbol);
            }
        }

        // A terminal that only ever appears as a reduce lookahead still
        // needs a column.
        for state in &collection.states {
            for item in state {
                if item.is_reduce_item(grammar) && !action_column_of.contains_key(&item.lookahead)
                {
                    action_column_of.insert(item.lookahead, action_columns.len());
                    action_columns.push(item.lookahead);
                }
            }
        }

        let mut tables = Self {
            action: vec![vec![Action::Error; action_columns.len()]; states],
            goto_: vec![vec![None; goto_columns.len()]; states],
            action_columns,
            goto_columns,
            action_column_of,
            goto_column_of,
        };
        let mut conflicts = Vec::new();

        for transition in &collection.transitions {
            if grammar.is_nonterminal(transition.symbol) {
                let column = tables.goto_column_of[&transition.symbol];
                tables.goto_[transition.from][column] = Some(transition.to);
            } else {
                tables.write_action(
                    transition.from,
                    transition.symbol,
                    Action::Shift(transition.to),
                    &mut conflicts,
                );
            }
        }

        for (state, items) in collection.states.iter().enumerate() {
            for item in items {
                if !item.is_reduce_item(grammar) {
                    continue;
                }
                let production = grammar.production(item.production);
                let entry = if production.lhs == grammar.goal() {
                    Action::Accept
                } else {
                    Action::Reduce(item.production)
                };
                tables.write_action(state, item.lookahead, entry, &mut conflicts);
            }
        }

        (tables, conflicts)
    }

    fn write_action(
        &mut self,
        state: usize,
        lookahead: Symbol,
        entry: Action,
        conflicts: &mut Vec<Conflict>,
    ) {
        let column = self.action_column_of[&lookahead];
        let cell = &mut self.action[state][column];
        match *cell {
            Action::Error => *cell = entry,
            kept => {
                let shift_involved =
                    matches!(kept, Action::Shift(_)) || matches!(entry, Action::Shift(_));
                let kind = if shift_involved {
                    ConflictKind::ShiftReduce
                } else {
                    ConflictKind::ReduceReduce
                };
                conflicts.push(Conflict {
                    state,
                    lookahead,
                    kind,
                    kept,
                    dropped: entry,
                });
            }
        }
    }

    /// The action for a terminal lookahead. Terminals the automaton
    /// never mentions map to `Error`.
    pub fn action(&self, state: usize, terminal: Symbol) -> Action {
        match self.action_column_of.get(&terminal) {
            Some(&column) => self.action[state][column],
            None => Action::Error,
        }
    }

    /// The GOTO target for a non-terminal, if any.
    pub fn goto(&self, state: usize, nonterminal: Symbol) -> Option<usize> {
        self.goto_column_of
            .get(&nonterminal)
            .and_then(|&column| self.goto_[state][column])
    }

    pub fn state_count(&self) -> usize {
        self.action.len()
    }

    /// Terminal owning each ACTION column; column 0 is `End`.
    pub fn action_columns(&self) -> &[Symbol] {
        &self.action_columns
    }

    /// Non-terminal owning each GOTO column.
    pub fn goto_columns(&self) -> &[Symbol] {
        &self.goto_columns
    }

    pub fn action_row(&self, state: usize) -> &[Action] {
        &self.action[state]
    }

    pub fn goto_row(&self, state: usize) -> &[Option<usize>] {
        &self.goto_[state]
    }
}
