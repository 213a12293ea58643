//! FIRST-set computation.
//!
//! FIRST(X) is the set of terminals that can begin a derivation from X,
//! possibly including `Epsilon`. Sets are kept densely indexed by symbol
//! id; ascending-id iteration keeps every downstream phase deterministic.

use crate::catalog::Symbol;
use crate::grammar::Grammar;
use std::collections::BTreeSet;

/// FIRST sets for every symbol of a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSets {
    sets: Vec<BTreeSet<Symbol>>,
}

impl FirstSets {
    /// Computes FIRST for every symbol.
    ///
    /// # Algorithm
    /// 1. FIRST(t) = {t} for every terminal, `End`, and `Epsilon`.
    /// 2. For every production A → B₁B₂…Bₙ, add FIRST(B₁) − {ε} to
    ///    FIRST(A); while ε ∈ FIRST(Bᵢ), continue with FIRST(Bᵢ₊₁) − {ε};
    ///    if every Bᵢ is nullable, add ε.
    /// 3. Repeat until no set grows (monotone over a finite lattice).
    pub fn compute(grammar: &Grammar) -> Self {
        let mut sets = vec![BTreeSet::new(); grammar.symbol_count()];
        sets[Symbol::END.index()].insert(Symbol::END);
        sets[Symbol::EPSILON.index()].insert(Symbol::EPSILON);
        for &terminal in grammar.terminals() {
            sets[terminal.index()].insert(terminal);
        }

        let mut first = Self { sets };
        let mut changed = true;
        while changed {
            changed = false;
            for production in grammar.productions() {
                let rhs_first = first.first_of_sequence(&production.rhs);
                let target = &mut first.sets[production.lhs.index()];
                let before = target.len();
                target.extend(rhs_first);
                if target.len() != before {
                    changed = true;
                }
            }
        }
        first
    }

    /// FIRST of a single symbol.
    pub fn first(&self, symbol: Symbol) -> &BTreeSet<Symbol> {
        &self.sets[symbol.index()]
    }

    /// FIRST of a sentential string: the union of leading FIRSTs while
    /// they contain ε; the empty string yields {ε}.
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> BTreeSet<Symbol> {
        let mut result = BTreeSet::new();
        let mut nullable = true;

        for &symbol in symbols {
            if !nullable {
                break;
            }
            let first_symbol = &self.sets[symbol.index()];
            result.extend(first_symbol.iter().copied().filter(|s| !s.is_epsilon()));
            nullable = first_symbol.contains(&Symbol::EPSILON);
        }

        if nullable {
            result.insert(Symbol::EPSILON);
        }
        result
    }
}
