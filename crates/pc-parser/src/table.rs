//! LL(1) parse table: rows by nonterminal, columns by terminal kind. Built
//! once FIRST and FOLLOW are both final (invariant (c)).

use std::collections::HashMap;

use pc_core::Kind;

use crate::error::{GrammarError, Result};
use crate::first::first_of_sequence;
use crate::grammar::Grammar;

/// `table[(nonterminal, terminal)] = production index` (within that
/// nonterminal's own `Pda::productions`).
#[derive(Debug, Default)]
pub struct Table {
    cells: HashMap<(usize, Kind), usize>,
}

impl Table {
    pub fn get(&self, nonterminal: usize, terminal: Kind) -> Option<usize> {
        self.cells.get(&(nonterminal, terminal)).copied()
    }
}

pub fn build_table(grammar: &Grammar) -> Result<Table> {
    let mut table = Table::default();
    for (nt, pda) in grammar.pdas.iter().enumerate() {
        for (p, production) in pda.productions.iter().enumerate() {
            let first = first_of_sequence(grammar, &production.symbols);
            for &terminal in &first.terminals {
                set_cell(&mut table, grammar, nt, terminal, p)?;
            }
            if first.nullable {
                for &terminal in &pda.follow {
                    set_cell(&mut table, grammar, nt, terminal, p)?;
                }
            }
        }
    }
    Ok(table)
}

fn set_cell(table: &mut Table, grammar: &Grammar, nt: usize, terminal: Kind, production: usize) -> Result<()> {
    match table.cells.insert((nt, terminal), production) {
        None => Ok(()),
        Some(existing) if existing == production => Ok(()),
        Some(existing) => {
            table.cells.insert((nt, terminal), existing);
            Err(GrammarError::TableConflict {
                nonterminal: grammar.pdas[nt].name.clone(),
                terminal: format!("{terminal:?}"),
                a: existing,
                b: production,
            })
        }
    }
}

#[cfg(test)]
mod table_tests;
