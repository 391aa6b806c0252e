use crate::error::GrammarError;
use crate::grammar::{FirstSymbol, Grammar, ProductionRef, Terminal};
use std::collections::HashMap;
use std::rc::Rc;

/// Predictive-parse table: `(nonterminal, lookahead) -> production`.
pub struct LlTable {
    entries: HashMap<Rc<str>, HashMap<Terminal, ProductionRef>>,
}

impl LlTable {
    pub fn get(&self, nonterminal: &str, terminal: &Terminal) -> Option<&ProductionRef> {
        self.entries.get(nonterminal)?.get(terminal)
    }
}

/// Builds the LL(1) table for `grammar`: for each production `A -> β`, the
/// cell `(A, a)` is claimed for every `a` in `FIRST★(β)`, plus every
/// terminal in `FOLLOW(A)` when `β` is nullable. A cell claimed by two
/// distinct productions means the grammar is not LL(1).
pub fn build_ll_table(grammar: &Grammar) -> Result<LlTable, GrammarError> {
    grammar.initialize();
    let mut entries: HashMap<Rc<str>, HashMap<Terminal, ProductionRef>> = HashMap::new();

    for name in grammar.nonterminal_names() {
        let row = entries.entry(name.clone()).or_default();
        for production in grammar.productions(name) {
            let star = grammar.first_star(&production.rhs);
            let mut nullable = false;
            let mut lookaheads: Vec<Terminal> = Vec::new();
            for symbol in &star {
                match symbol {
                    FirstSymbol::Terminal(t) => lookaheads.push(t.clone()),
                    FirstSymbol::Epsilon => nullable = true,
                }
            }
            if nullable {
                lookaheads.extend(grammar.follow_of(name).iter().cloned());
            }

            for terminal in lookaheads {
                let candidate = ProductionRef::new(name.clone(), production.index);
                match row.get(&terminal) {
                    Some(existing) if existing.index != production.index => {
                        return Err(GrammarError::NotLl1 {
                            nonterminal: name.to_string(),
                            terminal: terminal.to_string(),
                            existing: existing.index,
                            attempted: production.index,
                        });
                    }
                    Some(_) => {}
                    None => {
                        row.insert(terminal, candidate);
                    }
                }
            }
        }
    }

    Ok(LlTable { entries })
}
