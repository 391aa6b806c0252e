use super::{Assoc, Grammar, Interner, Production, Symbol};
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Augments `grammar` with a fresh start symbol `S'` and a single production
/// `S' -> S`. The fresh name is obtained by appending
/// underscores to the existing start name until it is unique.
///
/// Returns a *new* grammar rather than mutating `grammar` in place, to
/// avoid a shared-mutable-state hazard: the grammar a parser is built from
/// may be shared by several parsers.
pub fn augment(grammar: &Grammar) -> Grammar {
    let mut fresh_name = grammar.start.to_string();
    while grammar.contains_nonterminal(&fresh_name) {
        fresh_name.push('_');
    }

    let interner = Interner::new();
    let fresh: Rc<str> = interner.intern(&fresh_name);

    let mut rules: HashMap<Rc<str>, Vec<Production>> = grammar.rules.clone();
    let mut order: Vec<Rc<str>> = grammar.order.clone();

    rules.insert(
        fresh.clone(),
        vec![Production {
            nonterminal: fresh.clone(),
            index: 0,
            rhs: vec![Symbol::Nonterminal(grammar.start.clone())],
            precedence: 0,
            associativity: Assoc::None,
        }],
    );
    order.insert(0, fresh.clone());

    let augmented = Grammar {
        interner,
        rules,
        order,
        start: fresh,
        terminal_precedence: grammar.terminal_precedence.clone(),
        first: OnceCell::new(),
        follow: OnceCell::new(),
    };
    augmented.initialize();
    augmented
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;

    #[test]
    fn augmentation_adds_unique_fresh_start() {
        let mut b = GrammarBuilder::new();
        let e = b.terminal("int");
        b.nonterminal("E");
        b.add_production("E", vec![e]);
        let g = b.build("E").unwrap();

        let augmented = augment(&g);
        assert_eq!(augmented.start().as_ref(), "E_");
        assert_eq!(augmented.productions("E_").len(), 1);
        assert_eq!(
            augmented.productions("E_")[0].rhs,
            vec![Symbol::Nonterminal(Rc::from("E"))]
        );
    }

    #[test]
    fn augmentation_keeps_incrementing_when_underscored_name_taken() {
        let mut b = GrammarBuilder::new();
        let e = b.terminal("int");
        b.nonterminal("E");
        b.nonterminal("E_");
        b.add_production("E", vec![e.clone()]);
        b.add_production("E_", vec![e]);
        let g = b.build("E").unwrap();

        let augmented = augment(&g);
        assert_eq!(augmented.start().as_ref(), "E__");
    }
}
