use crate::grammar::{Grammar, ProductionRef, Symbol, Terminal};
use std::rc::Rc;

/// Generalizes the shape and closure rule that differ between LR(0)/SLR(1)
/// (no lookahead) and LR(1)/LALR(1) (one lookahead terminal per item), so
/// canonical-collection construction is written once.
pub trait ItemFamily {
    type Item: Eq + std::hash::Hash + Clone;

    fn start_item(grammar: &Grammar, augmented_start: &Rc<str>) -> Self::Item;
    fn closure(grammar: &Grammar, items: &mut Vec<Self::Item>);
    fn advance(item: &Self::Item) -> Self::Item;
    fn dot_symbol(grammar: &Grammar, item: &Self::Item) -> Option<Symbol>;
    fn at_end(grammar: &Grammar, item: &Self::Item) -> bool;
    fn production_ref(item: &Self::Item) -> &ProductionRef;
}

/// `(production, dot)` with no attached lookahead -- the LR(0)/SLR(1)
/// item shape.
pub type Lr0Item = (ProductionRef, usize);

fn dot_symbol_of(grammar: &Grammar, production: &ProductionRef, dot: usize) -> Option<Symbol> {
    production.rule(grammar).rhs.get(dot).cloned()
}

fn closure_lr0(grammar: &Grammar, items: &mut Vec<Lr0Item>) {
    loop {
        let mut changed = false;
        let snapshot = items.clone();
        for (production, dot) in &snapshot {
            if let Some(Symbol::Nonterminal(name)) = dot_symbol_of(grammar, production, *dot) {
                for candidate in grammar.productions(&name) {
                    let new_item = (ProductionRef::new(name.clone(), candidate.index), 0);
                    if !items.contains(&new_item) {
                        items.push(new_item);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// LR(0): reduce row uses a single wildcard column.
pub struct Lr0Family;

impl ItemFamily for Lr0Family {
    type Item = Lr0Item;

    fn start_item(_grammar: &Grammar, augmented_start: &Rc<str>) -> Self::Item {
        (ProductionRef::new(augmented_start.clone(), 0), 0)
    }

    fn closure(grammar: &Grammar, items: &mut Vec<Self::Item>) {
        closure_lr0(grammar, items);
    }

    fn advance(item: &Self::Item) -> Self::Item {
        (item.0.clone(), item.1 + 1)
    }

    fn dot_symbol(grammar: &Grammar, item: &Self::Item) -> Option<Symbol> {
        dot_symbol_of(grammar, &item.0, item.1)
    }

    fn at_end(grammar: &Grammar, item: &Self::Item) -> bool {
        item.1 == item.0.rule(grammar).rhs.len()
    }

    fn production_ref(item: &Self::Item) -> &ProductionRef {
        &item.0
    }
}

/// SLR(1) shares LR(0)'s item shape, kernel construction and closure
/// exactly; only the reduce row differs (FOLLOW instead of wildcard), which
/// lives in `src/lr/tables.rs`.
pub struct SlrFamily;

impl ItemFamily for SlrFamily {
    type Item = Lr0Item;

    fn start_item(grammar: &Grammar, augmented_start: &Rc<str>) -> Self::Item {
        Lr0Family::start_item(grammar, augmented_start)
    }

    fn closure(grammar: &Grammar, items: &mut Vec<Self::Item>) {
        Lr0Family::closure(grammar, items)
    }

    fn advance(item: &Self::Item) -> Self::Item {
        Lr0Family::advance(item)
    }

    fn dot_symbol(grammar: &Grammar, item: &Self::Item) -> Option<Symbol> {
        Lr0Family::dot_symbol(grammar, item)
    }

    fn at_end(grammar: &Grammar, item: &Self::Item) -> bool {
        Lr0Family::at_end(grammar, item)
    }

    fn production_ref(item: &Self::Item) -> &ProductionRef {
        Lr0Family::production_ref(item)
    }
}

/// `(production, dot, lookahead)` variant).
pub type Lr1Item = (ProductionRef, usize, Terminal);

fn closure_lr1(grammar: &Grammar, items: &mut Vec<Lr1Item>) {
    loop {
        let mut changed = false;
        let snapshot = items.clone();
        for (production, dot, lookahead) in &snapshot {
            let rhs = &production.rule(grammar).rhs;
            let Some(Symbol::Nonterminal(name)) = rhs.get(*dot).cloned() else {
                continue;
            };
            let suffix = &rhs[dot + 1..];
            let star = grammar.first_star(suffix);
            let mut lookaheads: Vec<Terminal> = Vec::new();
            let mut nullable = false;
            for symbol in &star {
                match symbol {
                    crate::grammar::FirstSymbol::Terminal(t) => lookaheads.push(t.clone()),
                    crate::grammar::FirstSymbol::Epsilon => nullable = true,
                }
            }
            if nullable {
                lookaheads.push(lookahead.clone());
            }

            for candidate in grammar.productions(&name) {
                for new_lookahead in &lookaheads {
                    let new_item = (
                        ProductionRef::new(name.clone(), candidate.index),
                        0,
                        new_lookahead.clone(),
                    );
                    if !items.contains(&new_item) {
                        items.push(new_item);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// LR(1): full canonical collection with per-item lookaheads.
pub struct Lr1Family;

impl ItemFamily for Lr1Family {
    type Item = Lr1Item;

    fn start_item(_grammar: &Grammar, augmented_start: &Rc<str>) -> Self::Item {
        (ProductionRef::new(augmented_start.clone(), 0), 0, Terminal::Eof)
    }

    fn closure(grammar: &Grammar, items: &mut Vec<Self::Item>) {
        closure_lr1(grammar, items);
    }

    fn advance(item: &Self::Item) -> Self::Item {
        (item.0.clone(), item.1 + 1, item.2.clone())
    }

    fn dot_symbol(grammar: &Grammar, item: &Self::Item) -> Option<Symbol> {
        dot_symbol_of(grammar, &item.0, item.1)
    }

    fn at_end(grammar: &Grammar, item: &Self::Item) -> bool {
        item.1 == item.0.rule(grammar).rhs.len()
    }

    fn production_ref(item: &Self::Item) -> &ProductionRef {
        &item.0
    }
}

/// LALR(1) is built the same way as LR(1) (full per-item lookaheads); the
/// canonical collection is then merged by core ([`crate::lr::merge_lalr`])
/// rather than computed via (state, nonterminal) FOLLOW propagation over
/// the augmented grammar -- simpler to get right and produces the same
/// tables, since both are standard constructions of the same LALR(1)
/// automaton.
pub struct LalrFamily;

impl ItemFamily for LalrFamily {
    type Item = Lr1Item;

    fn start_item(grammar: &Grammar, augmented_start: &Rc<str>) -> Self::Item {
        Lr1Family::start_item(grammar, augmented_start)
    }

    fn closure(grammar: &Grammar, items: &mut Vec<Self::Item>) {
        Lr1Family::closure(grammar, items)
    }

    fn advance(item: &Self::Item) -> Self::Item {
        Lr1Family::advance(item)
    }

    fn dot_symbol(grammar: &Grammar, item: &Self::Item) -> Option<Symbol> {
        Lr1Family::dot_symbol(grammar, item)
    }

    fn at_end(grammar: &Grammar, item: &Self::Item) -> bool {
        Lr1Family::at_end(grammar, item)
    }

    fn production_ref(item: &Self::Item) -> &ProductionRef {
        Lr1Family::production_ref(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{augment, GrammarBuilder};

    /// S' -> S, S -> ( S ) | a
    fn paren_grammar() -> Grammar {
        let mut b = GrammarBuilder::new();
        let open = b.terminal("(");
        let close = b.terminal(")");
        let a = b.terminal("a");
        b.nonterminal("S");
        let s = b.nonterminal("S");
        b.add_production("S", vec![open, s, close]);
        b.add_production("S", vec![a]);
        b.build("S").unwrap()
    }

    #[test]
    fn lr0_closure_adds_every_alternative_for_the_dotted_nonterminal() {
        let grammar = augment(&paren_grammar());
        let mut items = vec![Lr0Family::start_item(&grammar, grammar.start())];
        Lr0Family::closure(&grammar, &mut items);
        // S' -> .S, S -> .(S), S -> .a
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn lr1_closure_propagates_lookahead_to_new_items() {
        let grammar = augment(&paren_grammar());
        let mut items = vec![Lr1Family::start_item(&grammar, grammar.start())];
        Lr1Family::closure(&grammar, &mut items);
        assert!(items
            .iter()
            .any(|(p, dot, la)| p.nonterminal.as_ref() == "S" && *dot == 0 && *la == Terminal::Eof));
    }

    #[test]
    fn advance_moves_the_dot_without_disturbing_the_production() {
        let grammar = augment(&paren_grammar());
        let item = Lr0Family::start_item(&grammar, grammar.start());
        let advanced = Lr0Family::advance(&item);
        assert_eq!(advanced.1, item.1 + 1);
        assert_eq!(advanced.0, item.0);
    }
}
