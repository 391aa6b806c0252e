mod collection;
mod driver;
mod families;
mod merge;
mod tables;

pub use collection::{build_canonical_collection, Collection};
pub use driver::LrDriver;
pub use families::{ItemFamily, LalrFamily, Lr0Family, Lr0Item, Lr1Family, Lr1Item, SlrFamily};
pub use merge::merge_lalr;
pub use tables::{build_tables, Action, LrTables};

use crate::grammar::{Grammar, Terminal};

/// Reduce-row lookahead for LR(0): every completed item reduces on any
/// terminal.
pub fn lr0_lookaheads(_grammar: &Grammar, _item: &Lr0Item) -> Vec<Terminal> {
    vec![Terminal::Wildcard]
}

/// Reduce-row lookahead for SLR(1): `FOLLOW` of the item's nonterminal
///.
pub fn slr1_lookaheads(grammar: &Grammar, item: &Lr0Item) -> Vec<Terminal> {
    grammar
        .follow_of(&item.0.nonterminal)
        .iter()
        .cloned()
        .collect()
}

/// Reduce-row lookahead for LR(1)/LALR(1): the item's own carried
/// lookahead.
pub fn lr1_lookaheads(_grammar: &Grammar, item: &Lr1Item) -> Vec<Terminal> {
    vec![item.2.clone()]
}
