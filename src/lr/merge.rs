use super::collection::Collection;
use super::families::Lr1Item;
use crate::grammar::{ProductionRef, Symbol};
use std::collections::{HashMap, HashSet};

/// Merges LR(1) states that share the same LR(0) core (production, dot)
/// pairs, ignoring lookaheads -- the classic construction of the LALR(1)
/// automaton from the full canonical LR(1) collection.
pub fn merge_lalr(collection: Collection<Lr1Item>) -> Collection<Lr1Item> {
    let cores: Vec<HashSet<(ProductionRef, usize)>> = collection
        .states
        .iter()
        .map(|state| state.iter().map(|(p, d, _)| (p.clone(), *d)).collect())
        .collect();

    let mut distinct_cores: Vec<HashSet<(ProductionRef, usize)>> = Vec::new();
    let mut old_to_new: Vec<usize> = Vec::with_capacity(cores.len());
    for core in &cores {
        let index = match distinct_cores.iter().position(|existing| existing == core) {
            Some(index) => index,
            None => {
                distinct_cores.push(core.clone());
                distinct_cores.len() - 1
            }
        };
        old_to_new.push(index);
    }

    let mut merged_states: Vec<HashSet<Lr1Item>> = vec![HashSet::new(); distinct_cores.len()];
    for (old_index, state) in collection.states.into_iter().enumerate() {
        merged_states[old_to_new[old_index]].extend(state);
    }

    let mut merged_transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
    for ((old_state, symbol), old_target) in collection.transitions {
        merged_transitions.insert((old_to_new[old_state], symbol), old_to_new[old_target]);
    }

    Collection {
        states: merged_states,
        transitions: merged_transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{augment, GrammarBuilder};
    use crate::lr::collection::build_canonical_collection;
    use crate::lr::families::Lr1Family;

    /// The textbook example where LR(1) splits a state LALR(1) merges back:
    /// S -> a A | a B, A -> c, B -> c, each reachable through a different
    /// lookahead but sharing the same LR(0) core after the 'c' shift.
    #[test]
    fn merging_never_increases_state_count() {
        let mut b = GrammarBuilder::new();
        let a = b.terminal("a");
        let c = b.terminal("c");
        b.nonterminal("S");
        let nt_a = b.nonterminal("A");
        let nt_b = b.nonterminal("B");
        b.add_production("S", vec![a.clone(), nt_a]);
        b.add_production("S", vec![a, nt_b]);
        b.add_production("A", vec![c.clone()]);
        b.add_production("B", vec![c]);
        let grammar = augment(&b.build("S").unwrap());

        let collection = build_canonical_collection::<Lr1Family>(&grammar, grammar.start());
        let before = collection.states.len();
        let merged = merge_lalr(collection);
        assert!(merged.states.len() <= before);
        assert!(!merged.states.is_empty());
    }
}
