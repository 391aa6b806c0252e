use super::families::ItemFamily;
use crate::grammar::{Grammar, Symbol};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// An ordered sequence of states plus the per-state, per-symbol transition
/// map.
pub struct Collection<Item> {
    pub states: Vec<HashSet<Item>>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Builds the canonical collection for item family `F` over `grammar`
/// (already augmented, with `augmented_start` its fresh start symbol),
/// by work-queue GOTO closure.
pub fn build_canonical_collection<F: ItemFamily>(
    grammar: &Grammar,
    augmented_start: &Rc<str>,
) -> Collection<F::Item> {
    let mut start_items = vec![F::start_item(grammar, augmented_start)];
    F::closure(grammar, &mut start_items);
    let start_state: HashSet<F::Item> = start_items.into_iter().collect();

    let mut states: Vec<HashSet<F::Item>> = vec![start_state];
    let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
    let mut queue: Vec<usize> = vec![0];

    while let Some(state_index) = queue.pop() {
        let state = states[state_index].clone();

        let mut symbols: Vec<Symbol> = Vec::new();
        for item in &state {
            if let Some(symbol) = F::dot_symbol(grammar, item) {
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
        }

        for symbol in symbols {
            let mut next_items: Vec<F::Item> = state
                .iter()
                .filter(|item| F::dot_symbol(grammar, item).as_ref() == Some(&symbol))
                .map(F::advance)
                .collect();
            F::closure(grammar, &mut next_items);
            let next_state: HashSet<F::Item> = next_items.into_iter().collect();

            let target = match states.iter().position(|existing| existing == &next_state) {
                Some(index) => index,
                None => {
                    states.push(next_state);
                    let index = states.len() - 1;
                    queue.push(index);
                    index
                }
            };
            transitions.insert((state_index, symbol), target);
        }
    }

    Collection { states, transitions }
}
