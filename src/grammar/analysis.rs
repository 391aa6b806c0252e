use super::{FirstSets, FirstSymbol, FollowSets, Grammar, Symbol, Terminal};
use std::collections::HashSet;

impl Grammar {
    /// Computes FIRST by fixed point: seed from each production's leading
    /// symbol/epsilon, then repeatedly fold in FIRST★ of each production's
    /// full right-hand side until nothing changes.
    pub(crate) fn calc_first_sets(&self) -> FirstSets {
        let mut first: FirstSets = FirstSets::new();
        for name in &self.order {
            let set = first.entry(name.clone()).or_default();
            for production in &self.rules[name] {
                if production.is_epsilon() {
                    set.insert(FirstSymbol::Epsilon);
                } else if let Symbol::Terminal(t) = &production.rhs[0] {
                    set.insert(FirstSymbol::Terminal(t.clone()));
                }
            }
        }

        loop {
            let mut changed = false;
            for name in &self.order {
                for production in &self.rules[name] {
                    let star = self.first_star_with(&production.rhs, &first);
                    let set = first.get_mut(name).unwrap();
                    for symbol in star {
                        changed |= set.insert(symbol);
                    }
                }
            }
            if !changed {
                break;
            }
        }

        first
    }

    /// Computes FOLLOW by fixed point: seed FOLLOW(start) with end-of-file
    /// and every directly-adjacent terminal, then repeatedly fold in
    /// FIRST★ of the remainder of each production (and FOLLOW of the
    /// defining nonterminal when that remainder is nullable) until nothing
    /// changes.
    pub(crate) fn calc_follow_sets(&self, first: &FirstSets) -> FollowSets {
        let mut follow: FollowSets = FollowSets::new();
        for name in &self.order {
            follow.entry(name.clone()).or_default();
        }

        for name in &self.order {
            for production in &self.rules[name] {
                if production.rhs.len() < 2 {
                    continue;
                }
                for window in production.rhs.windows(2) {
                    if let (Symbol::Nonterminal(a), Symbol::Terminal(t)) = (&window[0], &window[1])
                    {
                        follow.get_mut(a).unwrap().insert(t.clone());
                    }
                }
            }
        }

        follow.get_mut(&self.start).unwrap().insert(Terminal::Eof);

        loop {
            let mut changed = false;
            for name in &self.order {
                for production in &self.rules[name] {
                    if production.is_epsilon() {
                        continue;
                    }
                    for i in 0..production.rhs.len() - 1 {
                        let a = match &production.rhs[i] {
                            Symbol::Nonterminal(a) => a.clone(),
                            Symbol::Terminal(_) => continue,
                        };
                        let rest = &production.rhs[i + 1..];
                        let star = self.first_star_with(rest, first);

                        let mut contains_epsilon = false;
                        let mut additions: Vec<Terminal> = Vec::new();
                        for symbol in &star {
                            match symbol {
                                FirstSymbol::Terminal(t) => additions.push(t.clone()),
                                FirstSymbol::Epsilon => contains_epsilon = true,
                            }
                        }

                        let follow_of_a = follow.get_mut(&a).unwrap();
                        for t in additions {
                            changed |= follow_of_a.insert(t);
                        }

                        if contains_epsilon {
                            let follow_of_name: Vec<Terminal> =
                                follow.get(name).unwrap().iter().cloned().collect();
                            let follow_of_a = follow.get_mut(&a).unwrap();
                            for t in follow_of_name {
                                changed |= follow_of_a.insert(t);
                            }
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }

        follow
    }

    /// FIRST★(β) extended to symbol sequences.
    pub fn first_star(&self, symbols: &[Symbol]) -> HashSet<FirstSymbol> {
        self.first_star_with(symbols, self.first())
    }

    fn first_star_with(&self, symbols: &[Symbol], first: &FirstSets) -> HashSet<FirstSymbol> {
        let Some((head, rest)) = symbols.split_first() else {
            let mut set = HashSet::new();
            set.insert(FirstSymbol::Epsilon);
            return set;
        };

        match head {
            Symbol::Terminal(t) => {
                let mut set = HashSet::new();
                set.insert(FirstSymbol::Terminal(t.clone()));
                set
            }
            Symbol::Nonterminal(name) => {
                let first_of_head = first
                    .get(name)
                    .unwrap_or_else(|| panic!("no FIRST set computed for '{}'", name));
                let mut result: HashSet<FirstSymbol> = first_of_head
                    .iter()
                    .filter(|s| **s != FirstSymbol::Epsilon)
                    .cloned()
                    .collect();
                if first_of_head.contains(&FirstSymbol::Epsilon) {
                    result.extend(self.first_star_with(rest, first));
                }
                result
            }
        }
    }
}
