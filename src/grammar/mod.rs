mod analysis;
mod augment;
mod builder;
mod interner;
mod production;
mod symbol;

pub use augment::augment;
pub use builder::GrammarBuilder;
pub use interner::Interner;
pub use production::{Assoc, Production, ProductionRef};
pub use symbol::{Symbol, Terminal, Token, TokenValue};

use crate::error::GrammarError;
use once_cell::unsync::OnceCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// An element of `FIRST(A)`: either a concrete terminal or epsilon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FirstSymbol {
    Epsilon,
    Terminal(Terminal),
}

pub type FirstSets = HashMap<Rc<str>, HashSet<FirstSymbol>>;
pub type FollowSets = HashMap<Rc<str>, HashSet<Terminal>>;

/// A mapping from nonterminal name to its ordered productions, a designated
/// start symbol, and the FIRST/FOLLOW sets derived from them.
///
/// Grammars are constructed once via [`GrammarBuilder`], then
/// [`Grammar::initialize`] computes FIRST/FOLLOW by fixed point; after that
/// the grammar is read-only except for the one-time augmentation performed
/// during parser construction (see [`augment`]).
pub struct Grammar {
    pub(crate) interner: Interner,
    pub(crate) rules: HashMap<Rc<str>, Vec<Production>>,
    pub(crate) order: Vec<Rc<str>>,
    pub(crate) start: Rc<str>,
    pub(crate) terminal_precedence: HashMap<Terminal, (i32, production::Assoc)>,
    first: OnceCell<FirstSets>,
    follow: OnceCell<FollowSets>,
}

impl Grammar {
    pub fn start(&self) -> &Rc<str> {
        &self.start
    }

    pub fn nonterminal_names(&self) -> impl Iterator<Item = &Rc<str>> {
        self.order.iter()
    }

    pub fn contains_nonterminal(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn productions(&self, name: &str) -> &[Production] {
        self.rules
            .get(name)
            .map(|v| v.as_slice())
            .unwrap_or_else(|| panic!("nonterminal '{}' is not defined in this grammar", name))
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// The declared precedence/associativity of `terminal`, if any.
    pub fn terminal_precedence(&self, terminal: &Terminal) -> Option<(i32, production::Assoc)> {
        self.terminal_precedence.get(terminal).copied()
    }

    /// Computes FIRST and FOLLOW by fixed point. Idempotent: repeated calls
    /// reuse the cached result.
    pub fn initialize(&self) {
        self.first.get_or_init(|| self.calc_first_sets());
        self.follow
            .get_or_init(|| self.calc_follow_sets(self.first()));
    }

    pub fn first(&self) -> &FirstSets {
        self.first
            .get()
            .expect("Grammar::initialize() must be called before FIRST is read")
    }

    pub fn follow(&self) -> &FollowSets {
        self.follow
            .get()
            .expect("Grammar::initialize() must be called before FOLLOW is read")
    }

    pub fn first_of(&self, name: &str) -> &HashSet<FirstSymbol> {
        self.first()
            .get(name)
            .unwrap_or_else(|| panic!("no FIRST set computed for '{}'", name))
    }

    pub fn follow_of(&self, name: &str) -> &HashSet<Terminal> {
        self.follow()
            .get(name)
            .unwrap_or_else(|| panic!("no FOLLOW set computed for '{}'", name))
    }

    fn validate(&self) -> Result<(), GrammarError> {
        for name in &self.order {
            for production in &self.rules[name] {
                for symbol in &production.rhs {
                    if let Symbol::Nonterminal(referenced) = symbol {
                        if !self.rules.contains_key(referenced.as_ref()) {
                            return Err(GrammarError::UndefinedNonterminal {
                                referenced_by: format!("{}", production),
                                name: referenced.to_string(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
