use super::{Assoc, Grammar, Interner, Production, ProductionRef, Symbol, Terminal};
use crate::error::GrammarError;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Accepts a mapping from nonterminal name to a sequence of productions,
/// each a sequence of terminal/nonterminal symbols with optional precedence
/// and associativity: a plain builder surface rather than an embedded-DSL
/// overloaded-operator one.
pub struct GrammarBuilder {
    interner: Interner,
    rules: HashMap<Rc<str>, Vec<Production>>,
    order: Vec<Rc<str>>,
    terminal_precedence: HashMap<Terminal, (i32, Assoc)>,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            rules: HashMap::new(),
            order: Vec::new(),
            terminal_precedence: HashMap::new(),
        }
    }

    /// Interns `name` as a terminal value symbol.
    pub fn terminal(&self, name: &str) -> Symbol {
        Symbol::Terminal(super::Terminal::Value(self.interner.intern(name)))
    }

    /// Declares a terminal's precedence/associativity for shift/reduce
    /// conflict resolution. A terminal with no declared precedence is
    /// compared as if it had been declared at precedence `0` with
    /// `Assoc::None` -- the same default a production gets when it
    /// declares none, so an undeclared terminal against an undeclared
    /// production still reports an unresolved conflict rather than
    /// silently picking a side.
    pub fn declare_precedence(&mut self, name: &str, precedence: i32, associativity: Assoc) {
        let terminal = Terminal::Value(self.interner.intern(name));
        self.terminal_precedence
            .insert(terminal, (precedence, associativity));
    }

    /// Interns `name` as a nonterminal symbol, registering it (with no
    /// productions yet) if this is its first mention.
    pub fn nonterminal(&mut self, name: &str) -> Symbol {
        let interned = self.register(name);
        Symbol::Nonterminal(interned)
    }

    fn register(&mut self, name: &str) -> Rc<str> {
        let interned = self.interner.intern(name);
        self.rules.entry(interned.clone()).or_insert_with(|| {
            self.order.push(interned.clone());
            Vec::new()
        });
        interned
    }

    /// Adds `nonterminal -> rhs` with default precedence 0 and no
    /// associativity, returning a reference to the new production.
    pub fn add_production(&mut self, nonterminal: &str, rhs: Vec<Symbol>) -> ProductionRef {
        self.add_production_with(nonterminal, rhs, 0, Assoc::None)
    }

    pub fn add_production_with(
        &mut self,
        nonterminal: &str,
        rhs: Vec<Symbol>,
        precedence: i32,
        associativity: Assoc,
    ) -> ProductionRef {
        let interned = self.register(nonterminal);
        let entry = self.rules.get_mut(&interned).unwrap();
        let index = entry.len();
        entry.push(Production {
            nonterminal: interned.clone(),
            index,
            rhs,
            precedence,
            associativity,
        });
        ProductionRef::new(interned, index)
    }

    /// Finalizes the grammar with `start` as its designated start symbol.
    /// Fails if `start`, or any nonterminal referenced from a right-hand
    /// side, was never registered: every nonterminal referenced in any
    /// production must be a key in the grammar.
    pub fn build(self, start: &str) -> Result<Grammar, GrammarError> {
        if !self.rules.contains_key(start) {
            return Err(GrammarError::UndefinedNonterminal {
                referenced_by: "grammar start symbol".to_string(),
                name: start.to_string(),
            });
        }
        let start = self.interner.intern(start);
        let grammar = Grammar {
            interner: self.interner,
            rules: self.rules,
            order: self.order,
            start,
            terminal_precedence: self.terminal_precedence,
            first: OnceCell::new(),
            follow: OnceCell::new(),
        };
        grammar.validate()?;
        Ok(grammar)
    }
}
