use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Canonicalizes nonterminal (and terminal value) names to `Rc<str>` so
/// structurally-equal names share one allocation and compare cheaply.
/// Names are interned at grammar-construction time; the grammar owns one
/// `Interner` for its lifetime.
#[derive(Default)]
pub struct Interner {
    seen: RefCell<HashSet<Rc<str>>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, name: &str) -> Rc<str> {
        if let Some(existing) = self.seen.borrow().get(name) {
            return existing.clone();
        }
        let interned: Rc<str> = Rc::from(name);
        self.seen.borrow_mut().insert(interned.clone());
        interned
    }
}
