use super::{Node, NodeValue, ParseTree};
use crate::error::TreeError;
use crate::grammar::{ProductionRef, Token};

/// A tree node mid-construction: either still waiting to be expanded or
/// filled in with a token or a completed production -- an explicit slot
/// rather than a node with uninitialized fields.
#[derive(Debug, Clone)]
enum Slot {
    Unfilled,
    Token(Token),
    Production(ProductionRef, Vec<Slot>),
}

/// Builds a parse tree the way an LL(1) driver predicts it: the tree exists
/// top-down from the start, and each prediction or token match fills in the
/// leftmost unfilled slot.
pub struct TopDownBuilder {
    root: Slot,
    /// Paths from the root to each still-unfilled slot, nearest-next-to-fill
    /// last (so it behaves as a stack mirroring the driver's own stack).
    pending: Vec<Vec<usize>>,
}

impl TopDownBuilder {
    /// Seeds the tree with the start symbol's predicted production.
    pub fn new(start_production: ProductionRef, arity: usize) -> Self {
        let root = Slot::Production(start_production, (0..arity).map(|_| Slot::Unfilled).collect());
        let pending = (0..arity).rev().map(|i| vec![i]).collect();
        Self { root, pending }
    }

    /// Expands the next unfilled slot (a predicted nonterminal) into a new
    /// production node with `arity` fresh unfilled children.
    pub fn expand(&mut self, production: ProductionRef, arity: usize) {
        let path = self
            .pending
            .pop()
            .expect("TopDownBuilder::expand called with no unfilled slot");
        let slot = Self::slot_at_mut(&mut self.root, &path);
        *slot = Slot::Production(production, (0..arity).map(|_| Slot::Unfilled).collect());
        for i in (0..arity).rev() {
            let mut child_path = path.clone();
            child_path.push(i);
            self.pending.push(child_path);
        }
    }

    /// Fills the next unfilled slot (a matched terminal) with its token.
    pub fn shift(&mut self, token: Token) {
        let path = self
            .pending
            .pop()
            .expect("TopDownBuilder::shift called with no unfilled slot");
        let slot = Self::slot_at_mut(&mut self.root, &path);
        *slot = Slot::Token(token);
    }

    /// Abandons the next unfilled slot without a token or expansion,
    /// leaving it `Unfilled` (rendered as [`NodeValue::Null`]). Used by
    /// error recovery to retire a stack symbol the driver gave up on while
    /// keeping the slot bookkeeping consistent.
    pub fn skip(&mut self) {
        self.pending
            .pop()
            .expect("TopDownBuilder::skip called with no unfilled slot");
    }

    fn slot_at_mut<'a>(root: &'a mut Slot, path: &[usize]) -> &'a mut Slot {
        let mut node = root;
        for &i in path {
            match node {
                Slot::Production(_, children) => node = &mut children[i],
                _ => panic!("slot path traverses through a non-production slot"),
            }
        }
        node
    }

    pub fn finish(self) -> Result<ParseTree, TreeError> {
        if !self.pending.is_empty() {
            return Err(TreeError {
                message: format!("{} slot(s) left unfilled at end of parse", self.pending.len()),
            });
        }
        Ok(ParseTree {
            root: Self::into_node(self.root),
        })
    }

    fn into_node(slot: Slot) -> Node {
        match slot {
            Slot::Token(token) => Node {
                value: NodeValue::Token(token),
                children: Vec::new(),
            },
            Slot::Production(production, children) => Node {
                value: NodeValue::Production(production),
                children: children.into_iter().map(Self::into_node).collect(),
            },
            Slot::Unfilled => Node {
                value: NodeValue::Null,
                children: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Terminal, TokenValue};

    #[test]
    fn expands_and_shifts_leftmost_first() {
        // E -> int + int
        let mut builder = TopDownBuilder::new(ProductionRef::new("E".into(), 0), 3);
        builder.shift(Token::new(Terminal::Value("int".into()), TokenValue::Empty, 0));
        builder.shift(Token::new(Terminal::Value("+".into()), TokenValue::Empty, 1));
        builder.shift(Token::new(Terminal::Value("int".into()), TokenValue::Empty, 2));
        let tree = builder.finish().unwrap();
        assert_eq!(tree.root.children.len(), 3);
    }

    #[test]
    fn nested_expansion_fills_grandchildren() {
        // S -> E, E -> int
        let mut builder = TopDownBuilder::new(ProductionRef::new("S".into(), 0), 1);
        builder.expand(ProductionRef::new("E".into(), 0), 1);
        builder.shift(Token::new(Terminal::Value("int".into()), TokenValue::Empty, 0));
        let tree = builder.finish().unwrap();
        assert_eq!(tree.root.children.len(), 1);
        assert_eq!(tree.root.children[0].children.len(), 1);
    }

    #[test]
    fn finish_rejects_unfilled_slots() {
        let builder = TopDownBuilder::new(ProductionRef::new("S".into(), 0), 1);
        assert!(builder.finish().is_err());
    }

    #[test]
    fn skip_leaves_a_null_sentinel() {
        let mut builder = TopDownBuilder::new(ProductionRef::new("S".into(), 0), 1);
        builder.skip();
        let tree = builder.finish().unwrap();
        assert!(matches!(tree.root.children[0].value, NodeValue::Null));
    }
}
