mod bottom_up;
mod top_down;

pub use bottom_up::BottomUpBuilder;
pub use top_down::TopDownBuilder;

use crate::grammar::{ProductionRef, Token};

/// A node's payload: a lexical leaf, an interior node standing
/// for a completed production, or `Null` for a slot the builder never filled
/// (reachable only through [`TopDownBuilder::finish`] failing, since a
/// successful parse fills every slot).
#[derive(Debug, Clone)]
pub enum NodeValue {
    Token(Token),
    Production(ProductionRef),
    Null,
}

/// A node of a concrete parse tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub value: NodeValue,
    pub children: Vec<Node>,
}

/// The output of a successful parse.
#[derive(Debug, Clone)]
pub struct ParseTree {
    pub root: Node,
}
