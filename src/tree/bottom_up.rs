use super::{Node, NodeValue, ParseTree};
use crate::error::TreeError;
use crate::grammar::{ProductionRef, Token};

/// Builds a parse tree the way an LR driver discovers it: a stack of
/// completed subtrees, collapsed into a new interior node on every reduce
///.
#[derive(Default)]
pub struct BottomUpBuilder {
    stack: Vec<Node>,
}

impl BottomUpBuilder {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Pushes a placeholder subtree for error recovery: a nonterminal the
    /// driver decided to resynchronize on without actually deriving it
    ///.
    pub fn push_sentinel(&mut self) {
        self.stack.push(Node {
            value: NodeValue::Null,
            children: Vec::new(),
        });
    }

    pub fn shift(&mut self, token: Token) {
        self.stack.push(Node {
            value: NodeValue::Token(token),
            children: Vec::new(),
        });
    }

    /// Pops the top `arity` subtrees (in left-to-right order) and wraps them
    /// under a new node standing for `production`.
    pub fn reduce(&mut self, production: ProductionRef, arity: usize) {
        let start = self.stack.len() - arity;
        let children = self.stack.split_off(start);
        self.stack.push(Node {
            value: NodeValue::Production(production),
            children,
        });
    }

    pub fn finish(mut self) -> Result<ParseTree, TreeError> {
        if self.stack.len() != 1 {
            return Err(TreeError {
                message: format!(
                    "expected exactly one root node after parsing, found {}",
                    self.stack.len()
                ),
            });
        }
        Ok(ParseTree {
            root: self.stack.pop().unwrap(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Terminal, TokenValue};

    #[test]
    fn reduce_wraps_the_right_number_of_children() {
        let mut builder = BottomUpBuilder::new();
        builder.shift(Token::new(Terminal::Value("int".into()), TokenValue::Empty, 0));
        builder.shift(Token::new(Terminal::Value("+".into()), TokenValue::Empty, 1));
        builder.shift(Token::new(Terminal::Value("int".into()), TokenValue::Empty, 2));
        builder.reduce(ProductionRef::new("E".into(), 0), 3);
        let tree = builder.finish().unwrap();
        assert_eq!(tree.root.children.len(), 3);
    }

    #[test]
    fn finish_rejects_a_dangling_stack() {
        let mut builder = BottomUpBuilder::new();
        builder.shift(Token::new(Terminal::Value("int".into()), TokenValue::Empty, 0));
        builder.shift(Token::new(Terminal::Value("int".into()), TokenValue::Empty, 1));
        assert!(builder.finish().is_err());
    }
}
