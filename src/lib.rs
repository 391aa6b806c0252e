//! grammarkit is a grammar-analysis and parser-table construction toolkit.
//!
//! # Overview
//!
//! Given a context-free grammar built with [`grammar::GrammarBuilder`], this
//! crate computes FIRST/FOLLOW sets, constructs LL(1), LR(0), SLR(1), LR(1)
//! or LALR(1) parse tables, and drives those tables over a token stream
//! tokenized from raw bytes by a [`lexicon::Lexicon`] of regex-described
//! lexemes. The result is a concrete parse tree plus a stream of structured
//! diagnostics.
//!
//! # Design
//!
//! Rather than the embedded combinator DSL some parsing libraries offer for
//! describing grammar *structure* directly in Rust, this crate takes the
//! more traditional parser-generator path: a grammar is data
//! ([`grammar::Grammar`]), analyzed once, and a table is constructed from it
//! ahead of driving any input. The five parser kinds differ only in how
//! their table is built; [`lr::ItemFamily`] generalizes the LR family's
//! canonical-collection construction so LR(0)/SLR(1)/LR(1)/LALR(1) share one
//! routine, differing only in item shape and reduce-row lookahead.
//!
//! # Example
//!
//! ```
//! use grammarkit::diagnostics::Options;
//! use grammarkit::grammar::{GrammarBuilder, Interner};
//! use grammarkit::lexicon::{Lexeme, Lexicon};
//! use grammarkit::parser::{Parser, ParserKind};
//! use grammarkit::regex::{literal, some};
//!
//! let interner = Interner::new();
//! let mut builder = GrammarBuilder::new();
//! let int = builder.terminal("int");
//! let plus = builder.terminal("+");
//! builder.nonterminal("E");
//! builder.nonterminal("E'");
//! let e_prime = builder.nonterminal("E'");
//! builder.add_production("E", vec![int.clone(), e_prime.clone()]);
//! builder.add_production("E'", vec![plus, int.clone(), e_prime]);
//! builder.add_production("E'", vec![]);
//! let grammar = builder.build("E").unwrap();
//!
//! let lexicon = Lexicon::new(vec![
//!     Lexeme::discard("ws", &interner, some(grammarkit::regex::whitespace())),
//!     Lexeme::new("int", &interner, literal(*b"1")),
//!     Lexeme::new("+", &interner, literal(*b"+")),
//! ]);
//!
//! let parser = Parser::new(grammar, lexicon, ParserKind::Ll1, Options::default()).unwrap();
//! let (tree, _diagnostics) = parser.parse(b"1 + 1");
//! assert!(!tree.root.children.is_empty());
//! ```

pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod lexicon;
pub mod ll;
pub mod lr;
pub mod parser;
pub mod regex;
pub mod tree;
pub mod util;

pub use error::{GrammarError, LexError, SyntaxError, TreeError};
pub use parser::{Parser, ParserKind};
