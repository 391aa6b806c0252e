mod tokenizer;

pub use tokenizer::Tokenizer;

use crate::grammar::{Interner, Terminal, TokenValue};
use crate::regex::RegexNode;
use std::rc::Rc;

/// A named lexical pattern: a byte-regex paired with an
/// evaluator that turns the matched lexeme's name and matched slice into a
/// [`TokenValue`], and a flag marking patterns (whitespace, comments) that
/// are recognized but never handed to the parser.
///
/// The evaluator receives the lexeme's own name alongside the matched span
/// so a single evaluator shared across several lexemes (e.g. one evaluator
/// registered for every keyword lexeme) can still tell which alternative
/// matched.
#[derive(Clone)]
pub struct Lexeme {
    pub(crate) name: Rc<str>,
    pub(crate) pattern: RegexNode<u8>,
    pub(crate) eval: Rc<dyn Fn(&str, &[u8]) -> TokenValue>,
    pub(crate) discard: bool,
}

impl Lexeme {
    /// A lexeme whose matched text becomes its token's [`TokenValue::Str`].
    pub fn new(name: &str, interner: &Interner, pattern: RegexNode<u8>) -> Self {
        Self {
            name: interner.intern(name),
            pattern,
            eval: Rc::new(|_name: &str, matched: &[u8]| {
                TokenValue::Str(Rc::from(String::from_utf8_lossy(matched).into_owned()))
            }),
            discard: false,
        }
    }

    /// A lexeme recognized by the tokenizer but dropped from the emitted
    /// token stream.
    pub fn discard(name: &str, interner: &Interner, pattern: RegexNode<u8>) -> Self {
        let mut lexeme = Self::new(name, interner, pattern);
        lexeme.discard = true;
        lexeme
    }

    /// A lexeme with a custom evaluator, e.g. parsing numeric literals into
    /// [`TokenValue::Num`], or disambiguating by name which keyword matched.
    pub fn with_eval(
        name: &str,
        interner: &Interner,
        pattern: RegexNode<u8>,
        eval: impl Fn(&str, &[u8]) -> TokenValue + 'static,
    ) -> Self {
        let mut lexeme = Self::new(name, interner, pattern);
        lexeme.eval = Rc::new(eval);
        lexeme
    }

    pub fn terminal(&self) -> Terminal {
        Terminal::Value(self.name.clone())
    }
}

/// An ordered collection of [`Lexeme`]s. Order is significant: maximal-munch
/// ties are broken in favor of whichever lexeme was declared first.
pub struct Lexicon {
    lexemes: Vec<Lexeme>,
}

impl Lexicon {
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        Self { lexemes }
    }

    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }
}
