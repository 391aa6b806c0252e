use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

/// A lexical category produced by the tokenizer; leaves of the parse tree.
///
/// `Eq`/`Hash` give structural identity so `Terminal` can key a `HashMap`
/// (the action/goto tables). The "wildcard matches any terminal" equality
/// is a driver-level lookup rule, not the `HashMap` contract, so it lives
/// in [`Terminal::matches`] instead of `PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Terminal {
    Value(Rc<str>),
    Eof,
    Wildcard,
    Unknown,
}

impl Terminal {
    /// A wildcard matches any other terminal.
    pub fn matches(&self, other: &Terminal) -> bool {
        matches!(self, Terminal::Wildcard) || matches!(other, Terminal::Wildcard) || self == other
    }

    pub fn name(&self) -> &str {
        match self {
            Terminal::Value(name) => name,
            Terminal::Eof => "$",
            Terminal::Wildcard => "*",
            Terminal::Unknown => "?",
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Value(name) => write!(f, "{}", name),
            Terminal::Eof => write!(f, "$"),
            Terminal::Wildcard => write!(f, "*"),
            Terminal::Unknown => write!(f, "?"),
        }
    }
}

impl PartialOrd for Terminal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering is defined for non-wildcard terminals by name; the
/// sentinel variants sort before any named terminal so they group
/// deterministically when displayed.
impl Ord for Terminal {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(t: &Terminal) -> u8 {
            match t {
                Terminal::Unknown => 0,
                Terminal::Wildcard => 1,
                Terminal::Eof => 2,
                Terminal::Value(_) => 3,
            }
        }
        match (self, other) {
            (Terminal::Value(a), Terminal::Value(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

/// The sum of [`Terminal`] and nonterminal identity. Nonterminals
/// are interned `Rc<str>` handles (see [`crate::grammar::Interner`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(Terminal),
    Nonterminal(Rc<str>),
}

impl Symbol {
    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::Nonterminal(_) => None,
        }
    }

    pub fn as_nonterminal(&self) -> Option<&Rc<str>> {
        match self {
            Symbol::Nonterminal(n) => Some(n),
            Symbol::Terminal(_) => None,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}

/// The payload carried by a [`Token`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Str(Rc<str>),
    Num(f64),
    Empty,
}

/// A `Terminal` together with an opaque payload value and a source position
///.
#[derive(Debug, Clone)]
pub struct Token {
    pub terminal: Terminal,
    pub value: TokenValue,
    pub position: usize,
}

impl Token {
    pub fn new(terminal: Terminal, value: TokenValue, position: usize) -> Self {
        Self {
            terminal,
            value,
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(Terminal::Eof, TokenValue::Empty, position)
    }

    /// Two tokens are equal when their terminal and payload match; a
    /// wildcard token matches any token regardless of payload.
    pub fn matches(&self, other: &Token) -> bool {
        if matches!(self.terminal, Terminal::Wildcard) || matches!(other.terminal, Terminal::Wildcard) {
            return true;
        }
        self.terminal.matches(&other.terminal) && self.value == other.value
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Empty => write!(f, "[{}]", self.terminal),
            TokenValue::Str(s) => write!(f, "[{}, {:?}]", self.terminal, s),
            TokenValue::Num(n) => write!(f, "[{}, {}]", self.terminal, n),
        }
    }
}
