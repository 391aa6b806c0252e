use crate::grammar::Symbol;
use crate::util::Position;
use std::fmt::{Display, Formatter};

/// A fatal error raised while tokenizing an input stream.
///
/// Either no lexeme in the lexicon matches at a position, or the winning
/// lexeme produced a zero-length match (forbidden by construction).
#[derive(Debug, Clone)]
pub enum LexError {
    NoMatch { position: usize, found: u8 },
    ZeroLengthMatch { position: usize, lexeme: String },
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::NoMatch { position, found } => write!(
                f,
                "LexError: no lexeme matches byte {:?} at position {}",
                *found as char, position
            ),
            LexError::ZeroLengthMatch { position, lexeme } => write!(
                f,
                "LexError: lexeme '{}' produced a zero-length match at position {}",
                lexeme, position
            ),
        }
    }
}

/// A fatal error discovered at table-construction time.
///
/// Grammar errors always abort parser construction; the generator keeps
/// collecting conflicts after the first one so the report is complete.
#[derive(Debug, Clone)]
pub enum GrammarError {
    NotLl1 {
        nonterminal: String,
        terminal: String,
        existing: usize,
        attempted: usize,
    },
    UnresolvedShiftReduce {
        state: usize,
        terminal: String,
        reduce: String,
    },
    UnresolvedReduceReduce {
        state: usize,
        terminal: String,
        first: String,
        second: String,
    },
    UndefinedNonterminal {
        referenced_by: String,
        name: String,
    },
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::NotLl1 {
                nonterminal,
                terminal,
                existing,
                attempted,
            } => write!(
                f,
                "GrammarError: not LL(1) -- cell ({}, {}) claimed by both production {} and {}",
                nonterminal, terminal, existing, attempted
            ),
            GrammarError::UnresolvedShiftReduce {
                state,
                terminal,
                reduce,
            } => write!(
                f,
                "GrammarError: unresolved shift/reduce conflict in state {} on {} (reduce by {})",
                state, terminal, reduce
            ),
            GrammarError::UnresolvedReduceReduce {
                state,
                terminal,
                first,
                second,
            } => write!(
                f,
                "GrammarError: unresolved reduce/reduce conflict in state {} on {} (between {} and {})",
                state, terminal, first, second
            ),
            GrammarError::UndefinedNonterminal { referenced_by, name } => write!(
                f,
                "GrammarError: nonterminal '{}' referenced by {} is not defined in the grammar",
                name, referenced_by
            ),
        }
    }
}

/// A syntax error surfaced by a driver: the current token has no action for
/// the parser's current state.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub position: Position,
    pub found: Symbol,
    pub expected: Vec<Symbol>,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SyntaxError: unexpected {:?} at {} (expected one of {:?})",
            self.found, self.position, self.expected
        )
    }
}

/// Indicates the tree builder received a node stream inconsistent with its
/// reserved arity -- a generator bug rather than a grammar or input problem.
#[derive(Debug, Clone)]
pub struct TreeError {
    pub message: String,
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeError: {}", self.message)
    }
}

impl std::error::Error for LexError {}
impl std::error::Error for GrammarError {}
impl std::error::Error for SyntaxError {}
impl std::error::Error for TreeError {}
