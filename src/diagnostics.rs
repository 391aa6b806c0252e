use crate::grammar::Symbol;
use crate::util::Position;
use std::path::PathBuf;

/// What a syntax error does once it is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// No action; the driver halts silently.
    Ignore,
    /// Report the error and halt.
    #[default]
    StopAtFirst,
    /// Report, discard tokens until the lookahead is in the FOLLOW set of
    /// some nonterminal on the stack, pop to it and continue. The abandoned
    /// slots are filled with a sentinel node so the tree's arity stays
    /// intact; the subtrees that would have filled them are simply absent.
    RecoverOnFollow,
}

/// Where logged diagnostics are written.
#[derive(Debug, Clone, Default)]
pub enum LogDest {
    #[default]
    Console,
    TextFile(PathBuf),
    HtmlFile(PathBuf),
}

/// The category a [`Diagnostic`] belongs to, mirroring the `log_*` toggles
/// in [`Options`] one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    StepByStep,
    ParseTree,
    Error,
    Tokenizer,
    ParseTable,
    Grammar,
    GrammarInfo,
    Automaton,
}

/// A single structured record handed to the diagnostics sink.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Option<Position>,
    pub expected: Vec<Symbol>,
    pub found: Option<Symbol>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            position: None,
            expected: Vec::new(),
            found: None,
            message: message.into(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_expected(mut self, expected: Vec<Symbol>) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_found(mut self, found: Symbol) -> Self {
        self.found = Some(found);
        self
    }
}

/// Controls what a [`crate::parser::Parser`] logs and how it reacts to
/// syntax errors. All toggles default to `false` except `log_errors`: an
/// all-quiet-by-default `Options`-style struct.
#[derive(Debug, Clone)]
pub struct Options {
    pub log_step_by_step: bool,
    pub log_parse_tree: bool,
    pub log_errors: bool,
    pub log_tokenizer: bool,
    pub log_parse_table: bool,
    pub log_grammar: bool,
    pub log_grammar_info: bool,
    pub log_automaton: bool,
    pub error_mode: ErrorMode,
    pub log_dest: LogDest,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            log_step_by_step: false,
            log_parse_tree: false,
            log_errors: true,
            log_tokenizer: false,
            log_parse_table: false,
            log_grammar: false,
            log_grammar_info: false,
            log_automaton: false,
            error_mode: ErrorMode::default(),
            log_dest: LogDest::default(),
        }
    }
}

impl Options {
    /// Whether `kind` is enabled for logging under these options.
    pub fn permits(&self, kind: DiagnosticKind) -> bool {
        match kind {
            DiagnosticKind::StepByStep => self.log_step_by_step,
            DiagnosticKind::ParseTree => self.log_parse_tree,
            DiagnosticKind::Error => self.log_errors,
            DiagnosticKind::Tokenizer => self.log_tokenizer,
            DiagnosticKind::ParseTable => self.log_parse_table,
            DiagnosticKind::Grammar => self.log_grammar,
            DiagnosticKind::GrammarInfo => self.log_grammar_info,
            DiagnosticKind::Automaton => self.log_automaton,
        }
    }
}
