use super::tables::{Action, LrTables};
use crate::diagnostics::{Diagnostic, DiagnosticKind, ErrorMode, Options};
use crate::error::{SyntaxError, TreeError};
use crate::grammar::{Grammar, Symbol, Terminal, Token};
use crate::tree::{BottomUpBuilder, ParseTree};
use crate::util::Code;
use std::rc::Rc;

/// Drives ACTION/GOTO tables over a token stream, building the parse tree
/// bottom-up.
pub struct LrDriver<'g> {
    grammar: &'g Grammar,
    tables: &'g LrTables,
}

impl<'g> LrDriver<'g> {
    pub fn new(grammar: &'g Grammar, tables: &'g LrTables) -> Self {
        Self { grammar, tables }
    }

    pub fn parse(
        &self,
        tokens: &[Token],
        code: &Code<'_>,
        options: &Options,
    ) -> Result<(ParseTree, Vec<Diagnostic>), TreeError> {
        let mut diagnostics = Vec::new();
        let mut states: Vec<usize> = vec![0];
        let mut builder = BottomUpBuilder::new();
        let mut pos = 0usize;

        loop {
            let token = &tokens[pos];
            let state = *states.last().expect("state stack is never empty");

            match self.tables.action(state, &token.terminal).cloned() {
                Some(Action::Shift(target)) => {
                    states.push(target);
                    builder.shift(token.clone());
                    self.log_step(options, &mut diagnostics, &format!("shift '{}' -> state {}", token.terminal, target));
                    pos += 1;
                }
                Some(Action::Reduce(production)) => {
                    let arity = production.rule(self.grammar).rhs.len();
                    let new_len = states.len() - arity;
                    states.truncate(new_len);
                    let exposed = *states.last().expect("state stack is never empty");
                    let target = self.tables.goto(exposed, &production.nonterminal).ok_or_else(|| {
                        TreeError {
                            message: format!(
                                "no GOTO entry for state {} on '{}'",
                                exposed, production.nonterminal
                            ),
                        }
                    })?;
                    states.push(target);
                    builder.reduce(production.clone(), arity);
                    self.log_step(options, &mut diagnostics, &format!("reduce by {}", production));
                }
                Some(Action::Accept) => {
                    self.log_step(options, &mut diagnostics, "accept");
                    break;
                }
                None => {
                    if options.permits(DiagnosticKind::Error) {
                        let expected: Vec<Symbol> = self
                            .tables
                            .expected_terminals(state)
                            .into_iter()
                            .map(Symbol::Terminal)
                            .collect();
                        let syntax_error = SyntaxError {
                            position: code.obtain_position(token.position),
                            found: Symbol::Terminal(token.terminal.clone()),
                            expected: expected.clone(),
                        };
                        diagnostics.push(
                            Diagnostic::error(syntax_error.to_string())
                                .with_position(syntax_error.position.clone())
                                .with_expected(expected)
                                .with_found(Symbol::Terminal(token.terminal.clone())),
                        );
                    }
                    match options.error_mode {
                        ErrorMode::Ignore | ErrorMode::StopAtFirst => {
                            return Err(TreeError {
                                message: format!("syntax error at position {}", token.position),
                            });
                        }
                        ErrorMode::RecoverOnFollow => {
                            if !self.recover(&mut states, &mut pos, tokens, &mut builder) {
                                return Err(TreeError {
                                    message: "unable to recover from syntax error".to_string(),
                                });
                            }
                        }
                    }
                }
            }
        }

        let tree = builder.finish()?;
        Ok((tree, diagnostics))
    }

    fn log_step(&self, options: &Options, diagnostics: &mut Vec<Diagnostic>, message: &str) {
        if options.permits(DiagnosticKind::StepByStep) {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::StepByStep,
                position: None,
                expected: Vec::new(),
                found: None,
                message: message.to_string(),
            });
        }
    }

    /// Classic panic-mode recovery: discard tokens until the lookahead is
    /// in the FOLLOW set of some nonterminal reachable by a GOTO from a
    /// state still on the stack, pop down to that state, and push its GOTO
    /// target as if that nonterminal had just been reduced.
    fn recover(
        &self,
        states: &mut Vec<usize>,
        pos: &mut usize,
        tokens: &[Token],
        builder: &mut BottomUpBuilder,
    ) -> bool {
        loop {
            for depth in (0..states.len()).rev() {
                if let Some(target) = self.find_sync_goto(states[depth], &tokens[*pos].terminal) {
                    states.truncate(depth + 1);
                    states.push(target);
                    builder.push_sentinel();
                    return true;
                }
            }
            if *pos >= tokens.len() - 1 {
                return false;
            }
            *pos += 1;
        }
    }

    fn find_sync_goto(&self, state: usize, terminal: &Terminal) -> Option<usize> {
        self.grammar.nonterminal_names().find_map(|name: &Rc<str>| {
            self.tables
                .goto(state, name)
                .filter(|_| self.grammar.follow_of(name).contains(terminal))
        })
    }
}
