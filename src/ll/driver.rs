use super::LlTable;
use crate::diagnostics::{Diagnostic, DiagnosticKind, ErrorMode, Options};
use crate::error::{SyntaxError, TreeError};
use crate::grammar::{Grammar, Symbol, Terminal, Token};
use crate::tree::{ParseTree, TopDownBuilder};
use crate::util::Code;

/// Drives an [`LlTable`] over a token stream, predicting top-down.
pub struct LlDriver<'g> {
    grammar: &'g Grammar,
    table: &'g LlTable,
}

impl<'g> LlDriver<'g> {
    pub fn new(grammar: &'g Grammar, table: &'g LlTable) -> Self {
        Self { grammar, table }
    }

    /// Consumes `tokens` start to finish, returning the resulting parse
    /// tree and any diagnostics raised along the way. A trailing
    /// end-of-file token is assumed present in `tokens`.
    pub fn parse(
        &self,
        tokens: &[Token],
        code: &Code<'_>,
        options: &Options,
    ) -> Result<(ParseTree, Vec<Diagnostic>), TreeError> {
        let mut diagnostics = Vec::new();
        let mut pos = 0usize;

        let start = self.grammar.start().clone();
        let first_production = self.table.get(&start, &tokens[pos].terminal).cloned();
        let Some(first_production) = first_production else {
            return Err(TreeError {
                message: format!(
                    "no prediction for start symbol '{}' on first token '{}'",
                    start, tokens[pos].terminal
                ),
            });
        };
        let rhs = first_production.rule(self.grammar).rhs.clone();
        let mut builder = TopDownBuilder::new(first_production.clone(), rhs.len());
        let mut stack: Vec<Symbol> = rhs.iter().rev().cloned().collect();
        stack.push(Symbol::Terminal(Terminal::Eof));
        self.log_step(options, &mut diagnostics, &format!("predict {}", first_production));

        while let Some(top) = stack.pop() {
            let token = &tokens[pos];
            match top {
                Symbol::Terminal(ref expected) => {
                    if expected.matches(&token.terminal) {
                        if !matches!(expected, Terminal::Eof) {
                            builder.shift(token.clone());
                            pos += 1;
                        }
                        continue;
                    }
                }
                Symbol::Nonterminal(ref name) => {
                    if let Some(production) = self.table.get(name, &token.terminal).cloned() {
                        let rhs = production.rule(self.grammar).rhs.clone();
                        builder.expand(production.clone(), rhs.len());
                        for symbol in rhs.iter().rev() {
                            stack.push(symbol.clone());
                        }
                        self.log_step(options, &mut diagnostics, &format!("predict {}", production));
                        continue;
                    }
                }
            }

            // `top` had no valid action for the current token.
            stack.push(top.clone());
            if !self.recover(&mut stack, &mut builder, &mut pos, tokens, code, options, &mut diagnostics) {
                break;
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

    /// Handles a mismatch at the top of the stack according to
    /// `options.error_mode`; returns whether parsing should continue.
    fn recover(
        &self,
        stack: &mut Vec<Symbol>,
        builder: &mut TopDownBuilder,
        pos: &mut usize,
        tokens: &[Token],
        code: &Code<'_>,
        options: &Options,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let expected = stack.pop().expect("recover called with an empty stack");
        let token = &tokens[*pos];

        if options.permits(DiagnosticKind::Error) {
            let syntax_error = SyntaxError {
                position: code.obtain_position(token.position),
                found: Symbol::Terminal(token.terminal.clone()),
                expected: vec![expected.clone()],
            };
            diagnostics.push(
                Diagnostic::error(syntax_error.to_string())
                    .with_position(syntax_error.position)
                    .with_expected(syntax_error.expected.clone())
                    .with_found(syntax_error.found.clone()),
            );
        }

        match options.error_mode {
            ErrorMode::Ignore | ErrorMode::StopAtFirst => false,
            ErrorMode::RecoverOnFollow => {
                builder.skip();

                let in_follow = |symbol: &Symbol, terminal: &Terminal| match symbol {
                    Symbol::Nonterminal(name) => self.grammar.follow_of(name).contains(terminal),
                    Symbol::Terminal(t) => t.matches(terminal),
                };

                while *pos < tokens.len() - 1
                    && !in_follow(&expected, &tokens[*pos].terminal)
                    && !stack.iter().any(|s| in_follow(s, &tokens[*pos].terminal))
                {
                    *pos += 1;
                }

                while let Some(top) = stack.last() {
                    if in_follow(top, &tokens[*pos].terminal) {
                        break;
                    }
                    stack.pop();
                    builder.skip();
                }

                true
            }
        }
    }
}
