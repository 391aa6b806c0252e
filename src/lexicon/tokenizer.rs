use super::Lexicon;
use crate::error::LexError;
use crate::grammar::{Terminal, Token};
use crate::regex::Regex;

/// Drives a [`Lexicon`] over an input byte slice with longest-match
/// (maximal-munch) tokenization: at each position, every lexeme
/// is tried and the longest resulting match wins; among equal-length
/// matches the first-declared lexeme wins.
pub struct Tokenizer<'x> {
    lexicon: &'x Lexicon,
}

impl<'x> Tokenizer<'x> {
    pub fn new(lexicon: &'x Lexicon) -> Self {
        Self { lexicon }
    }

    /// Tokenizes `input` in full, returning every non-discarded token
    /// followed by a trailing end-of-file token, or the first [`LexError`]
    /// encountered.
    pub fn tokenize(&self, input: &[u8]) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut pos = 0usize;

        while pos < input.len() {
            // `Iterator::max_by_key` keeps the *last* maximal element on
            // ties, which would let a later-declared lexeme beat an
            // earlier one of equal length. Fold by hand with a strict `>`
            // so the first-declared lexeme wins ties instead.
            let mut winner: Option<(&super::Lexeme, usize)> = None;
            for lexeme in self.lexicon.lexemes() {
                if let Some(end) = lexeme.pattern.match_at(input, pos) {
                    if winner.map_or(true, |(_, best)| end > best) {
                        winner = Some((lexeme, end));
                    }
                }
            }

            let Some((lexeme, end)) = winner else {
                return Err(LexError::NoMatch {
                    position: pos,
                    found: input[pos],
                });
            };

            if end == pos {
                return Err(LexError::ZeroLengthMatch {
                    position: pos,
                    lexeme: lexeme.name.to_string(),
                });
            }

            if !lexeme.discard {
                let value = (lexeme.eval)(&lexeme.name, &input[pos..end]);
                tokens.push(Token::new(lexeme.terminal(), value, pos));
            }

            pos = end;
        }

        tokens.push(Token::new(Terminal::Eof, crate::grammar::TokenValue::Empty, pos));
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Interner;
    use crate::lexicon::Lexeme;
    use crate::regex::{digit, some, whitespace};

    fn build_lexicon(interner: &Interner) -> Lexicon {
        Lexicon::new(vec![
            Lexeme::discard("ws", interner, some(whitespace())),
            Lexeme::with_eval("num", interner, some(digit()), |_name, matched| {
                crate::grammar::TokenValue::Num(
                    std::str::from_utf8(matched).unwrap().parse().unwrap(),
                )
            }),
        ])
    }

    #[test]
    fn longest_match_wins_over_prefix() {
        let interner = Interner::new();
        let lexicon = Lexicon::new(vec![
            Lexeme::new("int_kw", &interner, crate::regex::literal(*b"in")),
            Lexeme::new("ident", &interner, crate::regex::literal(*b"int")),
        ]);
        let tokenizer = Tokenizer::new(&lexicon);
        let tokens = tokenizer.tokenize(b"int").unwrap();
        assert_eq!(tokens[0].terminal.name(), "ident");
    }

    #[test]
    fn discarded_lexemes_are_skipped_but_still_consumed() {
        let interner = Interner::new();
        let lexicon = build_lexicon(&interner);
        let tokenizer = Tokenizer::new(&lexicon);
        let tokens = tokenizer.tokenize(b"  42 7").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].terminal.name(), "num");
        assert_eq!(tokens[2].terminal, Terminal::Eof);
    }

    #[test]
    fn no_match_reports_the_offending_byte() {
        let interner = Interner::new();
        let lexicon = build_lexicon(&interner);
        let tokenizer = Tokenizer::new(&lexicon);
        let err = tokenizer.tokenize(b"!").unwrap_err();
        assert!(matches!(err, LexError::NoMatch { position: 0, found: b'!' }));
    }
}
