use crate::diagnostics::{Diagnostic, DiagnosticKind, Options};
use crate::error::GrammarError;
use crate::grammar::{augment, Grammar};
use crate::lexicon::{Lexicon, Tokenizer};
use crate::ll::{build_ll_table, LlDriver, LlTable};
use crate::lr::{
    build_canonical_collection, build_tables, lr0_lookaheads, lr1_lookaheads, slr1_lookaheads,
    merge_lalr, Collection, LalrFamily, Lr0Family, Lr0Item, Lr1Family, Lr1Item, LrDriver,
    LrTables, SlrFamily,
};
use crate::tree::ParseTree;
use crate::util::Code;

/// Which table-construction algorithm a [`Parser`] is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    Ll1,
    Lr0,
    Slr1,
    Lr1,
    Lalr1,
}

enum Tables {
    Ll(LlTable),
    Lr(LrTables),
}

/// Glues a [`Grammar`], a [`Lexicon`] and a constructed parse table
/// together: construction builds the table once, `parse` drives it over
/// tokenized input as many times as needed.
pub struct Parser {
    grammar: Grammar,
    lexicon: Lexicon,
    kind: ParserKind,
    tables: Tables,
    options: Options,
}

impl Parser {
    /// Builds the parser for `kind` from `grammar`: computes FIRST/FOLLOW,
    /// augments the grammar when `kind` needs a canonical collection, and
    /// constructs the appropriate table. Fails with [`GrammarError`] if the
    /// grammar is not of the requested class.
    pub fn new(
        grammar: Grammar,
        lexicon: Lexicon,
        kind: ParserKind,
        options: Options,
    ) -> Result<Self, GrammarError> {
        grammar.initialize();

        let tables = match kind {
            ParserKind::Ll1 => Tables::Ll(build_ll_table(&grammar)?),
            ParserKind::Lr0 => {
                let augmented = augment(&grammar);
                let collection: Collection<Lr0Item> =
                    build_canonical_collection::<Lr0Family>(&augmented, augmented.start());
                Tables::Lr(build_tables::<Lr0Family>(
                    &augmented,
                    augmented.start(),
                    &collection,
                    lr0_lookaheads,
                )?)
            }
            ParserKind::Slr1 => {
                let augmented = augment(&grammar);
                let collection: Collection<Lr0Item> =
                    build_canonical_collection::<SlrFamily>(&augmented, augmented.start());
                Tables::Lr(build_tables::<SlrFamily>(
                    &augmented,
                    augmented.start(),
                    &collection,
                    slr1_lookaheads,
                )?)
            }
            ParserKind::Lr1 => {
                let augmented = augment(&grammar);
                let collection: Collection<Lr1Item> =
                    build_canonical_collection::<Lr1Family>(&augmented, augmented.start());
                Tables::Lr(build_tables::<Lr1Family>(
                    &augmented,
                    augmented.start(),
                    &collection,
                    lr1_lookaheads,
                )?)
            }
            ParserKind::Lalr1 => {
                let augmented = augment(&grammar);
                let collection: Collection<Lr1Item> =
                    build_canonical_collection::<LalrFamily>(&augmented, augmented.start());
                let merged = merge_lalr(collection);
                Tables::Lr(build_tables::<LalrFamily>(
                    &augmented,
                    augmented.start(),
                    &merged,
                    lr1_lookaheads,
                )?)
            }
        };

        Ok(Self {
            grammar,
            lexicon,
            kind,
            tables,
            options,
        })
    }

    pub fn kind(&self) -> ParserKind {
        self.kind
    }

    /// Tokenizes `input` and drives the constructed table over it,
    /// returning the resulting parse tree together with every diagnostic
    /// raised along the way.
    ///
    /// This call is infallible: a `LexError` or an unrecoverable driver
    /// failure is reported as an `Error`-kind diagnostic and answered with
    /// an empty (`Null`-rooted) tree rather than propagated, so a caller
    /// under `Ignore`/`StopAtFirst` still gets a tree value back, just an
    /// empty one.
    pub fn parse(&self, input: &[u8]) -> (ParseTree, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();

        let code = Code::from(input);
        let tokenizer = Tokenizer::new(&self.lexicon);
        let tokens = match tokenizer.tokenize(input) {
            Ok(tokens) => tokens,
            Err(error) => {
                if self.options.permits(DiagnosticKind::Error) {
                    diagnostics.push(Diagnostic::error(error.to_string()));
                }
                return self.finish(empty_tree(), diagnostics);
            }
        };

        if self.options.permits(DiagnosticKind::Tokenizer) {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::Tokenizer,
                position: None,
                expected: Vec::new(),
                found: None,
                message: format!("{} tokens produced", tokens.len()),
            });
        }

        let result = match &self.tables {
            Tables::Ll(table) => {
                LlDriver::new(&self.grammar, table).parse(&tokens, &code, &self.options)
            }
            Tables::Lr(tables) => {
                LrDriver::new(&self.grammar, tables).parse(&tokens, &code, &self.options)
            }
        };

        match result {
            Ok((tree, mut step_diagnostics)) => {
                diagnostics.append(&mut step_diagnostics);
                self.finish(tree, diagnostics)
            }
            Err(error) => {
                if self.options.permits(DiagnosticKind::Error) {
                    diagnostics.push(Diagnostic::error(error.to_string()));
                }
                self.finish(empty_tree(), diagnostics)
            }
        }
    }

    /// Routes every collected diagnostic to `options.log_dest` before
    /// handing the result back to the caller.
    fn finish(&self, tree: ParseTree, diagnostics: Vec<Diagnostic>) -> (ParseTree, Vec<Diagnostic>) {
        for diagnostic in &diagnostics {
            crate::util::sink::emit(
                &self.options.log_dest,
                &format!("[{:?}] {}", diagnostic.kind, diagnostic.message),
            );
        }
        (tree, diagnostics)
    }
}

fn empty_tree() -> ParseTree {
    ParseTree {
        root: crate::tree::Node {
            value: crate::tree::NodeValue::Null,
            children: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Assoc, GrammarBuilder, Interner};
    use crate::lexicon::Lexeme;
    use crate::regex::{digit, literal, some, whitespace};

    fn arithmetic_lexicon(interner: &Interner) -> Lexicon {
        Lexicon::new(vec![
            Lexeme::discard("ws", interner, some(whitespace())),
            Lexeme::new("int", interner, some(digit())),
            Lexeme::new("+", interner, literal(*b"+")),
        ])
    }

    /// E -> int E', E' -> + int E' | epsilon.
    fn arithmetic_grammar(b: &mut GrammarBuilder) {
        let int = b.terminal("int");
        let plus = b.terminal("+");
        b.nonterminal("E");
        b.nonterminal("E'");
        let e_prime = b.nonterminal("E'");
        b.add_production("E", vec![int, e_prime]);
        let e_prime2 = b.nonterminal("E'");
        b.add_production("E'", vec![plus, b.terminal("int"), e_prime2]);
        b.add_production("E'", vec![]);
    }

    #[test]
    fn ll1_parses_a_left_recursion_free_sum() {
        let mut b = GrammarBuilder::new();
        arithmetic_grammar(&mut b);
        let grammar = b.build("E").unwrap();

        let interner = Interner::new();
        let lexicon = arithmetic_lexicon(&interner);

        let parser = Parser::new(grammar, lexicon, ParserKind::Ll1, Options::default()).unwrap();
        let (tree, diagnostics) = parser.parse(b"1 + 2 + 3");
        assert!(diagnostics.iter().all(|d| d.kind != DiagnosticKind::Error));
        assert!(!tree.root.children.is_empty());
    }

    #[test]
    fn ll1_construction_rejects_an_ambiguous_grammar() {
        // S -> A | B, A -> a, B -> a: both alternatives claim the same
        // (S, a) table cell.
        let mut b = GrammarBuilder::new();
        let a = b.terminal("a");
        b.nonterminal("S");
        b.nonterminal("A");
        b.nonterminal("B");
        let nt_a = b.nonterminal("A");
        let nt_b = b.nonterminal("B");
        b.add_production("S", vec![nt_a]);
        b.add_production("S", vec![nt_b]);
        b.add_production("A", vec![a.clone()]);
        b.add_production("B", vec![a]);
        let grammar = b.build("S").unwrap();

        let interner = Interner::new();
        let lexicon = Lexicon::new(vec![Lexeme::new("a", &interner, literal(*b"a"))]);

        let result = Parser::new(grammar, lexicon, ParserKind::Ll1, Options::default());
        assert!(matches!(result, Err(GrammarError::NotLl1 { .. })));
    }

    #[test]
    fn lr0_parses_nested_parens() {
        let mut b = GrammarBuilder::new();
        let open = b.terminal("(");
        let close = b.terminal(")");
        let a = b.terminal("a");
        b.nonterminal("S");
        let s = b.nonterminal("S");
        b.add_production("S", vec![open, s, close]);
        b.add_production("S", vec![a]);
        let grammar = b.build("S").unwrap();

        let interner = Interner::new();
        let lexicon = Lexicon::new(vec![
            Lexeme::new("(", &interner, literal(*b"(")),
            Lexeme::new(")", &interner, literal(*b")")),
            Lexeme::new("a", &interner, literal(*b"a")),
        ]);

        let parser = Parser::new(grammar, lexicon, ParserKind::Lr0, Options::default()).unwrap();
        let (tree, diagnostics) = parser.parse(b"((a))");
        assert!(diagnostics.iter().all(|d| d.kind != DiagnosticKind::Error));
        assert_eq!(tree.root.children.len(), 3);
    }

    #[test]
    fn slr1_parses_unbounded_right_recursion() {
        // S -> a A, A -> b A | epsilon
        let mut b = GrammarBuilder::new();
        let a = b.terminal("a");
        let bee = b.terminal("b");
        b.nonterminal("S");
        b.nonterminal("A");
        let nt_a_in_s = b.nonterminal("A");
        b.add_production("S", vec![a, nt_a_in_s]);
        let nt_a_in_a = b.nonterminal("A");
        b.add_production("A", vec![bee, nt_a_in_a]);
        b.add_production("A", vec![]);
        let grammar = b.build("S").unwrap();

        let interner = Interner::new();
        let lexicon = Lexicon::new(vec![
            Lexeme::new("a", &interner, literal(*b"a")),
            Lexeme::new("b", &interner, literal(*b"b")),
        ]);

        let parser = Parser::new(grammar, lexicon, ParserKind::Slr1, Options::default()).unwrap();
        let (tree, diagnostics) = parser.parse(b"abbbb");
        assert!(diagnostics.iter().all(|d| d.kind != DiagnosticKind::Error));
        assert_eq!(tree.root.children.len(), 2);
    }

    /// The production index a node stands for, or `None` for a token leaf.
    fn production_index(node: &crate::tree::Node) -> Option<usize> {
        match &node.value {
            crate::tree::NodeValue::Production(p) => Some(p.index),
            _ => None,
        }
    }

    #[test]
    fn lalr1_resolves_precedence_and_parses_an_expression() {
        // E -> E + E (index 0) | E * E (index 1) | int (index 2),
        // '*' binding tighter than '+', both left-associative.
        let mut b = GrammarBuilder::new();
        let plus = b.terminal("+");
        let star = b.terminal("*");
        let int = b.terminal("int");
        b.declare_precedence("+", 1, Assoc::Left);
        b.declare_precedence("*", 2, Assoc::Left);
        b.nonterminal("E");
        let e = b.nonterminal("E");
        b.add_production_with("E", vec![e.clone(), plus, e.clone()], 1, Assoc::Left);
        b.add_production_with("E", vec![e.clone(), star, e], 2, Assoc::Left);
        b.add_production("E", vec![int]);
        let grammar = b.build("E").unwrap();

        let interner = Interner::new();
        let lexicon = Lexicon::new(vec![
            Lexeme::discard("ws", &interner, some(whitespace())),
            Lexeme::new("int", &interner, some(digit())),
            Lexeme::new("+", &interner, literal(*b"+")),
            Lexeme::new("*", &interner, literal(*b"*")),
        ]);

        let parser =
            Parser::new(grammar, lexicon, ParserKind::Lalr1, Options::default()).unwrap();
        // Must group as ((1 + (2 * 3)) + 4), not e.g. (1 + ((2 * 3) + 4)) or
        // any grouping that lets '+' bind as tight as '*'.
        let (tree, diagnostics) = parser.parse(b"1 + 2 * 3 + 4");
        assert!(diagnostics.iter().all(|d| d.kind != DiagnosticKind::Error));
        assert_eq!(production_index(&tree.root), Some(0));
        assert_eq!(tree.root.children.len(), 3);

        let outer_left = &tree.root.children[0];
        assert_eq!(production_index(outer_left), Some(0));
        assert_eq!(outer_left.children.len(), 3);
        assert!(production_index(&outer_left.children[0]).is_none()); // leaf `1`

        let inner_mul = &outer_left.children[2];
        assert_eq!(production_index(inner_mul), Some(1));
        assert_eq!(inner_mul.children.len(), 3);
        assert!(production_index(&inner_mul.children[0]).is_none()); // leaf `2`
        assert!(production_index(&inner_mul.children[2]).is_none()); // leaf `3`

        assert!(production_index(&tree.root.children[2]).is_none()); // leaf `4`
    }

    #[test]
    fn lalr1_reports_an_unresolved_conflict_for_undeclared_precedence() {
        // E -> E + E | E * E | int, with neither operator's precedence
        // declared: the shift/reduce conflict between them has nothing to
        // arbitrate it and must be reported at table-construction time
        // rather than silently resolved by letting shift win.
        let mut b = GrammarBuilder::new();
        let plus = b.terminal("+");
        let star = b.terminal("*");
        let int = b.terminal("int");
        b.nonterminal("E");
        let e = b.nonterminal("E");
        b.add_production("E", vec![e.clone(), plus, e.clone()]);
        b.add_production("E", vec![e.clone(), star, e]);
        b.add_production("E", vec![int]);
        let grammar = b.build("E").unwrap();

        let interner = Interner::new();
        let lexicon = Lexicon::new(vec![
            Lexeme::discard("ws", &interner, some(whitespace())),
            Lexeme::new("int", &interner, some(digit())),
            Lexeme::new("+", &interner, literal(*b"+")),
            Lexeme::new("*", &interner, literal(*b"*")),
        ]);

        let result = Parser::new(grammar, lexicon, ParserKind::Lalr1, Options::default());
        assert!(matches!(
            result,
            Err(GrammarError::UnresolvedShiftReduce { .. })
        ));
    }
}
