mod combinators;
mod named;

pub use combinators::{
    alternatives, any, any_of, at_least, at_most, between, exactly, kleene, literal, range,
    sequence, some,
};
pub use named::{alpha, alphanum, digit, hex_digit, lower, upper, whitespace};

/// A regex is anything that, given an atom slice and a starting position,
/// returns either "no match" or the end position of the match it consumed.
pub trait Regex<A> {
    fn match_at(&self, atoms: &[A], pos: usize) -> Option<usize>;
}

/// A heterogeneous-combinator tree: rather than boxing every sub-combinator
/// behind `dyn Regex`, the handful of composition
/// forms are folded into one enum so deeply nested regexes only pay for
/// indirection where they actually recurse (`Maybe`/`Between`'s single
/// child).
#[derive(Debug, Clone)]
pub enum RegexNode<A> {
    Match(Vec<A>),
    Alternatives(Vec<RegexNode<A>>),
    Sequence(Vec<RegexNode<A>>),
    Maybe(Box<RegexNode<A>>),
    Between {
        least: usize,
        most: usize,
        inner: Box<RegexNode<A>>,
    },
    Any,
    AnyOf(Vec<A>),
    Range(A, A),
}

impl<A> Regex<A> for RegexNode<A>
where
    A: Clone + PartialEq + PartialOrd,
{
    fn match_at(&self, atoms: &[A], pos: usize) -> Option<usize> {
        match self {
            RegexNode::Match(literal) => {
                if pos + literal.len() > atoms.len() {
                    return None;
                }
                if atoms[pos..pos + literal.len()] == literal[..] {
                    Some(pos + literal.len())
                } else {
                    None
                }
            }
            RegexNode::Alternatives(alts) => {
                alts.iter().find_map(|alt| alt.match_at(atoms, pos))
            }
            RegexNode::Sequence(parts) => {
                let mut cur = pos;
                for part in parts {
                    cur = part.match_at(atoms, cur)?;
                }
                Some(cur)
            }
            RegexNode::Maybe(inner) => Some(inner.match_at(atoms, pos).unwrap_or(pos)),
            RegexNode::Between {
                least,
                most,
                inner,
            } => {
                let mut cur = pos;
                let mut count = 0usize;
                while count < *most {
                    match inner.match_at(atoms, cur) {
                        Some(end) if end != cur => {
                            cur = end;
                            count += 1;
                        }
                        // A zero-width inner match still counts once, then
                        // stops -- repeating it further would never advance.
                        Some(end) => {
                            cur = end;
                            count += 1;
                            break;
                        }
                        None => break,
                    }
                }
                if count >= *least {
                    Some(cur)
                } else {
                    None
                }
            }
            RegexNode::Any => {
                if pos < atoms.len() {
                    Some(pos + 1)
                } else {
                    None
                }
            }
            RegexNode::AnyOf(set) => {
                if pos < atoms.len() && set.contains(&atoms[pos]) {
                    Some(pos + 1)
                } else {
                    None
                }
            }
            RegexNode::Range(lo, hi) => {
                if pos < atoms.len() && *lo <= atoms[pos] && atoms[pos] <= *hi {
                    Some(pos + 1)
                } else {
                    None
                }
            }
        }
    }
}
