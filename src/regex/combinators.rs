use super::RegexNode;

/// Matches a fixed literal sequence of atoms.
pub fn literal<A>(seq: impl Into<Vec<A>>) -> RegexNode<A> {
    RegexNode::Match(seq.into())
}

/// Matches the first alternative that succeeds, tried in order.
pub fn alternatives<A>(alts: Vec<RegexNode<A>>) -> RegexNode<A> {
    RegexNode::Alternatives(alts)
}

/// Matches each part in turn, threading the end position through.
pub fn sequence<A>(parts: Vec<RegexNode<A>>) -> RegexNode<A> {
    RegexNode::Sequence(parts)
}

/// Matches `inner` zero or one times; never fails.
pub fn maybe<A>(inner: RegexNode<A>) -> RegexNode<A> {
    RegexNode::Maybe(Box::new(inner))
}

/// Matches `inner` repeated at least `least` and at most `most` times,
/// greedily.
pub fn between<A>(least: usize, most: usize, inner: RegexNode<A>) -> RegexNode<A> {
    RegexNode::Between {
        least,
        most,
        inner: Box::new(inner),
    }
}

pub fn at_least<A>(least: usize, inner: RegexNode<A>) -> RegexNode<A> {
    between(least, usize::MAX, inner)
}

pub fn at_most<A>(most: usize, inner: RegexNode<A>) -> RegexNode<A> {
    between(0, most, inner)
}

pub fn exactly<A>(n: usize, inner: RegexNode<A>) -> RegexNode<A> {
    between(n, n, inner)
}

/// `inner` one or more times.
pub fn some<A>(inner: RegexNode<A>) -> RegexNode<A> {
    at_least(1, inner)
}

/// `inner` zero or more times.
pub fn kleene<A>(inner: RegexNode<A>) -> RegexNode<A> {
    at_least(0, inner)
}

/// Matches any single atom.
pub fn any<A>() -> RegexNode<A> {
    RegexNode::Any
}

/// Matches any single atom out of `set`.
pub fn any_of<A>(set: impl Into<Vec<A>>) -> RegexNode<A> {
    RegexNode::AnyOf(set.into())
}

/// Matches any single atom in the inclusive range `[lo, hi]`.
pub fn range<A>(lo: A, hi: A) -> RegexNode<A> {
    RegexNode::Range(lo, hi)
}
