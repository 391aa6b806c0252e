mod code;
mod position;
pub mod sink;
use once_cell::unsync::OnceCell;

/// Line and column information at a byte position in a [`Code`] source.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A wrapper around the input source with lazily-computed line-break offsets,
/// used to translate byte offsets into [`Position`]s for diagnostics.
pub struct Code<'c> {
    pub value: &'c [u8],
    line_breaks: OnceCell<Vec<usize>>,
}
