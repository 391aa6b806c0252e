use super::combinators::{alternatives, any_of, range};
use super::RegexNode;

/// `[a-z]`
pub fn lower() -> RegexNode<u8> {
    range(b'a', b'z')
}

/// `[A-Z]`
pub fn upper() -> RegexNode<u8> {
    range(b'A', b'Z')
}

/// `[0-9]`
pub fn digit() -> RegexNode<u8> {
    range(b'0', b'9')
}

/// `[0-9a-fA-F]`
pub fn hex_digit() -> RegexNode<u8> {
    alternatives(vec![digit(), range(b'a', b'f'), range(b'A', b'F')])
}

/// `[a-zA-Z]`
pub fn alpha() -> RegexNode<u8> {
    alternatives(vec![lower(), upper()])
}

/// `[a-zA-Z0-9]`
pub fn alphanum() -> RegexNode<u8> {
    alternatives(vec![alpha(), digit()])
}

/// Space, tab, carriage return or newline.
pub fn whitespace() -> RegexNode<u8> {
    any_of(*b" \t\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::Regex;

    #[test]
    fn digit_matches_ascii_digits_only() {
        assert_eq!(digit().match_at(b"9", 0), Some(1));
        assert_eq!(digit().match_at(b"a", 0), None);
    }

    #[test]
    fn hex_digit_accepts_both_cases() {
        assert_eq!(hex_digit().match_at(b"f", 0), Some(1));
        assert_eq!(hex_digit().match_at(b"F", 0), Some(1));
        assert_eq!(hex_digit().match_at(b"g", 0), None);
    }
}
