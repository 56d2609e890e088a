//! Byte classifiers used by the scanner.
//!
//! All input is scanned as raw bytes; multi-byte UTF-8 sequences never
//! match any of these predicates and therefore pass through tokens untouched.

/// ASCII letter or underscore.
#[inline]
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// ASCII decimal digit.
#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Horizontal space: space or tab.
#[inline]
pub fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Any whitespace the scanner skips between tokens.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes that may open a numeric literal.
#[inline]
pub fn starts_number(b: u8) -> bool {
    is_digit(b) || b == b'-' || b == b'.'
}

/// Terminators for a value token and for the first key of a map.
#[inline]
pub fn ends_token(b: u8) -> bool {
    is_whitespace(b) || matches!(b, b':' | b',' | b']')
}

/// Terminators for map keys after the first one.
///
/// Unlike [`ends_token`], `,` and `]` are allowed inside these keys.
#[inline]
pub fn ends_key(b: u8) -> bool {
    is_whitespace(b) || b == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha() {
        assert!(is_alpha(b'a'));
        assert!(is_alpha(b'Z'));
        assert!(is_alpha(b'_'));
        assert!(!is_alpha(b'1'));
        assert!(!is_alpha(b'-'));
        assert!(!is_alpha(0xC3));
    }

    #[test]
    fn test_digit() {
        assert!(is_digit(b'0'));
        assert!(is_digit(b'9'));
        assert!(!is_digit(b'a'));
        assert!(!is_digit(b'.'));
    }

    #[test]
    fn test_space_vs_whitespace() {
        assert!(is_space(b' '));
        assert!(is_space(b'\t'));
        assert!(!is_space(b'\n'));
        assert!(!is_space(b'\r'));

        for b in [b' ', b'\t', b'\n', b'\r'] {
            assert!(is_whitespace(b));
        }
        assert!(!is_whitespace(b'#'));
    }

    #[test]
    fn test_token_terminators() {
        for b in [b' ', b'\n', b':', b',', b']'] {
            assert!(ends_token(b), "{:?}", b as char);
        }
        assert!(ends_key(b':'));
        assert!(!ends_key(b','));
        assert!(!ends_key(b']'));
        assert!(!ends_token(b'-'));
    }

    #[test]
    fn test_starts_number() {
        assert!(starts_number(b'7'));
        assert!(starts_number(b'-'));
        assert!(starts_number(b'.'));
        assert!(!starts_number(b'+'));
        assert!(!starts_number(b'e'));
    }
}
