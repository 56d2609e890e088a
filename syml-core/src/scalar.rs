//! Scalar token typing.
//!
//! A scalar is a Number only when the whole token is a floating-point
//! literal; everything else, including tokens that merely start like a
//! number, is a String spanning the full original token.

use crate::classify::starts_number;

/// Classified scalar token.
///
/// The lifetime `'a` refers to the source buffer - strings are
/// zero-copy slices into the original input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// Float literal: `8`, `-89`, `1.2e-3`, `.5`
    Number(f64),
    /// Anything else: `-bla`, `1.2.3`, `0x10`
    String(&'a [u8]),
}

impl<'a> Scalar<'a> {
    /// Classify a token.
    ///
    /// Only tokens opening with a digit, `-` or `.` are tried as numbers.
    /// The numeric scan must consume the entire token, otherwise the
    /// token falls back to String.
    pub fn classify(bytes: &'a [u8]) -> Scalar<'a> {
        match bytes.first() {
            Some(&b) if starts_number(b) => match lexical_core::parse_partial::<f64>(bytes) {
                Ok((value, consumed)) if consumed == bytes.len() => Scalar::Number(value),
                _ => Scalar::String(bytes),
            },
            _ => Scalar::String(bytes),
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::String(_) => None,
        }
    }
}
