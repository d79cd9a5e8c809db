//! Error types for JSON decoding.

use thiserror::Error;

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Longest source excerpt quoted in an error message, in bytes.
const EXCERPT_LIMIT: usize = 32;

/// Error type for JSON decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Syntax violation at a specific byte offset: malformed literal,
    /// unterminated composite, unmatched scalar grammar, disallowed
    /// extended numeric, or trailing garbage after the root value.
    #[error("unexpected token at byte {offset}: '{excerpt}'")]
    UnexpectedToken { offset: usize, excerpt: String },

    /// The input buffer cannot hold even an empty array or object.
    #[error("a JSON text must contain at least two bytes")]
    InputTooShort,

    /// Composite depth exceeded the configured ceiling.
    #[error("nesting of {depth} is too deep")]
    NestingTooDeep { depth: usize },

    /// Broken surrogate-pair escape sequence inside a string.
    #[error("partial character in source at byte {offset}: '{excerpt}'")]
    PartialCharacter { offset: usize, excerpt: String },

    /// Type materialization named a path the resolver does not know.
    #[error("undefined type {path}")]
    UndefinedType { path: String },

    /// A resolver failure other than an unknown path, propagated unchanged.
    #[error(transparent)]
    Resolver(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Syntax violation, including a too-short buffer.
    UnexpectedToken,
    /// Nesting ceiling exceeded.
    Nesting,
    /// Broken surrogate-pair escape.
    PartialCharacter,
    /// Type-materialization failure.
    Argument,
}

impl DecodeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::UnexpectedToken { .. } | DecodeError::InputTooShort => {
                ErrorKind::UnexpectedToken
            }
            DecodeError::NestingTooDeep { .. } => ErrorKind::Nesting,
            DecodeError::PartialCharacter { .. } => ErrorKind::PartialCharacter,
            DecodeError::UndefinedType { .. } | DecodeError::Resolver(_) => ErrorKind::Argument,
        }
    }

    /// An `UnexpectedToken` quoting the source from `offset` to `end`.
    pub(crate) fn unexpected_token(buf: &[u8], offset: usize, end: usize) -> Self {
        DecodeError::UnexpectedToken {
            offset,
            excerpt: excerpt(buf, offset, end),
        }
    }

    /// A `PartialCharacter` quoting the source from `offset` to `end`.
    pub(crate) fn partial_character(buf: &[u8], offset: usize, end: usize) -> Self {
        DecodeError::PartialCharacter {
            offset,
            excerpt: excerpt(buf, offset, end),
        }
    }
}

/// Render the byte span `[start, end)` as a short excerpt, capped at
/// [`EXCERPT_LIMIT`] bytes and decoded lossily.
fn excerpt(buf: &[u8], start: usize, end: usize) -> String {
    let start = start.min(buf.len());
    let end = end.min(buf.len()).max(start);
    let span = &buf[start..end.min(start + EXCERPT_LIMIT)];
    String::from_utf8_lossy(span).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_caps_length() {
        let buf = vec![b'x'; 100];
        let e = DecodeError::unexpected_token(&buf, 0, buf.len());
        match e {
            DecodeError::UnexpectedToken { excerpt, .. } => {
                assert_eq!(excerpt.len(), EXCERPT_LIMIT)
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_excerpt_clamps_out_of_range() {
        let buf = b"abc";
        let e = DecodeError::unexpected_token(buf, 10, 20);
        match e {
            DecodeError::UnexpectedToken { excerpt, offset } => {
                assert_eq!(offset, 10);
                assert_eq!(excerpt, "");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(DecodeError::InputTooShort.kind(), ErrorKind::UnexpectedToken);
        assert_eq!(
            DecodeError::NestingTooDeep { depth: 20 }.kind(),
            ErrorKind::Nesting
        );
        assert_eq!(
            DecodeError::UndefinedType {
                path: "A::B".into()
            }
            .kind(),
            ErrorKind::Argument
        );
    }

    #[test]
    fn test_nesting_message_names_depth() {
        let e = DecodeError::NestingTooDeep { depth: 20 };
        assert_eq!(e.to_string(), "nesting of 20 is too deep");
    }
}
