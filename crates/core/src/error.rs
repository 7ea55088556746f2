//! Expression error model.

use thiserror::Error;

/// Result type used across the expression pipeline.
pub type ExprResult<T> = Result<T, SyntaxError>;

/// Why a permission expression could not be parsed.
///
/// This is the only failure kind in the engine. Boolean entry points convert it
/// into a denial; `parse`-style APIs hand it back to the caller. Positions are
/// byte offsets into the *normalized* expression text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The expression contained no tokens at all.
    #[error("empty expression")]
    Empty,

    /// Input ended while a term or closing parenthesis was still required.
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// A token appeared where the grammar does not allow it.
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    /// An opening parenthesis was never closed.
    #[error("unclosed '(' opened at position {position}")]
    UnclosedGroup { position: usize },

    /// A complete expression was followed by more tokens.
    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },

    /// A character outside every token class halted the scan.
    #[error("unrecognized character '{ch}' at position {position}")]
    UnrecognizedCharacter { ch: char, position: usize },

    /// The raw expression exceeded the configured length limit.
    #[error("expression is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },

    /// Parentheses were nested deeper than the configured limit.
    #[error("groups nested deeper than {max} levels")]
    TooDeep { max: usize },
}

impl SyntaxError {
    pub fn unexpected(found: impl Into<String>, position: usize) -> Self {
        Self::UnexpectedToken {
            found: found.into(),
            position,
        }
    }

    /// Byte offset the error points at, when it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnclosedGroup { position }
            | Self::TrailingInput { position }
            | Self::UnrecognizedCharacter { position, .. } => Some(*position),
            Self::Empty | Self::UnexpectedEnd { .. } | Self::TooLong { .. } | Self::TooDeep { .. } => {
                None
            }
        }
    }
}
