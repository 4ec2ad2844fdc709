use std::fmt;

/// Reason of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The expected construct never started.
    PatternNotFound,
    /// Input ended in the middle of a construct.
    UnexpectedEof,
    /// A byte violates the grammar rule being matched.
    UnexpectedCharacter,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::PatternNotFound => f.write_str("pattern not found"),
            Reason::UnexpectedEof => f.write_str("unexpected end of input"),
            Reason::UnexpectedCharacter => f.write_str("unexpected character"),
        }
    }
}

/// Errors encountered while parsing a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Error encountered while parsing data.  index is the position
    /// in data that caused the error.  index is the length of data if
    /// the input ended prematurely.
    #[error("{reason} at position {index}")]
    ParseError { index: usize, reason: Reason },
}

impl Error {
    pub(crate) fn new(index: usize, reason: Reason) -> Error {
        Error::ParseError { index, reason }
    }

    /// Returns the position in the input where the error was detected.
    pub fn index(&self) -> usize {
        match self {
            Error::ParseError { index, .. } => *index,
        }
    }

    /// Returns the reason of the error.
    pub fn reason(&self) -> Reason {
        match self {
            Error::ParseError { reason, .. } => *reason,
        }
    }

    /// Renders the error together with the input it refers to, with a
    /// caret under the offending position.
    ///
    /// ```
    /// use hfparse::{try_parse, token_producer};
    ///
    /// let err = try_parse("text/html", token_producer()).unwrap_err();
    ///
    /// assert_eq!(
    ///     err.describe("text/html"),
    ///     "unexpected character at position 4:\ntext/html\n    ^"
    /// );
    /// ```
    pub fn describe(&self, input: &str) -> String {
        let index = self.index();
        let pad = match input.get(..index) {
            Some(prefix) => prefix.chars().count(),
            None => index.min(input.len()),
        };

        format!("{self}:\n{input}\n{:pad$}^", "")
    }
}

/// Error returned when constructing a [`QValue`] from an out of range
/// integer.
///
/// [`QValue`]: crate::QValue
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for qvalue: {0} (must be in 0..=1000)")]
pub struct InvalidQValue(pub u16);
