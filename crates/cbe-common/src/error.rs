//! Error types for document parsing.

use thiserror::Error;

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// What went wrong while parsing a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended inside an element, attribute, or comment.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A character that cannot appear at this position.
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// An element or attribute name is empty or malformed.
    #[error("invalid name")]
    InvalidName,
    /// Attribute value without surrounding quotes.
    #[error("attribute value must be quoted")]
    UnquotedAttribute,
    /// The same attribute appears twice on one element.
    #[error("duplicate attribute '{0}'")]
    DuplicateAttribute(String),
    /// Closing tag does not match the open element.
    #[error("expected </{expected}>, found </{found}>")]
    MismatchedClosingTag { expected: String, found: String },
    /// Entity reference other than the five predefined ones.
    #[error("unknown entity '&{0};'")]
    UnknownEntity(String),
    /// Non-whitespace content after the root element.
    #[error("content after root element")]
    TrailingContent,
    /// The document contains no element at all.
    #[error("no root element")]
    NoRootElement,
    /// An element opens deeper than the nesting limit.
    #[error("elements nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Parse failure with the byte offset where it was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error at byte {offset}: {kind}")]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}
