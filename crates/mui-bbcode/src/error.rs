use crate::lexer::TokenKind;

/// A markup parse failure. Fatal to the current parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A token appeared where no handler expects it, e.g. an attribute on a
    /// tag that takes none (`[bold=x]`).
    #[error("unexpected {kind} token {value:?}")]
    UnexpectedToken { kind: TokenKind, value: String },

    /// A tag token whose name is outside the tag vocabulary.
    #[error("unknown token type {kind} ({value:?})")]
    UnknownTokenType { kind: TokenKind, value: String },

    #[error("invalid font size {value:?}")]
    InvalidFontSize { value: String },
}
