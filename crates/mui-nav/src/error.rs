use crate::uri::Uri;

/// A link target that does not satisfy the URI grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("uri is empty")]
    Empty,

    #[error("invalid character {ch:?} in uri {value:?}")]
    InvalidCharacter { value: String, ch: char },
}

/// Failure to resolve or carry out a navigation request.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// No command matched, the scheme is not external, and the host supplied
    /// no frame to navigate.
    #[error("navigation to {uri} failed: no command, external scheme, or frame handles it")]
    Unresolvable { uri: Uri },

    #[error("failed to launch {uri}")]
    Launch {
        uri: Uri,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    InvalidUri(#[from] UriError),
}

/// A clipboard backend refused the text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);
