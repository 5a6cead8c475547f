use std::fmt;
use thiserror::Error;

/// Why a payload was not accepted as strict extended JSON.
///
/// This is never returned on its own: it only triggers the plain-JSON fallback, and
/// ends up inside [`FilterDecodeError`] when the fallback fails too.
#[derive(Debug, Error)]
pub enum ExtendedJsonError {
    #[error("Syntax: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("No extended JSON type wrapper present")]
    NoTypeWrapper,

    #[error("Malformed extended JSON value: {0}")]
    Malformed(String),
}

/// Both failure causes of a filter payload that is neither extended JSON nor plain JSON.
#[derive(Debug)]
pub struct FilterDecodeError {
    pub extended: ExtendedJsonError,
    pub plain: serde_json::Error,
}

impl FilterDecodeError {
    #[must_use]
    pub const fn extended(&self) -> &ExtendedJsonError {
        &self.extended
    }

    #[must_use]
    pub const fn plain(&self) -> &serde_json::Error {
        &self.plain
    }
}

impl fmt::Display for FilterDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "extended JSON parse failed ({}); plain JSON parse failed ({})",
            self.extended, self.plain
        )
    }
}

impl std::error::Error for FilterDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.plain)
    }
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Filter decode error: {0}")]
    Decode(#[from] FilterDecodeError),

    #[error("Envelope decode error: {0}")]
    Envelope(#[source] serde_json::Error),
}

impl FilterError {
    /// Returns the dual decode failure, if this error came from the filter payload.
    #[must_use]
    pub const fn as_decode(&self) -> Option<&FilterDecodeError> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Envelope(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
