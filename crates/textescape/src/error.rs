//! Error types for the textescape crate.

use thiserror::Error;

/// Errors that can occur when configuring or compiling a [`TextEscape`](crate::TextEscape).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// A binding value contains an unescaped `${name}` token.
    #[error("unescaped token passed as replacement value: {0}")]
    UnescapedValue(String),

    /// The default value contains an unescaped `${name}` token.
    #[error("unescaped token passed as default value: {0}")]
    UnescapedDefault(String),

    /// Tokens in the composed text have neither a binding nor a default.
    #[error("keys not found in bindings: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// A declarative configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EscapeError {
    /// Returns `true` for errors raised while configuring an engine.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EscapeError::UnescapedValue(_) | EscapeError::UnescapedDefault(_) | EscapeError::Config(_)
        )
    }

    /// Returns `true` for errors raised by `compile` for unresolved names.
    pub fn is_missing_keys(&self) -> bool {
        matches!(self, EscapeError::MissingKeys(_))
    }
}

impl From<serde_json::Error> for EscapeError {
    fn from(err: serde_json::Error) -> Self {
        EscapeError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for EscapeError {
    fn from(err: serde_yaml::Error) -> Self {
        EscapeError::Config(err.to_string())
    }
}

/// Result type for textescape operations.
pub type Result<T> = std::result::Result<T, EscapeError>;
