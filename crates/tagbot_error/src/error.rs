//! Top-level error wrapper types.

use crate::{ConfigError, InteractionError, StorageError, TransportError};

/// Every error condition a tagbot crate can surface.
///
/// # Examples
///
/// ```
/// use tagbot_error::{TagbotError, StorageError, StorageErrorKind};
///
/// let err: TagbotError = StorageError::new(StorageErrorKind::NotFound("faq".into())).into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TagbotErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Document store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Dispatch error
    #[from(InteractionError)]
    Interaction(InteractionError),
    /// Chat transport error
    #[from(TransportError)]
    Transport(TransportError),
}

/// Tagbot error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tagbot Error: {}", _0)]
pub struct TagbotError(Box<TagbotErrorKind>);

impl TagbotError {
    /// Create a new error from a kind.
    pub fn new(kind: TagbotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TagbotErrorKind {
        &self.0
    }
}

impl<T> From<T> for TagbotError
where
    T: Into<TagbotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for tagbot operations.
pub type TagbotResult<T> = std::result::Result<T, TagbotError>;
