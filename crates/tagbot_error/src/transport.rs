//! Chat transport error types.

/// Transport error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Serenity API error (HTTP error, gateway error, rate limit).
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Bot token is invalid or expired.
    #[display("Invalid or expired bot token")]
    InvalidToken,

    /// Responding to an interaction failed.
    #[display("Interaction response failed: {_0}")]
    ResponseFailed(String),

    /// Publishing application commands failed.
    #[display("Command registration failed: {_0}")]
    CommandRegistrationFailed(String),
}

/// Transport error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The specific error kind
    pub kind: TransportErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use tagbot_error::{TransportError, TransportErrorKind};
    ///
    /// let err = TransportError::new(TransportErrorKind::InvalidToken);
    /// assert!(format!("{}", err).contains("token"));
    /// ```
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TransportErrorKind {
        &self.kind
    }
}

#[cfg(feature = "discord")]
impl From<serenity::Error> for TransportError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        TransportError::new(TransportErrorKind::SerenityError(err.to_string()))
    }
}
