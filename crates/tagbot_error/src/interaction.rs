//! Interaction dispatch error types.

/// Specific dispatch error conditions.
///
/// Unknown commands, stale sessions and unmatched identifiers are not errors;
/// the dispatcher treats them as silent no-ops. These kinds cover the cases
/// that must reach the process boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum InteractionErrorKind {
    /// A pagination session was requested with no pages
    #[display("Pagination session for '{}' has no pages", _0)]
    EmptySession(String),

    /// A required option or modal field was missing from the event
    #[display("Missing field '{}' in interaction '{}'", field, interaction)]
    MissingField {
        /// Interaction identifier (command name or custom id)
        interaction: String,
        /// Field or option name
        field: String,
    },

    /// A command handler failed
    #[display("Handler for '{}' failed: {}", command, reason)]
    HandlerFailed {
        /// Command identifier
        command: String,
        /// Failure description
        reason: String,
    },

    /// A one-shot listener callback failed
    #[display("Listener for '{}' failed: {}", element_id, reason)]
    ListenerFailed {
        /// Element identifier the listener was bound to
        element_id: String,
        /// Failure description
        reason: String,
    },
}

/// Interaction error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Interaction Error: {} at line {} in {}", kind, line, file)]
pub struct InteractionError {
    /// The specific error kind
    pub kind: InteractionErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl InteractionError {
    /// Create a new interaction error with location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagbot_error::{InteractionError, InteractionErrorKind};
    ///
    /// let err = InteractionError::new(InteractionErrorKind::EmptySession("tag_list".into()));
    /// assert!(format!("{}", err).contains("no pages"));
    /// ```
    #[track_caller]
    pub fn new(kind: InteractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &InteractionErrorKind {
        &self.kind
    }
}
