use thiserror::Error;

/// Error returned by a fallible trigger side effect
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for property and pool operations
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("No property registered under name: {0}")]
    KeyNotFound(String),

    #[error("Type mismatch for property {name}: expected {expected}, found {found}")]
    TypeMismatch { name: String, expected: String, found: String },

    #[error("Invalid subscription pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Cannot {op} property {name}: result overflows or divides by zero")]
    Arithmetic { name: String, op: &'static str },

    #[error("Property {0} is locked")]
    Locked(String),

    #[error("Trigger on property {name} failed: {source}")]
    Callback {
        name: String,
        #[source]
        source: CallbackError,
    },
}

/// Result type for property operations
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Error,
    Warning,
}

impl PropertyError {
    /// Rejected writes and lookups that simply miss are warnings; the rest are errors
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PropertyError::KeyNotFound(_) | PropertyError::Locked(_) => ErrorSeverity::Warning,
            PropertyError::TypeMismatch { .. }
            | PropertyError::InvalidPattern { .. }
            | PropertyError::Arithmetic { .. }
            | PropertyError::Callback { .. } => ErrorSeverity::Error,
        }
    }
}
