//! Error types for the approval trail layer
//!
//! The reconstruction and routing engines never fail on well-typed input —
//! malformed upstream data degrades to empty values and pending stages.
//! Errors exist only at the explicit string-parsing surfaces.

/// Errors that can occur when parsing approval trail inputs
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("Unknown transition: {0}")]
    UnknownTransition(String),

    #[error("Unknown user type code: {0}")]
    UnknownUserType(String),
}

/// Result type alias for approval trail operations
pub type ApprovalResult<T> = Result<T, ApprovalError>;
