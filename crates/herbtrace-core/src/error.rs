//! # Error Taxonomy
//!
//! Every failure an operation can surface is a variant of [`Error`]. All
//! errors are terminal for the invocation: no internal retry, no partial
//! writes. The gateway in front of the ledger is responsible for mapping
//! these onto transport-level responses.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for herbtrace operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A referenced key is absent from the ledger.
    #[error("not found: {0}")]
    NotFound(String),

    /// A creation targeted a key that already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The resolved caller context does not satisfy the operation's
    /// role/organization requirements.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The caller identity carries no role attributes and no delegated-admin
    /// mapping applies.
    #[error("missing identity attributes: {0}")]
    MissingIdentityAttributes(String),

    /// A domain validation rule rejected the operation.
    #[error("{kind} validation failed: {details}")]
    ValidationFailed {
        /// Which rule family rejected the input.
        kind: ValidationKind,
        /// Human-readable diagnostics from the rule check.
        details: String,
    },

    /// The JSON argument object could not be decoded, or a required field
    /// was missing or empty.
    #[error("malformed argument: {0}")]
    MalformedArgument(String),

    /// The underlying ledger store reported a fault.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// Document (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The rule family behind a [`Error::ValidationFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// Harvest coordinates outside every approved collection zone.
    GeoFence,
    /// Harvest date outside the herb's permitted seasonal window.
    Seasonal,
    /// Quality metrics breach a hard threshold.
    Quality,
    /// Harvest quantity over the herb's seasonal cap.
    Sustainability,
    /// Processing conditions outside the permitted envelope.
    ProcessingConditions,
}

impl ValidationKind {
    /// Stable identifier used in diagnostics and persisted outcomes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeoFence => "geoFence",
            Self::Seasonal => "seasonal",
            Self::Quality => "quality",
            Self::Sustainability => "sustainability",
            Self::ProcessingConditions => "processingConditions",
        }
    }
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
