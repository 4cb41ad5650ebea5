//! Error types for the GangSplit allocation engine.
//!
//! All errors use the `GS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Member errors
//! - 2xx: Ledger / amount errors
//! - 3xx: Finalize errors
//! - 4xx: Saved-party directory errors
//! - 9xx: General errors
//!
//! None of these is raised for bad numeric input: amounts are normalized
//! and clamped, never rejected.

use thiserror::Error;

use crate::{FinalizeBlocker, MemberId, PartyId};

/// Central error enum for all GangSplit operations.
#[derive(Debug, Error)]
pub enum GangSplitError {
    // =================================================================
    // Member Errors (1xx)
    // =================================================================
    /// No member at this position.
    #[error("GS_ERR_100: Member index {index} out of range (ledger has {len} members)")]
    MemberIndexOutOfRange { index: usize, len: usize },

    /// This saved party is already in the ledger.
    #[error("GS_ERR_101: Party already added: {0}")]
    DuplicateParty(PartyId),

    /// The ledger is at its configured member cap.
    #[error("GS_ERR_102: Member limit reached ({max})")]
    MemberLimitReached { max: usize },

    /// No member with this id.
    #[error("GS_ERR_103: Member not found: {0}")]
    MemberNotFound(MemberId),

    /// A new party needs a non-blank name.
    #[error("GS_ERR_104: Party name must not be empty")]
    EmptyPartyName,

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// Split needs members at `index` and `index + 1`.
    #[error("GS_ERR_200: No adjacent pair at index {index} (ledger has {len} members)")]
    NoAdjacentPair { index: usize, len: usize },

    /// A ledger invariant does not hold — a bug, never user input.
    #[error("GS_ERR_201: Ledger invariant violation: {reason}")]
    InvariantViolation { reason: String },

    // =================================================================
    // Finalize Errors (3xx)
    // =================================================================
    /// The finalize gate is closed.
    #[error("GS_ERR_300: Not ready to finalize: {0}")]
    NotReadyToFinalize(FinalizeBlocker),

    // =================================================================
    // Directory Errors (4xx)
    // =================================================================
    /// No saved party with this id.
    #[error("GS_ERR_400: Saved party not found: {0}")]
    PartyNotFound(PartyId),

    /// The saved-party cache could not be understood.
    #[error("GS_ERR_401: Saved-party directory corrupt: {reason}")]
    DirectoryCorrupt { reason: String },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("GS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad values, etc.).
    #[error("GS_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk).
    #[error("GS_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, GangSplitError>;

impl From<std::io::Error> for GangSplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GangSplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
