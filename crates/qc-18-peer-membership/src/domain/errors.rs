//! Error types for the membership subsystem

use super::{PeerState, PublicKey};

/// Why a membership change was refused.
///
/// Every variant is recoverable: the caller drops the offending transaction
/// and carries on with the next one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MembershipError {
    #[error("IP already registered: {0}")]
    DuplicateIp(String),

    #[error("Public key already registered: {0}")]
    DuplicateKey(PublicKey),

    #[error("Unknown peer: {0}")]
    PeerNotFound(PublicKey),

    #[error("Operation {operation} not allowed for peer {public_key} in state {state}")]
    InvalidStateForOperation {
        public_key: PublicKey,
        state: PeerState,
        operation: &'static str,
    },

    #[error("Trust must be a finite number, got {0}")]
    InvalidTrust(f64),

    #[error("Trust {value} outside allowed range [{min}, {max}]")]
    TrustOutOfBounds { value: f64, min: f64, max: f64 },

    #[error("Removal of {public_key} denied: {reason}")]
    RemovalDenied {
        public_key: PublicKey,
        reason: String,
    },

    #[error("Registry full: {capacity} peers")]
    RegistryFull { capacity: usize },
}

impl MembershipError {
    /// Stable label for metrics and event payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::DuplicateIp(_) => "duplicate_ip",
            Self::DuplicateKey(_) => "duplicate_key",
            Self::PeerNotFound(_) => "peer_not_found",
            Self::InvalidStateForOperation { .. } => "invalid_state",
            Self::InvalidTrust(_) => "invalid_trust",
            Self::TrustOutOfBounds { .. } => "trust_out_of_bounds",
            Self::RemovalDenied { .. } => "removal_denied",
            Self::RegistryFull { .. } => "registry_full",
        }
    }
}

/// Result type for membership operations
pub type MembershipResult<T> = Result<T, MembershipError>;
