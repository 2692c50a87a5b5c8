//! Events published by the membership subsystem.

use crate::domain::{Change, MembershipError, PublicKey};
use serde::{Deserialize, Serialize};

/// Notification sent to the event bus after each request is processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MembershipEvent {
    /// A request passed validation and was applied.
    ChangeApplied {
        requester_ip: String,
        change: Change,
        /// Active set size right after the change
        active_set_size: usize,
    },
    /// A request was refused; the registry is unchanged.
    ChangeRejected {
        requester_ip: String,
        kind: String,
        target: PublicKey,
        reason: String,
        detail: String,
    },
}

impl MembershipEvent {
    pub fn applied(requester_ip: &str, change: Change, active_set_size: usize) -> Self {
        Self::ChangeApplied {
            requester_ip: requester_ip.to_string(),
            change,
            active_set_size,
        }
    }

    pub fn rejected(
        kind: &str,
        requester_ip: &str,
        target: PublicKey,
        error: &MembershipError,
    ) -> Self {
        Self::ChangeRejected {
            requester_ip: requester_ip.to_string(),
            kind: kind.to_string(),
            target,
            reason: error.reason().to_string(),
            detail: error.to_string(),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::ChangeRejected { .. })
    }
}
