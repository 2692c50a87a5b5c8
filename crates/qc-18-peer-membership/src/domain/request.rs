//! Membership change requests and their applied effects.

use super::{Peer, PeerState, PublicKey};
use serde::{Deserialize, Serialize};

/// A committed membership transaction.
///
/// `requester_ip` records who issued the change. It is kept for auditing;
/// validation acts on the target peer only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MembershipRequest {
    Add {
        requester_ip: String,
        peer: Peer,
    },
    Remove {
        requester_ip: String,
        public_key: PublicKey,
    },
    SetTrust {
        requester_ip: String,
        public_key: PublicKey,
        trust: f64,
    },
    ChangeTrust {
        requester_ip: String,
        public_key: PublicKey,
        delta: f64,
    },
    SetActive {
        requester_ip: String,
        public_key: PublicKey,
        state: PeerState,
    },
}

impl MembershipRequest {
    /// Operation name used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::SetTrust { .. } => "set_trust",
            Self::ChangeTrust { .. } => "change_trust",
            Self::SetActive { .. } => "set_active",
        }
    }

    pub fn requester_ip(&self) -> &str {
        match self {
            Self::Add { requester_ip, .. }
            | Self::Remove { requester_ip, .. }
            | Self::SetTrust { requester_ip, .. }
            | Self::ChangeTrust { requester_ip, .. }
            | Self::SetActive { requester_ip, .. } => requester_ip,
        }
    }

    /// Key of the peer the request targets.
    pub fn target(&self) -> &PublicKey {
        match self {
            Self::Add { peer, .. } => &peer.public_key,
            Self::Remove { public_key, .. }
            | Self::SetTrust { public_key, .. }
            | Self::ChangeTrust { public_key, .. }
            | Self::SetActive { public_key, .. } => public_key,
        }
    }
}

/// What an applied request actually did to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Change {
    Added {
        public_key: PublicKey,
        ip: String,
    },
    Removed {
        public_key: PublicKey,
        ip: String,
    },
    TrustUpdated {
        public_key: PublicKey,
        previous: f64,
        current: f64,
        /// Whether the peer's rank in the active set was refreshed
        repositioned: bool,
    },
    StateChanged {
        public_key: PublicKey,
        previous: PeerState,
        current: PeerState,
    },
}

impl Change {
    pub fn public_key(&self) -> &PublicKey {
        match self {
            Self::Added { public_key, .. }
            | Self::Removed { public_key, .. }
            | Self::TrustUpdated { public_key, .. }
            | Self::StateChanged { public_key, .. } => public_key,
        }
    }

    /// True if the active set gained or lost a member.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::StateChanged { previous, current, .. } if previous != current)
    }
}
