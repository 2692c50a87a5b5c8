//! Core membership entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque peer identity. Primary key of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    /// Wrap an encoded public key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PublicKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for PublicKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for PublicKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Participation state of a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeerState {
    /// Candidate, not part of the consensus quorum.
    Prepare,
    /// Current quorum member.
    Active,
}

impl PeerState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for PeerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prepare => write!(f, "PREPARE"),
            Self::Active => write!(f, "ACTIVE"),
        }
    }
}

/// A node known to the membership registry.
///
/// `ip` and `public_key` are both unique across the registry. Once a peer is
/// stored only `trust` and `state` can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub ip: String,
    pub public_key: PublicKey,
    /// Weight used to rank quorum members (higher first).
    pub trust: f64,
    pub state: PeerState,
}

impl Peer {
    /// Create a candidate peer with zero trust.
    pub fn new(ip: impl Into<String>, public_key: impl Into<PublicKey>) -> Self {
        Self {
            ip: ip.into(),
            public_key: public_key.into(),
            trust: 0.0,
            state: PeerState::Prepare,
        }
    }

    #[must_use]
    pub fn with_trust(mut self, trust: f64) -> Self {
        self.trust = trust;
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: PeerState) -> Self {
        self.state = state;
        self
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}
