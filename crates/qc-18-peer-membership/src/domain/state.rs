//! Registry and quorum index, mutated together.

use super::{ActiveSetIndex, MembershipError, MembershipResult, Peer, PeerRegistry, PublicKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The full membership view: the peer registry plus its derived active set.
///
/// Constructed explicitly at node startup and dropped at shutdown. Only the
/// applier mutates it, so the two halves never drift apart.
#[derive(Debug, Clone, Default)]
pub struct MembershipState {
    pub(crate) registry: PeerRegistry,
    pub(crate) active: ActiveSetIndex,
}

impl MembershipState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state whose registry holds at most `max_peers`.
    pub fn with_max_peers(max_peers: Option<usize>) -> Self {
        Self {
            registry: max_peers.map(PeerRegistry::bounded).unwrap_or_default(),
            active: ActiveSetIndex::new(),
        }
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    pub fn active_set(&self) -> &ActiveSetIndex {
        &self.active
    }

    /// Rebuild a state from persisted peers.
    ///
    /// The active set is derived from each peer's stored state. Fails on the
    /// first duplicate ip or key, or on a non-finite trust.
    pub fn from_snapshot(
        snapshot: MembershipSnapshot,
        max_peers: Option<usize>,
    ) -> MembershipResult<Self> {
        let mut state = Self::with_max_peers(max_peers);
        for peer in snapshot.peers {
            if !peer.trust.is_finite() {
                return Err(MembershipError::InvalidTrust(peer.trust));
            }
            let key = peer.public_key.clone();
            state.registry.insert(peer)?;
            if let Some(stored) = state.registry.find(&key).filter(|p| p.is_active()) {
                state.active.insert(stored);
            }
        }
        Ok(state)
    }

    /// Copy the registry out for an external storage collaborator.
    pub fn snapshot(&self) -> MembershipSnapshot {
        MembershipSnapshot {
            peers: self.registry.iter().cloned().collect(),
        }
    }

    pub fn stats(&self) -> MembershipStats {
        MembershipStats {
            total_peers: self.registry.len(),
            active_peers: self.active.len(),
            prepare_peers: self.registry.len().saturating_sub(self.active.len()),
            max_peers: self.registry.max_peers(),
        }
    }

    /// Verify that the active set mirrors the registry exactly.
    ///
    /// Returns a description of the first divergence found.
    pub fn check_consistency(&self) -> Result<(), String> {
        let expected: HashSet<&PublicKey> = self
            .registry
            .iter()
            .filter(|p| p.is_active())
            .map(|p| &p.public_key)
            .collect();

        if expected.len() != self.active.len() {
            return Err(format!(
                "active set holds {} members, registry has {} active peers",
                self.active.len(),
                expected.len()
            ));
        }
        for key in self.active.iter() {
            if !expected.contains(key) {
                return Err(format!("stale active member {key}"));
            }
            let ranked = self.active.trust_of(key);
            let stored = self.registry.find(key).map(|p| p.trust);
            if ranked.map(f64::to_bits) != stored.map(f64::to_bits) {
                return Err(format!(
                    "member {key} ranked with trust {ranked:?}, registry has {stored:?}"
                ));
            }
        }
        Ok(())
    }
}

/// Registry counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStats {
    pub total_peers: usize,
    pub active_peers: usize,
    pub prepare_peers: usize,
    pub max_peers: Option<usize>,
}

/// Serializable copy of the registry, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    pub peers: Vec<Peer>,
}
