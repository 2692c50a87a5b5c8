//! Canonical peer registry.

use super::{MembershipError, MembershipResult, Peer, PeerState, PublicKey};
use std::collections::{HashMap, HashSet};

/// Owns every known peer, in insertion order.
///
/// # Invariants
/// - No two peers share an `ip`.
/// - No two peers share a `public_key`.
///
/// Mutators are crate-private: outside callers go through the validator and
/// applier, never straight to the registry.
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    peers: Vec<Peer>,
    /// Position of each peer in `peers`
    lookup: HashMap<PublicKey, usize>,
    ips: HashSet<String>,
    max_peers: Option<usize>,
}

impl PeerRegistry {
    /// Create an empty, unbounded registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that refuses inserts past `max_peers`.
    pub fn bounded(max_peers: usize) -> Self {
        Self {
            max_peers: Some(max_peers),
            ..Self::default()
        }
    }

    pub fn contains_ip(&self, ip: &str) -> bool {
        self.ips.contains(ip)
    }

    pub fn contains_public_key(&self, public_key: &PublicKey) -> bool {
        self.lookup.contains_key(public_key)
    }

    /// Look a peer up by its primary key.
    pub fn find(&self, public_key: &PublicKey) -> Option<&Peer> {
        self.lookup.get(public_key).map(|&idx| &self.peers[idx])
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn max_peers(&self) -> Option<usize> {
        self.max_peers
    }

    /// True when a further insert would be refused for capacity.
    pub fn is_full(&self) -> bool {
        self.max_peers.is_some_and(|max| self.peers.len() >= max)
    }

    /// Iterate peers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter()
    }

    pub fn peers_in_state(&self, state: PeerState) -> impl Iterator<Item = &Peer> {
        self.peers.iter().filter(move |p| p.state == state)
    }

    /// Store a new peer.
    ///
    /// Refuses the peer if its ip or key is already taken, or if the
    /// registry is at capacity; the registry is left untouched in that case.
    pub(crate) fn insert(&mut self, peer: Peer) -> MembershipResult<()> {
        if self.contains_ip(&peer.ip) {
            return Err(MembershipError::DuplicateIp(peer.ip));
        }
        if self.contains_public_key(&peer.public_key) {
            return Err(MembershipError::DuplicateKey(peer.public_key));
        }
        if let Some(capacity) = self.max_peers.filter(|_| self.is_full()) {
            return Err(MembershipError::RegistryFull { capacity });
        }

        self.lookup.insert(peer.public_key.clone(), self.peers.len());
        self.ips.insert(peer.ip.clone());
        self.peers.push(peer);
        Ok(())
    }

    /// Remove a peer, returning it if it was present.
    pub(crate) fn erase(&mut self, public_key: &PublicKey) -> Option<Peer> {
        let idx = self.lookup.remove(public_key)?;
        let peer = self.peers.remove(idx);
        self.ips.remove(&peer.ip);

        // Entries after the removed slot shifted down by one
        for shifted in &self.peers[idx..] {
            if let Some(pos) = self.lookup.get_mut(&shifted.public_key) {
                *pos -= 1;
            }
        }
        Some(peer)
    }

    /// Overwrite a peer's trust, returning the previous value.
    pub(crate) fn set_trust(&mut self, public_key: &PublicKey, trust: f64) -> Option<f64> {
        let peer = self.find_mut(public_key)?;
        Some(std::mem::replace(&mut peer.trust, trust))
    }

    /// Overwrite a peer's state, returning the previous one.
    pub(crate) fn set_state(&mut self, public_key: &PublicKey, state: PeerState) -> Option<PeerState> {
        let peer = self.find_mut(public_key)?;
        Some(std::mem::replace(&mut peer.state, state))
    }

    fn find_mut(&mut self, public_key: &PublicKey) -> Option<&mut Peer> {
        let idx = *self.lookup.get(public_key)?;
        self.peers.get_mut(idx)
    }
}
