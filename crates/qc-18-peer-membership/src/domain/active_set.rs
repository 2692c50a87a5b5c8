//! Ordered index of ACTIVE peers (the quorum set).

use super::{Peer, PublicKey};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Rank of one quorum member: trust descending, then public key ascending.
#[derive(Debug, Clone)]
struct RankedKey {
    trust: f64,
    public_key: PublicKey,
}

impl Ord for RankedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .trust
            .total_cmp(&self.trust)
            .then_with(|| self.public_key.cmp(&other.public_key))
    }
}

impl PartialOrd for RankedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankedKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedKey {}

/// Derived view of the registry's ACTIVE peers.
///
/// Holds keys and a trust snapshot only; the peers themselves stay owned by
/// `PeerRegistry`. Iteration yields the deterministic quorum order.
#[derive(Debug, Clone, Default)]
pub struct ActiveSetIndex {
    ranked: BTreeSet<RankedKey>,
    /// Trust each member was ranked with, needed to locate its entry
    trust: HashMap<PublicKey, f64>,
}

impl ActiveSetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer to the quorum set. Returns false if it was already a member.
    pub fn insert(&mut self, peer: &Peer) -> bool {
        if self.trust.contains_key(&peer.public_key) {
            return false;
        }
        self.trust.insert(peer.public_key.clone(), peer.trust);
        self.ranked.insert(RankedKey {
            trust: peer.trust,
            public_key: peer.public_key.clone(),
        })
    }

    /// Drop a peer from the quorum set. Returns false if it was not a member.
    pub fn erase(&mut self, public_key: &PublicKey) -> bool {
        match self.trust.remove(public_key) {
            Some(trust) => self.ranked.remove(&RankedKey {
                trust,
                public_key: public_key.clone(),
            }),
            None => false,
        }
    }

    /// Move a member to the rank matching its new trust.
    ///
    /// Returns false if the key is not a member.
    pub fn reposition(&mut self, public_key: &PublicKey, trust: f64) -> bool {
        let Some(old) = self.trust.get_mut(public_key) else {
            return false;
        };
        let previous = std::mem::replace(old, trust);
        self.ranked.remove(&RankedKey {
            trust: previous,
            public_key: public_key.clone(),
        });
        self.ranked.insert(RankedKey {
            trust,
            public_key: public_key.clone(),
        });
        true
    }

    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.trust.contains_key(public_key)
    }

    /// Trust the member is currently ranked with.
    pub fn trust_of(&self, public_key: &PublicKey) -> Option<f64> {
        self.trust.get(public_key).copied()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Members in quorum order.
    pub fn iter(&self) -> impl Iterator<Item = &PublicKey> {
        self.ranked.iter().map(|entry| &entry.public_key)
    }

    /// The `n` highest-ranked members.
    pub fn top(&self, n: usize) -> Vec<PublicKey> {
        self.iter().take(n).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.ranked.clear();
        self.trust.clear();
    }
}
