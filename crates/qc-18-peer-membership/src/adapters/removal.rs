//! Removal precondition adapters.

use crate::domain::{Peer, PublicKey};
use crate::ports::RemovalPrecondition;
use std::collections::HashSet;

/// Allows every removal. Used until a liveness check is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllRemovals;

impl RemovalPrecondition for AllowAllRemovals {
    fn check(&self, _peer: &Peer) -> Result<(), String> {
        Ok(())
    }
}

/// Refuses to remove operator-pinned peers.
#[derive(Debug, Clone, Default)]
pub struct PinnedPeers {
    pinned: HashSet<PublicKey>,
}

impl PinnedPeers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pinned(mut self, public_key: impl Into<PublicKey>) -> Self {
        self.pinned.insert(public_key.into());
        self
    }

    pub fn pin(&mut self, public_key: PublicKey) {
        self.pinned.insert(public_key);
    }

    pub fn unpin(&mut self, public_key: &PublicKey) {
        self.pinned.remove(public_key);
    }
}

impl RemovalPrecondition for PinnedPeers {
    fn check(&self, peer: &Peer) -> Result<(), String> {
        if self.pinned.contains(&peer.public_key) {
            Err(format!("peer {} is pinned", peer.public_key))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        assert!(AllowAllRemovals.check(&Peer::new("10.0.0.1", "A")).is_ok());
    }

    #[test]
    fn test_pin_and_unpin() {
        let peer = Peer::new("10.0.0.1", "A");
        let mut pinned = PinnedPeers::new();
        assert!(pinned.check(&peer).is_ok());

        pinned.pin("A".into());
        assert_eq!(pinned.check(&peer), Err("peer A is pinned".to_string()));

        pinned.unpin(&"A".into());
        assert!(pinned.check(&peer).is_ok());
    }
}
