//! Mutation engine for membership changes.

use crate::domain::{
    Change, MembershipError, MembershipRequest, MembershipResult, MembershipState, Peer,
    PeerState, PublicKey,
};
use tracing::debug;

/// Applies validated changes to a [`MembershipState`].
///
/// Assumes [`ChangeValidator`](super::ChangeValidator) already accepted the
/// request. Existence and uniqueness are re-checked anyway: if the view
/// changed since validation the call fails and leaves the state untouched.
///
/// `set_active` is the only operation that moves peers in or out of the
/// active set; trust changes only re-rank existing members.
pub struct ChangeApplier<'a> {
    state: &'a mut MembershipState,
}

impl<'a> ChangeApplier<'a> {
    pub fn new(state: &'a mut MembershipState) -> Self {
        Self { state }
    }

    /// Store a new peer as a PREPARE candidate.
    pub fn add(&mut self, peer: Peer) -> MembershipResult<Change> {
        let peer = peer.with_state(PeerState::Prepare);
        let change = Change::Added {
            public_key: peer.public_key.clone(),
            ip: peer.ip.clone(),
        };
        self.state.registry.insert(peer)?;
        Ok(change)
    }

    pub fn remove(&mut self, public_key: &PublicKey) -> MembershipResult<Change> {
        let peer = self
            .state
            .registry
            .erase(public_key)
            .ok_or_else(|| MembershipError::PeerNotFound(public_key.clone()))?;

        // Validation keeps ACTIVE peers out of here; never leave a dangling member
        if self.state.active.erase(public_key) {
            debug!(public_key = %public_key, "removed peer was still in the active set");
        }

        Ok(Change::Removed {
            public_key: peer.public_key,
            ip: peer.ip,
        })
    }

    pub fn set_trust(&mut self, public_key: &PublicKey, trust: f64) -> MembershipResult<Change> {
        let previous = self
            .state
            .registry
            .set_trust(public_key, trust)
            .ok_or_else(|| MembershipError::PeerNotFound(public_key.clone()))?;

        let is_active = self
            .state
            .registry
            .find(public_key)
            .is_some_and(Peer::is_active);
        let repositioned = is_active && self.state.active.reposition(public_key, trust);

        Ok(Change::TrustUpdated {
            public_key: public_key.clone(),
            previous,
            current: trust,
            repositioned,
        })
    }

    pub fn change_trust(&mut self, public_key: &PublicKey, delta: f64) -> MembershipResult<Change> {
        let current = self
            .state
            .registry
            .find(public_key)
            .map(|peer| peer.trust)
            .ok_or_else(|| MembershipError::PeerNotFound(public_key.clone()))?;
        self.set_trust(public_key, current + delta)
    }

    /// Drive the PREPARE / ACTIVE state machine.
    ///
    /// | current | requested | index effect |
    /// |---|---|---|
    /// | PREPARE | ACTIVE | insert |
    /// | ACTIVE | PREPARE | erase |
    /// | same | same | none |
    ///
    /// The state is written in every case.
    pub fn set_active(&mut self, public_key: &PublicKey, target: PeerState) -> MembershipResult<Change> {
        let peer = self
            .state
            .registry
            .find(public_key)
            .ok_or_else(|| MembershipError::PeerNotFound(public_key.clone()))?;
        let previous = peer.state;

        match (previous, target) {
            (PeerState::Prepare, PeerState::Active) => {
                self.state.active.insert(peer);
            }
            (PeerState::Active, PeerState::Prepare) => {
                self.state.active.erase(public_key);
            }
            _ => {}
        }
        self.state.registry.set_state(public_key, target);

        Ok(Change::StateChanged {
            public_key: public_key.clone(),
            previous,
            current: target,
        })
    }

    /// Dispatch a request to its mutation.
    pub fn apply(&mut self, request: MembershipRequest) -> MembershipResult<Change> {
        match request {
            MembershipRequest::Add { peer, .. } => self.add(peer),
            MembershipRequest::Remove { public_key, .. } => self.remove(&public_key),
            MembershipRequest::SetTrust {
                public_key, trust, ..
            } => self.set_trust(&public_key, trust),
            MembershipRequest::ChangeTrust {
                public_key, delta, ..
            } => self.change_trust(&public_key, delta),
            MembershipRequest::SetActive {
                public_key, state, ..
            } => self.set_active(&public_key, state),
        }
    }
}
