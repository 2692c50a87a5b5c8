//! Precondition checks for membership changes.
//!
//! The validator only reads the registry. Each check names the exact
//! rejection cause instead of collapsing everything into a boolean.

use crate::adapters::AllowAllRemovals;
use crate::domain::{
    MembershipConfig, MembershipError, MembershipRequest, MembershipResult, Peer, PeerRegistry,
    PeerState, Polymorphic, PublicKey,
};
use crate::ports::RemovalPrecondition;
use std::fmt;

/// Side-effect-free gate in front of [`ChangeApplier`](super::ChangeApplier).
#[derive(Clone)]
pub struct ChangeValidator {
    config: MembershipConfig,
    removal_precondition: Polymorphic<dyn RemovalPrecondition>,
}

impl ChangeValidator {
    /// Validator that allows every removal of a PREPARE peer.
    pub fn new(config: MembershipConfig) -> Self {
        Self::with_removal_precondition(config, Box::new(AllowAllRemovals))
    }

    pub fn with_removal_precondition(
        config: MembershipConfig,
        removal_precondition: Box<dyn RemovalPrecondition>,
    ) -> Self {
        Self {
            config,
            removal_precondition: Polymorphic::from_box(removal_precondition),
        }
    }

    pub fn config(&self) -> &MembershipConfig {
        &self.config
    }

    /// New peers must be unknown by ip and key, and enter as candidates.
    pub fn can_add(&self, registry: &PeerRegistry, peer: &Peer) -> MembershipResult<()> {
        if registry.contains_ip(&peer.ip) {
            return Err(MembershipError::DuplicateIp(peer.ip.clone()));
        }
        if registry.contains_public_key(&peer.public_key) {
            return Err(MembershipError::DuplicateKey(peer.public_key.clone()));
        }
        if peer.state != PeerState::Prepare {
            return Err(MembershipError::InvalidStateForOperation {
                public_key: peer.public_key.clone(),
                state: peer.state,
                operation: "add",
            });
        }
        if let Some(capacity) = registry.max_peers().filter(|_| registry.is_full()) {
            return Err(MembershipError::RegistryFull { capacity });
        }
        self.config.check_trust(peer.trust)
    }

    /// Only candidates can be removed; quorum members are demoted first.
    pub fn can_remove(&self, registry: &PeerRegistry, public_key: &PublicKey) -> MembershipResult<()> {
        let peer = Self::existing(registry, public_key)?;
        if peer.state != PeerState::Prepare {
            return Err(MembershipError::InvalidStateForOperation {
                public_key: public_key.clone(),
                state: peer.state,
                operation: "remove",
            });
        }
        self.removal_precondition
            .check(peer)
            .map_err(|reason| MembershipError::RemovalDenied {
                public_key: public_key.clone(),
                reason,
            })
    }

    pub fn can_set_trust(
        &self,
        registry: &PeerRegistry,
        public_key: &PublicKey,
        trust: f64,
    ) -> MembershipResult<()> {
        Self::existing(registry, public_key)?;
        self.config.check_trust(trust)
    }

    pub fn can_change_trust(
        &self,
        registry: &PeerRegistry,
        public_key: &PublicKey,
        delta: f64,
    ) -> MembershipResult<()> {
        let peer = Self::existing(registry, public_key)?;
        self.config.check_trust(peer.trust + delta)
    }

    /// Any transition is accepted here, including same-state requests.
    pub fn can_set_active(
        &self,
        registry: &PeerRegistry,
        public_key: &PublicKey,
        _state: PeerState,
    ) -> MembershipResult<()> {
        Self::existing(registry, public_key).map(|_| ())
    }

    /// Dispatch a request to its check.
    pub fn validate(&self, registry: &PeerRegistry, request: &MembershipRequest) -> MembershipResult<()> {
        match request {
            MembershipRequest::Add { peer, .. } => self.can_add(registry, peer),
            MembershipRequest::Remove { public_key, .. } => self.can_remove(registry, public_key),
            MembershipRequest::SetTrust {
                public_key, trust, ..
            } => self.can_set_trust(registry, public_key, *trust),
            MembershipRequest::ChangeTrust {
                public_key, delta, ..
            } => self.can_change_trust(registry, public_key, *delta),
            MembershipRequest::SetActive {
                public_key, state, ..
            } => self.can_set_active(registry, public_key, *state),
        }
    }

    fn existing<'r>(registry: &'r PeerRegistry, public_key: &PublicKey) -> MembershipResult<&'r Peer> {
        registry
            .find(public_key)
            .ok_or_else(|| MembershipError::PeerNotFound(public_key.clone()))
    }
}

impl fmt::Debug for ChangeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
