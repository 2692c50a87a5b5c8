use crate::domain::{
    Change, MembershipConfig, MembershipRequest, MembershipResult, MembershipSnapshot,
    MembershipState, Peer, PeerState, PublicKey,
};
use crate::events::MembershipEvent;
use crate::metrics;
use crate::ports::{MembershipApi, MembershipEventPublisher, RemovalPrecondition};
use crate::service::{ChangeApplier, ChangeValidator};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Membership service: the single writer of the membership view.
///
/// Validation and application of each request happen under one write lock,
/// so no other request can slip in between the check and the mutation, and
/// readers never see the registry and the active set out of step.
///
/// # Example
///
/// ```rust,ignore
/// use qc_18_peer_membership::{MembershipDependencies, MembershipService, Peer, PeerState};
///
/// let service = MembershipService::new(MembershipDependencies::new(publisher));
/// service.add("10.0.0.9", Peer::new("10.0.0.1", "A"))?;
/// service.set_active("10.0.0.9", "A".into(), PeerState::Active)?;
/// assert_eq!(service.active_set().len(), 1);
/// ```
pub struct MembershipService<P: MembershipEventPublisher> {
    pub(crate) state: RwLock<MembershipState>,
    pub(crate) validator: ChangeValidator,
    pub(crate) publisher: Arc<P>,
}

/// Dependencies for MembershipService
pub struct MembershipDependencies<P> {
    pub publisher: Arc<P>,
    pub removal_precondition: Option<Box<dyn RemovalPrecondition>>,
    pub config: MembershipConfig,
}

impl<P> MembershipDependencies<P> {
    /// Default config, every removal allowed.
    pub fn new(publisher: Arc<P>) -> Self {
        Self {
            publisher,
            removal_precondition: None,
            config: MembershipConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MembershipConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_removal_precondition(mut self, precondition: Box<dyn RemovalPrecondition>) -> Self {
        self.removal_precondition = Some(precondition);
        self
    }

    fn into_parts(self) -> (Arc<P>, ChangeValidator) {
        let validator = match self.removal_precondition {
            Some(precondition) => {
                ChangeValidator::with_removal_precondition(self.config, precondition)
            }
            None => ChangeValidator::new(self.config),
        };
        (self.publisher, validator)
    }
}

impl<P: MembershipEventPublisher> MembershipService<P> {
    /// Create a service over an empty registry.
    pub fn new(deps: MembershipDependencies<P>) -> Self {
        let max_peers = deps.config.max_peers;
        let (publisher, validator) = deps.into_parts();
        Self {
            state: RwLock::new(MembershipState::with_max_peers(max_peers)),
            validator,
            publisher,
        }
    }

    /// Create a service from a persisted registry, rebuilding the active set.
    pub fn restore(
        deps: MembershipDependencies<P>,
        snapshot: MembershipSnapshot,
    ) -> MembershipResult<Self> {
        let max_peers = deps.config.max_peers;
        let state = MembershipState::from_snapshot(snapshot, max_peers)?;
        info!(
            peers = state.registry().len(),
            active = state.active_set().len(),
            "membership registry restored"
        );
        metrics::set_active_set_size(state.active_set().len());

        let (publisher, validator) = deps.into_parts();
        Ok(Self {
            state: RwLock::new(state),
            validator,
            publisher,
        })
    }

    pub fn config(&self) -> &MembershipConfig {
        self.validator.config()
    }

    pub fn add(&self, requester_ip: &str, peer: Peer) -> MembershipResult<Change> {
        self.submit(MembershipRequest::Add {
            requester_ip: requester_ip.to_string(),
            peer,
        })
    }

    pub fn remove(&self, requester_ip: &str, public_key: PublicKey) -> MembershipResult<Change> {
        self.submit(MembershipRequest::Remove {
            requester_ip: requester_ip.to_string(),
            public_key,
        })
    }

    pub fn set_trust(
        &self,
        requester_ip: &str,
        public_key: PublicKey,
        trust: f64,
    ) -> MembershipResult<Change> {
        self.submit(MembershipRequest::SetTrust {
            requester_ip: requester_ip.to_string(),
            public_key,
            trust,
        })
    }

    pub fn change_trust(
        &self,
        requester_ip: &str,
        public_key: PublicKey,
        delta: f64,
    ) -> MembershipResult<Change> {
        self.submit(MembershipRequest::ChangeTrust {
            requester_ip: requester_ip.to_string(),
            public_key,
            delta,
        })
    }

    pub fn set_active(
        &self,
        requester_ip: &str,
        public_key: PublicKey,
        state: PeerState,
    ) -> MembershipResult<Change> {
        self.submit(MembershipRequest::SetActive {
            requester_ip: requester_ip.to_string(),
            public_key,
            state,
        })
    }

    /// Dry-run validation against the current view. Nothing is applied.
    pub fn validate(&self, request: &MembershipRequest) -> MembershipResult<()> {
        let state = self.state.read();
        self.validator.validate(state.registry(), request)
    }

    pub fn snapshot(&self) -> MembershipSnapshot {
        self.state.read().snapshot()
    }

    /// Verify that the active set mirrors the registry.
    pub fn check_consistency(&self) -> Result<(), String> {
        self.state.read().check_consistency()
    }

    /// Validate and apply one request. Caller holds the write lock.
    pub(crate) fn process_locked(
        &self,
        state: &mut MembershipState,
        request: MembershipRequest,
    ) -> (MembershipResult<Change>, Option<MembershipEvent>) {
        let kind = request.kind();
        let requester_ip = request.requester_ip().to_string();
        let target = request.target().clone();

        let outcome = match self.validator.validate(state.registry(), &request) {
            Ok(()) => ChangeApplier::new(state).apply(request).inspect_err(|error| {
                // Validation passed but the view no longer allows the change
                warn!(public_key = %target, kind, error = %error, "applier refused validated change");
            }),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(change) => {
                let active_set_size = state.active_set().len();
                metrics::record_change_applied(kind);
                metrics::set_active_set_size(active_set_size);

                if change.is_transition() {
                    info!(
                        public_key = %target,
                        requester_ip = %requester_ip,
                        active_set_size,
                        ?change,
                        "quorum membership changed"
                    );
                } else {
                    debug!(
                        public_key = %target,
                        requester_ip = %requester_ip,
                        kind,
                        "membership change applied"
                    );
                }
                debug_assert!(state.check_consistency().is_ok());

                let event = MembershipEvent::applied(&requester_ip, change.clone(), active_set_size);
                (Ok(change), Some(event))
            }
            Err(error) => {
                warn!(
                    public_key = %target,
                    requester_ip = %requester_ip,
                    kind,
                    reason = error.reason(),
                    "membership change rejected"
                );
                metrics::record_change_rejected(error.reason());

                let event = self
                    .config()
                    .emit_rejection_events
                    .then(|| MembershipEvent::rejected(kind, &requester_ip, target, &error));
                (Err(error), event)
            }
        }
    }

    /// Hand events to the bus. Publishing failures are logged, never fatal.
    ///
    /// Called with the write lock held; publishers must not call back into
    /// the service.
    pub(crate) fn publish_all(&self, events: impl IntoIterator<Item = MembershipEvent>) {
        for event in events {
            if let Err(e) = self.publisher.publish(event) {
                warn!(error = %e, "failed to publish membership event");
            }
        }
    }
}
