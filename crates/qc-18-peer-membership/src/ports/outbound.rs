//! Driven ports (Outbound dependencies)

use crate::domain::{ClonePolymorphic, MembershipConfig, Peer};
use crate::events::MembershipEvent;

/// Extra gate consulted before a PREPARE peer is removed.
///
/// This is where a liveness confirmation (e.g. pinging the peer) plugs in.
/// Implementations must be cheap to clone; the validator owns its own copy.
pub trait RemovalPrecondition: Send + Sync + RemovalPreconditionClone {
    /// `Ok(())` allows removal, `Err(reason)` denies it.
    fn check(&self, peer: &Peer) -> Result<(), String>;
}

/// Boxed deep copy for [`RemovalPrecondition`] trait objects.
///
/// Blanket-implemented for every `Clone` precondition.
pub trait RemovalPreconditionClone {
    fn clone_boxed(&self) -> Box<dyn RemovalPrecondition>;
}

impl<T> RemovalPreconditionClone for T
where
    T: RemovalPrecondition + Clone + 'static,
{
    fn clone_boxed(&self) -> Box<dyn RemovalPrecondition> {
        Box::new(self.clone())
    }
}

impl ClonePolymorphic for dyn RemovalPrecondition {
    fn clone_polymorphic(&self) -> Box<Self> {
        self.clone_boxed()
    }
}

/// Event publishing port.
///
/// Abstracts the event bus so the subsystem can be tested without it.
pub trait MembershipEventPublisher: Send + Sync {
    fn publish(&self, event: MembershipEvent) -> Result<(), String>;
}

/// Source of the membership configuration.
pub trait ConfigProvider: Send + Sync {
    fn membership_config(&self) -> MembershipConfig;
}
