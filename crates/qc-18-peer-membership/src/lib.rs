//! # qc-18-peer-membership
//!
//! Peer membership registry for Quantum-Chain consensus.
//!
//! ## Architecture
//!
//! Tracks every known consensus peer (ip, public key, trust, state) and
//! maintains the derived, trust-ordered set of ACTIVE peers that forms the
//! quorum. Peers join as PREPARE candidates and only enter the quorum
//! through an explicit state transition.
//!
//! ```text
//! [Block Application] ──MembershipRequest──→ MembershipService
//!                                                 │
//!                            ┌────────────────────┼────────────────────┐
//!                            ↓                    ↓                    ↓
//!                     ChangeValidator       ChangeApplier        [Event Bus]
//!                       (read only)     PeerRegistry + ActiveSetIndex
//! ```
//!
//! Validation and application run under one write lock, so a change can
//! never be applied against a view other than the one it was checked on.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_18_peer_membership::{MembershipDependencies, MembershipService, Peer, PeerState};
//! use qc_18_peer_membership::adapters::InMemoryEventPublisher;
//!
//! let service = MembershipService::new(MembershipDependencies::new(
//!     Arc::new(InMemoryEventPublisher::new()),
//! ));
//!
//! service.add("10.0.0.9", Peer::new("10.0.0.1", "A").with_trust(2.0))?;
//! service.set_active("10.0.0.9", "A".into(), PeerState::Active)?;
//! let quorum = service.active_set();
//! ```
//!
//! ## Features
//!
//! - `metrics`: Prometheus counters for applied and rejected changes

pub mod adapters;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{InMemoryEventPublisher, NoOpEventPublisher, TomlConfigProvider};
pub use domain::{
    ActiveSetIndex, Change, MembershipConfig, MembershipError, MembershipRequest,
    MembershipResult, MembershipSnapshot, MembershipState, MembershipStats, Peer, PeerRegistry,
    PeerState, PublicKey, TrustBounds,
};
pub use events::MembershipEvent;
pub use ports::{ConfigProvider, MembershipApi, MembershipEventPublisher, RemovalPrecondition};
pub use service::{ChangeApplier, ChangeValidator, MembershipDependencies, MembershipService};
