//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports:
//! - config: static and TOML configuration providers
//! - publisher: no-op and in-memory event publishers
//! - removal: removal preconditions

pub mod config;
pub mod publisher;
pub mod removal;

pub use config::{ConfigError, StaticConfigProvider, TomlConfigProvider};
pub use publisher::{InMemoryEventPublisher, NoOpEventPublisher};
pub use removal::{AllowAllRemovals, PinnedPeers};
