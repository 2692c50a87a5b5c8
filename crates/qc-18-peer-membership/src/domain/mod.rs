//! Domain layer for the Peer Membership subsystem
//!
//! Pure membership logic, no I/O:
//! - peer: identity, trust and participation state
//! - registry: canonical peer set with ip / key uniqueness
//! - active_set: trust-ordered quorum index
//! - state: registry + index pair mutated as one unit
//! - wrapper: deep-cloning owner for pluggable collaborators

mod active_set;
mod config;
mod errors;
mod peer;
mod registry;
mod request;
mod state;
mod wrapper;

pub use active_set::*;
pub use config::*;
pub use errors::*;
pub use peer::*;
pub use registry::*;
pub use request::*;
pub use state::*;
pub use wrapper::*;
