//! # Membership Service
//!
//! Wires the validation gate and the mutation engine to the ports.
//!
//! - `validator`: side-effect-free precondition checks
//! - `applier`: applies accepted changes, keeps the active set in step
//! - `core`: the single-writer service fusing both under one lock

mod api;
mod applier;
mod core;
mod validator;

pub use applier::ChangeApplier;
pub use core::{MembershipDependencies, MembershipService};
pub use validator::ChangeValidator;
