//! # Ports Layer
//!
//! - **Driving Ports (Inbound):** APIs this subsystem exposes to block application
//! - **Driven Ports (Outbound):** SPIs this subsystem requires from adapters

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipApi;
pub use outbound::{
    ConfigProvider, MembershipEventPublisher, RemovalPrecondition, RemovalPreconditionClone,
};
