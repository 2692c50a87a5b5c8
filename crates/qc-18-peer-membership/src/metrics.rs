//! # Membership Metrics
//!
//! Prometheus metrics for the membership registry.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-peer-membership = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `membership_changes_applied_total` - Applied changes, by request kind
//! - `membership_changes_rejected_total` - Rejected changes, by reason
//! - `membership_active_set_size` - Current quorum size

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, register_int_gauge, IntCounterVec, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Applied membership changes, labeled by request kind
    pub static ref CHANGES_APPLIED: IntCounterVec = register_int_counter_vec!(
        "membership_changes_applied_total",
        "Total number of membership changes applied",
        &["kind"]
    )
    .expect("Failed to create CHANGES_APPLIED metric");

    /// Rejected membership changes, labeled by rejection reason
    pub static ref CHANGES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "membership_changes_rejected_total",
        "Total number of membership changes rejected",
        &["reason"]
    )
    .expect("Failed to create CHANGES_REJECTED metric");

    pub static ref ACTIVE_SET_SIZE: IntGauge = register_int_gauge!(
        "membership_active_set_size",
        "Number of peers in the active quorum set"
    )
    .expect("Failed to create ACTIVE_SET_SIZE metric");
}

/// Record an applied change
#[cfg(feature = "metrics")]
pub fn record_change_applied(kind: &str) {
    CHANGES_APPLIED.with_label_values(&[kind]).inc();
}

/// Record a rejected change with reason
#[cfg(feature = "metrics")]
pub fn record_change_rejected(reason: &str) {
    CHANGES_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn set_active_set_size(size: usize) {
    ACTIVE_SET_SIZE.set(size as i64);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_change_applied(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_change_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_active_set_size(_size: usize) {}
