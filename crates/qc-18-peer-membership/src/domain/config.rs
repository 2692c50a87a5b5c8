//! Membership configuration.

use super::{MembershipError, MembershipResult};
use serde::Deserialize;

/// Allowed range for a peer's trust.
///
/// Not enforced unless set in [`MembershipConfig::trust_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrustBounds {
    pub min: f64,
    pub max: f64,
}

impl TrustBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Only lower-bounded at zero.
    pub fn non_negative() -> Self {
        Self::new(0.0, f64::MAX)
    }

    pub fn check(&self, value: f64) -> MembershipResult<()> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(())
        } else {
            Err(MembershipError::TrustOutOfBounds {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Membership subsystem configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MembershipConfig {
    /// Range trust must stay within after every change. `None` disables the check.
    pub trust_bounds: Option<TrustBounds>,
    /// Registry capacity. `None` means unbounded.
    pub max_peers: Option<usize>,
    /// Publish an event for every rejected request, not only applied ones
    pub emit_rejection_events: bool,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            trust_bounds: None,
            max_peers: None,
            emit_rejection_events: true,
        }
    }
}

impl MembershipConfig {
    /// Testing config with a small registry and non-negative trust
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            trust_bounds: Some(TrustBounds::non_negative()),
            max_peers: Some(8),
            emit_rejection_events: true,
        }
    }

    /// Check a trust value against the configured bounds, if any.
    ///
    /// NaN and infinities are refused even without bounds; they have no
    /// place in the quorum order.
    pub fn check_trust(&self, value: f64) -> MembershipResult<()> {
        if !value.is_finite() {
            return Err(MembershipError::InvalidTrust(value));
        }
        match &self.trust_bounds {
            Some(bounds) => bounds.check(value),
            None => Ok(()),
        }
    }
}
