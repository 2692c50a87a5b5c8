//! # Driving Ports (Inbound API)
//!
//! The API the block-application layer uses to feed committed membership
//! transactions into this subsystem and to query the resulting view.

use crate::domain::{Change, MembershipRequest, MembershipResult, MembershipStats, Peer, PublicKey};

/// Primary membership API.
///
/// Every mutating call validates and applies as one atomic step, so two
/// requests can never both pass validation against the same registry view.
/// Events reach the publisher in the order the changes were applied, even
/// with concurrent callers.
///
/// # Example
///
/// ```rust,ignore
/// use qc_18_peer_membership::ports::MembershipApi;
///
/// fn apply_block<T: MembershipApi>(api: &T, txs: Vec<MembershipRequest>) {
///     for outcome in api.submit_batch(txs) {
///         if let Err(e) = outcome {
///             tracing::warn!(reason = e.reason(), "membership tx dropped");
///         }
///     }
/// }
/// ```
pub trait MembershipApi: Send + Sync {
    /// Validate and apply one membership transaction.
    ///
    /// # Returns
    ///
    /// - `Ok(change)` describing what was applied
    /// - `Err(_)` naming the rejection cause; the registry is unchanged
    fn submit(&self, request: MembershipRequest) -> MembershipResult<Change>;

    /// Apply a block's membership transactions in commit order.
    ///
    /// A rejected request does not stop the rest. Readers observe either
    /// none or all of the batch.
    fn submit_batch(&self, requests: Vec<MembershipRequest>) -> Vec<MembershipResult<Change>>;

    fn contains_ip(&self, ip: &str) -> bool;

    fn contains_public_key(&self, public_key: &PublicKey) -> bool;

    /// Copy of the peer stored under `public_key`.
    fn find(&self, public_key: &PublicKey) -> Option<Peer>;

    /// Active members in quorum order (trust descending, key ascending).
    fn active_set(&self) -> Vec<PublicKey>;

    fn stats(&self) -> MembershipStats;
}
