use crate::domain::{Change, MembershipRequest, MembershipResult, MembershipStats, Peer, PublicKey};
use crate::ports::{MembershipApi, MembershipEventPublisher};
use crate::service::MembershipService;

impl<P: MembershipEventPublisher> MembershipApi for MembershipService<P> {
    fn submit(&self, request: MembershipRequest) -> MembershipResult<Change> {
        let mut state = self.state.write();
        let (outcome, event) = self.process_locked(&mut state, request);
        // Publish before unlocking so the bus sees events in apply order
        self.publish_all(event);
        outcome
    }

    fn submit_batch(&self, requests: Vec<MembershipRequest>) -> Vec<MembershipResult<Change>> {
        let mut outcomes = Vec::with_capacity(requests.len());
        let mut events = Vec::with_capacity(requests.len());

        // One lock for the whole block: readers see all of it or none
        let mut state = self.state.write();
        for request in requests {
            let (outcome, event) = self.process_locked(&mut state, request);
            outcomes.push(outcome);
            events.extend(event);
        }
        self.publish_all(events);
        outcomes
    }

    fn contains_ip(&self, ip: &str) -> bool {
        self.state.read().registry().contains_ip(ip)
    }

    fn contains_public_key(&self, public_key: &PublicKey) -> bool {
        self.state.read().registry().contains_public_key(public_key)
    }

    fn find(&self, public_key: &PublicKey) -> Option<Peer> {
        self.state.read().registry().find(public_key).cloned()
    }

    fn active_set(&self) -> Vec<PublicKey> {
        self.state.read().active_set().iter().cloned().collect()
    }

    fn stats(&self) -> MembershipStats {
        self.state.read().stats()
    }
}
