//! End-to-end membership flows through the public API.

use qc_18_peer_membership::adapters::{PinnedPeers, StaticConfigProvider};
use qc_18_peer_membership::*;
use std::sync::{Arc, Once};

const PROPOSER: &str = "192.168.1.10";

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn add(ip: &str, key: &str, trust: f64) -> MembershipRequest {
    MembershipRequest::Add {
        requester_ip: PROPOSER.to_string(),
        peer: Peer::new(ip, key).with_trust(trust),
    }
}

fn promote(key: &str) -> MembershipRequest {
    MembershipRequest::SetActive {
        requester_ip: PROPOSER.to_string(),
        public_key: key.into(),
        state: PeerState::Active,
    }
}

#[test]
fn test_block_of_membership_transactions() {
    init_tracing();
    let publisher = Arc::new(InMemoryEventPublisher::new());
    let service = MembershipService::new(MembershipDependencies::new(publisher.clone()));

    let outcomes = service.submit_batch(vec![
        add("10.0.0.1", "validator-a", 10.0),
        add("10.0.0.2", "validator-b", 30.0),
        add("10.0.0.3", "validator-c", 20.0),
        promote("validator-a"),
        promote("validator-b"),
        promote("validator-c"),
        MembershipRequest::ChangeTrust {
            requester_ip: PROPOSER.to_string(),
            public_key: "validator-a".into(),
            delta: 25.0,
        },
    ]);

    assert!(outcomes.iter().all(Result::is_ok));
    assert_eq!(
        service.active_set(),
        vec![
            PublicKey::from("validator-a"),
            PublicKey::from("validator-b"),
            PublicKey::from("validator-c"),
        ]
    );
    assert_eq!(publisher.len(), 7);

    let transitions = publisher
        .events()
        .into_iter()
        .filter(|event| {
            matches!(event, MembershipEvent::ChangeApplied { change, .. } if change.is_transition())
        })
        .count();
    assert_eq!(transitions, 3);
}

#[test]
fn test_config_from_provider() {
    init_tracing();
    let provider = TomlConfigProvider::parse(
        r#"
        [membership]
        max_peers = 2
        "#,
    )
    .unwrap();
    let deps = MembershipDependencies::new(Arc::new(NoOpEventPublisher::new()))
        .with_config(provider.membership_config());
    let service = MembershipService::new(deps);

    let outcomes = service.submit_batch(vec![
        add("10.0.0.1", "a", 0.0),
        add("10.0.0.2", "b", 0.0),
        add("10.0.0.3", "c", 0.0),
    ]);

    assert_eq!(
        outcomes[2],
        Err(MembershipError::RegistryFull { capacity: 2 })
    );
    assert_eq!(service.stats().max_peers, Some(2));
}

#[test]
fn test_rejections_leave_registry_untouched() {
    init_tracing();
    let config = MembershipConfig {
        trust_bounds: Some(TrustBounds::new(0.0, 100.0)),
        ..MembershipConfig::default()
    };
    let provider = StaticConfigProvider::new(config);
    let deps = MembershipDependencies::new(Arc::new(InMemoryEventPublisher::new()))
        .with_config(provider.membership_config())
        .with_removal_precondition(Box::new(PinnedPeers::new().with_pinned("bootstrap")));
    let service = MembershipService::new(deps);

    service.submit(add("10.0.0.1", "bootstrap", 50.0)).unwrap();
    let before = service.snapshot();

    let rejected = service.submit_batch(vec![
        add("10.0.0.1", "other", 1.0),
        add("10.0.0.2", "bootstrap", 1.0),
        MembershipRequest::SetTrust {
            requester_ip: PROPOSER.to_string(),
            public_key: "bootstrap".into(),
            trust: 150.0,
        },
        MembershipRequest::Remove {
            requester_ip: PROPOSER.to_string(),
            public_key: "bootstrap".into(),
        },
        MembershipRequest::Remove {
            requester_ip: PROPOSER.to_string(),
            public_key: "unknown".into(),
        },
    ]);

    let reasons: Vec<&str> = rejected
        .iter()
        .map(|outcome| outcome.as_ref().unwrap_err().reason())
        .collect();
    assert_eq!(
        reasons,
        vec![
            "duplicate_ip",
            "duplicate_key",
            "trust_out_of_bounds",
            "removal_denied",
            "peer_not_found",
        ]
    );
    assert_eq!(service.snapshot(), before);
}

#[test]
fn test_snapshot_survives_serialization() {
    init_tracing();
    let service = MembershipService::new(MembershipDependencies::new(Arc::new(
        NoOpEventPublisher::new(),
    )));
    service
        .submit_batch(vec![
            add("10.0.0.1", "a", 3.0),
            add("10.0.0.2", "b", 4.0),
            promote("a"),
        ])
        .into_iter()
        .collect::<MembershipResult<Vec<_>>>()
        .unwrap();

    let json = serde_json::to_string(&service.snapshot()).unwrap();
    assert!(json.contains("\"ACTIVE\""));
    let snapshot: MembershipSnapshot = serde_json::from_str(&json).unwrap();

    let restored = MembershipService::restore(
        MembershipDependencies::new(Arc::new(NoOpEventPublisher::new())),
        snapshot,
    )
    .unwrap();
    assert_eq!(restored.active_set(), vec![PublicKey::from("a")]);
    assert_eq!(restored.stats().prepare_peers, 1);
}
