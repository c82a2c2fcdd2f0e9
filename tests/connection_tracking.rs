use connection_counter::{
    endpoint::{EndpointRef, PublisherEndpoint, SubscriptionEndpoint},
    get_num_connections, num_connections,
    qos::QosProfile,
    reporter::{report_connections, TrackedEndpoint},
    runtime::{Context, Node, Publisher, Subscription},
    NumConnections,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Peer source whose count is set from outside, like a runtime would.
struct MockEndpoint {
    peers: Arc<AtomicUsize>,
}

impl MockEndpoint {
    fn peers(&self) -> usize {
        self.peers.load(Ordering::Relaxed)
    }
}

impl PublisherEndpoint for MockEndpoint {
    fn topic_name(&self) -> &str {
        "/mock"
    }

    fn subscription_count(&self) -> usize {
        self.peers()
    }
}

impl SubscriptionEndpoint for MockEndpoint {
    fn topic_name(&self) -> &str {
        "/mock"
    }

    fn publisher_count(&self) -> usize {
        self.peers()
    }
}

impl NumConnections for MockEndpoint {
    fn num_connections(&self) -> usize {
        self.peers()
    }
}

fn mock(peers: usize) -> MockEndpoint {
    MockEndpoint {
        peers: Arc::new(AtomicUsize::new(peers)),
    }
}

#[test]
fn mock_publisher_and_subscriber_and_unrelated_value() {
    let pub_ = mock(3);
    assert_eq!(get_num_connections(&pub_), 3);
    assert_eq!(get_num_connections(&EndpointRef::Publisher(&pub_)), 3);

    let sub = mock(0);
    assert_eq!(get_num_connections(&sub), 0);
    assert_eq!(get_num_connections(&EndpointRef::Subscription(&sub)), 0);

    assert_eq!(num_connections!(7_u64), 0);
}

#[test]
fn publisher_count_matches_subscriptions_for_any_k() {
    let ctx = Context::create();
    let talker = Node::create(ctx.clone(), "talker", "/").unwrap();
    let listener = Node::create(ctx, "listener", "/").unwrap();
    let pub_: Publisher<u32> = talker
        .create_publisher("chatter", QosProfile::default())
        .unwrap();

    let mut subs: Vec<Subscription<u32>> = vec![];
    for k in 0..8 {
        assert_eq!(get_num_connections(&pub_), k);
        subs.push(listener.subscribe("chatter", QosProfile::default()).unwrap());
    }
    while let Some(sub) = subs.pop() {
        assert_eq!(get_num_connections(&sub), 1);
        drop(sub);
        assert_eq!(get_num_connections(&pub_), subs.len());
    }
}

#[test]
fn subscription_count_matches_publishers() {
    let ctx = Context::create();
    let node = Node::create(ctx, "listener", "/").unwrap();
    let sub: Subscription<String> = node.subscribe("chatter", QosProfile::default()).unwrap();
    let pubs: Vec<Publisher<String>> = (0..4)
        .map(|_| {
            node.create_publisher("chatter", QosProfile::default())
                .unwrap()
        })
        .collect();
    assert_eq!(get_num_connections(&sub), 4);
    drop(pubs);
    assert_eq!(get_num_connections(&sub), 0);
}

#[test]
fn queries_see_changes_without_invalidation() {
    let endpoint = mock(1);
    let peers = endpoint.peers.clone();
    assert_eq!(get_num_connections(&endpoint), 1);
    peers.store(6, Ordering::Relaxed);
    assert_eq!(get_num_connections(&endpoint), 6);
    peers.store(0, Ordering::Relaxed);
    assert_eq!(get_num_connections(&endpoint), 0);
}

#[test]
fn reporter_reads_without_mutating() {
    let node = Node::create(Context::create(), "demo", "/").unwrap();
    let pub_: Publisher<String> = node.create_publisher("topic", QosProfile::default()).unwrap();
    let sub: Subscription<String> = node.subscribe("topic", QosProfile::default()).unwrap();

    for _ in 0..3 {
        let reports = report_connections(&[
            TrackedEndpoint::new("Publisher", &pub_),
            TrackedEndpoint::new("Subscriber", &sub),
        ]);
        let counts: Vec<_> = reports.iter().map(|r| r.connections).collect();
        assert_eq!(counts, [1, 1]);
    }
    assert_eq!(node.count_publishers("topic").unwrap(), 1);
    assert_eq!(node.count_subscribers("topic").unwrap(), 1);
}

#[test]
fn counts_are_readable_from_other_threads() {
    let node = Node::create(Context::create(), "demo", "/").unwrap();
    let pub_: Arc<Publisher<u8>> =
        Arc::new(node.create_publisher("topic", QosProfile::default()).unwrap());
    let _subs: Vec<Subscription<u8>> = (0..2)
        .map(|_| node.subscribe("topic", QosProfile::default()).unwrap())
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pub_ = pub_.clone();
            std::thread::spawn(move || get_num_connections(&pub_))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
