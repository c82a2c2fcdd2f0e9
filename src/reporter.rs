use crate::{connections::NumConnections, endpoint::EndpointRef, types::Role};
use itertools::Itertools;
use std::fmt;
use tracing::{debug, info};

pub struct TrackedEndpoint<'a> {
    pub label: &'a str,
    pub endpoint: EndpointRef<'a>,
}

impl<'a> TrackedEndpoint<'a> {
    pub fn new(label: &'a str, endpoint: impl Into<EndpointRef<'a>>) -> Self {
        Self {
            label,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub label: String,
    pub role: Option<Role>,
    pub topic: Option<String>,
    pub connections: usize,
}

impl fmt::Display for ConnectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.connections)
    }
}

/// Reads the connection count of every endpoint once and logs it.
pub fn report_connections(endpoints: &[TrackedEndpoint<'_>]) -> Vec<ConnectionReport> {
    let reports: Vec<_> = endpoints
        .iter()
        .map(|tracked| {
            let TrackedEndpoint { label, endpoint } = tracked;
            let connections = endpoint.num_connections();
            let topic = endpoint.topic_name().map(str::to_string);
            info!(topic = topic.as_deref().unwrap_or("-"), "{label} connections: '{connections}'");
            ConnectionReport {
                label: label.to_string(),
                role: endpoint.role(),
                topic,
                connections,
            }
        })
        .collect();
    debug!("connection report: {}", reports.iter().join(", "));
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        endpoint::PublisherEndpoint,
        logging::capture::logs,
        qos::QosProfile,
        runtime::{Context, Node},
    };
    use std::{cell::Cell, time::Duration};

    struct CountingPublisher {
        reads: Cell<usize>,
        peers: usize,
    }

    impl PublisherEndpoint for CountingPublisher {
        fn topic_name(&self) -> &str {
            "/counted"
        }

        fn subscription_count(&self) -> usize {
            self.reads.set(self.reads.get() + 1);
            self.peers
        }
    }

    #[test]
    fn one_report_per_endpoint() {
        let node = Node::create(Context::create(), "reporter_test", "/").unwrap();
        let pub_ = node
            .create_publisher::<String>("topic", QosProfile::default())
            .unwrap();
        let sub = node
            .subscribe::<String>("topic", QosProfile::default())
            .unwrap();
        let timer = node.create_wall_timer(Duration::from_millis(500)).unwrap();

        let reports = report_connections(&[
            TrackedEndpoint::new("Publisher", &pub_),
            TrackedEndpoint::new("Subscriber", &sub),
            TrackedEndpoint::new("Timer", &timer),
        ]);

        assert_eq!(
            reports,
            vec![
                ConnectionReport {
                    label: "Publisher".into(),
                    role: Some(Role::Publisher),
                    topic: Some("/topic".into()),
                    connections: 1,
                },
                ConnectionReport {
                    label: "Subscriber".into(),
                    role: Some(Role::Subscriber),
                    topic: Some("/topic".into()),
                    connections: 1,
                },
                ConnectionReport {
                    label: "Timer".into(),
                    role: None,
                    topic: None,
                    connections: 0,
                },
            ]
        );
        assert_eq!(pub_.get_subscription_count(), 1);
    }

    #[test]
    fn reads_each_endpoint_exactly_once() {
        let counted = CountingPublisher {
            reads: Cell::new(0),
            peers: 3,
        };
        let reports = report_connections(&[TrackedEndpoint {
            label: "Publisher",
            endpoint: EndpointRef::Publisher(&counted),
        }]);
        assert_eq!(reports[0].connections, 3);
        assert_eq!(counted.reads.get(), 1);
    }

    #[test]
    fn logs_one_line_per_endpoint() {
        let node = Node::create(Context::create(), "reporter_test", "/").unwrap();
        let pub_ = node
            .create_publisher::<String>("topic", QosProfile::default())
            .unwrap();
        let timer = node.create_wall_timer(Duration::from_millis(500)).unwrap();

        let (_, output) = logs(|| {
            report_connections(&[
                TrackedEndpoint::new("Publisher", &pub_),
                TrackedEndpoint::new("Timer", &timer),
            ])
        });

        let info: Vec<_> = output.lines().filter(|line| line.contains(" INFO ")).collect();
        assert_eq!(info.len(), 2);
        assert!(info[0].contains("Publisher connections: '0'"));
        assert!(info[0].contains("topic=\"/topic\""));
        assert!(info[1].contains("Timer connections: '0'"));
        assert!(output.contains("connection report: Publisher=0, Timer=0"));
    }

    #[test]
    fn empty_input_reports_nothing() {
        assert!(report_connections(&[]).is_empty());
    }
}
