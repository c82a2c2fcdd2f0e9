use crate::{
    connections::NumConnections,
    runtime::{Publisher, Subscription, Timer},
    types::Role,
};

/// Publishing side of a topic: its peers are the subscriptions.
pub trait PublisherEndpoint {
    fn topic_name(&self) -> &str;
    fn subscription_count(&self) -> usize;
}

/// Subscribing side of a topic: its peers are the publishers.
pub trait SubscriptionEndpoint {
    fn topic_name(&self) -> &str;
    fn publisher_count(&self) -> usize;
}

impl<T> PublisherEndpoint for Publisher<T> {
    fn topic_name(&self) -> &str {
        Publisher::topic_name(self)
    }

    fn subscription_count(&self) -> usize {
        self.get_subscription_count()
    }
}

impl<T: 'static> SubscriptionEndpoint for Subscription<T> {
    fn topic_name(&self) -> &str {
        Subscription::topic_name(self)
    }

    fn publisher_count(&self) -> usize {
        self.get_publisher_count()
    }
}

/// Borrowed view over the endpoint kinds a node owns.
pub enum EndpointRef<'a> {
    Publisher(&'a dyn PublisherEndpoint),
    Subscription(&'a dyn SubscriptionEndpoint),
    Timer(&'a Timer),
}

impl<'a, T> From<&'a Publisher<T>> for EndpointRef<'a> {
    fn from(v: &'a Publisher<T>) -> Self {
        Self::Publisher(v)
    }
}

impl<'a, T: 'static> From<&'a Subscription<T>> for EndpointRef<'a> {
    fn from(v: &'a Subscription<T>) -> Self {
        Self::Subscription(v)
    }
}

impl<'a> From<&'a Timer> for EndpointRef<'a> {
    fn from(v: &'a Timer) -> Self {
        Self::Timer(v)
    }
}

impl EndpointRef<'_> {
    pub fn role(&self) -> Option<Role> {
        match self {
            EndpointRef::Publisher(_) => Some(Role::Publisher),
            EndpointRef::Subscription(_) => Some(Role::Subscriber),
            EndpointRef::Timer(_) => None,
        }
    }

    pub fn topic_name(&self) -> Option<&str> {
        match self {
            EndpointRef::Publisher(endpoint) => Some(endpoint.topic_name()),
            EndpointRef::Subscription(endpoint) => Some(endpoint.topic_name()),
            EndpointRef::Timer(_) => None,
        }
    }
}

impl NumConnections for EndpointRef<'_> {
    fn num_connections(&self) -> usize {
        match self {
            EndpointRef::Publisher(endpoint) => endpoint.subscription_count(),
            EndpointRef::Subscription(endpoint) => endpoint.publisher_count(),
            EndpointRef::Timer(timer) => timer.num_connections(),
        }
    }
}
