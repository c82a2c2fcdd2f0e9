use super::{
    topic::{Graph, Topic},
    Error, Result,
};
use crate::qos::QosProfile;
use std::{fmt, sync::Arc};

/// Publishing end of a topic. Counts as one publisher until dropped.
pub struct Publisher<T> {
    graph: Arc<Graph>,
    topic: Arc<Topic<T>>,
    qos: QosProfile,
}

impl<T> Publisher<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(graph: Arc<Graph>, topic_name: &str, qos: QosProfile) -> Result<Self> {
        let topic = graph.attach_publisher::<T>(topic_name)?;
        Ok(Self { graph, topic, qos })
    }
}

impl<T> Publisher<T>
where
    T: Clone,
{
    /// Sends a copy of `msg` to every subscription on the topic.
    pub fn publish(&self, msg: &T) -> Result<()> {
        if self.graph.is_shutdown() {
            return Err(Error::ContextShutdown);
        }
        self.topic.deliver(msg);
        Ok(())
    }
}

impl<T> Publisher<T> {
    pub fn topic_name(&self) -> &str {
        self.topic.name()
    }

    pub fn qos(&self) -> &QosProfile {
        &self.qos
    }

    /// Number of subscriptions currently attached to the topic.
    pub fn get_subscription_count(&self) -> usize {
        self.topic.subscription_count()
    }
}

impl<T> Drop for Publisher<T> {
    fn drop(&mut self) {
        self.graph.detach_publisher(&self.topic);
    }
}

impl<T> fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("topic", &self.topic_name())
            .field("qos", &self.qos)
            .finish()
    }
}
