use super::{
    topic::{Graph, Topic},
    Result,
};
use crate::qos::QosProfile;
use flume::{r#async::RecvStream, Receiver};
use futures::{Stream, StreamExt};
use std::{
    fmt,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

/// Receiving end of a topic, consumed as a stream of messages.
///
/// The stream ends after the context is shut down and the queue is drained.
pub struct Subscription<T: 'static> {
    graph: Arc<Graph>,
    topic: Arc<Topic<T>>,
    id: u64,
    qos: QosProfile,
    rx: Receiver<T>,
    stream: RecvStream<'static, T>,
}

impl<T> Subscription<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(graph: Arc<Graph>, topic_name: &str, qos: QosProfile) -> Result<Self> {
        let (topic, id, rx) = graph.attach_subscription::<T>(topic_name, &qos)?;
        let stream = rx.clone().into_stream();
        Ok(Self {
            graph,
            topic,
            id,
            qos,
            rx,
            stream,
        })
    }
}

impl<T: 'static> Subscription<T> {
    pub fn topic_name(&self) -> &str {
        self.topic.name()
    }

    pub fn qos(&self) -> &QosProfile {
        &self.qos
    }

    /// Number of publishers currently attached to the topic.
    pub fn get_publisher_count(&self) -> usize {
        self.topic.publisher_count()
    }

    /// Takes the next queued message without waiting.
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Number of messages waiting in the queue.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl<T: 'static> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.stream.poll_next_unpin(cx)
    }
}

impl<T: 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.graph.detach_subscription(&self.topic, self.id);
    }
}

impl<T: 'static> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic_name())
            .field("qos", &self.qos)
            .field("pending", &self.pending())
            .finish()
    }
}
