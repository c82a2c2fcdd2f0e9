use super::{Error, Result};
use crate::qos::QosProfile;
use flume::{Receiver, Sender, TrySendError};
use std::{
    any::{type_name, Any},
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Type-erased view of a topic, used by the graph for bookkeeping.
trait AnyTopic: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn publisher_count(&self) -> usize;
    fn subscription_count(&self) -> usize;
    fn close(&self);
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

type TopicMap = HashMap<String, Arc<dyn AnyTopic>>;

/// All topics known to one context.
#[derive(Default)]
pub(crate) struct Graph {
    topics: Mutex<TopicMap>,
    shutdown: AtomicBool,
}

impl Graph {
    /// Returns the topic called `name`, creating it on first use.
    ///
    /// A topic is bound to the message type of the endpoint that created it
    /// until its last endpoint is dropped.
    #[cfg(test)]
    pub fn topic<T>(&self, name: &str) -> Result<Arc<Topic<T>>>
    where
        T: Send + 'static,
    {
        self.topic_locked(&mut lock(&self.topics), name)
    }

    fn topic_locked<T>(&self, topics: &mut TopicMap, name: &str) -> Result<Arc<Topic<T>>>
    where
        T: Send + 'static,
    {
        // checked under the registry lock, `shutdown` closes queues under the same lock
        if self.is_shutdown() {
            return Err(Error::ContextShutdown);
        }

        let found = type_name::<T>();
        let mismatch = |expected| Error::TopicTypeMismatch {
            topic: name.to_string(),
            expected,
            found,
        };

        let entry = topics
            .entry(name.to_string())
            .or_insert_with(|| -> Arc<dyn AnyTopic> { Arc::new(Topic::<T>::new(name)) });
        let expected = entry.type_name();
        if expected != found {
            return Err(mismatch(expected));
        }
        entry
            .clone()
            .into_any()
            .downcast::<Topic<T>>()
            .map_err(|_| mismatch(expected))
    }

    pub fn attach_publisher<T>(&self, name: &str) -> Result<Arc<Topic<T>>>
    where
        T: Send + 'static,
    {
        let mut topics = lock(&self.topics);
        let topic = self.topic_locked::<T>(&mut topics, name)?;
        topic.add_publisher();
        Ok(topic)
    }

    pub fn attach_subscription<T>(
        &self,
        name: &str,
        qos: &QosProfile,
    ) -> Result<(Arc<Topic<T>>, u64, Receiver<T>)>
    where
        T: Send + 'static,
    {
        let mut topics = lock(&self.topics);
        let topic = self.topic_locked::<T>(&mut topics, name)?;
        let (id, rx) = topic.add_subscription(qos);
        Ok((topic, id, rx))
    }

    pub fn detach_publisher<T>(&self, topic: &Topic<T>) {
        let mut topics = lock(&self.topics);
        topic.remove_publisher();
        forget_if_idle(&mut topics, topic.name());
    }

    pub fn detach_subscription<T>(&self, topic: &Topic<T>, id: u64) {
        let mut topics = lock(&self.topics);
        topic.remove_subscription(id);
        forget_if_idle(&mut topics, topic.name());
    }

    pub fn publisher_count(&self, name: &str) -> usize {
        lock(&self.topics)
            .get(name)
            .map_or(0, |topic| topic.publisher_count())
    }

    pub fn subscription_count(&self, name: &str) -> usize {
        lock(&self.topics)
            .get(name)
            .map_or(0, |topic| topic.subscription_count())
    }

    /// Topic names with their message types, sorted by name.
    pub fn topic_names_and_types(&self) -> Vec<(String, &'static str)> {
        let mut list: Vec<_> = lock(&self.topics)
            .iter()
            .map(|(name, topic)| (name.clone(), topic.type_name()))
            .collect();
        list.sort();
        list
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Marks the graph as shut down and ends every subscription stream.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }
        for topic in lock(&self.topics).values() {
            topic.close();
        }
    }
}

fn forget_if_idle(topics: &mut TopicMap, name: &str) {
    let idle = topics
        .get(name)
        .map_or(false, |topic| topic.publisher_count() == 0 && topic.subscription_count() == 0);
    if idle {
        topics.remove(name);
    }
}

struct Slot<T> {
    id: u64,
    tx: Sender<T>,
    // kept to evict the oldest message from a full keep-last queue
    rx: Receiver<T>,
}

pub(crate) struct Topic<T> {
    name: String,
    publishers: AtomicUsize,
    subscriptions: AtomicUsize,
    slots: Mutex<Vec<Slot<T>>>,
    next_slot_id: AtomicU64,
}

impl<T> Topic<T> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            publishers: AtomicUsize::new(0),
            subscriptions: AtomicUsize::new(0),
            slots: Mutex::new(vec![]),
            next_slot_id: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn publisher_count(&self) -> usize {
        self.publishers.load(Ordering::Relaxed)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.load(Ordering::Relaxed)
    }

    pub fn add_publisher(&self) {
        self.publishers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn remove_publisher(&self) {
        self.publishers.fetch_sub(1, Ordering::Relaxed);
    }

    /// Registers a subscription queue and returns its id and receiving end.
    pub fn add_subscription(&self, qos: &QosProfile) -> (u64, Receiver<T>) {
        let (tx, rx) = match qos.queue_capacity() {
            Some(capacity) => flume::bounded(capacity),
            None => flume::unbounded(),
        };
        let id = self.next_slot_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.slots).push(Slot {
            id,
            tx,
            rx: rx.clone(),
        });
        self.subscriptions.fetch_add(1, Ordering::Relaxed);
        (id, rx)
    }

    pub fn remove_subscription(&self, id: u64) {
        lock(&self.slots).retain(|slot| slot.id != id);
        self.subscriptions.fetch_sub(1, Ordering::Relaxed);
    }
}

impl<T> Topic<T>
where
    T: Clone,
{
    /// Delivers a copy of `msg` to every subscription queue. Never blocks.
    pub fn deliver(&self, msg: &T) -> usize {
        let slots = lock(&self.slots);
        let mut delivered = 0;
        for slot in slots.iter() {
            let mut pending = msg.clone();
            loop {
                match slot.tx.try_send(pending) {
                    Ok(()) => {
                        delivered += 1;
                        break;
                    }
                    Err(TrySendError::Full(returned)) => {
                        let _ = slot.rx.try_recv();
                        pending = returned;
                    }
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
        }
        delivered
    }
}

impl<T> AnyTopic for Topic<T>
where
    T: Send + 'static,
{
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn publisher_count(&self) -> usize {
        Topic::publisher_count(self)
    }

    fn subscription_count(&self) -> usize {
        Topic::subscription_count(self)
    }

    fn close(&self) {
        // dropping the senders ends the subscription streams once drained
        lock(&self.slots).clear();
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
