use super::{
    names::{resolve_topic_name, validate_namespace, validate_node_name},
    Context, Error, ParameterValue, Publisher, Result, Subscription, Timer,
};
use crate::qos::QosProfile;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

pub type ParamsMap = HashMap<String, ParameterValue>;

/// A named participant in the graph. Creates publishers, subscriptions and
/// timers; relative topic names resolve against the node's namespace.
#[derive(Debug)]
pub struct Node {
    name: String,
    namespace: String,
    context: Context,
    pub params: Arc<Mutex<ParamsMap>>,
}

impl Node {
    pub fn create(context: Context, name: &str, namespace: &str) -> Result<Self> {
        validate_node_name(name)?;
        validate_namespace(namespace)?;
        if context.is_shutdown() {
            return Err(Error::ContextShutdown);
        }

        Ok(Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            context,
            params: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn fully_qualified_name(&self) -> String {
        if self.namespace == "/" {
            format!("/{}", self.name)
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }

    /// Inserts parameters, overriding earlier values with the same key.
    pub fn set_parameters(&self, params: impl IntoIterator<Item = (String, ParameterValue)>) {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(params);
    }

    pub fn create_publisher<T>(&self, topic: &str, qos: QosProfile) -> Result<Publisher<T>>
    where
        T: Send + 'static,
    {
        let topic = resolve_topic_name(&self.namespace, topic)?;
        Publisher::new(self.context.graph().clone(), &topic, qos)
    }

    pub fn subscribe<T>(&self, topic: &str, qos: QosProfile) -> Result<Subscription<T>>
    where
        T: Send + 'static,
    {
        let topic = resolve_topic_name(&self.namespace, topic)?;
        Subscription::new(self.context.graph().clone(), &topic, qos)
    }

    pub fn create_wall_timer(&self, period: Duration) -> Result<Timer> {
        if self.context.is_shutdown() {
            return Err(Error::ContextShutdown);
        }
        Timer::new(period)
    }

    /// Number of publishers on `topic` across the whole graph.
    pub fn count_publishers(&self, topic: &str) -> Result<usize> {
        let topic = resolve_topic_name(&self.namespace, topic)?;
        Ok(self.context.graph().publisher_count(&topic))
    }

    /// Number of subscriptions on `topic` across the whole graph.
    pub fn count_subscribers(&self, topic: &str) -> Result<usize> {
        let topic = resolve_topic_name(&self.namespace, topic)?;
        Ok(self.context.graph().subscription_count(&topic))
    }

    pub fn get_topic_names_and_types(&self) -> Vec<(String, &'static str)> {
        self.context.graph().topic_names_and_types()
    }
}
