use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid node name '{name}': {reason}")]
    InvalidNodeName { name: String, reason: &'static str },

    #[error("invalid namespace '{namespace}': {reason}")]
    InvalidNamespace {
        namespace: String,
        reason: &'static str,
    },

    #[error("invalid topic name '{topic}': {reason}")]
    InvalidTopicName { topic: String, reason: &'static str },

    #[error("topic '{topic}' carries '{expected}', cannot attach an endpoint of '{found}'")]
    TopicTypeMismatch {
        topic: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("timer period must be greater than zero")]
    InvalidTimerPeriod,

    #[error("invalid parameter assignment '{0}', expected KEY:=VALUE")]
    InvalidParameterAssignment(String),

    #[error("context has been shut down")]
    ContextShutdown,
}
