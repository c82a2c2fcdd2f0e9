//! In-process publish/subscribe runtime.

mod context;
mod error;
mod names;
mod node;
mod parameter;
mod publisher;
mod subscription;
mod timer;
mod topic;

pub use context::Context;
pub use error::{Error, Result};
pub use node::{Node, ParamsMap};
pub use parameter::{parse_param_assignment, ParameterValue};
pub use publisher::Publisher;
pub use subscription::Subscription;
pub use timer::Timer;
