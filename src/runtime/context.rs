use super::topic::Graph;
use std::{fmt, sync::Arc};

/// Shared communication graph. Every node created from clones of one
/// context sees the same topics.
#[derive(Clone, Default)]
pub struct Context {
    graph: Arc<Graph>,
}

impl Context {
    pub fn create() -> Self {
        Self::default()
    }

    /// Stops the context. Publishing fails afterwards and subscription
    /// streams end once their queues are drained.
    pub fn shutdown(&self) {
        self.graph.shutdown();
    }

    pub fn is_shutdown(&self) -> bool {
        self.graph.is_shutdown()
    }

    pub(crate) fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("shutdown", &self.is_shutdown())
            .finish()
    }
}
