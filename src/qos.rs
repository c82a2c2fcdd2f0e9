use crate::types::HistoryPolicy;

const DEFAULT_DEPTH: usize = 10;

/// Queueing behaviour of a publisher or subscription.
///
/// Only the history part of the middleware's QoS is modelled here. Keep-last
/// subscriptions hold at most `depth` messages and evict the oldest one when a
/// new message arrives on a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QosProfile {
    pub history: HistoryPolicy,
    pub depth: usize,
}

impl Default for QosProfile {
    fn default() -> Self {
        Self {
            history: HistoryPolicy::KEEP_LAST,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl QosProfile {
    pub fn keep_last(depth: usize) -> Self {
        Self {
            history: HistoryPolicy::KEEP_LAST,
            depth,
        }
    }

    /// Capacity of a subscription queue, `None` when unbounded.
    pub(crate) fn queue_capacity(&self) -> Option<usize> {
        match self.history {
            HistoryPolicy::KEEP_ALL => None,
            // a zero depth would drop everything, treat it as one
            HistoryPolicy::KEEP_LAST | HistoryPolicy::SYSTEM_DEFAULT => Some(self.depth.max(1)),
        }
    }
}

pub fn latest_only() -> QosProfile {
    QosProfile::keep_last(1)
}

pub fn keep_all() -> QosProfile {
    QosProfile {
        history: HistoryPolicy::KEEP_ALL,
        ..QosProfile::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_last_ten() {
        let qos = QosProfile::default();
        assert_eq!(qos.history, HistoryPolicy::KEEP_LAST);
        assert_eq!(qos.queue_capacity(), Some(10));
    }

    #[test]
    fn presets() {
        assert_eq!(latest_only().queue_capacity(), Some(1));
        assert_eq!(keep_all().queue_capacity(), None);
        assert_eq!(QosProfile::keep_last(0).queue_capacity(), Some(1));
    }
}
