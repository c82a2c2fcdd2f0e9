use std::time::Duration;

/// Remembers the previous timer tick so consecutive ticks can be compared.
#[derive(Debug)]
pub struct TickBuffer {
    prev: Option<Tick>,
}

#[derive(Debug)]
struct Tick {
    index: u64,
    time: Duration,
}

impl TickBuffer {
    /// Records tick `index`, scheduled `time` after the timer started.
    pub fn step(&mut self, index: u64, time: Duration) -> TickDelta {
        let delta = match &self.prev {
            Some(prev) => TickDelta {
                tick: index,
                tick_delta: index.saturating_sub(prev.index),
                time,
                time_delta: time.saturating_sub(prev.time),
            },
            None => TickDelta {
                tick: index,
                tick_delta: index,
                time,
                time_delta: time,
            },
        };
        self.prev = Some(Tick { index, time });

        delta
    }
}

impl Default for TickBuffer {
    fn default() -> Self {
        Self { prev: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickDelta {
    pub tick: u64,
    /// Greater than one when ticks were skipped.
    pub tick_delta: u64,
    pub time: Duration,
    pub time_delta: Duration,
}

impl TickDelta {
    pub fn skipped(&self) -> u64 {
        self.tick_delta.saturating_sub(1)
    }
}
