use super::{Error, Result};
use crate::time::{TickBuffer, TickDelta};
use std::{fmt, time::Duration};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Wall-clock timer firing every `period`.
///
/// The first tick happens one period after the first call to [`Timer::tick`].
/// Ticks missed while the owner was busy are skipped, not replayed.
pub struct Timer {
    period: Duration,
    interval: Option<(Instant, Interval)>,
    ticks: TickBuffer,
}

impl Timer {
    pub(crate) fn new(period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::InvalidTimerPeriod);
        }
        Ok(Self {
            period,
            interval: None,
            ticks: TickBuffer::default(),
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) -> TickDelta {
        let period = self.period;
        let (start, interval) = self.interval.get_or_insert_with(|| {
            let start = Instant::now();
            let mut interval = time::interval_at(start + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            (start, interval)
        });
        let at = interval.tick().await;
        let elapsed = at.saturating_duration_since(*start);
        let index = (elapsed.as_nanos() / period.as_nanos()) as u64;
        self.ticks.step(index, elapsed)
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("period", &self.period)
            .field("started", &self.interval.is_some())
            .finish()
    }
}
