use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Repeating tick source. Restarting drops the pending firing and schedules the next one a full
/// period from now, so a timer can never fire twice for one schedule.
pub struct TickTimer {
    interval: Interval,
    period: Duration,
    restarts: u64,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            interval: Self::schedule(period),
            period,
            restarts: 0,
        }
    }

    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }

    pub fn restart(&mut self, period: Duration) {
        self.interval = Self::schedule(period);
        self.period = period;
        self.restarts += 1;
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    fn schedule(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }
}
