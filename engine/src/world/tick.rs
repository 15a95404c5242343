use std::time::{Duration, Instant};

/// Caps the simulation rate from wall-clock deltas.
///
/// The first call only starts the clock. Later calls closer than
/// `min_interval` to the last accepted tick are dropped; missed ticks are
/// never caught up.
#[derive(Debug, Clone)]
pub struct TickThrottle {
    min_interval: Duration,
    last_tick: Option<Instant>,
}

impl TickThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_tick: None,
        }
    }

    /// Rates too slow for a [`Duration`] never tick after priming.
    pub fn from_rate(max_ticks_per_second: f64) -> Self {
        let interval = Duration::try_from_secs_f64(1.0 / max_ticks_per_second);
        Self::new(interval.unwrap_or(Duration::MAX))
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns true if a simulation step should run at `now`.
    pub fn should_tick(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return false;
        };
        if now.saturating_duration_since(last) < self.min_interval {
            return false;
        }
        self.last_tick = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
