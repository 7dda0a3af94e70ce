// Simulation clock - runtime time expressed as UTC timestamps
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Anchors tokio's monotonic clock to a UTC timestamp, so paused test time
/// and wall-clock jumps behave the same way for the simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    origin: Instant,
    origin_utc: DateTime<Utc>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(origin_utc: DateTime<Utc>) -> Self {
        Self {
            origin: Instant::now(),
            origin_utc,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = Instant::now().saturating_duration_since(self.origin);
        let elapsed = chrono::Duration::from_std(elapsed).unwrap_or(chrono::Duration::MAX);
        self.origin_utc
            .checked_add_signed(elapsed)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_clock_follows_runtime_time() {
        let clock = SimClock::new();
        let start = clock.now();

        tokio::time::advance(Duration::from_secs(15)).await;

        assert_eq!((clock.now() - start).num_seconds(), 15);
    }
}
