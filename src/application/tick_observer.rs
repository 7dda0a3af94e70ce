// Observer trait notified after every aquarium tick
use crate::domain::aquarium::{FishId, TickOutcome};
use crate::domain::status::AquariumStatus;
use async_trait::async_trait;

/// One finished tick: the state afterwards plus what changed during it.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub status: AquariumStatus,
    pub became_cycled: bool,
    pub deaths: Vec<FishId>,
}

impl TickReport {
    pub fn new(status: AquariumStatus, outcome: TickOutcome) -> Self {
        Self {
            status,
            became_cycled: outcome.became_cycled,
            deaths: outcome.deaths,
        }
    }
}

#[async_trait]
pub trait TickObserver: Send + Sync {
    /// Called from the tick task once the aquarium lock has been released
    async fn on_tick(&self, report: &TickReport);

    /// Called once when the tick task exits
    async fn on_stop(&self, _status: &AquariumStatus) {}
}
