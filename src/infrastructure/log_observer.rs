// Tick observer that reports aquarium progress through tracing
use crate::application::tick_observer::{TickObserver, TickReport};
use crate::domain::status::AquariumStatus;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct LogObserver;

#[async_trait]
impl TickObserver for LogObserver {
    async fn on_tick(&self, report: &TickReport) {
        let status = &report.status;
        tracing::debug!(
            "The aquarium in channel {} is {} time units old. Cycled? {}. Water quality: {:.1}",
            status.channel_id,
            status.age,
            status.cycled,
            status.water_quality
        );

        if report.became_cycled {
            tracing::info!("Aquarium in channel {} finished cycling", status.channel_id);
        }

        for id in &report.deaths {
            if let Some(fish) = status.fish.iter().find(|f| f.id == *id) {
                tracing::info!(
                    "A {} ({}) died in channel {} at {} months",
                    fish.species,
                    id,
                    status.channel_id,
                    fish.age_months
                );
            }
        }
    }

    async fn on_stop(&self, status: &AquariumStatus) {
        tracing::debug!(
            "Tick task for channel {} exited after {} time units",
            status.channel_id,
            status.age
        );
    }
}
