// Tank runner - one cancellable tick task per live aquarium
use crate::application::clock::SimClock;
use crate::application::error::RunnerError;
use crate::application::tick_observer::{TickObserver, TickReport};
use crate::domain::aquarium::{
    Aquarium, ChannelId, Decoration, DecorationId, FishId, Plant, PlantId,
};
use crate::domain::error::{AquariumError, WaterChangeError};
use crate::domain::fish::Fish;
use crate::domain::status::AquariumStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::wrappers::WatchStream;

/// A live aquarium. All state changes, from callers and from the tick task
/// alike, go through the same mutex.
pub struct AquariumHandle {
    channel_id: ChannelId,
    aquarium: Arc<Mutex<Aquarium>>,
    clock: SimClock,
    status_rx: watch::Receiver<AquariumStatus>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl AquariumHandle {
    /// Start ticking `aquarium` on the current tokio runtime.
    pub fn spawn(aquarium: Aquarium, clock: SimClock, observer: Arc<dyn TickObserver>) -> Self {
        let channel_id = aquarium.channel_id();
        let period = aquarium.rules().tick.time_unit();
        let (status_tx, status_rx) = watch::channel(aquarium.status());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let aquarium = Arc::new(Mutex::new(aquarium));

        let task = tokio::spawn(run_ticks(
            aquarium.clone(),
            clock,
            period,
            status_tx,
            observer,
            shutdown_rx,
        ));

        tracing::info!("Aquarium for channel {} started ({:?} ticks)", channel_id, period);

        Self {
            channel_id,
            aquarium,
            clock,
            status_rx,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub async fn add_fish(&self, fish: Fish) -> Result<FishId, AquariumError> {
        self.aquarium.lock().await.add_fish(fish)
    }

    pub async fn remove_fish(&self, id: FishId) -> Result<Fish, AquariumError> {
        self.aquarium.lock().await.remove_fish(id)
    }

    pub async fn add_plant(&self, plant: Plant) -> PlantId {
        self.aquarium.lock().await.add_plant(plant)
    }

    pub async fn add_decoration(&self, decoration: Decoration) -> Result<DecorationId, AquariumError> {
        self.aquarium.lock().await.add_decoration(decoration)
    }

    pub async fn water_change(&self, litres: u32) -> Result<f64, WaterChangeError> {
        let result = self.aquarium.lock().await.water_change(litres);
        match &result {
            Ok(quality) => tracing::debug!(
                "Channel {} changed {} litres, water quality now {:.1}",
                self.channel_id,
                litres,
                quality
            ),
            Err(e) => tracing::debug!("Channel {} water change rejected: {}", self.channel_id, e),
        }
        result
    }

    pub async fn feed(&self) {
        let now = self.clock.now();
        self.aquarium.lock().await.feed(now);
    }

    /// Current state, read under the lock.
    pub async fn status(&self) -> AquariumStatus {
        self.aquarium.lock().await.status()
    }

    /// State as of the last finished tick, without waiting for the lock.
    pub fn last_tick_status(&self) -> AquariumStatus {
        self.status_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AquariumStatus> {
        self.status_rx.clone()
    }

    /// Stream of per-tick statuses, starting with the latest one.
    pub fn status_stream(&self) -> WatchStream<AquariumStatus> {
        WatchStream::new(self.status_rx.clone())
    }

    /// Ask the tick task to finish and wait until it has. The task never
    /// stops mid-tick, and nothing mutates the aquarium once this returns.
    pub async fn stop(self) -> Result<AquariumStatus, RunnerError> {
        let Self {
            channel_id,
            aquarium,
            shutdown_tx,
            task,
            ..
        } = self;

        if let Some(tx) = shutdown_tx {
            let _ = tx.send(());
        }
        task.await
            .map_err(|source| RunnerError::TickTask { channel_id, source })?;

        tracing::info!("Aquarium for channel {} stopped", channel_id);
        let status = aquarium.lock().await.status();
        Ok(status)
    }
}

async fn run_ticks(
    aquarium: Arc<Mutex<Aquarium>>,
    clock: SimClock,
    period: Duration,
    status_tx: watch::Sender<AquariumStatus>,
    observer: Arc<dyn TickObserver>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // a dropped handle also resolves the shutdown receiver
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => break,
            _ = interval.tick() => {}
        }

        let report = {
            let mut aquarium = aquarium.lock().await;
            let outcome = aquarium.tick(clock.now());
            TickReport::new(aquarium.status(), outcome)
        };

        status_tx.send_replace(report.status.clone());
        observer.on_tick(&report).await;
    }

    let status = aquarium.lock().await.status();
    observer.on_stop(&status).await;
}
