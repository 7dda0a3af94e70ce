// Aquarium service - registry of live aquariums keyed by channel
use crate::application::clock::SimClock;
use crate::application::error::{RunnerError, ServiceError};
use crate::application::tank_runner::AquariumHandle;
use crate::application::tick_observer::TickObserver;
use crate::domain::aquarium::{Aquarium, ChannelId, Substrate};
use crate::domain::error::AquariumError;
use crate::domain::rules::SimulationRules;
use crate::domain::status::AquariumStatus;
use std::collections::HashMap;
use std::sync::Arc;

pub struct AquariumService {
    rules: SimulationRules,
    clock: SimClock,
    observer: Arc<dyn TickObserver>,
    aquariums: HashMap<ChannelId, AquariumHandle>,
}

impl AquariumService {
    pub fn new(rules: SimulationRules, observer: Arc<dyn TickObserver>) -> Self {
        Self {
            rules,
            clock: SimClock::new(),
            observer,
            aquariums: HashMap::new(),
        }
    }

    pub fn rules(&self) -> &SimulationRules {
        &self.rules
    }

    /// Build an aquarium for `channel_id` and start its tick task.
    pub fn create(
        &mut self,
        channel_id: ChannelId,
        volume: u32,
        substrate: Substrate,
    ) -> Result<&AquariumHandle, ServiceError> {
        if self.aquariums.contains_key(&channel_id) {
            return Err(ServiceError::AlreadyExists(channel_id));
        }
        if !self.rules.validation.allows_substrate(substrate) {
            return Err(AquariumError::InvalidSubstrate(substrate).into());
        }

        let aquarium = Aquarium::new(
            channel_id,
            volume,
            substrate,
            self.rules.clone(),
            self.clock.now(),
        );
        let handle = AquariumHandle::spawn(aquarium, self.clock, self.observer.clone());
        Ok(&*self.aquariums.entry(channel_id).or_insert(handle))
    }

    pub fn get(&self, channel_id: ChannelId) -> Option<&AquariumHandle> {
        self.aquariums.get(&channel_id)
    }

    pub fn contains(&self, channel_id: ChannelId) -> bool {
        self.aquariums.contains_key(&channel_id)
    }

    pub fn channels(&self) -> Vec<ChannelId> {
        let mut channels: Vec<ChannelId> = self.aquariums.keys().copied().collect();
        channels.sort();
        channels
    }

    pub fn len(&self) -> usize {
        self.aquariums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aquariums.is_empty()
    }

    /// Take an aquarium out of the registry without stopping it, e.g. to hand
    /// it to its owner.
    pub fn detach(&mut self, channel_id: ChannelId) -> Option<AquariumHandle> {
        self.aquariums.remove(&channel_id)
    }

    pub async fn stop(&mut self, channel_id: ChannelId) -> Result<AquariumStatus, ServiceError> {
        let handle = self
            .aquariums
            .remove(&channel_id)
            .ok_or(ServiceError::NotFound(channel_id))?;
        Ok(handle.stop().await?)
    }

    /// Stop every aquarium concurrently.
    pub async fn stop_all(&mut self) -> Vec<Result<AquariumStatus, RunnerError>> {
        let handles: Vec<AquariumHandle> = self.aquariums.drain().map(|(_, h)| h).collect();
        tracing::info!("Stopping {} aquariums", handles.len());
        futures::future::join_all(handles.into_iter().map(AquariumHandle::stop)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::log_observer::LogObserver;

    fn service(rules: SimulationRules) -> AquariumService {
        AquariumService::new(rules, Arc::new(LogObserver))
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_and_stop() {
        let mut service = service(SimulationRules::default());
        service.create(ChannelId(7), 60, Substrate::Sand).unwrap();

        assert!(service.contains(ChannelId(7)));
        let status = service.stop(ChannelId(7)).await.unwrap();
        assert_eq!(status.channel_id, ChannelId(7));
        assert_eq!(status.volume, 60);
        assert!(service.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_channel_rejected() {
        let mut service = service(SimulationRules::default());
        service.create(ChannelId(1), 60, Substrate::Sand).unwrap();

        assert!(matches!(
            service.create(ChannelId(1), 80, Substrate::Soil),
            Err(ServiceError::AlreadyExists(ChannelId(1)))
        ));
        assert_eq!(service.len(), 1);
        service.stop_all().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_unknown_channel() {
        let mut service = service(SimulationRules::default());
        assert!(matches!(
            service.stop(ChannelId(3)).await,
            Err(ServiceError::NotFound(ChannelId(3)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_substrate_validation() {
        let mut rules = SimulationRules::default();
        rules.validation.enabled = true;
        rules.validation.substrates = vec![Substrate::Gravel];
        let mut service = service(rules);

        assert!(matches!(
            service.create(ChannelId(1), 60, Substrate::Sand),
            Err(ServiceError::Aquarium(AquariumError::InvalidSubstrate(Substrate::Sand)))
        ));
        assert!(service.create(ChannelId(1), 60, Substrate::Gravel).is_ok());
        service.stop_all().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_all() {
        let mut service = service(SimulationRules::default());
        for id in 1..=3 {
            service.create(ChannelId(id), 100, Substrate::Gravel).unwrap();
        }
        assert_eq!(service.channels(), vec![ChannelId(1), ChannelId(2), ChannelId(3)]);

        let results = service.stop_all().await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_ok()));
        assert!(service.is_empty());
    }
}
