// Owner - the player holding a set of aquariums
use crate::application::tank_runner::AquariumHandle;
use crate::domain::aquarium::ChannelId;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Added,
    AlreadyPresent,
}

pub struct Owner {
    pub id: u64,
    pub name: String,
    pub balance: f64,
    aquariums: HashMap<ChannelId, AquariumHandle>,
}

impl Owner {
    pub fn new(name: impl Into<String>, id: u64, balance: f64) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            aquariums: HashMap::new(),
        }
    }

    /// Adding an aquarium the owner already holds keeps the existing one.
    pub fn add_aquarium(&mut self, aquarium: AquariumHandle) -> Membership {
        let channel_id = aquarium.channel_id();
        if self.aquariums.contains_key(&channel_id) {
            tracing::warn!("{} already owns the aquarium in channel {}", self.name, channel_id);
            return Membership::AlreadyPresent;
        }
        self.aquariums.insert(channel_id, aquarium);
        Membership::Added
    }

    /// Hand back the aquarium so the caller can stop it.
    pub fn remove_aquarium(&mut self, channel_id: ChannelId) -> Option<AquariumHandle> {
        let removed = self.aquariums.remove(&channel_id);
        if removed.is_none() {
            tracing::warn!("{} has no aquarium in channel {}", self.name, channel_id);
        }
        removed
    }

    pub fn aquarium(&self, channel_id: ChannelId) -> Option<&AquariumHandle> {
        self.aquariums.get(&channel_id)
    }

    pub fn owns(&self, channel_id: ChannelId) -> bool {
        self.aquariums.contains_key(&channel_id)
    }

    pub fn aquarium_count(&self) -> usize {
        self.aquariums.len()
    }

    pub async fn stop_all(&mut self) {
        let handles: Vec<AquariumHandle> = self.aquariums.drain().map(|(_, h)| h).collect();
        for result in futures::future::join_all(handles.into_iter().map(AquariumHandle::stop)).await {
            if let Err(e) = result {
                tracing::error!("Failed to stop aquarium for {}: {}", self.name, e);
            }
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::SimClock;
    use crate::domain::aquarium::{Aquarium, Substrate};
    use crate::domain::rules::SimulationRules;
    use crate::infrastructure::log_observer::LogObserver;
    use std::sync::Arc;

    fn handle(channel: u64) -> AquariumHandle {
        let clock = SimClock::new();
        let aquarium = Aquarium::new(
            ChannelId(channel),
            100,
            Substrate::Gravel,
            SimulationRules::default(),
            clock.now(),
        );
        AquariumHandle::spawn(aquarium, clock, Arc::new(LogObserver))
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_add_is_noop() {
        let mut owner = Owner::new("kai", 1, 25.0);

        assert_eq!(owner.add_aquarium(handle(1)), Membership::Added);
        assert_eq!(owner.add_aquarium(handle(1)), Membership::AlreadyPresent);
        assert_eq!(owner.aquarium_count(), 1);

        owner.stop_all().await;
        assert_eq!(owner.aquarium_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_missing_is_noop() {
        let mut owner = Owner::new("kai", 1, 25.0);
        owner.add_aquarium(handle(1));

        assert!(owner.remove_aquarium(ChannelId(2)).is_none());
        assert!(owner.owns(ChannelId(1)));

        let removed = owner.remove_aquarium(ChannelId(1)).unwrap();
        removed.stop().await.unwrap();
        assert!(!owner.owns(ChannelId(1)));
    }

    #[test]
    fn test_display() {
        let owner = Owner::new("kai", 1, 12.5);
        assert_eq!(owner.to_string(), "kai (12.5)");
    }
}
