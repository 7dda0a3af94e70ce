// Read-only snapshots handed to callers outside the tick task
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aquarium::{Aquarium, ChannelId, FishId, Substrate};
use super::fish::{Fish, Gender, Species};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishStatus {
    pub id: FishId,
    pub species: Species,
    pub gender: Gender,
    pub age_months: u64,
    pub hunger: u8,
    pub hp: f64,
    pub survivability: f64,
    pub starving: bool,
    pub alive: bool,
}

impl FishStatus {
    fn from_fish(id: FishId, fish: &Fish) -> Self {
        Self {
            id,
            species: fish.species,
            gender: fish.gender,
            age_months: fish.age_months(),
            hunger: fish.hunger,
            hp: fish.hp,
            survivability: fish.survivability(),
            starving: fish.starving,
            alive: fish.alive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AquariumStatus {
    pub channel_id: ChannelId,
    pub volume: u32,
    pub substrate: Substrate,
    pub water_quality: f64,
    pub cycled: bool,
    pub start_cycle: Option<DateTime<Utc>>,
    pub birth_date: DateTime<Utc>,
    pub age: u64,
    pub hunger_max: u8,
    pub fish: Vec<FishStatus>,
    pub plants: Vec<String>,
    pub decorations: Vec<String>,
}

impl AquariumStatus {
    pub fn living_fish(&self) -> usize {
        self.fish.iter().filter(|f| f.alive).count()
    }
}

impl Aquarium {
    pub fn status(&self) -> AquariumStatus {
        AquariumStatus {
            channel_id: self.channel_id(),
            volume: self.volume(),
            substrate: self.substrate(),
            water_quality: self.water_quality(),
            cycled: self.cycled(),
            start_cycle: self.start_cycle(),
            birth_date: self.birth_date(),
            age: self.age(),
            hunger_max: self.rules().fish.hunger_max,
            fish: self
                .fish()
                .map(|(id, fish)| FishStatus::from_fish(id, fish))
                .collect(),
            plants: self.plants().map(|(_, p)| p.name.clone()).collect(),
            decorations: self.decorations().map(|(_, d)| d.kind.clone()).collect(),
        }
    }
}
