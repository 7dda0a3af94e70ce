// Aquarium domain model - water, feeding and the tick body
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::error::{AquariumError, ParseError, WaterChangeError};
use super::fish::Fish;
use super::rules::SimulationRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

entity_id!(FishId);
entity_id!(PlantId);
entity_id!(DecorationId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substrate {
    Gravel,
    Sand,
    Soil,
}

impl fmt::Display for Substrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substrate::Gravel => f.write_str("Gravel"),
            Substrate::Sand => f.write_str("Sand"),
            Substrate::Soil => f.write_str("Soil"),
        }
    }
}

impl FromStr for Substrate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gravel" => Ok(Substrate::Gravel),
            "sand" => Ok(Substrate::Sand),
            "soil" => Ok(Substrate::Soil),
            _ => Err(ParseError::UnknownSubstrate(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plant {
    pub name: String,
}

impl Plant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub kind: String,
}

impl Decoration {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

pub const MIN_WATER_QUALITY: f64 = 0.0;
pub const MAX_WATER_QUALITY: f64 = 100.0;

/// Clamp into the valid water quality range; NaN collapses to the minimum.
pub fn clamp_quality(quality: f64) -> f64 {
    if quality.is_nan() {
        return MIN_WATER_QUALITY;
    }
    quality.clamp(MIN_WATER_QUALITY, MAX_WATER_QUALITY)
}

/// What happened during one call to [`Aquarium::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub became_cycled: bool,
    pub deaths: Vec<FishId>,
}

#[derive(Debug, Clone)]
pub struct Aquarium {
    channel_id: ChannelId,
    volume: u32,
    substrate: Substrate,
    water_quality: f64,
    cycled: bool,
    start_cycle: Option<DateTime<Utc>>,
    birth_date: DateTime<Utc>,
    age: u64,
    fish: BTreeMap<FishId, Fish>,
    plants: BTreeMap<PlantId, Plant>,
    decorations: BTreeMap<DecorationId, Decoration>,
    next_id: u64,
    rules: SimulationRules,
}

impl Aquarium {
    pub fn new(
        channel_id: ChannelId,
        volume: u32,
        substrate: Substrate,
        rules: SimulationRules,
        birth_date: DateTime<Utc>,
    ) -> Self {
        Self {
            channel_id,
            volume,
            substrate,
            water_quality: clamp_quality(rules.water.fresh_quality),
            cycled: false,
            start_cycle: None,
            birth_date,
            age: 0,
            fish: BTreeMap::new(),
            plants: BTreeMap::new(),
            decorations: BTreeMap::new(),
            next_id: 1,
            rules,
        }
    }

    /// The identity of an aquarium.
    pub fn key(&self) -> ChannelId {
        self.channel_id
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn volume(&self) -> u32 {
        self.volume
    }

    pub fn substrate(&self) -> Substrate {
        self.substrate
    }

    pub fn water_quality(&self) -> f64 {
        self.water_quality
    }

    pub fn cycled(&self) -> bool {
        self.cycled
    }

    pub fn start_cycle(&self) -> Option<DateTime<Utc>> {
        self.start_cycle
    }

    pub fn birth_date(&self) -> DateTime<Utc> {
        self.birth_date
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn rules(&self) -> &SimulationRules {
        &self.rules
    }

    pub fn fish(&self) -> impl Iterator<Item = (FishId, &Fish)> {
        self.fish.iter().map(|(id, fish)| (*id, fish))
    }

    pub fn get_fish(&self, id: FishId) -> Option<&Fish> {
        self.fish.get(&id)
    }

    pub fn fish_count(&self) -> usize {
        self.fish.len()
    }

    pub fn living_fish_count(&self) -> usize {
        self.fish.values().filter(|f| f.alive).count()
    }

    pub fn plants(&self) -> impl Iterator<Item = (PlantId, &Plant)> {
        self.plants.iter().map(|(id, plant)| (*id, plant))
    }

    pub fn decorations(&self) -> impl Iterator<Item = (DecorationId, &Decoration)> {
        self.decorations.iter().map(|(id, decoration)| (*id, decoration))
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_fish(&mut self, fish: Fish) -> Result<FishId, AquariumError> {
        if !self.rules.validation.allows_species(fish.species) {
            return Err(AquariumError::InvalidSpecies(fish.species));
        }
        let id = FishId(self.allocate_id());
        self.fish.insert(id, fish);
        Ok(id)
    }

    pub fn remove_fish(&mut self, id: FishId) -> Result<Fish, AquariumError> {
        self.fish.remove(&id).ok_or(AquariumError::FishNotFound(id))
    }

    pub fn add_plant(&mut self, plant: Plant) -> PlantId {
        let id = PlantId(self.allocate_id());
        self.plants.insert(id, plant);
        id
    }

    pub fn add_decoration(&mut self, decoration: Decoration) -> Result<DecorationId, AquariumError> {
        if !self.rules.validation.allows_decoration(&decoration.kind) {
            return Err(AquariumError::InvalidDecoration(decoration.kind));
        }
        let id = DecorationId(self.allocate_id());
        self.decorations.insert(id, decoration);
        Ok(id)
    }

    /// Replace `litres` of tank water with fresh water and return the new quality.
    pub fn water_change(&mut self, litres: u32) -> Result<f64, WaterChangeError> {
        if litres > self.volume {
            return Err(WaterChangeError::VolumeExceeded {
                litres,
                volume: self.volume,
            });
        }
        if litres == 0 {
            return Ok(self.water_quality);
        }

        let volume_old = (self.volume - litres) as f64;
        let volume_new = litres as f64;
        let quality_new = self.rules.water.fresh_quality;

        let quality = (self.water_quality * volume_old + quality_new * volume_new)
            / (volume_old + volume_new);
        self.water_quality = clamp_quality(quality);
        Ok(self.water_quality)
    }

    /// Feeding an empty tank starts the fishless cycle instead.
    pub fn feed(&mut self, now: DateTime<Utc>) {
        if self.living_fish_count() == 0 {
            self.start_cycle = Some(now);
            return;
        }

        let amount = self.rules.fish.feed_amount;
        let max = self.rules.fish.hunger_max;
        for fish in self.fish.values_mut().filter(|f| f.alive) {
            fish.feed(amount, max);
        }
    }

    pub fn monitor_water(&mut self) {
        let water = &self.rules.water;
        let multiplier = if self.plants.is_empty() {
            1.0
        } else {
            water.plant_multiplier
        };
        let decay = if self.cycled {
            water.cycled_decay
        } else {
            water.uncycled_decay
        };

        self.water_quality = clamp_quality(self.water_quality - decay * multiplier);
    }

    /// Judge every living fish against the current water; returns the ids
    /// of fish that died this tick.
    pub fn monitor_fish(&mut self) -> Vec<FishId> {
        let water_quality = self.water_quality;
        let enforce = self.rules.death.enforce;
        let rules = &self.rules.fish;

        let mut deaths = Vec::new();
        for (id, fish) in self.fish.iter_mut().filter(|(_, f)| f.alive) {
            fish.judgement(water_quality, rules, enforce);
            if !fish.alive {
                deaths.push(*id);
            }
        }
        deaths
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        let elapsed = (now - self.birth_date).num_seconds().max(0) as u64;
        self.age = elapsed / self.rules.tick.time_unit().as_secs();

        if let Some(start) = self.start_cycle {
            if !self.cycled && now - start >= self.rules.tick.cycle_threshold() {
                self.cycled = true;
                outcome.became_cycled = true;
            }
            self.monitor_water();
        }

        if !self.fish.is_empty() {
            outcome.deaths = self.monitor_fish();
        }

        outcome
    }

    #[cfg(test)]
    pub(crate) fn set_water_quality(&mut self, quality: f64) {
        self.water_quality = clamp_quality(quality);
    }
}

impl PartialEq for Aquarium {
    fn eq(&self, other: &Self) -> bool {
        self.channel_id == other.channel_id
    }
}

impl Eq for Aquarium {}

impl fmt::Display for Aquarium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Aquarium (channel_id={})\nBirth date: {}",
            self.channel_id, self.birth_date
        )
    }
}

impl Hash for Aquarium {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.channel_id.hash(state);
    }
}
