// Fish domain model and the per-tick judgement
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParseError;
use super::rules::FishRules;

/// Time units in a simulated month.
pub const UNITS_PER_MONTH: u64 = 30;
pub const DEFAULT_LIFESPAN_UNITS: u64 = 2 * 12 * UNITS_PER_MONTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Guppy,
    NeonTetra,
    Molly,
    Platy,
}

impl Species {
    pub fn label(&self) -> &'static str {
        match self {
            Species::Guppy => "Guppy",
            Species::NeonTetra => "Neon Tetra",
            Species::Molly => "Molly",
            Species::Platy => "Platy",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Species {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // accepts "Neon Tetra", "neon_tetra" and "neontetra"
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "guppy" => Ok(Species::Guppy),
            "neontetra" => Ok(Species::NeonTetra),
            "molly" => Ok(Species::Molly),
            "platy" => Ok(Species::Platy),
            _ => Err(ParseError::UnknownSpecies(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(ParseError::UnknownGender(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub species: Species,
    pub gender: Gender,
    /// Age in time units
    pub age: u64,
    /// 0 is starving, `hunger_max` is fully fed
    pub hunger: u8,
    pub hp: f64,
    pub death_rate: f64,
    pub starving: bool,
    pub lifespan: u64,
    pub alive: bool,
}

impl Fish {
    pub const INITIAL_HUNGER: u8 = 10;
    pub const INITIAL_HP: f64 = 100.0;

    pub fn new(species: Species, gender: Gender, months: u64) -> Self {
        Self::with_lifespan(species, gender, months, DEFAULT_LIFESPAN_UNITS)
    }

    pub fn with_lifespan(species: Species, gender: Gender, months: u64, lifespan: u64) -> Self {
        Self {
            species,
            gender,
            age: months.saturating_mul(UNITS_PER_MONTH),
            hunger: Self::INITIAL_HUNGER,
            hp: Self::INITIAL_HP,
            death_rate: 0.0,
            starving: false,
            lifespan,
            alive: true,
        }
    }

    /// Percentage of the lifespan lived so far, `None` for a zero lifespan.
    pub fn age_percent(&self) -> Option<f64> {
        if self.lifespan == 0 {
            return None;
        }
        Some(self.age as f64 / self.lifespan as f64 * 100.0)
    }

    pub fn age_months(&self) -> u64 {
        self.age / UNITS_PER_MONTH
    }

    pub fn survivability(&self) -> f64 {
        100.0 - self.death_rate
    }

    pub fn feed(&mut self, amount: u8, max: u8) {
        self.hunger = self.hunger.saturating_add(amount).min(max);
        if self.hunger > 0 {
            self.starving = false;
        }
    }

    /// Apply one tick of judgement in place.
    pub fn judgement(&mut self, water_quality: f64, rules: &FishRules, enforce_death: bool) {
        *self = apply_tick(self, water_quality, rules, enforce_death);
    }
}

impl fmt::Display for Fish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "species: {} gender: {} age (in months): {}",
            self.species,
            self.gender,
            self.age_months()
        )
    }
}

/// The per-tick fish update shared by single-fish and whole-tank paths.
/// Deceased fish are returned unchanged.
pub fn apply_tick(fish: &Fish, water_quality: f64, rules: &FishRules, enforce_death: bool) -> Fish {
    let mut next = fish.clone();
    if !next.alive {
        return next;
    }

    next.age = next.age.saturating_add(1);

    next.hp -= rules.water_penalties.penalty(water_quality);

    if next.hunger == 0 {
        next.death_rate += rules.starving_death_rate;
        next.starving = true;
    } else {
        next.hp -= rules.hunger_penalties.penalty(next.hunger as f64);
        next.starving = false;
    }

    if let Some(pct) = next.age_percent() {
        next.death_rate += rules.age_penalties.penalty(pct);
    }

    next.hunger = next.hunger.saturating_sub(rules.hunger_decay_per_tick);

    if enforce_death && (next.hp <= 0.0 || next.survivability() <= 0.0) {
        next.alive = false;
    }

    next
}
