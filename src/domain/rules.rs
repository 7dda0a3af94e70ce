// Simulation rules - every tunable threshold of the tick
use serde::Deserialize;
use std::time::Duration;

use super::aquarium::Substrate;
use super::fish::{DEFAULT_LIFESPAN_UNITS, Fish, Gender, Species};

/// One row of a penalty table. `from` is inclusive, `to` exclusive; a missing
/// bound is open.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Bracket {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    pub penalty: f64,
}

impl Bracket {
    pub fn new(from: Option<f64>, to: Option<f64>, penalty: f64) -> Self {
        Self { from, to, penalty }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.from.is_none_or(|from| value >= from) && self.to.is_none_or(|to| value < to)
    }
}

/// Ordered bracket table; the first matching row wins.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct BracketTable(pub Vec<Bracket>);

impl BracketTable {
    pub fn penalty(&self, value: f64) -> f64 {
        self.0
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.penalty)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimulationRules {
    pub tick: TickRules,
    pub water: WaterRules,
    pub fish: FishRules,
    pub validation: ValidationRules,
    pub death: DeathRules,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TickRules {
    pub time_unit_secs: u64,
    pub cycle_threshold_secs: u64,
}

/// Longest allowed tick period, one simulated day.
pub const MAX_TIME_UNIT_SECS: u64 = 24 * 60 * 60;

impl TickRules {
    pub fn time_unit(&self) -> Duration {
        // tokio's interval panics on a zero period and on deadline overflow
        Duration::from_secs(self.time_unit_secs.clamp(1, MAX_TIME_UNIT_SECS))
    }

    pub fn cycle_threshold(&self) -> chrono::Duration {
        let secs = i64::try_from(self.cycle_threshold_secs).unwrap_or(i64::MAX);
        chrono::Duration::try_seconds(secs).unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for TickRules {
    fn default() -> Self {
        Self {
            time_unit_secs: 5,
            cycle_threshold_secs: 15,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WaterRules {
    pub uncycled_decay: f64,
    pub cycled_decay: f64,
    /// Decay multiplier applied while at least one plant is in the tank
    pub plant_multiplier: f64,
    pub fresh_quality: f64,
}

impl Default for WaterRules {
    fn default() -> Self {
        Self {
            uncycled_decay: 3.0,
            cycled_decay: 1.0,
            plant_multiplier: 0.5,
            fresh_quality: 100.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FishRules {
    pub lifespan_units: u64,
    pub feed_amount: u8,
    pub hunger_max: u8,
    pub hunger_decay_per_tick: u8,
    pub starving_death_rate: f64,
    /// hp loss keyed by water quality
    pub water_penalties: BracketTable,
    /// hp loss keyed by hunger; hunger 0 is handled as starvation instead
    pub hunger_penalties: BracketTable,
    /// death-rate increase keyed by percentage of lifespan lived
    pub age_penalties: BracketTable,
}

impl FishRules {
    /// A new fish with the configured lifespan.
    pub fn new_fish(&self, species: Species, gender: Gender, months: u64) -> Fish {
        Fish::with_lifespan(species, gender, months, self.lifespan_units)
    }
}

impl Default for FishRules {
    fn default() -> Self {
        Self {
            lifespan_units: DEFAULT_LIFESPAN_UNITS,
            feed_amount: 6,
            hunger_max: 10,
            hunger_decay_per_tick: 0,
            starving_death_rate: 0.33,
            water_penalties: BracketTable(vec![
                Bracket::new(Some(50.0), Some(70.0), 0.5),
                Bracket::new(None, Some(50.0), 1.0),
            ]),
            hunger_penalties: BracketTable(vec![
                Bracket::new(Some(5.0), Some(8.0), 0.5),
                Bracket::new(Some(1.0), Some(5.0), 1.0),
            ]),
            age_penalties: BracketTable(vec![
                Bracket::new(Some(50.0), Some(60.0), 0.02),
                Bracket::new(Some(60.0), Some(70.0), 0.03),
                Bracket::new(Some(70.0), Some(80.0), 0.04),
                Bracket::new(Some(80.0), Some(90.0), 0.05),
                Bracket::new(Some(90.0), Some(100.0), 0.06),
                Bracket::new(Some(100.0), None, 0.10),
            ]),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ValidationRules {
    pub enabled: bool,
    pub species: Vec<Species>,
    pub decorations: Vec<String>,
    pub substrates: Vec<Substrate>,
}

impl ValidationRules {
    pub fn allows_species(&self, species: Species) -> bool {
        !self.enabled || self.species.contains(&species)
    }

    pub fn allows_decoration(&self, kind: &str) -> bool {
        !self.enabled || self.decorations.iter().any(|d| d.eq_ignore_ascii_case(kind))
    }

    pub fn allows_substrate(&self, substrate: Substrate) -> bool {
        !self.enabled || self.substrates.contains(&substrate)
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            enabled: false,
            species: vec![Species::Guppy, Species::NeonTetra, Species::Molly, Species::Platy],
            decorations: vec!["driftwood".to_string(), "rock".to_string()],
            substrates: vec![Substrate::Gravel, Substrate::Sand, Substrate::Soil],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeathRules {
    pub enforce: bool,
}

impl Default for DeathRules {
    fn default() -> Self {
        Self { enforce: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_brackets() {
        let table = FishRules::default().age_penalties;

        assert_eq!(table.penalty(10.0), 0.0);
        assert_eq!(table.penalty(50.0), 0.02);
        assert_eq!(table.penalty(59.9), 0.02);
        assert_eq!(table.penalty(60.0), 0.03);
        assert_eq!(table.penalty(95.0), 0.06);
        assert_eq!(table.penalty(100.0), 0.10);
        assert_eq!(table.penalty(250.0), 0.10);
    }

    #[test]
    fn test_water_brackets() {
        let table = FishRules::default().water_penalties;

        assert_eq!(table.penalty(100.0), 0.0);
        assert_eq!(table.penalty(70.0), 0.0);
        assert_eq!(table.penalty(69.0), 0.5);
        assert_eq!(table.penalty(50.0), 0.5);
        assert_eq!(table.penalty(40.0), 1.0);
        assert_eq!(table.penalty(0.0), 1.0);
    }

    #[test]
    fn test_hunger_brackets() {
        let table = FishRules::default().hunger_penalties;

        assert_eq!(table.penalty(10.0), 0.0);
        assert_eq!(table.penalty(8.0), 0.0);
        assert_eq!(table.penalty(7.0), 0.5);
        assert_eq!(table.penalty(5.0), 0.5);
        assert_eq!(table.penalty(4.0), 1.0);
        assert_eq!(table.penalty(1.0), 1.0);
        assert_eq!(table.penalty(0.0), 0.0);
    }

    #[test]
    fn test_validation_disabled_allows_everything() {
        let rules = ValidationRules::default();
        assert!(rules.allows_decoration("castle"));

        let rules = ValidationRules {
            enabled: true,
            ..ValidationRules::default()
        };
        assert!(!rules.allows_decoration("castle"));
        assert!(rules.allows_decoration("Driftwood"));
        assert!(rules.allows_species(Species::Molly));
    }

    #[test]
    fn test_new_fish_uses_configured_lifespan() {
        let rules = FishRules {
            lifespan_units: 100,
            ..FishRules::default()
        };
        let fish = rules.new_fish(Species::Platy, Gender::Male, 1);
        assert_eq!(fish.lifespan, 100);
        assert_eq!(fish.age_percent(), Some(30.0));
    }

    #[test]
    fn test_zero_time_unit_is_clamped() {
        let tick = TickRules {
            time_unit_secs: 0,
            ..TickRules::default()
        };
        assert_eq!(tick.time_unit(), Duration::from_secs(1));
    }

    #[test]
    fn test_huge_time_unit_is_clamped() {
        let tick = TickRules {
            time_unit_secs: u64::MAX,
            ..TickRules::default()
        };
        assert_eq!(tick.time_unit(), Duration::from_secs(MAX_TIME_UNIT_SECS));
    }

    #[test]
    fn test_huge_cycle_threshold_saturates() {
        for secs in [10_000_000_000_000_000, u64::MAX] {
            let tick = TickRules {
                cycle_threshold_secs: secs,
                ..TickRules::default()
            };
            assert_eq!(tick.cycle_threshold(), chrono::Duration::MAX);
        }
    }
}
