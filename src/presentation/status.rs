// Status rendering for the chat layer
use crate::domain::status::{AquariumStatus, FishStatus};
use std::fmt::Write;

/// Plain-text status report suitable for a chat message.
pub fn render_status(status: &AquariumStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Aquarium in channel {} ({} L, {})",
        status.channel_id, status.volume, status.substrate
    );
    let _ = writeln!(out, "Age: {} time units", status.age);
    let _ = writeln!(out, "Water quality: {:.1}/100", status.water_quality);
    let _ = writeln!(out, "Cycled? {}", if status.cycled { "yes" } else { "no" });

    if status.fish.is_empty() {
        let _ = writeln!(out, "No fish yet.");
    } else {
        let _ = writeln!(out, "Fish ({} alive):", status.living_fish());
        for fish in &status.fish {
            let _ = writeln!(out, "  {}", render_fish(fish, status.hunger_max));
        }
    }

    if !status.plants.is_empty() {
        let _ = writeln!(out, "Plants: {}", status.plants.join(", "));
    }
    if !status.decorations.is_empty() {
        let _ = writeln!(out, "Decorations: {}", status.decorations.join(", "));
    }

    out
}

fn render_fish(fish: &FishStatus, hunger_max: u8) -> String {
    if !fish.alive {
        return format!("{} {} {} (deceased)", fish.id, fish.species, fish.gender);
    }
    let mut line = format!(
        "{} {} {}, {} months, hp {:.1}, hunger {}/{}",
        fish.id, fish.species, fish.gender, fish.age_months, fish.hp, fish.hunger, hunger_max
    );
    if fish.starving {
        line.push_str(", starving");
    }
    line
}

pub fn render_status_json(status: &AquariumStatus) -> serde_json::Result<String> {
    serde_json::to_string(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aquarium::{Aquarium, ChannelId, Plant, Substrate};
    use crate::domain::fish::{Fish, Gender, Species};
    use crate::domain::rules::SimulationRules;
    use chrono::{TimeZone, Utc};

    fn aquarium() -> Aquarium {
        let birth = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Aquarium::new(ChannelId(42), 80, Substrate::Sand, SimulationRules::default(), birth)
    }

    #[test]
    fn test_render_empty_tank() {
        let text = render_status(&aquarium().status());
        assert!(text.contains("Aquarium in channel 42 (80 L, Sand)"));
        assert!(text.contains("Water quality: 100.0/100"));
        assert!(text.contains("Cycled? no"));
        assert!(text.contains("No fish yet."));
    }

    #[test]
    fn test_render_fish_and_plants() {
        let mut aquarium = aquarium();
        let mut fish = Fish::new(Species::NeonTetra, Gender::Female, 4);
        fish.hunger = 0;
        fish.starving = true;
        aquarium.add_fish(fish).unwrap();
        aquarium.add_plant(Plant::new("java moss"));

        let text = render_status(&aquarium.status());
        assert!(text.contains("Fish (1 alive):"));
        assert!(text.contains("Neon Tetra female, 4 months"));
        assert!(text.contains("starving"));
        assert!(text.contains("Plants: java moss"));
    }

    #[test]
    fn test_render_uses_configured_hunger_max() {
        let birth = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut rules = SimulationRules::default();
        rules.fish.hunger_max = 12;
        let mut aquarium = Aquarium::new(ChannelId(5), 80, Substrate::Soil, rules, birth);
        aquarium.add_fish(Fish::new(Species::Guppy, Gender::Male, 1)).unwrap();

        let text = render_status(&aquarium.status());
        assert!(text.contains("hunger 10/12"));
        assert!(!text.contains("/10,"));
    }

    #[test]
    fn test_render_json() {
        let json = render_status_json(&aquarium().status()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["channel_id"], 42);
        assert_eq!(value["substrate"], "sand");
        assert_eq!(value["cycled"], false);
    }
}
