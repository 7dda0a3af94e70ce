use crate::domain::rules::SimulationRules;

const DEFAULT_CONFIG_PATH: &str = "config/simulation";
const ENV_PREFIX: &str = "AQUARIUM";

/// Load rules from `config/simulation.*` (optional) with `AQUARIUM__*`
/// environment overrides, e.g. `AQUARIUM__TICK__TIME_UNIT_SECS=1`.
pub fn load_simulation_config() -> anyhow::Result<SimulationRules> {
    load_simulation_config_from(DEFAULT_CONFIG_PATH)
}

pub fn load_simulation_config_from(path: &str) -> anyhow::Result<SimulationRules> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Parse rules from TOML text, falling back to defaults for missing keys.
pub fn parse_simulation_config(toml: &str) -> anyhow::Result<SimulationRules> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
