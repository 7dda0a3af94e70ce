// Demo entry point - runs one aquarium until Ctrl-C
use std::sync::Arc;

use aquarium_sim::application::aquarium_service::AquariumService;
use aquarium_sim::application::owner::Owner;
use aquarium_sim::domain::aquarium::{ChannelId, Decoration, Plant, Substrate};
use aquarium_sim::domain::fish::{Gender, Species};
use aquarium_sim::infrastructure::config::load_simulation_config;
use aquarium_sim::infrastructure::log_observer::LogObserver;
use aquarium_sim::presentation::status::render_status;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rules = load_simulation_config()?;
    tracing::info!("Tick every {:?}", rules.tick.time_unit());

    let mut service = AquariumService::new(rules, Arc::new(LogObserver));
    let channel = ChannelId(1);
    let fish_rules = service.rules().fish.clone();
    let tank = service.create(channel, 100, Substrate::Gravel)?;

    tank.add_fish(fish_rules.new_fish(Species::Guppy, Gender::Female, 3)).await?;
    tank.add_fish(fish_rules.new_fish(Species::NeonTetra, Gender::Male, 6)).await?;
    tank.add_plant(Plant::new("java fern")).await;
    tank.add_decoration(Decoration::new("driftwood")).await?;
    tank.feed().await;

    let mut statuses = tank.status_stream();
    let mut owner = Owner::new("demo", 1, 0.0);
    if let Some(handle) = service.detach(channel) {
        owner.add_aquarium(handle);
    }
    tracing::info!("{} owns {} aquarium(s)", owner, owner.aquarium_count());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            status = statuses.next() => match status {
                Some(status) => println!("{}", render_status(&status)),
                None => break,
            },
        }
    }

    tracing::info!("Shutting down");
    owner.stop_all().await;
    service.stop_all().await;
    Ok(())
}
