//! Main entry point for the farmyard binary
//!
//! Runs a self-contained demonstration over the in-memory store: bulk-house
//! a random herd, evict a few stragglers, and print the resulting barn
//! census per color.

use clap::Parser;
use rand::prelude::*;
use tracing::info;

use farmyard::{Animal, Color, FarmConfig, FarmResult, FarmService, InMemoryFarmStore};

/// Distributes animals evenly across bounded-capacity barns by favorite color
#[derive(Parser)]
#[command(name = "farmyard")]
#[command(about = "Houses a demo herd and shows the resulting barn distribution")]
pub struct Args {
    /// Number of animals to house
    #[arg(long, default_value = "100")]
    pub herd: usize,

    /// Number of distinct favorite colors to draw from
    #[arg(long, default_value = "3")]
    pub colors: usize,

    /// Number of animals to remove again after housing
    #[arg(long, default_value = "5")]
    pub removals: usize,

    /// Barn capacity (overrides FARMYARD_BARN_CAPACITY and the default)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// RNG seed for a reproducible herd
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final census as JSON instead of log lines
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> FarmResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    farmyard::logging::init_tracing(Some(&args.log_level));

    let config = match args.capacity {
        Some(capacity) => FarmConfig::new(capacity)?,
        None => FarmConfig::from_env()?,
    };
    info!(capacity = config.barn_capacity, "starting farmyard demo");

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store = InMemoryFarmStore::new();
    let service = FarmService::new(store.clone(), store.clone(), config)?;

    let palette = &Color::ALL[..args.colors.clamp(1, Color::ALL.len())];
    let herd: Vec<Animal> = (0..args.herd)
        .map(|index| {
            let color = *palette.choose(&mut rng).expect("palette is non-empty");
            Animal::new(format!("animal-{index}"), color)
        })
        .collect();

    service.add_all(herd).await?;
    info!(herd = args.herd, barns = store.barn_count().await, "herd housed");

    let mut housed = service.find_all().await?;
    housed.shuffle(&mut rng);
    let victims: Vec<_> = housed
        .iter()
        .take(args.removals.min(housed.len()))
        .map(|animal| animal.id)
        .collect();
    service.remove_all(victims).await?;
    info!(
        removed = args.removals.min(housed.len()),
        barns = store.barn_count().await,
        "stragglers removed"
    );

    let census = service.census().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&census)?);
    } else {
        for entry in &census {
            let populations: Vec<String> = entry
                .barns
                .iter()
                .map(|barn| format!("{} ({})", barn.barn, barn.population))
                .collect();
            info!(color = %entry.color, barns = populations.join(", "), "census");
        }
    }

    Ok(())
}
