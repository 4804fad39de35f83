use anyhow::{Context, Result};
use clap::Parser;
use std::sync::atomic::Ordering;

use vivarium_core::{init_logging, SimConfig, World};
use vivarium_lib::app::{self, App};
use vivarium_tui::Tui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "tui")]
    mode: Mode,

    /// Config file path; written with defaults if missing
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// World seed, overriding the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seed the hand-written ancestor program into the first organism
    #[arg(long)]
    ancestor: bool,

    /// Stop after this many ticks (0 = run until extinction)
    #[arg(long, default_value_t = 0)]
    max_ticks: u64,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Print a JSON snapshot of the final world (headless only)
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Tui,
    Headless,
}

fn build_world(args: &Args) -> Result<World> {
    let mut config = SimConfig::load(&args.config)
        .with_context(|| format!("loading config from {}", args.config))?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }

    let mut world = World::new(config)?;
    let spawned = world.spawn().context("no free slot for the first organism")?;
    if !spawned.collisions.is_empty() {
        tracing::debug!(
            collisions = spawned.collisions.len(),
            "First organism spawned on occupied tiles"
        );
    }
    if args.ancestor {
        world.seed_ancestor(spawned.id);
    }
    Ok(world)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.mode {
        Mode::Headless => {
            init_logging("info");
            let world = build_world(&args)?;
            let mut app = App::new(world, args.max_ticks);
            let shutdown = app::shutdown_flag();
            app.run_headless(|| shutdown.load(Ordering::SeqCst));

            let metrics = app.world.metrics();
            println!(
                "Finished after {} ticks: population {}, peak {}, births {}, deaths {} \
                 ({:.0} ticks/s)",
                app.world.tick_count(),
                app.world.population().len(),
                metrics.peak_population(),
                metrics.births(),
                metrics.total_deaths(),
                metrics.tick_rate(),
            );
            if app.world.population().is_empty() {
                println!("Everybody died.");
            }
            if args.json {
                println!("{}", app.world.snapshot().to_json()?);
            }
        }
        Mode::Tui => {
            // Log lines would tear the alternate screen.
            init_logging("off");
            let world = build_world(&args)?;
            let (columns, rows) = vivarium_tui::terminal_size();
            tracing::info!(columns, rows, "Terminal size");

            let mut tui = Tui::new()?;
            tui.init()?;
            let mut app = App::new(world, args.max_ticks);
            let res = app.run(&mut tui).await;
            tui.exit()?;

            res?;
            if app.world.population().is_empty() {
                println!("Everybody died.");
            }
        }
    }

    Ok(())
}
