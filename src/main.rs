use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod store;

use commands::{ConfigCommand, DosesCommand, LogCommand, PlantCommand};
use config::Config;
use store::PlantStore;

#[derive(Parser)]
#[command(name = "terramix")]
#[command(version)]
#[command(about = "Nutrient dosing calculator and watering history tracker", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage plants and their additives
    Plant(PlantCommand),

    /// Preview doses for a watering
    Doses(DosesCommand),

    /// Manage the watering log
    Log(LogCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Plant(cmd)) => {
            let mut store = PlantStore::open(&config.storage_path)?;
            cmd.run(&mut store)?;
        }
        Some(Commands::Doses(cmd)) => {
            let store = PlantStore::open(&config.storage_path)?;
            cmd.run(&store)?;
        }
        Some(Commands::Log(cmd)) => {
            let mut store = PlantStore::open(&config.storage_path)?;
            cmd.run(&mut store)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
