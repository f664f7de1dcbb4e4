use chrono::Utc;
use clap::{Args, Subcommand, ValueEnum};

use terra_mix_core::{FeedingStageId, PlantState, FEEDING_STAGES};

use crate::store::PlantStore;

use super::{confirm, OutputFormat};

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Args)]
pub struct PlantCommand {
    #[command(subcommand)]
    pub command: PlantSubcommand,
}

#[derive(Subcommand)]
pub enum PlantSubcommand {
    /// List plants
    List {
        /// Include archived plants
        #[arg(long)]
        archived: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a plant's details
    Show {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new plant
    Add {
        /// Plant name (generated if omitted)
        name: Option<String>,
    },

    /// Rename a plant
    Rename {
        /// Plant ID (UUID) or name
        identifier: String,

        /// New name
        name: String,
    },

    /// Set the feeding stage
    SetStage {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Feeding stage id (e.g. seedling, flower)
        stage: FeedingStageId,
    },

    /// Set the feeding strength percentage
    SetStrength {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Strength percentage
        strength: f64,
    },

    /// Set the preferred water volume
    SetWater {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Water volume in liters
        liters: f64,
    },

    /// Archive a plant
    Archive {
        /// Plant ID (UUID) or name
        identifier: String,
    },

    /// Restore an archived plant
    Unarchive {
        /// Plant ID (UUID) or name
        identifier: String,
    },

    /// Delete a plant and its history
    Delete {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Toggle the root stimulant course
    Root {
        /// Plant ID (UUID) or name
        identifier: String,

        /// on starts a course now, off stops it
        state: Toggle,
    },

    /// Toggle fulvic acid
    Fulvic {
        /// Plant ID (UUID) or name
        identifier: String,

        state: Toggle,
    },

    /// Set the bloom booster intensity (latches it to manual control)
    Bloom {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Intensity percentage 0-100
        intensity: f64,
    },

    /// List available feeding stages
    Stages,
}

fn resolve_id(store: &PlantStore, identifier: &str) -> Result<uuid::Uuid, String> {
    store
        .find(identifier)
        .map(|p| p.id)
        .ok_or_else(|| format!("Plant not found: {}", identifier))
}

fn print_plant_rows(plants: &[&PlantState]) {
    println!("{:<36}  {:<20}  {:<12}  {:>8}  {:>7}", "ID", "NAME", "STAGE", "STRENGTH", "WATER");
    println!("{}", "-".repeat(92));
    for plant in plants {
        println!(
            "{:<36}  {:<20}  {:<12}  {:>7}%  {:>5} L",
            plant.id, plant.name, plant.stage_id, plant.strength, plant.preferred_water_liters
        );
    }
    println!("\nTotal: {} plant(s)", plants.len());
}

impl PlantCommand {
    pub fn run(&self, store: &mut PlantStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PlantSubcommand::List { archived, format } => {
                let plants: Vec<&PlantState> = store
                    .plants()
                    .iter()
                    .filter(|p| *archived || !p.is_archived())
                    .collect();

                if plants.is_empty() {
                    println!("No plants found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&plants)?);
                    }
                    OutputFormat::Text => print_plant_rows(&plants),
                }
                Ok(())
            }

            PlantSubcommand::Show { identifier, format } => {
                let plant = store
                    .find(identifier)
                    .ok_or_else(|| format!("Plant not found: {}", identifier))?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(plant)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", plant);
                    }
                }
                Ok(())
            }

            PlantSubcommand::Add { name } => {
                if let Some(name) = name {
                    if name.trim().is_empty() {
                        return Err("Plant name cannot be empty".into());
                    }
                }
                let plant = store.add_plant(name.clone())?;
                println!("Created plant:");
                println!("{}", plant);
                Ok(())
            }

            PlantSubcommand::Rename { identifier, name } => {
                if name.trim().is_empty() {
                    return Err("Plant name cannot be empty".into());
                }
                let id = resolve_id(store, identifier)?;
                let name = name.trim().to_string();
                let plant = store.update_plant(id, move |mut plant| {
                    plant.name = name;
                    plant
                })?;
                println!("Renamed plant to '{}'", plant.name);
                Ok(())
            }

            PlantSubcommand::SetStage { identifier, stage } => {
                let id = resolve_id(store, identifier)?;
                let stage = *stage;
                let plant = store.update_plant(id, move |plant| plant.with_stage(stage))?;
                println!("{} is now in stage '{}'", plant.name, plant.stage_id);
                Ok(())
            }

            PlantSubcommand::SetStrength {
                identifier,
                strength,
            } => {
                let id = resolve_id(store, identifier)?;
                let strength = *strength;
                let plant = store.update_plant(id, move |plant| plant.with_strength(strength))?;
                println!("{} strength set to {}%", plant.name, plant.strength);
                Ok(())
            }

            PlantSubcommand::SetWater { identifier, liters } => {
                let id = resolve_id(store, identifier)?;
                let liters = *liters;
                let plant = store.update_plant(id, move |plant| plant.with_water_liters(liters))?;
                println!(
                    "{} preferred water set to {} L",
                    plant.name, plant.preferred_water_liters
                );
                Ok(())
            }

            PlantSubcommand::Archive { identifier } => {
                let id = resolve_id(store, identifier)?;
                let plant = store.archive_plant(id, true)?;
                println!("Archived '{}'", plant.name);
                Ok(())
            }

            PlantSubcommand::Unarchive { identifier } => {
                let id = resolve_id(store, identifier)?;
                let plant = store.archive_plant(id, false)?;
                println!("Restored '{}'", plant.name);
                Ok(())
            }

            PlantSubcommand::Delete { identifier, force } => {
                let id = resolve_id(store, identifier)?;
                let prompt = format!("Delete plant '{}' and its watering history?", identifier);
                if !confirm(&prompt, *force)? {
                    println!("Cancelled");
                    return Ok(());
                }
                store.delete_plant(id)?;
                println!("Deleted plant");
                Ok(())
            }

            PlantSubcommand::Root { identifier, state } => {
                let id = resolve_id(store, identifier)?;
                let state = *state;
                let plant = store.update_plant(id, move |mut plant| {
                    match state {
                        Toggle::On => plant.additives.root_stimulant.start(Utc::now()),
                        Toggle::Off => plant.additives.root_stimulant.stop(),
                    }
                    plant
                })?;
                if plant.additives.root_stimulant.active {
                    println!(
                        "Root stimulant started ({} day course)",
                        plant.additives.root_stimulant.duration_days
                    );
                } else {
                    println!("Root stimulant stopped");
                }
                Ok(())
            }

            PlantSubcommand::Fulvic { identifier, state } => {
                let id = resolve_id(store, identifier)?;
                let state = *state;
                let plant = store.update_plant(id, move |mut plant| {
                    match state {
                        Toggle::On => plant.additives.fulvic_acid.start(Utc::now()),
                        Toggle::Off => plant.additives.fulvic_acid.stop(),
                    }
                    plant
                })?;
                // A flowering stage can veto the toggle during normalization.
                if plant.additives.fulvic_acid.active {
                    println!("Fulvic acid on");
                } else {
                    println!("Fulvic acid off");
                }
                Ok(())
            }

            PlantSubcommand::Bloom {
                identifier,
                intensity,
            } => {
                let id = resolve_id(store, identifier)?;
                let intensity = *intensity;
                let plant = store.update_plant(id, move |mut plant| {
                    plant.additives.bloom_booster.adjust(intensity, Utc::now());
                    plant
                })?;
                println!(
                    "Bloom booster set to {}% (manual)",
                    plant.additives.bloom_booster.intensity
                );
                Ok(())
            }

            PlantSubcommand::Stages => {
                for stage in FEEDING_STAGES {
                    println!("{:<12}  {}", stage.id.to_string(), stage.name);
                    println!("              {}", stage.description);
                }
                Ok(())
            }
        }
    }
}
