use clap::{Args, Subcommand};
use uuid::Uuid;

use terra_mix_core::{
    calculate_additive_doses, calculate_fertilizer_doses, FeedingStageId, PlantState,
    WateringLogEntry,
};

use crate::store::PlantStore;

use super::{confirm, OutputFormat};

#[derive(Args)]
pub struct LogCommand {
    #[command(subcommand)]
    pub command: LogSubcommand,
}

#[derive(Subcommand)]
pub enum LogSubcommand {
    /// Log a watering with computed dose snapshots
    Add {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Water volume in liters (defaults to the plant's preference)
        #[arg(long)]
        water: Option<f64>,

        /// Strength percentage override
        #[arg(long)]
        strength: Option<f64>,

        /// Feeding stage override (the plant keeps its own stage)
        #[arg(long)]
        stage: Option<FeedingStageId>,

        /// Measured pH
        #[arg(long)]
        ph: Option<f64>,

        /// Measured EC in mS/cm
        #[arg(long)]
        ec: Option<f64>,
    },

    /// List watering history, newest first
    List {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one log entry
    Show {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Log entry ID (UUID)
        log_id: Uuid,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit a log entry, recomputing its dose snapshots
    Edit {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Log entry ID (UUID)
        log_id: Uuid,

        /// New water volume in liters
        #[arg(long)]
        water: Option<f64>,

        /// New strength percentage
        #[arg(long)]
        strength: Option<f64>,

        /// New feeding stage
        #[arg(long)]
        stage: Option<FeedingStageId>,

        /// New pH reading
        #[arg(long)]
        ph: Option<f64>,

        /// New EC reading
        #[arg(long)]
        ec: Option<f64>,
    },

    /// Delete a log entry
    Delete {
        /// Plant ID (UUID) or name
        identifier: String,

        /// Log entry ID (UUID)
        log_id: Uuid,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

fn find_plant(store: &PlantStore, identifier: &str) -> Result<PlantState, String> {
    store
        .find(identifier)
        .cloned()
        .ok_or_else(|| format!("Plant not found: {}", identifier))
}

/// Compute fertilizer and additive snapshots for the given configuration.
fn dose_snapshots(
    plant: &PlantState,
    stage_id: &str,
    strength: f64,
    water: f64,
) -> (
    Vec<terra_mix_core::FertilizerDose>,
    terra_mix_core::AdditiveDoseSummary,
) {
    let mut draft = plant.clone();
    draft.stage_id = stage_id.to_string();
    draft.strength = strength;
    (
        calculate_fertilizer_doses(&draft, water),
        calculate_additive_doses(&draft, water),
    )
}

impl LogCommand {
    pub fn run(&self, store: &mut PlantStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            LogSubcommand::Add {
                identifier,
                water,
                strength,
                stage,
                ph,
                ec,
            } => {
                let plant = find_plant(store, identifier)?;

                let stage_id = stage
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| plant.stage_id.clone());
                let strength = strength.unwrap_or(plant.strength);
                let water = water.unwrap_or(plant.preferred_water_liters);

                let (fertilizers, additives) =
                    dose_snapshots(&plant, &stage_id, strength, water);

                let mut entry = WateringLogEntry::new(stage_id, strength, water)
                    .with_fertilizers(fertilizers)
                    .with_additives(additives);
                if let Some(ph) = ph {
                    entry = entry.with_ph(*ph);
                }
                if let Some(ec) = ec {
                    entry = entry.with_ec(*ec);
                }

                store.log_watering(plant.id, entry.clone())?;
                println!("Logged watering:");
                println!("{}", entry);
                Ok(())
            }

            LogSubcommand::List { identifier, format } => {
                let plant = find_plant(store, identifier)?;

                if plant.logs.is_empty() {
                    println!("No waterings logged for '{}'", plant.name);
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&plant.logs)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<36}  {:<17}  {:>6}  {:>8}  STAGE",
                            "ID", "DATE", "WATER", "STRENGTH"
                        );
                        println!("{}", "-".repeat(90));
                        for log in &plant.logs {
                            println!(
                                "{:<36}  {:<17}  {:>4} L  {:>7}%  {}",
                                log.id,
                                log.created_at.format("%Y-%m-%d %H:%M"),
                                log.water_liters,
                                log.strength,
                                log.stage_id
                            );
                        }
                        println!("\nTotal: {} watering(s)", plant.logs.len());
                    }
                }
                Ok(())
            }

            LogSubcommand::Show {
                identifier,
                log_id,
                format,
            } => {
                let plant = find_plant(store, identifier)?;
                let entry = plant
                    .logs
                    .iter()
                    .find(|l| l.id == *log_id)
                    .ok_or_else(|| format!("Watering log entry not found: {}", log_id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(entry)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", entry);
                    }
                }
                Ok(())
            }

            LogSubcommand::Edit {
                identifier,
                log_id,
                water,
                strength,
                stage,
                ph,
                ec,
            } => {
                let plant = find_plant(store, identifier)?;
                let existing = plant
                    .logs
                    .iter()
                    .find(|l| l.id == *log_id)
                    .ok_or_else(|| format!("Watering log entry not found: {}", log_id))?;

                let stage_id = stage
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| existing.stage_id.clone());
                let strength = strength.unwrap_or(existing.strength);
                let water = water.unwrap_or(existing.water_liters);
                let ph = ph.or(existing.ph);
                let ec = ec.or(existing.ec);

                let (fertilizers, additives) =
                    dose_snapshots(&plant, &stage_id, strength, water);

                let updated = store.update_watering_log(plant.id, *log_id, move |mut entry| {
                    entry.stage_id = stage_id;
                    entry.strength = strength;
                    entry.water_liters = water;
                    entry.ph = ph;
                    entry.ec = ec;
                    entry.fertilizers = fertilizers;
                    entry.additives = additives;
                    entry
                })?;

                let entry = updated
                    .logs
                    .iter()
                    .find(|l| l.id == *log_id)
                    .expect("edited entry still present");
                println!("Updated watering:");
                println!("{}", entry);
                Ok(())
            }

            LogSubcommand::Delete {
                identifier,
                log_id,
                force,
            } => {
                let plant = find_plant(store, identifier)?;
                if !confirm("Delete this watering log entry?", *force)? {
                    println!("Cancelled");
                    return Ok(());
                }
                store.delete_watering_log(plant.id, *log_id)?;
                println!("Deleted log entry");
                Ok(())
            }
        }
    }
}
