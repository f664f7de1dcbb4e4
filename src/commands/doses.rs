use clap::Args;

use terra_mix_core::{calculate_additive_doses, calculate_fertilizer_doses, format_ml, FeedingStageId};

use crate::store::PlantStore;

/// Preview the mix for a watering without logging anything.
#[derive(Args)]
pub struct DosesCommand {
    /// Plant ID (UUID) or name
    pub identifier: String,

    /// Water volume in liters (defaults to the plant's preference)
    #[arg(long)]
    pub water: Option<f64>,

    /// Strength percentage override
    #[arg(long)]
    pub strength: Option<f64>,

    /// Feeding stage override
    #[arg(long)]
    pub stage: Option<FeedingStageId>,
}

impl DosesCommand {
    pub fn run(&self, store: &PlantStore) -> Result<(), Box<dyn std::error::Error>> {
        let mut plant = store
            .find(&self.identifier)
            .cloned()
            .ok_or_else(|| format!("Plant not found: {}", self.identifier))?;

        if let Some(stage) = self.stage {
            plant.stage_id = stage.to_string();
        }
        if let Some(strength) = self.strength {
            plant.strength = strength;
        }
        let water = self.water.unwrap_or(plant.preferred_water_liters);

        let fertilizers = calculate_fertilizer_doses(&plant, water);
        let additives = calculate_additive_doses(&plant, water);

        println!(
            "{} - {} L at {}% ({})",
            plant.name, water, plant.strength, plant.stage_id
        );
        println!("{}", "-".repeat(40));

        if fertilizers.is_empty() {
            println!("No fertilizer doses (unknown stage)");
        }
        for dose in &fertilizers {
            println!(
                "{:<16}  {:>9}  ({} per L)",
                dose.label,
                format_ml(dose.ml),
                format_ml(dose.ml_per_liter)
            );
        }

        if let Some(root) = &additives.root_stimulant {
            println!(
                "{:<16}  {:>9}  ({} per L)",
                "Root stimulant",
                format_ml(root.total_ml),
                format_ml(root.ml_per_liter)
            );
        }
        if let Some(fulvic) = &additives.fulvic_acid {
            println!(
                "{:<16}  {:>9}  ({} per L)",
                "Fulvic acid",
                format_ml(fulvic.total_ml),
                format_ml(fulvic.ml_per_liter)
            );
        }
        if let Some(bloom) = &additives.bloom_booster {
            println!(
                "{:<16}  {:>9}  ({} per L, {}%)",
                "Bloom booster",
                format_ml(bloom.total_ml),
                format_ml(bloom.ml_per_liter),
                bloom.intensity
            );
        }

        Ok(())
    }
}
