//! Plant-state normalization.
//!
//! Every mutation of a plant runs through [`normalize_plant`] before the
//! value is considered canonical. The normalizer expires the root stimulant
//! course, applies the bloom booster stage recommendation while it is still
//! in auto mode, locks fulvic acid off in late stages, fills missing
//! additive defaults, and keeps the watering log sorted newest first.

use chrono::{DateTime, Utc};

use crate::models::{BloomBoosterMode, PlantState};

/// Normalize a plant against the current wall clock.
pub fn normalize_plant(plant: PlantState) -> PlantState {
    normalize_plant_at(plant, Utc::now())
}

/// Normalize a plant as of `now`.
///
/// If the plant's stage id is unknown, only `updated_at` is refreshed and
/// the rest of the value passes through untouched. That path signals
/// corrupted upstream data; it is logged but deliberately does not fail.
pub fn normalize_plant_at(mut plant: PlantState, now: DateTime<Utc>) -> PlantState {
    let Some(stage) = plant.stage() else {
        tracing::warn!(
            plant = %plant.id,
            stage_id = %plant.stage_id,
            "unknown feeding stage, skipping normalization"
        );
        plant.updated_at = now;
        return plant;
    };
    let stage_id = stage.id;

    // Root stimulant: expire the course once its duration has elapsed.
    let root = &mut plant.additives.root_stimulant;
    root.duration_days = root.duration_or_default();
    root.dosage_ml_per_liter = Some(root.dosage_or_default());
    if root.active {
        if let Some(start) = root.start_date {
            let elapsed_days = (now - start).num_days();
            if elapsed_days >= root.duration_days {
                root.stop();
            }
        }
    }

    // Bloom booster: auto mode tracks the stage recommendation; manual mode
    // keeps the stored intensity and only recomputes the active flag.
    let bloom = &mut plant.additives.bloom_booster;
    match bloom.mode {
        BloomBoosterMode::Auto => {
            let recommended = stage_id.bloom_recommendation();
            bloom.intensity = recommended;
            bloom.active = recommended > 0.0;
        }
        BloomBoosterMode::Manual { .. } => {
            bloom.active = bloom.intensity > 0.0;
        }
    }

    // Fulvic acid: hard off in flowering stages, whatever was stored.
    let fulvic = &mut plant.additives.fulvic_acid;
    fulvic.dosage_ml_per_liter = Some(fulvic.dosage_or_default());
    if stage_id.forces_fulvic_off() {
        fulvic.stop();
    }

    plant
        .logs
        .sort_by(|a, b| b.created_at.cmp(&a.created_at));

    plant.updated_at = now;
    plant
}
