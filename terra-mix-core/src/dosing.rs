//! Dose calculation.
//!
//! Pure functions mapping a plant configuration and a water volume to
//! fertilizer and additive doses. Nothing here mutates the plant; the
//! caller is expected to have run the normalizer first so that additive
//! state is canonical.

use serde::{Deserialize, Serialize};

use crate::feeding::{FertilizerId, BLOOM_BOOSTER_MAX_ML_PER_L, FULVIC_ACID_MAX_ML_PER_L};
use crate::models::PlantState;

/// A computed dose for one base fertilizer component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerDose {
    pub fertilizer: FertilizerId,
    pub label: String,
    /// Absolute amount for the whole water volume.
    pub ml: f64,
    pub ml_per_liter: f64,
}

/// A computed dose for an additive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdditiveDose {
    /// Resolved intensity, for additives whose dosage is intensity-driven.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    pub ml_per_liter: f64,
    pub total_ml: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomBoosterDose {
    pub intensity: f64,
    pub ml_per_liter: f64,
    pub total_ml: f64,
}

/// Additive doses for one watering.
///
/// An additive that is inactive or not eligible for the plant's stage is
/// absent (`None`), which is distinct from a dose of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AdditiveDoseSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_stimulant: Option<AdditiveDose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulvic_acid: Option<AdditiveDose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_booster: Option<BloomBoosterDose>,
}

impl AdditiveDoseSummary {
    pub fn is_empty(&self) -> bool {
        self.root_stimulant.is_none() && self.fulvic_acid.is_none() && self.bloom_booster.is_none()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute base fertilizer doses for a plant at the given water volume.
///
/// Only the plant's stage and strength matter here. Negative strength is
/// floored to a zero multiplier; strength is otherwise not clamped. The
/// output order follows the stage's rate table.
pub fn calculate_fertilizer_doses(plant: &PlantState, water_liters: f64) -> Vec<FertilizerDose> {
    let Some(stage) = plant.stage() else {
        tracing::warn!(stage_id = %plant.stage_id, "unknown feeding stage, no fertilizer doses");
        return Vec::new();
    };

    let multiplier = plant.strength.max(0.0) / 100.0;

    stage
        .rates
        .iter()
        .map(|rate| {
            let ml_per_liter = rate.ml_per_liter * multiplier;
            FertilizerDose {
                fertilizer: rate.fertilizer,
                label: rate.fertilizer.label().to_string(),
                ml: round2(ml_per_liter * water_liters),
                ml_per_liter: round2(ml_per_liter),
            }
        })
        .collect()
}

/// Compute additive doses for a plant at the given water volume.
///
/// Each additive is included only when its stage allows it and it is
/// active; the bloom booster additionally requires a per-liter dose above
/// zero.
pub fn calculate_additive_doses(plant: &PlantState, water_liters: f64) -> AdditiveDoseSummary {
    let mut summary = AdditiveDoseSummary::default();
    let Some(stage) = plant.stage() else {
        tracing::warn!(stage_id = %plant.stage_id, "unknown feeding stage, no additive doses");
        return summary;
    };
    let stage_id = stage.id;
    let additives = &plant.additives;

    if stage_id.allows_root_stimulant() && additives.root_stimulant.active {
        let ml_per_liter = additives.root_stimulant.dosage_or_default();
        summary.root_stimulant = Some(AdditiveDose {
            intensity: None,
            ml_per_liter: round2(ml_per_liter),
            total_ml: round2(ml_per_liter * water_liters),
        });
    }

    if stage_id.allows_fulvic_acid() && additives.fulvic_acid.active {
        let intensity = additives.fulvic_acid.intensity_or_default();
        let ml_per_liter = (intensity / 100.0) * FULVIC_ACID_MAX_ML_PER_L;
        summary.fulvic_acid = Some(AdditiveDose {
            intensity: Some(round2(intensity)),
            ml_per_liter: round2(ml_per_liter),
            total_ml: round2(ml_per_liter * water_liters),
        });
    }

    let bloom_ml_per_liter =
        (additives.bloom_booster.intensity / 100.0) * BLOOM_BOOSTER_MAX_ML_PER_L;
    if stage_id.allows_bloom_booster() && additives.bloom_booster.active && bloom_ml_per_liter > 0.0
    {
        summary.bloom_booster = Some(BloomBoosterDose {
            intensity: additives.bloom_booster.intensity,
            ml_per_liter: round2(bloom_ml_per_liter),
            total_ml: round2(bloom_ml_per_liter * water_liters),
        });
    }

    summary
}

/// Format a milliliter amount for display.
///
/// Below 1 ml two decimals are kept, below 10 ml one decimal, and larger
/// amounts are rounded to whole milliliters.
pub fn format_ml(value: f64) -> String {
    if value < 1.0 {
        format!("{:.2} ml", round2(value))
    } else if value < 10.0 {
        format!("{:.1} ml", (value * 10.0).round() / 10.0)
    } else {
        format!("{} ml", value.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeding::FeedingStageId;
    use chrono::Utc;

    fn plant(stage: FeedingStageId, strength: f64) -> PlantState {
        PlantState::new("Test").with_stage(stage).with_strength(strength)
    }

    #[test]
    fn test_flower_doses_at_half_strength() {
        let doses = calculate_fertilizer_doses(&plant(FeedingStageId::Flower, 50.0), 4.0);

        assert_eq!(doses.len(), 3);
        assert_eq!(doses[0].fertilizer, FertilizerId::Grow);
        assert_eq!(doses[0].ml_per_liter, 0.4);
        assert_eq!(doses[0].ml, 1.6);
        assert_eq!(doses[1].fertilizer, FertilizerId::Micro);
        assert_eq!(doses[1].ml_per_liter, 0.8);
        assert_eq!(doses[1].ml, 3.2);
        assert_eq!(doses[2].fertilizer, FertilizerId::Bloom);
        assert_eq!(doses[2].ml_per_liter, 1.2);
        assert_eq!(doses[2].ml, 4.8);
        assert_eq!(doses[2].label, "TriPart Bloom");
    }

    #[test]
    fn test_ripen_single_final_part_dose() {
        let doses = calculate_fertilizer_doses(&plant(FeedingStageId::Ripen, 100.0), 10.0);

        assert_eq!(doses.len(), 1);
        assert_eq!(doses[0].fertilizer, FertilizerId::FinalPart);
        assert_eq!(doses[0].label, "Final Part");
        assert_eq!(doses[0].ml_per_liter, 4.0);
        assert_eq!(doses[0].ml, 40.0);
    }

    #[test]
    fn test_doses_scale_linearly_with_water() {
        for stage in [
            FeedingStageId::Seedling,
            FeedingStageId::Grow,
            FeedingStageId::Flower,
            FeedingStageId::Ripen,
        ] {
            let p = plant(stage, 85.0);
            let per_liter = calculate_fertilizer_doses(&p, 1.0);
            for liters in [2.0, 5.0, 7.5] {
                let doses = calculate_fertilizer_doses(&p, liters);
                for (dose, base) in doses.iter().zip(per_liter.iter()) {
                    assert!(
                        (dose.ml - base.ml_per_liter * liters).abs() <= 0.01,
                        "stage {:?} at {} L: {} vs {}",
                        stage,
                        liters,
                        dose.ml,
                        base.ml_per_liter * liters
                    );
                }
            }
        }
    }

    #[test]
    fn test_stronger_feed_never_decreases_doses() {
        let weak = calculate_fertilizer_doses(&plant(FeedingStageId::Grow, 60.0), 3.0);
        let strong = calculate_fertilizer_doses(&plant(FeedingStageId::Grow, 110.0), 3.0);

        for (w, s) in weak.iter().zip(strong.iter()) {
            assert!(s.ml >= w.ml);
            assert!(s.ml_per_liter >= w.ml_per_liter);
        }
    }

    #[test]
    fn test_negative_strength_floors_to_zero() {
        let doses = calculate_fertilizer_doses(&plant(FeedingStageId::Flower, -25.0), 4.0);
        assert!(doses.iter().all(|d| d.ml == 0.0 && d.ml_per_liter == 0.0));
    }

    #[test]
    fn test_zero_water_gives_zero_totals() {
        let doses = calculate_fertilizer_doses(&plant(FeedingStageId::Grow, 100.0), 0.0);
        assert!(doses.iter().all(|d| d.ml == 0.0));
        assert!(doses.iter().any(|d| d.ml_per_liter > 0.0));
    }

    #[test]
    fn test_unknown_stage_yields_no_doses() {
        let mut p = plant(FeedingStageId::Grow, 100.0);
        p.stage_id = "bogus".to_string();
        assert!(calculate_fertilizer_doses(&p, 3.0).is_empty());
        assert!(calculate_additive_doses(&p, 3.0).is_empty());
    }

    #[test]
    fn test_inactive_additives_are_absent() {
        let p = plant(FeedingStageId::Grow, 75.0);
        let summary = calculate_additive_doses(&p, 3.0);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_stage_ineligible_additives_are_absent() {
        // Active root stimulant, but flowering stages don't allow it.
        let mut p = plant(FeedingStageId::Flower, 75.0);
        p.additives.root_stimulant.start(Utc::now());
        p.additives.fulvic_acid.start(Utc::now());

        let summary = calculate_additive_doses(&p, 3.0);
        assert!(summary.root_stimulant.is_none());
        assert!(summary.fulvic_acid.is_none());
    }

    #[test]
    fn test_root_stimulant_dose() {
        let mut p = plant(FeedingStageId::Seedling, 75.0);
        p.additives.root_stimulant.start(Utc::now());

        let summary = calculate_additive_doses(&p, 5.0);
        let root = summary.root_stimulant.unwrap();
        assert_eq!(root.ml_per_liter, 0.2);
        assert_eq!(root.total_ml, 1.0);
        assert!(root.intensity.is_none());
    }

    #[test]
    fn test_fulvic_dose_uses_intensity() {
        let mut p = plant(FeedingStageId::Preflower, 75.0);
        p.additives.fulvic_acid.start(Utc::now());
        p.additives.fulvic_acid.intensity = Some(50.0);

        let summary = calculate_additive_doses(&p, 10.0);
        let fulvic = summary.fulvic_acid.unwrap();
        assert_eq!(fulvic.intensity, Some(50.0));
        assert_eq!(fulvic.ml_per_liter, 0.15);
        assert_eq!(fulvic.total_ml, 1.5);
    }

    #[test]
    fn test_fulvic_intensity_defaults_to_full() {
        let mut p = plant(FeedingStageId::Grow, 75.0);
        p.additives.fulvic_acid.start(Utc::now());
        p.additives.fulvic_acid.intensity = None;

        let summary = calculate_additive_doses(&p, 1.0);
        let fulvic = summary.fulvic_acid.unwrap();
        assert_eq!(fulvic.intensity, Some(100.0));
        assert_eq!(fulvic.ml_per_liter, 0.3);
    }

    #[test]
    fn test_bloom_dose() {
        let mut p = plant(FeedingStageId::Flower, 75.0);
        p.additives.bloom_booster.adjust(70.0, Utc::now());

        let summary = calculate_additive_doses(&p, 4.0);
        let bloom = summary.bloom_booster.unwrap();
        assert_eq!(bloom.intensity, 70.0);
        assert_eq!(bloom.ml_per_liter, 1.4);
        assert_eq!(bloom.total_ml, 5.6);
    }

    #[test]
    fn test_bloom_omitted_at_zero_intensity() {
        let mut p = plant(FeedingStageId::Flower, 75.0);
        p.additives.bloom_booster.active = true;
        p.additives.bloom_booster.intensity = 0.0;

        let summary = calculate_additive_doses(&p, 4.0);
        assert!(summary.bloom_booster.is_none());
    }

    #[test]
    fn test_format_ml() {
        assert_eq!(format_ml(0.5), "0.50 ml");
        assert_eq!(format_ml(3.14159), "3.1 ml");
        assert_eq!(format_ml(42.9), "43 ml");
        assert_eq!(format_ml(0.0), "0.00 ml");
        assert_eq!(format_ml(1.0), "1.0 ml");
        assert_eq!(format_ml(9.99), "10.0 ml");
        assert_eq!(format_ml(10.0), "10 ml");
    }
}
