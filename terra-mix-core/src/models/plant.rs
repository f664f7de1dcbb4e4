use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::feeding::{self, FeedingStage, FeedingStageId, DEFAULT_STRENGTH, DEFAULT_WATER_LITERS};

use super::additives::AdditivesState;
use super::watering_log::WateringLogEntry;

/// A cultivated plant: feeding configuration, additive state, and watering
/// history.
///
/// The stage is kept as a string id rather than a [`FeedingStageId`] so that
/// a stored blob referencing a stage this build does not know about still
/// loads; resolution happens through [`PlantState::stage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    pub id: Uuid,
    pub name: String,
    pub stage_id: String,
    /// Percentage of the stage's base rates, e.g. 80 -> 80%.
    pub strength: f64,
    pub preferred_water_liters: f64,
    #[serde(default)]
    pub additives: AdditivesState,
    /// Watering history, newest first.
    #[serde(default)]
    pub logs: Vec<WateringLogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl PlantState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            stage_id: FeedingStageId::Seedling.to_string(),
            strength: DEFAULT_STRENGTH,
            preferred_water_liters: DEFAULT_WATER_LITERS,
            additives: AdditivesState::default(),
            logs: Vec::new(),
            archived_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_stage(mut self, stage: FeedingStageId) -> Self {
        self.stage_id = stage.to_string();
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_water_liters(mut self, liters: f64) -> Self {
        self.preferred_water_liters = liters;
        self
    }

    /// Resolve the current feeding stage, if the id is known.
    pub fn stage(&self) -> Option<&'static FeedingStage> {
        feeding::resolve_stage(&self.stage_id)
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Most recent watering, assuming logs are normalized (newest first).
    pub fn last_watering(&self) -> Option<&WateringLogEntry> {
        self.logs.first()
    }
}

impl fmt::Display for PlantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        match self.stage() {
            Some(stage) => writeln!(f, "Stage: {} ({})", stage.name, stage.id)?,
            None => writeln!(f, "Stage: {} (unknown)", self.stage_id)?,
        }
        writeln!(f, "Strength: {}%", self.strength)?;
        writeln!(f, "Water: {} L", self.preferred_water_liters)?;

        if self.additives.root_stimulant.active {
            writeln!(f, "Root stimulant: active")?;
        }
        if self.additives.fulvic_acid.active {
            writeln!(f, "Fulvic acid: active")?;
        }
        if self.additives.bloom_booster.active {
            writeln!(
                f,
                "Bloom booster: {}%{}",
                self.additives.bloom_booster.intensity,
                if self.additives.bloom_booster.is_manual() {
                    " (manual)"
                } else {
                    ""
                }
            )?;
        }

        if let Some(archived_at) = self.archived_at {
            writeln!(f, "Archived: {}", archived_at.format("%Y-%m-%d"))?;
        }
        writeln!(f, "Waterings logged: {}", self.logs.len())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_new_defaults() {
        let plant = PlantState::new("Plant A");

        assert_eq!(plant.name, "Plant A");
        assert_eq!(plant.stage_id, "seedling");
        assert_eq!(plant.strength, 75.0);
        assert_eq!(plant.preferred_water_liters, 3.0);
        assert!(plant.logs.is_empty());
        assert!(plant.archived_at.is_none());
        assert!(!plant.additives.root_stimulant.active);
    }

    #[test]
    fn test_plant_builders() {
        let plant = PlantState::new("P")
            .with_stage(FeedingStageId::Flower)
            .with_strength(50.0)
            .with_water_liters(4.0);

        assert_eq!(plant.stage_id, "flower");
        assert_eq!(plant.strength, 50.0);
        assert_eq!(plant.preferred_water_liters, 4.0);
    }

    #[test]
    fn test_plant_stage_resolution() {
        let plant = PlantState::new("P").with_stage(FeedingStageId::Ripen);
        assert_eq!(plant.stage().unwrap().id, FeedingStageId::Ripen);

        let mut corrupt = plant.clone();
        corrupt.stage_id = "vortex".to_string();
        assert!(corrupt.stage().is_none());
    }

    #[test]
    fn test_plant_display() {
        let plant = PlantState::new("Basil").with_stage(FeedingStageId::Grow);
        let output = format!("{}", plant);
        assert!(output.contains("Basil"));
        assert!(output.contains("Grow"));
        assert!(output.contains("75%"));
    }

    #[test]
    fn test_plant_json_roundtrip() {
        let plant = PlantState::new("Plant B").with_stage(FeedingStageId::Preflower);
        let json = serde_json::to_string(&plant).unwrap();
        let parsed: PlantState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plant);
    }

    #[test]
    fn test_plant_with_unknown_stage_still_loads() {
        let plant = PlantState::new("P");
        let mut json: serde_json::Value = serde_json::to_value(&plant).unwrap();
        json["stage_id"] = serde_json::Value::String("retired-stage".to_string());

        let parsed: PlantState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.stage_id, "retired-stage");
        assert!(parsed.stage().is_none());
    }
}
