use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::dosing::{format_ml, AdditiveDoseSummary, FertilizerDose};

/// One watering event, with the doses that were mixed at the time.
///
/// Entries are historical records: the stage and strength are captured when
/// the entry is created and do not follow the plant's later configuration.
/// Edits go through the store's explicit edit operation, which replaces
/// fields and recomputes the dose snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WateringLogEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub water_liters: f64,
    pub strength: f64,
    pub stage_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec: Option<f64>,
    #[serde(default)]
    pub fertilizers: Vec<FertilizerDose>,
    #[serde(default)]
    pub additives: AdditiveDoseSummary,
}

impl WateringLogEntry {
    pub fn new(stage_id: impl Into<String>, strength: f64, water_liters: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            water_liters,
            strength,
            stage_id: stage_id.into(),
            ph: None,
            ec: None,
            fertilizers: Vec::new(),
            additives: AdditiveDoseSummary::default(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }

    pub fn with_ec(mut self, ec: f64) -> Self {
        self.ec = Some(ec);
        self
    }

    pub fn with_fertilizers(mut self, fertilizers: Vec<FertilizerDose>) -> Self {
        self.fertilizers = fertilizers;
        self
    }

    pub fn with_additives(mut self, additives: AdditiveDoseSummary) -> Self {
        self.additives = additives;
        self
    }
}

impl fmt::Display for WateringLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Watering {} - {} L at {}% ({})",
            self.created_at.format("%Y-%m-%d %H:%M"),
            self.water_liters,
            self.strength,
            self.stage_id
        )?;

        if let Some(ph) = self.ph {
            writeln!(f, "pH: {}", ph)?;
        }
        if let Some(ec) = self.ec {
            writeln!(f, "EC: {}", ec)?;
        }

        if !self.fertilizers.is_empty() {
            writeln!(f, "Fertilizers:")?;
            for dose in &self.fertilizers {
                writeln!(
                    f,
                    "  - {}: {} ({} per L)",
                    dose.label,
                    format_ml(dose.ml),
                    format_ml(dose.ml_per_liter)
                )?;
            }
        }

        if let Some(root) = &self.additives.root_stimulant {
            writeln!(f, "Root stimulant: {}", format_ml(root.total_ml))?;
        }
        if let Some(fulvic) = &self.additives.fulvic_acid {
            writeln!(f, "Fulvic acid: {}", format_ml(fulvic.total_ml))?;
        }
        if let Some(bloom) = &self.additives.bloom_booster {
            writeln!(
                f,
                "Bloom booster: {} ({}%)",
                format_ml(bloom.total_ml),
                bloom.intensity
            )?;
        }

        Ok(())
    }
}
