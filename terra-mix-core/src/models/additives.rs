use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feeding::{
    FULVIC_ACID_DEFAULT_DOSAGE, FULVIC_ACID_DEFAULT_INTENSITY, ROOT_STIMULANT_DEFAULT_DOSAGE,
    ROOT_STIMULANT_DEFAULT_DURATION_DAYS,
};

/// Root stimulant: a time-limited course that the normalizer shuts off once
/// the configured number of days has elapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootStimulantState {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Course length in whole days. Zero means "use the default".
    pub duration_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_ml_per_liter: Option<f64>,
}

impl Default for RootStimulantState {
    fn default() -> Self {
        Self {
            active: false,
            start_date: None,
            duration_days: ROOT_STIMULANT_DEFAULT_DURATION_DAYS,
            dosage_ml_per_liter: Some(ROOT_STIMULANT_DEFAULT_DOSAGE),
        }
    }
}

impl RootStimulantState {
    pub fn duration_or_default(&self) -> i64 {
        if self.duration_days > 0 {
            self.duration_days
        } else {
            ROOT_STIMULANT_DEFAULT_DURATION_DAYS
        }
    }

    pub fn dosage_or_default(&self) -> f64 {
        self.dosage_ml_per_liter
            .unwrap_or(ROOT_STIMULANT_DEFAULT_DOSAGE)
    }

    /// Begin a course now.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.active = true;
        self.start_date = Some(now);
    }

    /// Stop the course, clearing the start marker.
    pub fn stop(&mut self) {
        self.active = false;
        self.start_date = None;
    }
}

/// Fulvic acid: intensity-driven dosage, locked off by late stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulvicAcidState {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Percentage 0-100 of the maximum fulvic dosage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_ml_per_liter: Option<f64>,
}

impl Default for FulvicAcidState {
    fn default() -> Self {
        Self {
            active: false,
            started_at: None,
            intensity: None,
            dosage_ml_per_liter: Some(FULVIC_ACID_DEFAULT_DOSAGE),
        }
    }
}

impl FulvicAcidState {
    pub fn intensity_or_default(&self) -> f64 {
        self.intensity.unwrap_or(FULVIC_ACID_DEFAULT_INTENSITY)
    }

    pub fn dosage_or_default(&self) -> f64 {
        self.dosage_ml_per_liter.unwrap_or(FULVIC_ACID_DEFAULT_DOSAGE)
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.active = true;
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.started_at = None;
    }
}

/// Who controls bloom booster intensity.
///
/// `Auto` means the normalizer overwrites intensity with the stage
/// recommendation on every pass. The first explicit adjustment latches the
/// state to `Manual`; there is no way back to `Auto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BloomBoosterMode {
    #[default]
    Auto,
    Manual { adjusted_at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BloomBoosterState {
    pub active: bool,
    /// Percentage 0-100 of the maximum bloom booster dosage.
    pub intensity: f64,
    pub mode: BloomBoosterMode,
}

impl BloomBoosterState {
    pub fn is_manual(&self) -> bool {
        matches!(self.mode, BloomBoosterMode::Manual { .. })
    }

    /// Explicit user adjustment. Latches the booster into manual mode.
    pub fn adjust(&mut self, intensity: f64, now: DateTime<Utc>) {
        self.intensity = intensity.clamp(0.0, 100.0);
        self.active = self.intensity > 0.0;
        self.mode = BloomBoosterMode::Manual { adjusted_at: now };
    }
}

/// The three additive subsystems attached to a plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdditivesState {
    pub root_stimulant: RootStimulantState,
    pub fulvic_acid: FulvicAcidState,
    pub bloom_booster: BloomBoosterState,
}
