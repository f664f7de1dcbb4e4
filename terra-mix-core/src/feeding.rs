//! Feeding reference data: stages, base fertilizer rates, and additive
//! defaults.
//!
//! Everything in this module is immutable reference data. Stages are never
//! created or changed at runtime; plants point at them via their string id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default root stimulant course length, in whole days.
pub const ROOT_STIMULANT_DEFAULT_DURATION_DAYS: i64 = 14;
/// Default root stimulant dosage in ml per liter.
pub const ROOT_STIMULANT_DEFAULT_DOSAGE: f64 = 0.2;
/// Fulvic acid dosage at 100% intensity, in ml per liter.
pub const FULVIC_ACID_MAX_ML_PER_L: f64 = 0.3;
/// Default fulvic acid dosage in ml per liter.
pub const FULVIC_ACID_DEFAULT_DOSAGE: f64 = 0.3;
/// Intensity assumed when a fulvic acid record carries none.
pub const FULVIC_ACID_DEFAULT_INTENSITY: f64 = 100.0;
/// Bloom booster dosage at 100% intensity, in ml per liter.
pub const BLOOM_BOOSTER_MAX_ML_PER_L: f64 = 2.0;

/// Default feeding strength percentage for new plants.
pub const DEFAULT_STRENGTH: f64 = 75.0;
/// Default preferred water volume in liters for new plants.
pub const DEFAULT_WATER_LITERS: f64 = 3.0;

/// Names used when seeding an empty plant collection.
pub const INITIAL_PLANT_NAMES: &[&str] = &["Plant A", "Plant B", "Plant C"];

/// A base fertilizer component used in stage rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FertilizerId {
    Grow,
    Micro,
    Bloom,
    FinalPart,
}

impl FertilizerId {
    /// Display label for bottles / log output.
    pub fn label(self) -> &'static str {
        match self {
            FertilizerId::Grow => "TriPart Grow",
            FertilizerId::Micro => "TriPart Micro",
            FertilizerId::Bloom => "TriPart Bloom",
            FertilizerId::FinalPart => "Final Part",
        }
    }
}

impl fmt::Display for FertilizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FertilizerId::Grow => write!(f, "grow"),
            FertilizerId::Micro => write!(f, "micro"),
            FertilizerId::Bloom => write!(f, "bloom"),
            FertilizerId::FinalPart => write!(f, "finalPart"),
        }
    }
}

/// A named cultivation phase.
///
/// The variant order matches [`FEEDING_STAGES`], so `stage as usize` indexes
/// straight into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedingStageId {
    Seedling,
    EarlyGrow,
    Grow,
    Preflower,
    Flower,
    LateFlower,
    Ripen,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown feeding stage '{0}'. Valid stages: seedling, earlyGrow, grow, preflower, flower, lateFlower, ripen")]
pub struct UnknownStage(pub String);

impl FromStr for FeedingStageId {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seedling" => Ok(FeedingStageId::Seedling),
            "earlyGrow" => Ok(FeedingStageId::EarlyGrow),
            "grow" => Ok(FeedingStageId::Grow),
            "preflower" => Ok(FeedingStageId::Preflower),
            "flower" => Ok(FeedingStageId::Flower),
            "lateFlower" => Ok(FeedingStageId::LateFlower),
            "ripen" => Ok(FeedingStageId::Ripen),
            _ => Err(UnknownStage(s.to_string())),
        }
    }
}

impl fmt::Display for FeedingStageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedingStageId::Seedling => write!(f, "seedling"),
            FeedingStageId::EarlyGrow => write!(f, "earlyGrow"),
            FeedingStageId::Grow => write!(f, "grow"),
            FeedingStageId::Preflower => write!(f, "preflower"),
            FeedingStageId::Flower => write!(f, "flower"),
            FeedingStageId::LateFlower => write!(f, "lateFlower"),
            FeedingStageId::Ripen => write!(f, "ripen"),
        }
    }
}

impl FeedingStageId {
    /// The stage definition backing this id.
    pub fn stage(self) -> &'static FeedingStage {
        &FEEDING_STAGES[self as usize]
    }

    /// Recommended bloom booster intensity for this stage, in percent.
    pub fn bloom_recommendation(self) -> f64 {
        match self {
            FeedingStageId::Seedling => 0.0,
            FeedingStageId::EarlyGrow => 0.0,
            FeedingStageId::Grow => 10.0,
            FeedingStageId::Preflower => 40.0,
            FeedingStageId::Flower => 70.0,
            FeedingStageId::LateFlower => 85.0,
            FeedingStageId::Ripen => 40.0,
        }
    }

    /// Root stimulant only makes sense while the plant is still rooting in.
    pub fn allows_root_stimulant(self) -> bool {
        matches!(
            self,
            FeedingStageId::Seedling | FeedingStageId::EarlyGrow | FeedingStageId::Grow
        )
    }

    pub fn allows_fulvic_acid(self) -> bool {
        self.allows_root_stimulant() || self == FeedingStageId::Preflower
    }

    pub fn allows_bloom_booster(self) -> bool {
        matches!(
            self,
            FeedingStageId::Preflower
                | FeedingStageId::Flower
                | FeedingStageId::LateFlower
                | FeedingStageId::Ripen
        )
    }

    /// Stages where fulvic acid is forced off regardless of stored state.
    pub fn forces_fulvic_off(self) -> bool {
        matches!(
            self,
            FeedingStageId::Flower | FeedingStageId::LateFlower | FeedingStageId::Ripen
        )
    }
}

/// Base rate for one fertilizer component at 100% strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FertilizerRate {
    pub fertilizer: FertilizerId,
    pub ml_per_liter: f64,
}

const fn rate(fertilizer: FertilizerId, ml_per_liter: f64) -> FertilizerRate {
    FertilizerRate {
        fertilizer,
        ml_per_liter,
    }
}

/// A feeding stage definition: id, display name, and rate table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedingStage {
    pub id: FeedingStageId,
    pub name: &'static str,
    pub description: &'static str,
    pub rates: &'static [FertilizerRate],
}

/// All feeding stages in cultivation order.
pub const FEEDING_STAGES: &[FeedingStage] = &[
    FeedingStage {
        id: FeedingStageId::Seedling,
        name: "Seedlings",
        description: "Young plants just after germination. Gentle nutrition only.",
        rates: &[
            rate(FertilizerId::Grow, 0.6),
            rate(FertilizerId::Micro, 0.4),
            rate(FertilizerId::Bloom, 0.2),
        ],
    },
    FeedingStage {
        id: FeedingStageId::EarlyGrow,
        name: "Early Grow",
        description: "After transplant when roots are establishing.",
        rates: &[
            rate(FertilizerId::Grow, 1.2),
            rate(FertilizerId::Micro, 0.8),
            rate(FertilizerId::Bloom, 0.4),
        ],
    },
    FeedingStage {
        id: FeedingStageId::Grow,
        name: "Grow",
        description: "Full vegetative growth with balanced nitrogen.",
        rates: &[
            rate(FertilizerId::Grow, 1.8),
            rate(FertilizerId::Micro, 1.2),
            rate(FertilizerId::Bloom, 0.6),
        ],
    },
    FeedingStage {
        id: FeedingStageId::Preflower,
        name: "Preflower",
        description: "Transition period preparing for bloom.",
        rates: &[
            rate(FertilizerId::Grow, 1.4),
            rate(FertilizerId::Micro, 1.4),
            rate(FertilizerId::Bloom, 1.0),
        ],
    },
    FeedingStage {
        id: FeedingStageId::Flower,
        name: "Flower",
        description: "Primary flowering stack. Focus on bloom and micronutrients.",
        rates: &[
            rate(FertilizerId::Grow, 0.8),
            rate(FertilizerId::Micro, 1.6),
            rate(FertilizerId::Bloom, 2.4),
        ],
    },
    FeedingStage {
        id: FeedingStageId::LateFlower,
        name: "Late Flower",
        description: "Peak bloom bulk with reduced nitrogen.",
        rates: &[
            rate(FertilizerId::Grow, 0.6),
            rate(FertilizerId::Micro, 1.2),
            rate(FertilizerId::Bloom, 2.6),
        ],
    },
    FeedingStage {
        id: FeedingStageId::Ripen,
        name: "Ripen / Final",
        description: "Final ripening period before flush.",
        rates: &[rate(FertilizerId::FinalPart, 4.0)],
    },
];

/// Look up a stage by its string id.
///
/// Returns `None` for ids that do not name a known stage; callers treat that
/// as upstream data corruption, not an error to raise.
pub fn resolve_stage(id: &str) -> Option<&'static FeedingStage> {
    id.parse::<FeedingStageId>().ok().map(FeedingStageId::stage)
}
