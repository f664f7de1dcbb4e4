//! Terra Mix Core Library
//!
//! Shared types and feeding logic for Terra Mix applications: the feeding
//! stage reference tables, the fertilizer/additive dose calculator, and the
//! plant-state normalizer that runs after every mutation.

pub mod dosing;
pub mod feeding;
pub mod models;
pub mod normalize;

pub use dosing::{
    calculate_additive_doses, calculate_fertilizer_doses, format_ml, AdditiveDose,
    AdditiveDoseSummary, BloomBoosterDose, FertilizerDose,
};
pub use feeding::{
    resolve_stage, FeedingStage, FeedingStageId, FertilizerId, FertilizerRate, UnknownStage,
    FEEDING_STAGES,
};
pub use models::{
    AdditivesState, BloomBoosterMode, BloomBoosterState, FulvicAcidState, PlantState,
    RootStimulantState, WateringLogEntry,
};
pub use normalize::{normalize_plant, normalize_plant_at};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
