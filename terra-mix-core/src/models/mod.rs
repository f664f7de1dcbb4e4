mod additives;
mod plant;
mod watering_log;

pub use additives::{
    AdditivesState, BloomBoosterMode, BloomBoosterState, FulvicAcidState, RootStimulantState,
};
pub use plant::PlantState;
pub use watering_log::WateringLogEntry;
