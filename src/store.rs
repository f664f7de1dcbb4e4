use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use terra_mix_core::feeding::INITIAL_PLANT_NAMES;
use terra_mix_core::{normalize_plant, PlantState, WateringLogEntry};

/// The owning collaborator for the plant collection.
///
/// Persists all plants as one JSON document and runs every mutation through
/// the normalizer before it becomes visible: each operation applies a pure
/// transform to the plant value, normalizes the result, and then saves.
pub struct PlantStore {
    path: PathBuf,
    plants: Vec<PlantState>,
}

impl PlantStore {
    /// Open the store at `path`, creating and seeding it on first use.
    ///
    /// Stored plants are re-normalized on load so that time-based state
    /// (root stimulant decay) is current before anything reads it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let plants = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| StoreError::Read(path.clone(), e))?;
            let stored: Vec<PlantState> = serde_json::from_str(&contents)
                .map_err(|e| StoreError::Parse(path.clone(), e))?;
            stored.into_iter().map(normalize_plant).collect()
        } else {
            Vec::new()
        };

        let mut store = Self { path, plants };
        if store.plants.is_empty() {
            tracing::info!("seeding {} default plants", INITIAL_PLANT_NAMES.len());
            for name in INITIAL_PLANT_NAMES {
                store.plants.push(normalize_plant(PlantState::new(*name)));
            }
        }
        store.save()?;

        Ok(store)
    }

    pub fn plants(&self) -> &[PlantState] {
        &self.plants
    }

    /// Find a plant by uuid or (case-insensitive) name.
    pub fn find(&self, identifier: &str) -> Option<&PlantState> {
        if let Ok(id) = Uuid::parse_str(identifier) {
            return self.plants.iter().find(|p| p.id == id);
        }
        let lower = identifier.to_lowercase();
        self.plants.iter().find(|p| p.name.to_lowercase() == lower)
    }

    /// Create a new plant with default configuration.
    pub fn add_plant(&mut self, name: Option<String>) -> Result<&PlantState, StoreError> {
        let name = name.unwrap_or_else(|| format!("Plant {}", self.plants.len() + 1));
        let plant = normalize_plant(PlantState::new(name));
        tracing::info!(plant = %plant.id, name = %plant.name, "plant created");
        self.plants.push(plant);
        self.save()?;
        let index = self.plants.len() - 1;
        Ok(&self.plants[index])
    }

    /// Apply `transform` to the plant, then normalize and persist the result.
    ///
    /// This is the single mutation entry point: the transform is a pure
    /// value-to-value function and normalization is applied as an explicit
    /// second step.
    pub fn update_plant<F>(&mut self, id: Uuid, transform: F) -> Result<&PlantState, StoreError>
    where
        F: FnOnce(PlantState) -> PlantState,
    {
        let index = self.index_of(id)?;
        let plant = self.plants[index].clone();
        let updated = transform(plant);
        self.plants[index] = normalize_plant(updated);
        self.save()?;
        Ok(&self.plants[index])
    }

    /// Set or clear the archived marker.
    ///
    /// Archiving an already-archived plant keeps the original timestamp.
    pub fn archive_plant(&mut self, id: Uuid, archived: bool) -> Result<&PlantState, StoreError> {
        self.update_plant(id, |mut plant| {
            plant.archived_at = if archived {
                plant.archived_at.or_else(|| Some(Utc::now()))
            } else {
                None
            };
            plant
        })
    }

    pub fn delete_plant(&mut self, id: Uuid) -> Result<(), StoreError> {
        let index = self.index_of(id)?;
        let removed = self.plants.remove(index);
        tracing::info!(plant = %removed.id, name = %removed.name, "plant deleted");
        self.save()
    }

    /// Append a watering entry; normalization re-sorts the history.
    pub fn log_watering(
        &mut self,
        id: Uuid,
        entry: WateringLogEntry,
    ) -> Result<&PlantState, StoreError> {
        self.update_plant(id, |mut plant| {
            plant.logs.insert(0, entry);
            plant
        })
    }

    /// Replace fields of an existing log entry through `transform`.
    pub fn update_watering_log<F>(
        &mut self,
        plant_id: Uuid,
        log_id: Uuid,
        transform: F,
    ) -> Result<&PlantState, StoreError>
    where
        F: FnOnce(WateringLogEntry) -> WateringLogEntry,
    {
        let index = self.index_of(plant_id)?;
        let log_index = self.plants[index]
            .logs
            .iter()
            .position(|l| l.id == log_id)
            .ok_or(StoreError::LogNotFound(log_id))?;

        let mut plant = self.plants[index].clone();
        let entry = plant.logs.remove(log_index);
        plant.logs.insert(log_index, transform(entry));
        self.plants[index] = normalize_plant(plant);
        self.save()?;
        Ok(&self.plants[index])
    }

    pub fn delete_watering_log(&mut self, plant_id: Uuid, log_id: Uuid) -> Result<(), StoreError> {
        let index = self.index_of(plant_id)?;
        let len_before = self.plants[index].logs.len();

        let mut plant = self.plants[index].clone();
        plant.logs.retain(|l| l.id != log_id);
        if plant.logs.len() == len_before {
            return Err(StoreError::LogNotFound(log_id));
        }
        self.plants[index] = normalize_plant(plant);
        self.save()
    }

    fn index_of(&self, id: Uuid) -> Result<usize, StoreError> {
        self.plants
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::PlantNotFound(id))
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Write(self.path.clone(), e))?;
        }
        let contents = serde_json::to_string_pretty(&self.plants)
            .map_err(|e| StoreError::Parse(self.path.clone(), e))?;
        std::fs::write(&self.path, contents).map_err(|e| StoreError::Write(self.path.clone(), e))
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug)]
pub enum StoreError {
    Read(PathBuf, std::io::Error),
    Write(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
    PlantNotFound(Uuid),
    LogNotFound(Uuid),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Read(path, e) => {
                write!(f, "Failed to read plant store '{}': {}", path.display(), e)
            }
            StoreError::Write(path, e) => {
                write!(f, "Failed to write plant store '{}': {}", path.display(), e)
            }
            StoreError::Parse(path, e) => {
                write!(f, "Invalid plant store '{}': {}", path.display(), e)
            }
            StoreError::PlantNotFound(id) => write!(f, "Plant not found: {}", id),
            StoreError::LogNotFound(id) => write!(f, "Watering log entry not found: {}", id),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;
    use terra_mix_core::FeedingStageId;

    fn open_store(dir: &tempfile::TempDir) -> PlantStore {
        PlantStore::open(dir.path().join("plants.json")).unwrap()
    }

    #[test]
    fn test_open_seeds_default_plants() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let names: Vec<_> = store.plants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Plant A", "Plant B", "Plant C"]);
    }

    #[test]
    fn test_reopen_keeps_plants() {
        let dir = tempdir().unwrap();
        let id = {
            let mut store = open_store(&dir);
            store.add_plant(Some("Rosemary".to_string())).unwrap().id
        };

        let store = open_store(&dir);
        assert_eq!(store.plants().len(), 4);
        assert!(store.plants().iter().any(|p| p.id == id));
    }

    #[test]
    fn test_find_by_id_and_name() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.add_plant(Some("Thyme".to_string())).unwrap().id;

        assert_eq!(store.find(&id.to_string()).unwrap().name, "Thyme");
        assert_eq!(store.find("thyme").unwrap().id, id);
        assert!(store.find("missing").is_none());
    }

    #[test]
    fn test_update_plant_normalizes() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.plants()[0].id;

        // Moving to flower should pull in the stage's bloom recommendation.
        let plant = store
            .update_plant(id, |plant| plant.with_stage(FeedingStageId::Flower))
            .unwrap();
        assert_eq!(plant.additives.bloom_booster.intensity, 70.0);
        assert!(plant.additives.bloom_booster.active);
    }

    #[test]
    fn test_update_missing_plant_fails() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        let result = store.update_plant(Uuid::new_v4(), |p| p);
        assert!(matches!(result, Err(StoreError::PlantNotFound(_))));
    }

    #[test]
    fn test_archive_keeps_original_timestamp() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.plants()[0].id;

        let first = store.archive_plant(id, true).unwrap().archived_at.unwrap();
        let second = store.archive_plant(id, true).unwrap().archived_at.unwrap();
        assert_eq!(first, second);

        let cleared = store.archive_plant(id, false).unwrap();
        assert!(cleared.archived_at.is_none());
    }

    #[test]
    fn test_delete_plant() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.plants()[0].id;

        store.delete_plant(id).unwrap();
        assert_eq!(store.plants().len(), 2);
        assert!(matches!(
            store.delete_plant(id),
            Err(StoreError::PlantNotFound(_))
        ));
    }

    #[test]
    fn test_log_watering_sorts_history() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.plants()[0].id;
        let now = Utc::now();

        let older = WateringLogEntry::new("seedling", 75.0, 3.0)
            .with_created_at(now - Duration::days(2));
        let newer = WateringLogEntry::new("seedling", 75.0, 3.0).with_created_at(now);

        // Insert newest first, then an older one; history must stay sorted.
        store.log_watering(id, newer.clone()).unwrap();
        let plant = store.log_watering(id, older).unwrap();
        assert_eq!(plant.logs.len(), 2);
        assert_eq!(plant.logs[0].id, newer.id);
    }

    #[test]
    fn test_update_watering_log() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.plants()[0].id;

        let entry = WateringLogEntry::new("seedling", 75.0, 3.0);
        let log_id = entry.id;
        store.log_watering(id, entry).unwrap();

        let plant = store
            .update_watering_log(id, log_id, |entry| entry.with_ph(6.4))
            .unwrap();
        assert_eq!(plant.logs[0].ph, Some(6.4));

        let result = store.update_watering_log(id, Uuid::new_v4(), |e| e);
        assert!(matches!(result, Err(StoreError::LogNotFound(_))));
    }

    #[test]
    fn test_delete_watering_log() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        let id = store.plants()[0].id;

        let entry = WateringLogEntry::new("seedling", 75.0, 3.0);
        let log_id = entry.id;
        store.log_watering(id, entry).unwrap();

        store.delete_watering_log(id, log_id).unwrap();
        assert!(store.find(&id.to_string()).unwrap().logs.is_empty());
        assert!(matches!(
            store.delete_watering_log(id, log_id),
            Err(StoreError::LogNotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plants.json");
        std::fs::write(&path, "not json").unwrap();

        let result = PlantStore::open(path);
        assert!(matches!(result, Err(StoreError::Parse(_, _))));
    }
}
