use crate::errors::PersistenceError;
use crate::models::Habit;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::warn;

/// Whole-document storage for the habit collection.
pub trait PersistenceAdapter {
    /// Stored habits in their saved order. Missing or malformed data loads as
    /// an empty collection; only an unreachable store is an error.
    fn load(&self) -> Result<Vec<Habit>, PersistenceError>;

    /// Replaces any previously stored collection with `habits`.
    fn save(&mut self, habits: &[Habit]) -> Result<(), PersistenceError>;
}

fn decode(bytes: &[u8], source: &str) -> Vec<Habit> {
    match serde_json::from_slice(bytes) {
        Ok(habits) => habits,
        Err(err) => {
            warn!("ignoring malformed habit data in {source}: {err}");
            Vec::new()
        }
    }
}

fn encode(habits: &[Habit]) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec_pretty(habits)?)
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistenceAdapter for JsonFileStore {
    fn load(&self) -> Result<Vec<Habit>, PersistenceError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(decode(&bytes, &self.path.display().to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, habits: &[Habit]) -> Result<(), PersistenceError> {
        let payload = encode(habits)?;
        let staging = self.staging_path();
        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// Keeps the serialized document in memory, for sessions without a disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Some(document.into()),
        }
    }

    pub fn document(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn load(&self) -> Result<Vec<Habit>, PersistenceError> {
        Ok(self
            .document
            .as_deref()
            .map(|bytes| decode(bytes, "memory"))
            .unwrap_or_default())
    }

    fn save(&mut self, habits: &[Habit]) -> Result<(), PersistenceError> {
        self.document = Some(encode(habits)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_key::DayKey;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample() -> Vec<Habit> {
        let mut first = Habit::new(
            "Meditate".to_string(),
            "#A855F7".to_string(),
            Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap(),
        );
        first
            .completed_dates
            .insert(DayKey::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        let second = Habit::new(
            "Read".to_string(),
            "#22C55E".to_string(),
            Utc.with_ymd_and_hms(2024, 6, 2, 7, 0, 0).unwrap(),
        );
        vec![first, second]
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("habits.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        fs::write(&path, b"{not json").unwrap();
        assert!(JsonFileStore::new(&path).load().unwrap().is_empty());

        fs::write(&path, br#"[{"id": "x", "name": "Read"}]"#).unwrap();
        assert!(JsonFileStore::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn impossible_day_key_keeps_the_rest_of_the_document() {
        let document = r##"[
            {"id": "a", "name": "Meditate", "color": "#A855F7",
             "createdAt": "2024-02-01T08:00:00Z",
             "completedDates": ["2024-02-28", "2024-02-30"]},
            {"id": "b", "name": "Read", "color": "#22C55E",
             "createdAt": "2024-02-01T08:00:00Z",
             "completedDates": ["2024-02-29"]}
        ]"##;
        let mut store = MemoryStore::with_document(document);

        let habits = store.load().unwrap();
        assert_eq!(habits.len(), 2);
        let kept: Vec<String> = habits[0]
            .completed_dates
            .iter()
            .map(DayKey::to_string)
            .collect();
        assert_eq!(kept, ["2024-02-28", "2024-02-30"]);

        store.save(&habits).unwrap();
        assert_eq!(store.load().unwrap(), habits);
    }

    #[test]
    fn file_save_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());

        let habits = sample();
        store.save(&habits).unwrap();
        assert_eq!(store.load().unwrap(), habits);

        store.save(&habits[1..]).unwrap();
        assert_eq!(store.load().unwrap(), habits[1..].to_vec());
        assert!(!store.staging_path().exists());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("absent").join("habits.json"));
        assert!(matches!(store.save(&sample()), Err(PersistenceError::Io(_))));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().is_err());
    }

    #[test]
    fn memory_store_keeps_order() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let habits = sample();
        store.save(&habits).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].name, "Meditate");
        assert_eq!(loaded[1].name, "Read");

        assert!(MemoryStore::with_document("garbage").load().unwrap().is_empty());
    }
}
