use log::warn;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

use crate::models::{CalendarEvent, WeeklySummary, YearlyPlan};

const EVENTS_KEY: &str = "calendar_events";
const SUMMARIES_KEY: &str = "calendar_summaries";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create storage directory: {0}")]
    DirectoryError(String),
    #[error("Failed to encode store value: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// Key-value persistence gateway. Each store serializes to JSON and lives
/// under its own key; events and summaries are global, the yearly plan is
/// keyed per year.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the backing database and initialize the schema
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(path)?;

        let storage = Storage { conn };
        storage.initialize_schema()?;

        Ok(storage)
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let result = self.conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    /// Persist the full event store under its key
    pub fn save_events(&self, events: &[CalendarEvent]) -> Result<(), StorageError> {
        self.write(EVENTS_KEY, &serde_json::to_string(events)?)
    }

    /// Load all events; a missing or corrupt value yields an empty store
    pub fn load_events(&self) -> Result<Vec<CalendarEvent>, StorageError> {
        match self.read(EVENTS_KEY)? {
            Some(raw) => Ok(decode_or_default(EVENTS_KEY, &raw)),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the full summary store under its key
    pub fn save_summaries(&self, summaries: &[WeeklySummary]) -> Result<(), StorageError> {
        self.write(SUMMARIES_KEY, &serde_json::to_string(summaries)?)
    }

    /// Load all weekly summaries; a missing or corrupt value yields an
    /// empty store
    pub fn load_summaries(&self) -> Result<Vec<WeeklySummary>, StorageError> {
        match self.read(SUMMARIES_KEY)? {
            Some(raw) => Ok(decode_or_default(SUMMARIES_KEY, &raw)),
            None => Ok(Vec::new()),
        }
    }

    /// Persist one year's plan under its per-year key
    pub fn save_yearly_plan(&self, plan: &YearlyPlan) -> Result<(), StorageError> {
        self.write(&plan_key(plan.year), &serde_json::to_string(plan)?)
    }

    /// Load the plan for a year; a missing or corrupt value yields the
    /// all-empty default for that year
    pub fn load_yearly_plan(&self, year: i32) -> Result<YearlyPlan, StorageError> {
        let key = plan_key(year);
        match self.read(&key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(plan) => Ok(plan),
                Err(e) => {
                    warn!("discarding corrupt value under `{}`: {}", key, e);
                    Ok(YearlyPlan::empty(year))
                }
            },
            None => Ok(YearlyPlan::empty(year)),
        }
    }
}

fn plan_key(year: i32) -> String {
    format!("yearly_plan_{}", year)
}

fn decode_or_default<T>(key: &str, raw: &str) -> Vec<T>
where
    T: DeserializeOwned,
{
    match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("discarding corrupt value under `{}`: {}", key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekKey;
    use tempfile::TempDir;

    fn open_storage(dir: &TempDir) -> Storage {
        Storage::new(&dir.path().join("planbook.db")).unwrap()
    }

    #[test]
    fn events_round_trip_including_empty_store() {
        let dir = TempDir::new().unwrap();
        let storage = open_storage(&dir);

        assert_eq!(storage.load_events().unwrap(), Vec::new());

        let events = vec![
            CalendarEvent::new("2024-05-01".into(), "Team sync".into(), Some("09:00".into())),
            CalendarEvent::new("2024-05-02".into(), "Review".into(), None),
        ];
        storage.save_events(&events).unwrap();
        assert_eq!(storage.load_events().unwrap(), events);

        storage.save_events(&[]).unwrap();
        assert_eq!(storage.load_events().unwrap(), Vec::new());
    }

    #[test]
    fn summaries_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = open_storage(&dir);

        let summaries = vec![WeeklySummary::new(
            WeekKey {
                year: 2024,
                month: 5,
                week: 0,
            },
            "Shipped v1".into(),
        )];
        storage.save_summaries(&summaries).unwrap();
        assert_eq!(storage.load_summaries().unwrap(), summaries);
    }

    #[test]
    fn yearly_plan_round_trips_and_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let storage = open_storage(&dir);

        assert_eq!(
            storage.load_yearly_plan(2024).unwrap(),
            YearlyPlan::empty(2024)
        );

        let mut plan = YearlyPlan::empty(2024);
        plan.goals = "run a marathon".into();
        storage.save_yearly_plan(&plan).unwrap();
        assert_eq!(storage.load_yearly_plan(2024).unwrap(), plan);

        // Other years stay independent.
        assert_eq!(
            storage.load_yearly_plan(2025).unwrap(),
            YearlyPlan::empty(2025)
        );
    }

    #[test]
    fn corrupt_values_load_as_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = open_storage(&dir);

        storage.write(EVENTS_KEY, "not json").unwrap();
        storage.write(SUMMARIES_KEY, "{\"wrong\": \"shape\"}").unwrap();
        storage.write(&plan_key(2024), "[]").unwrap();

        assert_eq!(storage.load_events().unwrap(), Vec::new());
        assert_eq!(storage.load_summaries().unwrap(), Vec::new());
        assert_eq!(
            storage.load_yearly_plan(2024).unwrap(),
            YearlyPlan::empty(2024)
        );
    }

    #[test]
    fn stores_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planbook.db");

        let events = vec![CalendarEvent::new(
            "2024-05-01".into(),
            "Team sync".into(),
            None,
        )];
        {
            let storage = Storage::new(&path).unwrap();
            storage.save_events(&events).unwrap();
        }

        let storage = Storage::new(&path).unwrap();
        assert_eq!(storage.load_events().unwrap(), events);
    }
}
