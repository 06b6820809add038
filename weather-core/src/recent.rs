//! Recently searched cities: at most five, unique, most recent first.

use anyhow::{Context, Result};
use std::{fmt::Debug, fs, path::PathBuf};

pub const MAX_RECENT: usize = 5;

/// Where the recent list is kept between runs.
pub trait RecentStore: Send + Sync + Debug {
    fn load(&self) -> Result<Vec<String>>;
    fn save(&self, cities: &[String]) -> Result<()>;
}

/// Keeps nothing; history starts empty each run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore;

impl RecentStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn save(&self, _cities: &[String]) -> Result<()> {
        Ok(())
    }
}

/// JSON array of city names on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecentStore for FileStore {
    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read recent cities: {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse recent cities: {}", self.path.display()))
    }

    fn save(&self, cities: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(cities)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write recent cities: {}", self.path.display()))
    }
}

#[derive(Debug)]
pub struct RecentCities {
    cities: Vec<String>,
    store: Box<dyn RecentStore>,
}

impl RecentCities {
    /// Start from whatever the store holds. A store that cannot be read
    /// yields an empty list.
    pub fn new(store: Box<dyn RecentStore>) -> Self {
        let mut cities = store.load().unwrap_or_else(|err| {
            tracing::warn!("Could not load recent cities: {err:#}");
            Vec::new()
        });
        dedup_in_order(&mut cities);
        cities.truncate(MAX_RECENT);
        Self { cities, store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore))
    }

    /// Insert `city` at the front unless an identical entry exists.
    /// Returns whether the list changed.
    pub fn record(&mut self, city: &str) -> bool {
        if self.cities.iter().any(|c| c == city) {
            return false;
        }
        self.cities.insert(0, city.to_string());
        self.cities.truncate(MAX_RECENT);

        if let Err(err) = self.store.save(&self.cities) {
            tracing::warn!("Could not save recent cities: {err:#}");
        }
        true
    }

    pub fn list(&self) -> &[String] {
        &self.cities
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }
}

fn dedup_in_order(cities: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(cities.len());
    cities.retain(|c| {
        if seen.contains(c) {
            false
        } else {
            seen.push(c.clone());
            true
        }
    });
}
