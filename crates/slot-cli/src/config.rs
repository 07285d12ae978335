//! Runtime configuration: CLI flags layered over environment variables
//! (optionally loaded from `.env`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use slot_engine::generator::{DEFAULT_BUSINESS_END_HOUR, DEFAULT_BUSINESS_START_HOUR};
use slot_engine::{BusinessHours, InMemoryStore};

#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: Option<PathBuf>,
    pub today: NaiveDate,
    /// Overrides the store's default opening window when set.
    pub business_hours: Option<BusinessHours>,
    pub json: bool,
}

impl Config {
    pub fn new(
        store_path: Option<PathBuf>,
        today: Option<NaiveDate>,
        open_hour: Option<u32>,
        close_hour: Option<u32>,
        json: bool,
    ) -> Result<Self> {
        let business_hours = match (open_hour, close_hour) {
            (None, None) => None,
            (open, close) => {
                let open = open.unwrap_or(DEFAULT_BUSINESS_START_HOUR);
                let close = close.unwrap_or(DEFAULT_BUSINESS_END_HOUR);
                Some(BusinessHours::new(open, close).context("Invalid business hours")?)
            }
        };

        Ok(Self {
            store_path,
            today: today.unwrap_or_else(|| Local::now().date_naive()),
            business_hours,
            json,
        })
    }

    /// Load the store snapshot named by `--store` / `SLOTS_STORE`.
    pub fn load_store(&self) -> Result<InMemoryStore> {
        let path = self
            .store_path
            .as_ref()
            .context("No store snapshot given: pass --store or set SLOTS_STORE")?;
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read store: {}", path.display()))?;
        let mut store = InMemoryStore::from_json(&json)
            .with_context(|| format!("Failed to load store: {}", path.display()))?;

        if let Some(hours) = self.business_hours {
            store.business_hours = hours;
        }
        tracing::debug!(
            path = %path.display(),
            packages = store.packages.len(),
            addons = store.addons.len(),
            bookings = store.bookings.len(),
            "loaded store snapshot"
        );
        Ok(store)
    }
}
