use chrono::{Local, NaiveDateTime};
use droneops_domain::{parse_all, Drone, Mission, Pilot, Record};
use droneops_store::{CsvStore, RecordStore, SheetsStore};
use std::sync::Arc;
use tracing::debug;

use crate::config::{Config, SheetLayout, StoreBackend};
use crate::error::ApiError;

/// Source of the evaluation instant for date-based rules
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub layout: SheetLayout,
    pub clock: Clock,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, layout: SheetLayout) -> Self {
        Self {
            store,
            layout,
            clock: local_now,
        }
    }

    /// Build the store the config names.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn RecordStore> = match &config.backend {
            StoreBackend::Sheets {
                spreadsheet_id,
                access_token,
                api_base,
            } => Arc::new(
                SheetsStore::new(spreadsheet_id.clone(), access_token.clone())
                    .with_api_base(api_base.clone()),
            ),
            StoreBackend::Csv { dir } => Arc::new(CsvStore::new(dir.clone())),
        };
        Self::new(store, config.layout.clone())
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub async fn pilot_records(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.store.read_range(&self.layout.pilots).await?)
    }

    pub async fn drone_records(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.store.read_range(&self.layout.drones).await?)
    }

    pub async fn mission_records(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.store.read_range(&self.layout.missions).await?)
    }

    /// Every roster row parsed strictly; one bad row fails the whole load.
    pub async fn pilots(&self) -> Result<Vec<Pilot>, ApiError> {
        let pilots = parse_all(&self.pilot_records().await?, Pilot::from_record)?;
        debug!(count = pilots.len(), "loaded pilots");
        Ok(pilots)
    }

    pub async fn drones(&self) -> Result<Vec<Drone>, ApiError> {
        let drones = parse_all(&self.drone_records().await?, Drone::from_record)?;
        debug!(count = drones.len(), "loaded drones");
        Ok(drones)
    }

    pub async fn missions(&self) -> Result<Vec<Mission>, ApiError> {
        let missions = parse_all(&self.mission_records().await?, Mission::from_record)?;
        debug!(count = missions.len(), "loaded missions");
        Ok(missions)
    }
}
