//! Service configuration
//!
//! Everything is read from environment variables; nothing about the
//! backing spreadsheet is compiled into the binary.

use droneops_store::{a1, RangeRef, StoreError};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PILOT_RANGE: &str = "pilot_roster!A1:Z";
pub const DEFAULT_DRONE_RANGE: &str = "drone_fleet!A1:Z";
pub const DEFAULT_MISSION_RANGE: &str = "missions!A1:Z";
/// Column holding pilot status on the roster template
pub const DEFAULT_PILOT_STATUS_COLUMN: &str = "G";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid range for {key}: {source}")]
    Range {
        key: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Where records are read from and written to
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sheets {
        spreadsheet_id: String,
        access_token: String,
        api_base: String,
    },
    Csv {
        dir: PathBuf,
    },
}

impl fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Sheets {
                spreadsheet_id,
                api_base,
                ..
            } => f
                .debug_struct("Sheets")
                .field("spreadsheet_id", spreadsheet_id)
                .field("access_token", &"<redacted>")
                .field("api_base", api_base)
                .finish(),
            StoreBackend::Csv { dir } => f.debug_struct("Csv").field("dir", dir).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Sheet ranges for each collection plus the status column used on writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub pilots: RangeRef,
    pub drones: RangeRef,
    pub missions: RangeRef,
    pub pilot_status_column: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            pilots: RangeRef::sheet("pilot_roster"),
            drones: RangeRef::sheet("drone_fleet"),
            missions: RangeRef::sheet("missions"),
            pilot_status_column: DEFAULT_PILOT_STATUS_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub backend: StoreBackend,
    pub layout: SheetLayout,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: "expected a port number".to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let backend = match get("STORE_BACKEND").as_deref().unwrap_or("sheets") {
            "sheets" => StoreBackend::Sheets {
                spreadsheet_id: require("SHEET_ID")?,
                access_token: require("GOOGLE_ACCESS_TOKEN")?,
                api_base: get("SHEETS_API_BASE")
                    .unwrap_or_else(|| droneops_store::sheets::DEFAULT_API_BASE.to_string()),
            },
            "csv" => StoreBackend::Csv {
                dir: PathBuf::from(require("CSV_DIR")?),
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: other.to_string(),
                    reason: "expected `sheets` or `csv`".to_string(),
                })
            }
        };

        let range = |key: &'static str, default: &str| -> Result<RangeRef, ConfigError> {
            get(key)
                .as_deref()
                .unwrap_or(default)
                .parse()
                .map_err(|source| ConfigError::Range { key, source })
        };

        let pilot_status_column =
            get("PILOT_STATUS_COLUMN").unwrap_or_else(|| DEFAULT_PILOT_STATUS_COLUMN.to_string());
        if a1::column_index(&pilot_status_column).is_none() {
            return Err(ConfigError::Invalid {
                key: "PILOT_STATUS_COLUMN",
                value: pilot_status_column,
                reason: "expected column letters".to_string(),
            });
        }

        let layout = SheetLayout {
            pilots: range("PILOT_RANGE", DEFAULT_PILOT_RANGE)?,
            drones: range("DRONE_RANGE", DEFAULT_DRONE_RANGE)?,
            missions: range("MISSION_RANGE", DEFAULT_MISSION_RANGE)?,
            pilot_status_column,
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected `text` or `json`".to_string(),
                })
            }
        };

        Ok(Config {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
            backend,
            layout,
            log_format,
        })
    }
}
