//! Domain model types
//!
//! Typed pilot, drone and mission rows. Each is parsed once from a
//! [`Record`] so the engines never touch raw column names.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::record::Record;
use crate::tokens::TokenSet;

/// Cell values that mean "no current assignment"
pub const UNASSIGNED_SENTINELS: [&str; 3] = ["", "-", "\u{2013}"];

/// Column headers shared by the roster, fleet and mission sheets
pub mod columns {
    pub const NAME: &str = "name";
    pub const STATUS: &str = "status";
    pub const LOCATION: &str = "location";
    pub const SKILLS: &str = "skills";
    pub const CERTIFICATIONS: &str = "certifications";
    pub const CURRENT_ASSIGNMENT: &str = "current_assignment";
    pub const DRONE_ID: &str = "drone_id";
    pub const PROJECT_ID: &str = "project_id";
    pub const REQUIRED_SKILLS: &str = "required_skills";
    pub const REQUIRED_CERTS: &str = "required_certs";
    pub const END_DATE: &str = "end_date";
    pub const PRIORITY: &str = "priority";
}

/// Pilot roster status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilotStatus {
    Available,
    Assigned,
    /// Any other roster value, kept verbatim (e.g. "On Leave")
    Other(String),
}

impl From<&str> for PilotStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "Available" => PilotStatus::Available,
            "Assigned" => PilotStatus::Assigned,
            other => PilotStatus::Other(other.to_string()),
        }
    }
}

/// Mission priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPriority {
    Urgent,
    Other(String),
}

impl From<&str> for MissionPriority {
    fn from(raw: &str) -> Self {
        match raw {
            "Urgent" => MissionPriority::Urgent,
            other => MissionPriority::Other(other.to_string()),
        }
    }
}

/// Project a pilot or drone is currently attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignment {
    Unassigned,
    Project(String),
}

impl Assignment {
    /// Trim the cell and map the placeholder sentinels to [`Assignment::Unassigned`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if UNASSIGNED_SENTINELS.contains(&trimmed) {
            Assignment::Unassigned
        } else {
            Assignment::Project(trimmed.to_string())
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            Assignment::Unassigned => None,
            Assignment::Project(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pilot {
    pub name: String,
    pub status: PilotStatus,
    pub location: String,
    pub skills: TokenSet,
    pub certifications: TokenSet,
    pub current_assignment: Assignment,
}

impl Pilot {
    const ENTITY: &'static str = "pilot";

    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.field(Self::ENTITY, columns::NAME)?.to_string(),
            status: PilotStatus::from(record.field(Self::ENTITY, columns::STATUS)?),
            location: record.field(Self::ENTITY, columns::LOCATION)?.to_string(),
            skills: TokenSet::parse(record.field(Self::ENTITY, columns::SKILLS)?),
            certifications: TokenSet::parse(record.field(Self::ENTITY, columns::CERTIFICATIONS)?),
            // Rosters without the column list nobody as assigned.
            current_assignment: Assignment::parse(
                record.get(columns::CURRENT_ASSIGNMENT).unwrap_or_default(),
            ),
        })
    }

    pub fn is_available(&self) -> bool {
        self.status == PilotStatus::Available
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drone {
    pub drone_id: String,
    /// Raw fleet status, compared exactly by the conflict scan
    pub status: String,
    pub location: String,
    pub current_assignment: Assignment,
}

impl Drone {
    const ENTITY: &'static str = "drone";

    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            drone_id: record.field(Self::ENTITY, columns::DRONE_ID)?.to_string(),
            status: record.field(Self::ENTITY, columns::STATUS)?.to_string(),
            location: record.field(Self::ENTITY, columns::LOCATION)?.to_string(),
            current_assignment: Assignment::parse(
                record.field(Self::ENTITY, columns::CURRENT_ASSIGNMENT)?,
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    /// Whitespace-trimmed project key
    pub project_id: String,
    pub location: String,
    pub required_skills: TokenSet,
    pub required_certs: TokenSet,
    /// Raw end date cell; see [`Mission::end_date`]
    pub end_date: String,
    pub priority: MissionPriority,
}

impl Mission {
    const ENTITY: &'static str = "mission";

    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            project_id: record
                .field(Self::ENTITY, columns::PROJECT_ID)?
                .trim()
                .to_string(),
            location: record.field(Self::ENTITY, columns::LOCATION)?.to_string(),
            required_skills: TokenSet::parse(record.field(Self::ENTITY, columns::REQUIRED_SKILLS)?),
            required_certs: TokenSet::parse(record.field(Self::ENTITY, columns::REQUIRED_CERTS)?),
            end_date: record.field(Self::ENTITY, columns::END_DATE)?.to_string(),
            priority: MissionPriority::from(record.field(Self::ENTITY, columns::PRIORITY)?),
        })
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == MissionPriority::Urgent
    }

    /// Parse the end date as an ISO calendar date or date-time.
    ///
    /// A bare date means midnight at the start of that day.
    pub fn end_date(&self) -> Result<NaiveDateTime> {
        parse_iso_datetime(&self.end_date).ok_or_else(|| DomainError::MalformedDate {
            project_id: self.project_id.clone(),
            value: self.end_date.clone(),
        })
    }
}

fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Parse every record, failing on the first malformed row.
pub fn parse_all<T>(
    records: &[Record],
    parse: impl Fn(&Record) -> Result<T>,
) -> Result<Vec<T>> {
    records.iter().map(parse).collect()
}

/// First mission whose project id matches `project_id` after trimming.
pub fn find_mission<'a>(project_id: &str, missions: &'a [Mission]) -> Option<&'a Mission> {
    let wanted = project_id.trim();
    missions.iter().find(|m| m.project_id == wanted)
}
