//! Domain module for DroneOps
//!
//! This crate contains pure domain logic with no I/O dependencies:
//! - Sheet records and their typed pilot, drone and mission views
//! - Location matching and pilot recommendation scoring
//! - Assignment conflict detection

pub mod conflicts;
pub mod error;
pub mod matching;
pub mod model;
pub mod recommend;
pub mod record;
pub mod rules;
pub mod tokens;

pub use conflicts::{scan_conflicts, Conflict};
pub use error::{DomainError, Result};
pub use matching::{match_pilots, PilotMatch};
pub use model::{
    find_mission, parse_all, Assignment, Drone, Mission, MissionPriority, Pilot, PilotStatus,
};
pub use recommend::{rank_pilots, recommend_pilot, score_pilot, RankedPilot, Recommendation};
pub use record::Record;
pub use rules::{dates_overlap, is_in_maintenance};
pub use tokens::TokenSet;
