//! Location-based pilot matching
//!
//! Quick ranking of available pilots for a mission by home location only.

use serde::{Deserialize, Serialize};

use crate::model::{Mission, Pilot};

/// Points for a pilot based in the mission's location
pub const SAME_LOCATION_SCORE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotMatch {
    pub score: u32,
    pub pilot: String,
}

/// Score available pilots against `mission`, best first.
///
/// Ordering is score descending, then name descending. Only name, status
/// and location are read here, but callers hand in fully parsed [`Pilot`]s,
/// so a roster row missing any pilot column is rejected before matching.
pub fn match_pilots(pilots: &[Pilot], mission: &Mission) -> Vec<PilotMatch> {
    let mut matches: Vec<PilotMatch> = pilots
        .iter()
        .filter(|p| p.is_available())
        .map(|p| PilotMatch {
            score: if p.location == mission.location {
                SAME_LOCATION_SCORE
            } else {
                0
            },
            pilot: p.name.clone(),
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.pilot.cmp(&a.pilot)));
    matches
}
