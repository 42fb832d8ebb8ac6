//! Pilot recommendation for a single mission
//!
//! Scores every available pilot on skill overlap, certification overlap and
//! location, with an extra location bonus for urgent missions.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::model::{find_mission, Mission, Pilot};

/// Points per required skill the pilot holds
pub const SKILL_WEIGHT: u32 = 2;
/// Points per required certification the pilot holds
pub const CERT_WEIGHT: u32 = 3;
/// Points for a pilot based in the mission's location
pub const LOCATION_BONUS: u32 = 5;
/// Further points for a same-location pilot on an urgent mission
pub const URGENT_LOCATION_BONUS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPilot {
    pub pilot: String,
    pub score: u32,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub project_id: String,
    pub recommended_pilot: Option<RankedPilot>,
    pub all_matches: Vec<RankedPilot>,
}

/// Score one pilot against one mission.
pub fn score_pilot(pilot: &Pilot, mission: &Mission) -> u32 {
    let skills = mission.required_skills.overlap(&pilot.skills) as u32;
    let certs = mission.required_certs.overlap(&pilot.certifications) as u32;

    let mut score = skills * SKILL_WEIGHT + certs * CERT_WEIGHT;

    if pilot.location == mission.location {
        score += LOCATION_BONUS;
        if mission.is_urgent() {
            score += URGENT_LOCATION_BONUS;
        }
    }

    score
}

/// Rank available pilots for `mission`. Pilots scoring zero are dropped;
/// equal scores keep roster order.
pub fn rank_pilots(pilots: &[Pilot], mission: &Mission) -> Vec<RankedPilot> {
    let mut ranked: Vec<RankedPilot> = pilots
        .iter()
        .filter(|p| p.is_available())
        .filter_map(|p| {
            let score = score_pilot(p, mission);
            (score > 0).then(|| RankedPilot {
                pilot: p.name.clone(),
                score,
                location: p.location.clone(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Look up `project_id` and recommend the best available pilot for it.
///
/// The response echoes `project_id` as given by the caller.
pub fn recommend_pilot(
    project_id: &str,
    pilots: &[Pilot],
    missions: &[Mission],
) -> Result<Recommendation> {
    let mission = find_mission(project_id, missions)
        .ok_or_else(|| DomainError::MissionNotFound(project_id.to_string()))?;

    let all_matches = rank_pilots(pilots, mission);

    Ok(Recommendation {
        project_id: project_id.to_string(),
        recommended_pilot: all_matches.first().cloned(),
        all_matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, MissionPriority, PilotStatus};
    use crate::tokens::TokenSet;

    fn pilot(name: &str, skills: &str, certs: &str, location: &str) -> Pilot {
        Pilot {
            name: name.to_string(),
            status: PilotStatus::Available,
            location: location.to_string(),
            skills: TokenSet::parse(skills),
            certifications: TokenSet::parse(certs),
            current_assignment: Assignment::Unassigned,
        }
    }

    fn mission(priority: &str) -> Mission {
        Mission {
            project_id: "PRJ001".to_string(),
            location: "Austin".to_string(),
            required_skills: TokenSet::parse("Thermal"),
            required_certs: TokenSet::parse("Part107"),
            end_date: "2026-02-08".to_string(),
            priority: MissionPriority::from(priority),
        }
    }

    #[test]
    fn test_urgent_same_city_score() {
        let p = pilot("Dana", "Thermal, Night", "Part107", "Austin");
        assert_eq!(score_pilot(&p, &mission("Urgent")), 15);
    }

    #[test]
    fn test_non_urgent_same_city_score() {
        let p = pilot("Dana", "Thermal, Night", "Part107", "Austin");
        assert_eq!(score_pilot(&p, &mission("High")), 10);
    }

    #[test]
    fn test_urgent_bonus_needs_same_city() {
        let p = pilot("Eli", "Thermal", "Part107", "Dallas");
        assert_eq!(score_pilot(&p, &mission("Urgent")), 5);
    }

    #[test]
    fn test_zero_score_and_unavailable_are_excluded() {
        let mut busy = pilot("Busy", "Thermal", "Part107", "Austin");
        busy.status = PilotStatus::Assigned;
        let pilots = vec![
            pilot("Nobody", "Mapping", "DGCA", "Dallas"),
            busy,
            pilot("Fit", "Thermal", "DGCA", "Dallas"),
        ];

        let ranked = rank_pilots(&pilots, &mission("Urgent"));
        assert_eq!(
            ranked,
            vec![RankedPilot {
                pilot: "Fit".to_string(),
                score: 2,
                location: "Dallas".to_string(),
            }]
        );
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let pilots = vec![
            pilot("Zed", "Thermal", "DGCA", "Dallas"),
            pilot("Top", "Thermal", "Part107", "Austin"),
            pilot("Amy", "Thermal", "DGCA", "Dallas"),
        ];

        let names: Vec<_> = rank_pilots(&pilots, &mission("High"))
            .into_iter()
            .map(|r| r.pilot)
            .collect();
        assert_eq!(names, ["Top", "Zed", "Amy"]);
    }

    #[test]
    fn test_recommend_picks_top_match() {
        let pilots = vec![
            pilot("Low", "Thermal", "DGCA", "Dallas"),
            pilot("High", "Thermal", "Part107", "Austin"),
        ];

        let rec = recommend_pilot(" PRJ001 ", &pilots, &[mission("Urgent")]).unwrap();
        assert_eq!(rec.project_id, " PRJ001 ");
        assert_eq!(rec.recommended_pilot.as_ref().unwrap().pilot, "High");
        assert_eq!(rec.all_matches.len(), 2);
    }

    #[test]
    fn test_recommend_without_candidates() {
        let pilots = vec![pilot("Nobody", "Mapping", "DGCA", "Dallas")];
        let rec = recommend_pilot("PRJ001", &pilots, &[mission("High")]).unwrap();
        assert!(rec.recommended_pilot.is_none());
        assert!(rec.all_matches.is_empty());
    }

    #[test]
    fn test_recommend_unknown_mission() {
        assert_eq!(
            recommend_pilot("PRJ404", &[], &[mission("High")]),
            Err(DomainError::MissionNotFound("PRJ404".to_string()))
        );
        assert_eq!(
            recommend_pilot("PRJ001", &[], &[]),
            Err(DomainError::MissionNotFound("PRJ001".to_string()))
        );
    }
}
