//! Assignment conflict scan
//!
//! Walks every assigned pilot, resolves the mission they are attached to and
//! flags each rule the assignment breaks. A single pilot can raise several
//! conflicts. The scan is all-or-nothing: a malformed mission date aborts it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Drone, Mission, Pilot, PilotStatus};

/// Fleet status that blocks a drone from flying its assigned mission
pub const MAINTENANCE_STATUS: &str = "Maintenance";

/// A flagged inconsistency between a pilot, a mission and/or a drone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Conflict {
    /// Pilot lacks one or more skills the mission requires
    #[serde(rename = "Skill Mismatch")]
    SkillMismatch { pilot: String, mission: String },

    /// Pilot lacks one or more certifications the mission requires
    #[serde(rename = "Certification Mismatch")]
    CertificationMismatch { pilot: String, mission: String },

    /// Pilot is still marked assigned to a mission that has not ended
    #[serde(rename = "Double Booking Risk")]
    DoubleBookingRisk { pilot: String, mission: String },

    /// A drone on the mission is in maintenance
    #[serde(rename = "Drone Maintenance Conflict")]
    DroneMaintenanceConflict { drone: String, mission: String },

    /// A drone on the mission is based somewhere other than the pilot
    #[serde(rename = "Location Mismatch")]
    LocationMismatch { pilot: String, drone: String },
}

/// Scan all assigned pilots for conflicts, evaluated at instant `now`.
///
/// Pilots without an assignment, or assigned to a project id no mission
/// carries, are skipped. When project ids repeat, the last mission read wins.
pub fn scan_conflicts(
    pilots: &[Pilot],
    drones: &[Drone],
    missions: &[Mission],
    now: NaiveDateTime,
) -> Result<Vec<Conflict>> {
    let mission_map: HashMap<&str, &Mission> = missions
        .iter()
        .map(|m| (m.project_id.as_str(), m))
        .collect();

    let mut conflicts = Vec::new();

    for pilot in pilots {
        let Some(assignment) = pilot.current_assignment.project_id() else {
            continue;
        };
        let Some(mission) = mission_map.get(assignment) else {
            continue;
        };

        if !mission.required_skills.is_subset(&pilot.skills) {
            conflicts.push(Conflict::SkillMismatch {
                pilot: pilot.name.clone(),
                mission: assignment.to_string(),
            });
        }

        if !mission.required_certs.is_subset(&pilot.certifications) {
            conflicts.push(Conflict::CertificationMismatch {
                pilot: pilot.name.clone(),
                mission: assignment.to_string(),
            });
        }

        let end_date = mission.end_date()?;
        if pilot.status == PilotStatus::Assigned && now < end_date {
            conflicts.push(Conflict::DoubleBookingRisk {
                pilot: pilot.name.clone(),
                mission: assignment.to_string(),
            });
        }

        let assigned_drones = drones
            .iter()
            .filter(|d| d.current_assignment.project_id() == Some(assignment));

        for drone in assigned_drones {
            if drone.status == MAINTENANCE_STATUS {
                conflicts.push(Conflict::DroneMaintenanceConflict {
                    drone: drone.drone_id.clone(),
                    mission: assignment.to_string(),
                });
            }

            if drone.location != pilot.location {
                conflicts.push(Conflict::LocationMismatch {
                    pilot: pilot.name.clone(),
                    drone: drone.drone_id.clone(),
                });
            }
        }
    }

    Ok(conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::model::{Assignment, MissionPriority};
    use crate::tokens::TokenSet;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 7)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn pilot(name: &str, status: PilotStatus, assignment: &str) -> Pilot {
        Pilot {
            name: name.to_string(),
            status,
            location: "Bangalore".to_string(),
            skills: TokenSet::parse("Mapping, Survey"),
            certifications: TokenSet::parse("DGCA, Night Ops"),
            current_assignment: Assignment::parse(assignment),
        }
    }

    fn mission(project_id: &str, end_date: &str) -> Mission {
        Mission {
            project_id: project_id.to_string(),
            location: "Bangalore".to_string(),
            required_skills: TokenSet::parse("Mapping"),
            required_certs: TokenSet::parse("DGCA"),
            end_date: end_date.to_string(),
            priority: MissionPriority::Other("High".to_string()),
        }
    }

    fn drone(id: &str, status: &str, location: &str, assignment: &str) -> Drone {
        Drone {
            drone_id: id.to_string(),
            status: status.to_string(),
            location: location.to_string(),
            current_assignment: Assignment::parse(assignment),
        }
    }

    #[test]
    fn test_clean_assignment_has_no_conflicts() {
        let pilots = vec![pilot("Arjun", PilotStatus::Available, "PRJ001")];
        let drones = vec![drone("D001", "Assigned", "Bangalore", "PRJ001")];
        let missions = vec![mission("PRJ001", "2026-02-10")];

        let conflicts = scan_conflicts(&pilots, &drones, &missions, now()).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_unassigned_sentinels_are_skipped() {
        let mut pilots = Vec::new();
        for (i, sentinel) in ["", "-", "\u{2013}"].iter().enumerate() {
            let mut p = pilot(&format!("P{i}"), PilotStatus::Assigned, sentinel);
            p.skills = TokenSet::parse("Nothing");
            pilots.push(p);
        }
        let drones = vec![drone("D001", "Maintenance", "Pune", "-")];
        let missions = vec![mission("-", "2026-12-31"), mission("", "2026-12-31")];

        let conflicts = scan_conflicts(&pilots, &drones, &missions, now()).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_unknown_mission_is_skipped() {
        let pilots = vec![pilot("Arjun", PilotStatus::Assigned, "PRJ404")];
        let missions = vec![mission("PRJ001", "not a date")];

        let conflicts = scan_conflicts(&pilots, &[], &missions, now()).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_skill_and_cert_mismatch() {
        let mut p = pilot("Neha", PilotStatus::Available, "PRJ002");
        p.skills = TokenSet::parse("Inspection");
        p.certifications = TokenSet::parse("Night Ops");
        let mut m = mission("PRJ002", "2026-02-10");
        m.required_skills = TokenSet::parse("Inspection, Thermal");

        let conflicts = scan_conflicts(&[p], &[], &[m], now()).unwrap();
        assert_eq!(
            conflicts,
            vec![
                Conflict::SkillMismatch {
                    pilot: "Neha".to_string(),
                    mission: "PRJ002".to_string(),
                },
                Conflict::CertificationMismatch {
                    pilot: "Neha".to_string(),
                    mission: "PRJ002".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_double_booking_requires_future_end_date() {
        let pilots = vec![pilot("Rohit", PilotStatus::Assigned, "PRJ001")];

        let future = scan_conflicts(&pilots, &[], &[mission("PRJ001", "2026-02-08")], now())
            .unwrap();
        assert_eq!(
            future,
            vec![Conflict::DoubleBookingRisk {
                pilot: "Rohit".to_string(),
                mission: "PRJ001".to_string(),
            }]
        );

        let past = scan_conflicts(&pilots, &[], &[mission("PRJ001", "2026-02-07")], now())
            .unwrap();
        assert!(past.is_empty());
    }

    #[test]
    fn test_double_booking_requires_assigned_status() {
        let pilots = vec![pilot("Rohit", PilotStatus::Available, "PRJ001")];
        let conflicts =
            scan_conflicts(&pilots, &[], &[mission("PRJ001", "2027-01-01")], now()).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_drone_maintenance_and_location_mismatch() {
        let pilots = vec![pilot("Arjun", PilotStatus::Available, "PRJ001")];
        let drones = vec![
            drone("D001", "Maintenance", "Bangalore", "PRJ001"),
            drone("D002", "Assigned", "Mumbai", " PRJ001 "),
            drone("D003", "Maintenance", "Mumbai", "PRJ009"),
            drone("D004", "maintenance", "Bangalore", "PRJ001"),
        ];
        let missions = vec![mission("PRJ001", "2026-01-01")];

        let conflicts = scan_conflicts(&pilots, &drones, &missions, now()).unwrap();
        assert_eq!(
            conflicts,
            vec![
                Conflict::DroneMaintenanceConflict {
                    drone: "D001".to_string(),
                    mission: "PRJ001".to_string(),
                },
                Conflict::LocationMismatch {
                    pilot: "Arjun".to_string(),
                    drone: "D002".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_pilot_can_raise_every_conflict() {
        let mut p = pilot("Kiran", PilotStatus::Assigned, "PRJ003");
        p.skills = TokenSet::parse("Survey");
        p.certifications = TokenSet::parse("Night Ops");
        let drones = vec![drone("D007", "Maintenance", "Chennai", "PRJ003")];

        let conflicts =
            scan_conflicts(&[p], &drones, &[mission("PRJ003", "2026-03-01")], now()).unwrap();
        let labels: Vec<_> = conflicts
            .iter()
            .map(|c| serde_json::to_value(c).unwrap()["type"].clone())
            .collect();
        assert_eq!(
            labels,
            [
                "Skill Mismatch",
                "Certification Mismatch",
                "Double Booking Risk",
                "Drone Maintenance Conflict",
                "Location Mismatch",
            ]
        );
    }

    #[test]
    fn test_malformed_end_date_fails_scan() {
        let pilots = vec![pilot("Arjun", PilotStatus::Available, "PRJ001")];
        let result = scan_conflicts(&pilots, &[], &[mission("PRJ001", "soon")], now());
        assert!(matches!(result, Err(DomainError::MalformedDate { .. })));
    }

    #[test]
    fn test_conflict_serializes_with_type_tag() {
        let conflict = Conflict::LocationMismatch {
            pilot: "Arjun".to_string(),
            drone: "D002".to_string(),
        };
        let json = serde_json::to_value(&conflict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Location Mismatch", "pilot": "Arjun", "drone": "D002"})
        );
    }
}
