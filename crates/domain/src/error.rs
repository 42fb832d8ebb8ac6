//! Domain errors
//!
//! Pure domain errors with no infrastructure dependencies

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing field `{field}` on {entity} record")]
    MissingField { entity: &'static str, field: String },

    #[error("Malformed date `{value}` for mission {project_id}")]
    MalformedDate { project_id: String, value: String },

    #[error("Mission not found: {0}")]
    MissionNotFound(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
