//! Seniority list engine for hired equipment call-out rotations.
//!
//! Ranks a local area × district equipment type cohort by seniority
//! score, partitions the ranking into fixed-capacity rotation blocks with
//! a one-slot-per-owner rule and a trailing uncapped open block, and
//! projects the result into list entries carrying call-out markers.

mod blocks;
pub mod domain;
pub mod projection;
pub mod repository;
pub mod roster;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    DistrictEquipmentTypeId, Equipment, EquipmentClassification, EquipmentId, EquipmentStatus,
    EquipmentType, EquipmentTypeId, LocalAreaId, Owner, OwnerId, RotationPointer,
};
pub use projection::{project, SeniorityListEntry, SeniorityListReport};
pub use repository::{
    EquipmentRepository, RepositoryError, RotationPointerSource, ScoreFormula,
};
pub use roster::{load_cohort, RosterImportError};
pub use router::{seniority_router, RecalculateRequest};
pub use rules::{
    RuleValues, ScoringParameters, ScoringRulesDocument, ScoringRulesError, SeniorityScoringRules,
};
pub use service::{RecalculationOutcome, SeniorityListService, SeniorityServiceError};
