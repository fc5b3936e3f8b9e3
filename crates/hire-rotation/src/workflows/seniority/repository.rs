use super::domain::{
    DistrictEquipmentTypeId, Equipment, EquipmentStatus, EquipmentType, EquipmentTypeId,
    LocalAreaId, RotationPointer,
};

/// Storage abstraction so the seniority workflow can be exercised in
/// isolation from the surrounding application's persistence layer.
///
/// `cohort` returns every equipment record matching the local area and
/// district equipment type, optionally narrowed to a status; owner
/// references are expected to arrive populated.
pub trait EquipmentRepository: Send + Sync {
    fn equipment_type(
        &self,
        id: EquipmentTypeId,
    ) -> Result<Option<EquipmentType>, RepositoryError>;

    fn cohort(
        &self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
        status: Option<EquipmentStatus>,
    ) -> Result<Vec<Equipment>, RepositoryError>;

    fn update(&self, equipment: Equipment) -> Result<(), RepositoryError>;
}

/// Read access to the per-area call-out rotation pointer.
pub trait RotationPointerSource: Send + Sync {
    fn rotation_pointer(
        &self,
        local_area: LocalAreaId,
    ) -> Result<Option<RotationPointer>, RepositoryError>;
}

/// External seniority-score formula; opaque to the workflow.
pub trait ScoreFormula: Send + Sync {
    fn score(&self, equipment: &Equipment, weight: i32) -> f32;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
