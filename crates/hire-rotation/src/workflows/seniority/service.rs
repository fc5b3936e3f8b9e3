use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::blocks;
use super::domain::{DistrictEquipmentTypeId, EquipmentStatus, EquipmentTypeId, LocalAreaId};
use super::projection::{self, SeniorityListEntry, SeniorityListReport};
use super::repository::{
    EquipmentRepository, RepositoryError, RotationPointerSource, ScoreFormula,
};
use super::rules::{ScoringRulesError, SeniorityScoringRules};

/// Service composing the repository, rotation pointer source, and the
/// external score formula around the scoring rules registry.
///
/// One invocation covers one cohort (local area × district equipment
/// type) start to finish; callers own any cross-cohort serialization.
pub struct SeniorityListService<R, P, F> {
    repository: Arc<R>,
    pointers: Arc<P>,
    formula: Arc<F>,
    rules: SeniorityScoringRules,
}

/// Summary of a recalculation pass over one cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecalculationOutcome {
    pub skipped: bool,
    pub rescored: usize,
    pub cleared: usize,
    pub placed: usize,
}

impl RecalculationOutcome {
    const fn skipped() -> Self {
        Self {
            skipped: true,
            rescored: 0,
            cleared: 0,
            placed: 0,
        }
    }
}

impl<R, P, F> SeniorityListService<R, P, F>
where
    R: EquipmentRepository + 'static,
    P: RotationPointerSource + 'static,
    F: ScoreFormula + 'static,
{
    pub fn new(
        repository: Arc<R>,
        pointers: Arc<P>,
        formula: Arc<F>,
        rules: SeniorityScoringRules,
    ) -> Self {
        Self {
            repository,
            pointers,
            formula,
            rules,
        }
    }

    pub fn rules(&self) -> &SeniorityScoringRules {
        &self.rules
    }

    /// Recalculate seniority for one cohort, then re-run block assignment.
    ///
    /// An unresolvable equipment type is a documented no-op, not an error:
    /// the outcome comes back marked `skipped`. Mutations persisted before
    /// a failure are not rolled back; re-running the cohort restores a
    /// consistent state.
    pub fn recalculate(
        &self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
        equipment_type: EquipmentTypeId,
    ) -> Result<RecalculationOutcome, SeniorityServiceError> {
        let Some(type_record) = self
            .repository
            .equipment_type(equipment_type)
            .map_err(SeniorityServiceError::RecalculationFailed)?
        else {
            warn!(
                equipment_type_id = equipment_type.0,
                local_area_id = local_area.0,
                "equipment type not found; skipping seniority recalculation"
            );
            return Ok(RecalculationOutcome::skipped());
        };

        let parameters = self.rules.parameters(type_record.classification())?;

        let cohort = self
            .repository
            .cohort(local_area, district_equipment_type, None)
            .map_err(SeniorityServiceError::RecalculationFailed)?;

        let effective_date = Utc::now();
        let mut rescored = 0;
        let mut cleared = 0;

        for mut equipment in cohort {
            if equipment.status == EquipmentStatus::Approved {
                equipment.seniority =
                    Some(self.formula.score(&equipment, parameters.equipment_score));
                rescored += 1;
            } else {
                equipment.clear_seniority();
                cleared += 1;
            }
            equipment.seniority_effective_date = Some(effective_date);

            self.repository
                .update(equipment)
                .map_err(SeniorityServiceError::RecalculationFailed)?;
        }

        let placed = self.assign_blocks(
            local_area,
            district_equipment_type,
            parameters.block_size,
            parameters.total_blocks,
        )?;

        info!(
            local_area_id = local_area.0,
            district_equipment_type_id = district_equipment_type.0,
            rescored,
            cleared,
            placed,
            "seniority list recalculated"
        );

        Ok(RecalculationOutcome {
            skipped: false,
            rescored,
            cleared,
            placed,
        })
    }

    /// Rank the Approved cohort and distribute it into rotation blocks.
    ///
    /// Mutated records are persisted once the pass completes; a record's
    /// own (block, position) pairing is valid in isolation, so a mid-pass
    /// failure leaves no individually inconsistent rows behind.
    pub fn assign_blocks(
        &self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
        block_size: i32,
        total_blocks: i32,
    ) -> Result<usize, SeniorityServiceError> {
        let mut cohort = self
            .repository
            .cohort(
                local_area,
                district_equipment_type,
                Some(EquipmentStatus::Approved),
            )
            .map_err(SeniorityServiceError::AssignmentFailed)?;

        blocks::rank(&mut cohort);
        let placed = blocks::place(&mut cohort, block_size, total_blocks);

        for equipment in cohort {
            if equipment.owner.is_some() {
                self.repository
                    .update(equipment)
                    .map_err(SeniorityServiceError::AssignmentFailed)?;
            }
        }

        Ok(placed)
    }

    /// Project the Approved cohort into list entries, ordered by block and
    /// position, with call-out markers resolved from the rotation pointer.
    pub fn seniority_list(
        &self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
    ) -> Result<Vec<SeniorityListEntry>, SeniorityServiceError> {
        let mut cohort = self.repository.cohort(
            local_area,
            district_equipment_type,
            Some(EquipmentStatus::Approved),
        )?;

        let pointer = self.pointers.rotation_pointer(local_area)?;

        cohort.sort_by_key(|equipment| {
            projection::seniority_sort_order(
                equipment.block_number.unwrap_or(0),
                equipment.number_in_block.unwrap_or(0),
            )
        });

        let entries = cohort
            .iter()
            .map(|equipment| projection::project(equipment, &self.rules, pointer.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Build the report payload handed to external document rendering.
    pub fn seniority_report(
        &self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
        today: NaiveDate,
    ) -> Result<SeniorityListReport, SeniorityServiceError> {
        let entries = self.seniority_list(local_area, district_equipment_type)?;
        Ok(SeniorityListReport::new(today, entries))
    }

    /// Shift the Approved cohort's service-hour history one year forward,
    /// bump years of service, then run the full recalculation.
    pub fn annual_rollover(
        &self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
        equipment_type: EquipmentTypeId,
    ) -> Result<RecalculationOutcome, SeniorityServiceError> {
        let cohort = self
            .repository
            .cohort(
                local_area,
                district_equipment_type,
                Some(EquipmentStatus::Approved),
            )
            .map_err(SeniorityServiceError::RecalculationFailed)?;

        for mut equipment in cohort {
            equipment.service_hours_three_years_ago = equipment.service_hours_two_years_ago;
            equipment.service_hours_two_years_ago = equipment.service_hours_last_year;
            equipment.service_hours_last_year = equipment.ytd_hours;
            equipment.ytd_hours = 0.0;
            equipment.years_of_service += 1.0;

            self.repository
                .update(equipment)
                .map_err(SeniorityServiceError::RecalculationFailed)?;
        }

        self.recalculate(local_area, district_equipment_type, equipment_type)
    }
}

/// Error raised by the seniority list service.
#[derive(Debug, thiserror::Error)]
pub enum SeniorityServiceError {
    #[error("seniority recalculation failed: {0}")]
    RecalculationFailed(#[source] RepositoryError),
    #[error("block assignment failed: {0}")]
    AssignmentFailed(#[source] RepositoryError),
    #[error(transparent)]
    Rules(#[from] ScoringRulesError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
