use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use hire_rotation::config::ScoringConfig;
use hire_rotation::error::AppError;
use hire_rotation::workflows::seniority::domain::{
    DistrictEquipmentTypeId, Equipment, EquipmentId, EquipmentStatus, EquipmentType,
    EquipmentTypeId, LocalAreaId, RotationPointer,
};
use hire_rotation::workflows::seniority::repository::{
    EquipmentRepository, RepositoryError, RotationPointerSource, ScoreFormula,
};
use hire_rotation::workflows::seniority::SeniorityScoringRules;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Bundled rule document used when `APP_SCORING_RULES` is not set.
pub(crate) const DEFAULT_SCORING_RULES: &str = r#"{
    "EquipmentScore": { "Default": 50, "DumpTruck": 60 },
    "BlockSize": { "Default": 10, "DumpTruck": 10 },
    "TotalBlocks": { "Default": 1, "DumpTruck": 2 }
}"#;

pub(crate) fn scoring_rules(config: &ScoringConfig) -> Result<SeniorityScoringRules, AppError> {
    let document = config
        .rules_document
        .as_deref()
        .unwrap_or(DEFAULT_SCORING_RULES);
    SeniorityScoringRules::from_document(document).map_err(AppError::from)
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEquipmentRepository {
    records: Arc<Mutex<HashMap<EquipmentId, Equipment>>>,
    types: Arc<Mutex<HashMap<EquipmentTypeId, EquipmentType>>>,
    pointers: Arc<Mutex<HashMap<LocalAreaId, RotationPointer>>>,
}

impl InMemoryEquipmentRepository {
    pub(crate) fn seed_equipment(&self, cohort: Vec<Equipment>) {
        let mut records = self.records.lock().expect("records mutex poisoned");
        for record in cohort {
            records.insert(record.id, record);
        }
    }

    pub(crate) fn seed_type(&self, equipment_type: EquipmentType) {
        let mut types = self.types.lock().expect("types mutex poisoned");
        types.insert(equipment_type.id, equipment_type);
    }

    pub(crate) fn set_pointer(&self, pointer: RotationPointer) {
        let mut pointers = self.pointers.lock().expect("pointers mutex poisoned");
        pointers.insert(pointer.local_area_id, pointer);
    }
}

impl EquipmentRepository for InMemoryEquipmentRepository {
    fn equipment_type(
        &self,
        id: EquipmentTypeId,
    ) -> Result<Option<EquipmentType>, RepositoryError> {
        let types = self.types.lock().expect("types mutex poisoned");
        Ok(types.get(&id).cloned())
    }

    fn cohort(
        &self,
        local_area: LocalAreaId,
        district_equipment_type: DistrictEquipmentTypeId,
        status: Option<EquipmentStatus>,
    ) -> Result<Vec<Equipment>, RepositoryError> {
        let records = self.records.lock().expect("records mutex poisoned");
        let mut cohort: Vec<Equipment> = records
            .values()
            .filter(|record| {
                record.local_area_id == local_area
                    && record.district_equipment_type_id == district_equipment_type
                    && status.map_or(true, |status| record.status == status)
            })
            .cloned()
            .collect();
        cohort.sort_by_key(|record| record.id.0);
        Ok(cohort)
    }

    fn update(&self, equipment: Equipment) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("records mutex poisoned");
        records.insert(equipment.id, equipment);
        Ok(())
    }
}

impl RotationPointerSource for InMemoryEquipmentRepository {
    fn rotation_pointer(
        &self,
        local_area: LocalAreaId,
    ) -> Result<Option<RotationPointer>, RepositoryError> {
        let pointers = self.pointers.lock().expect("pointers mutex poisoned");
        Ok(pointers.get(&local_area).cloned())
    }
}

/// Demo formula: years of service weighted by the category score, plus
/// the average of the last three years of service hours.
#[derive(Default)]
pub(crate) struct ServiceHoursFormula;

impl ScoreFormula for ServiceHoursFormula {
    fn score(&self, equipment: &Equipment, weight: i32) -> f32 {
        let average_hours = (equipment.service_hours_last_year
            + equipment.service_hours_two_years_ago
            + equipment.service_hours_three_years_ago)
            / 3.0;
        equipment.years_of_service * weight as f32 + average_hours
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
