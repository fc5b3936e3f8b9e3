use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::seniority::domain::{
    DistrictEquipmentTypeId, Equipment, EquipmentClassification, EquipmentId, EquipmentStatus,
    EquipmentType, EquipmentTypeId, LocalAreaId, Owner, OwnerId, RotationPointer,
};
use crate::workflows::seniority::repository::{
    EquipmentRepository, RepositoryError, RotationPointerSource, ScoreFormula,
};
use crate::workflows::seniority::rules::SeniorityScoringRules;
use crate::workflows::seniority::service::SeniorityListService;

pub(super) const LOCAL_AREA: LocalAreaId = LocalAreaId(10);
pub(super) const DISTRICT_TYPE: DistrictEquipmentTypeId = DistrictEquipmentTypeId(20);
pub(super) const EQUIPMENT_TYPE: EquipmentTypeId = EquipmentTypeId(30);
pub(super) const DUMP_TRUCK_TYPE: EquipmentTypeId = EquipmentTypeId(31);

pub(super) const RULES_DOCUMENT: &str = r#"{
    "EquipmentScore": { "Default": 50, "DumpTruck": 60 },
    "BlockSize": { "Default": 5, "DumpTruck": 3 },
    "TotalBlocks": { "Default": 2, "DumpTruck": 1 }
}"#;

pub(super) fn scoring_rules() -> SeniorityScoringRules {
    SeniorityScoringRules::from_document(RULES_DOCUMENT).expect("rule document parses")
}

pub(super) fn received(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn equipment(id: i32, owner_id: Option<i32>) -> Equipment {
    Equipment {
        id: EquipmentId(id),
        local_area_id: LOCAL_AREA,
        district_equipment_type_id: DISTRICT_TYPE,
        district_equipment_name: "Excavators".to_string(),
        equipment_code: format!("EC-{id:03}"),
        make: "Komatsu".to_string(),
        model: "PC210".to_string(),
        size: "20 tonne".to_string(),
        status: EquipmentStatus::Approved,
        classification: EquipmentClassification::Default,
        owner: owner_id.map(|id| Owner {
            id: OwnerId(id),
            organization_name: format!("Owner {id}"),
        }),
        received_date: received(2020, 1, 1),
        seniority: None,
        seniority_effective_date: None,
        block_number: None,
        number_in_block: None,
        years_of_service: 1.0,
        ytd_hours: 0.0,
        service_hours_last_year: 0.0,
        service_hours_two_years_ago: 0.0,
        service_hours_three_years_ago: 0.0,
    }
}

pub(super) fn scored(id: i32, owner_id: Option<i32>, score: f32) -> Equipment {
    let mut record = equipment(id, owner_id);
    record.seniority = Some(score);
    record
}

/// In-memory store implementing both repository traits so the service can
/// be exercised without external persistence.
#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) records: Mutex<HashMap<EquipmentId, Equipment>>,
    pub(super) types: Mutex<HashMap<EquipmentTypeId, EquipmentType>>,
    pub(super) pointers: Mutex<HashMap<LocalAreaId, RotationPointer>>,
}

impl MemoryRepository {
    pub(super) fn with_cohort(cohort: Vec<Equipment>) -> Self {
        let repository = Self::default();
        {
            let mut records = repository.records.lock().expect("records mutex poisoned");
            for record in cohort {
                records.insert(record.id, record);
            }
        }
        {
            let mut types = repository.types.lock().expect("types mutex poisoned");
            types.insert(
                EQUIPMENT_TYPE,
                EquipmentType {
                    id: EQUIPMENT_TYPE,
                    name: "Excavator".to_string(),
                    is_dump_truck: false,
                },
            );
            types.insert(
                DUMP_TRUCK_TYPE,
                EquipmentType {
                    id: DUMP_TRUCK_TYPE,
                    name: "Dump Truck".to_string(),
                    is_dump_truck: true,
                },
            );
        }
        repository
    }

    pub(super) fn record(&self, id: i32) -> Equipment {
        self.records
            .lock()
            .expect("records mutex poisoned")
            .get(&EquipmentId(id))
            .cloned()
            .expect("record exists")
    }

    pub(super) fn set_pointer(&self, pointer: RotationPointer) {
        self.pointers
            .lock()
            .expect("pointers mutex poisoned")
            .insert(pointer.local_area_id, pointer);
    }
}

impl EquipmentRepository for MemoryRepository {
    fn equipment_type(
        &self,
        id: EquipmentTypeId,
    ) -> Result<Option<EquipmentType>, RepositoryError> {
        Ok(self
            .types
            .lock()
            .expect("types mutex poisoned")
            .get(&id)
            .cloned())
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

impl RotationPointerSource for MemoryRepository {
    fn rotation_pointer(
        &self,
        local_area: LocalAreaId,
    ) -> Result<Option<RotationPointer>, RepositoryError> {
        Ok(self
            .pointers
            .lock()
            .expect("pointers mutex poisoned")
            .get(&local_area)
            .cloned())
    }
}

/// Repository that fails every call, for error-path coverage.
pub(super) struct UnavailableRepository;

impl EquipmentRepository for UnavailableRepository {
    fn equipment_type(
        &self,
        _id: EquipmentTypeId,
    ) -> Result<Option<EquipmentType>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn cohort(
        &self,
        _local_area: LocalAreaId,
        _district_equipment_type: DistrictEquipmentTypeId,
        _status: Option<EquipmentStatus>,
    ) -> Result<Vec<Equipment>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _equipment: Equipment) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

impl RotationPointerSource for UnavailableRepository {
    fn rotation_pointer(
        &self,
        _local_area: LocalAreaId,
    ) -> Result<Option<RotationPointer>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Formula multiplying years of service by the category weight, so tests
/// can steer scores through `years_of_service`.
pub(super) struct WeightedYearsFormula;

impl ScoreFormula for WeightedYearsFormula {
    fn score(&self, equipment: &Equipment, weight: i32) -> f32 {
        equipment.years_of_service * weight as f32
    }
}

pub(super) fn service(
    cohort: Vec<Equipment>,
) -> (
    SeniorityListService<MemoryRepository, MemoryRepository, WeightedYearsFormula>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::with_cohort(cohort));
    let service = SeniorityListService::new(
        repository.clone(),
        repository.clone(),
        Arc::new(WeightedYearsFormula),
        scoring_rules(),
    );
    (service, repository)
}
